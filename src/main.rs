// src/main.rs

pub mod animator;
pub mod backends;
pub mod clock;
pub mod color;
pub mod config;
pub mod curve;
pub mod derivative;
pub mod error;
pub mod geometry;
pub mod renderer;
pub mod trail;
pub mod view;

use crate::{
    animator::CurveAnimator,
    config::CONFIG,
    curve::{Curve, ExampleCurve},
};

use anyhow::{anyhow, Context};
use log::{error, info};

const DEFAULT_CURVE: ExampleCurve = ExampleCurve::Astroid;

/// Picks the curve named by the first command-line argument.
fn curve_from_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<ExampleCurve> {
    let Some(name) = args.next() else {
        return Ok(DEFAULT_CURVE);
    };
    ExampleCurve::from_name(&name).ok_or_else(|| {
        let valid: Vec<&str> = ExampleCurve::ALL.iter().map(|c| c.name()).collect();
        anyhow!(
            "unknown curve '{}' (expected one of: {})",
            name,
            valid.join(", ")
        )
    })
}

/// Entry point for `curve-trace [CURVE]`.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting curve-trace...");

    let curve = curve_from_args(std::env::args().skip(1))?;
    let start = curve
        .evaluate(0.0)
        .with_context(|| format!("Curve '{}' is undefined at s=0", curve.name()))?;
    info!("Tracing the {} starting at {:?}", curve.name(), start);

    let animator = CurveAnimator::configure(curve, CONFIG.animator_config())
        .context("Invalid animation configuration")?
        .with_colors(CONFIG.colors.clone())
        .with_title(CONFIG.window.title.clone());

    if let Err(e) = animator.run() {
        error!("curve-trace stopped with an error: {}", e);
        return Err(e).context("Animation failed");
    }

    info!("curve-trace finished.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn no_argument_selects_the_astroid() {
        assert_eq!(curve_from_args(args(&[])).unwrap(), ExampleCurve::Astroid);
    }

    #[test]
    fn curve_is_selected_by_name() {
        assert_eq!(
            curve_from_args(args(&["circle"])).unwrap(),
            ExampleCurve::Circle
        );
    }

    #[test]
    fn unknown_curve_lists_the_valid_names() {
        let err = curve_from_args(args(&["spiral"])).unwrap_err().to_string();
        assert!(err.contains("spiral"));
        assert!(err.contains("circle, astroid, lemniscate"));
    }
}
