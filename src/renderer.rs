// src/renderer.rs

//! Translates the animation state of one frame into `RenderCommand`s.
//!
//! The renderer knows nothing about Xlib; it produces an ordered command
//! list and hands it to whatever `Driver` it is given.

use crate::backends::{Driver, PixelPoint, RenderCommand};
use crate::config::ColorScheme;
use crate::curve::CurveSample;
use crate::trail::Trail;
use crate::view::ViewTransform;

use anyhow::{Context, Result};
use log::trace;

/// Radius of the dot drawn for every trail point.
pub const TRAIL_POINT_RADIUS: u32 = 1;
/// Stroke width of the derivative vectors.
pub const VECTOR_LINE_WIDTH: u32 = 3;

pub struct Renderer {
    colors: ColorScheme,
}

impl Renderer {
    pub fn new(colors: ColorScheme) -> Self {
        Self { colors }
    }

    /// Builds the command list for one frame:
    ///
    /// 1. clear to the background colour,
    /// 2. one dot per trail point, oldest first,
    /// 3. the second-derivative vector, anchored at the curve point,
    /// 4. the first-derivative vector, drawn last so it sits on top.
    pub fn frame_commands(
        &self,
        view: &ViewTransform,
        trail: &Trail,
        sample: &CurveSample,
    ) -> Vec<RenderCommand> {
        let mut commands = Vec::with_capacity(trail.len() + 3);
        commands.push(RenderCommand::ClearAll {
            bg: self.colors.background,
        });

        commands.extend(trail.iter().map(|&p| RenderCommand::DrawPoint {
            at: PixelPoint::round(view.to_device(p)),
            color: self.colors.trail,
            radius: TRAIL_POINT_RADIUS,
        }));

        let anchor = PixelPoint::round(view.to_device(sample.position));
        let first_tip = PixelPoint::round(view.to_device(sample.position + sample.velocity));
        let second_tip =
            PixelPoint::round(view.to_device(sample.position + sample.acceleration));

        commands.push(RenderCommand::DrawLine {
            from: anchor,
            to: second_tip,
            color: self.colors.second_derivative,
            width: VECTOR_LINE_WIDTH,
        });
        commands.push(RenderCommand::DrawLine {
            from: anchor,
            to: first_tip,
            color: self.colors.first_derivative,
            width: VECTOR_LINE_WIDTH,
        });
        commands
    }

    /// Draws the frame with `driver` and presents it.
    pub fn draw(
        &self,
        driver: &mut dyn Driver,
        view: &ViewTransform,
        trail: &Trail,
        sample: &CurveSample,
    ) -> Result<()> {
        let commands = self.frame_commands(view, trail, sample);
        trace!(
            "Renderer: s={} with {} commands",
            sample.s,
            commands.len()
        );
        driver
            .execute_render_commands(commands)
            .context("Failed to draw frame")?;
        driver.present().context("Failed to present frame")
    }
}
