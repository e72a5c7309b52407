// src/error.rs

//! Error types for curve evaluation, numerical differentiation and the
//! animation session.

use thiserror::Error;

/// Failure while evaluating a user-supplied curve at a single parameter value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("curve produced a non-finite point ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
    #[error("{0}")]
    Domain(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DerivativeError {
    #[error("derivative order must be >= 0, got {0}")]
    InvalidOrder(i32),
    #[error("step size must be non-zero and finite, got {0}")]
    InvalidStep(f64),
    #[error("curve evaluation failed at s = {s}: {source}")]
    CurveEvaluation {
        s: f64,
        #[source]
        source: CurveError,
    },
}

#[derive(Error, Debug)]
pub enum AnimatorError {
    /// Rejected before any window or device resource is acquired.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("curve evaluation failed at s = {s}: {source}")]
    CurveEvaluation {
        s: f64,
        #[source]
        source: CurveError,
    },
    /// `InvalidOrder`/`InvalidStep` from the derivative engine. The animator
    /// only asks for orders 1 and 2 with a positive step, so this is a defect.
    #[error("derivative engine rejected its input: {0}")]
    Derivative(DerivativeError),
    #[error("display driver failure: {0:#}")]
    Driver(#[source] anyhow::Error),
}

impl From<DerivativeError> for AnimatorError {
    fn from(err: DerivativeError) -> Self {
        match err {
            DerivativeError::CurveEvaluation { s, source } => {
                AnimatorError::CurveEvaluation { s, source }
            }
            other => AnimatorError::Derivative(other),
        }
    }
}
