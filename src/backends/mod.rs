// src/backends/mod.rs

//! Defines the `Driver` trait for window/input backends and the types shared
//! between backends and the renderer: `BackendEvent`, `MouseButton` and
//! `RenderCommand`.

use crate::color::NamedColor;
use crate::geometry::Point2D;
use anyhow::Result;

#[cfg(test)]
pub mod mock;
pub mod x11;

pub use self::x11::XDriver;

/// Represents mouse buttons.
///
/// The scroll variants follow the labels the wheel buttons have always had in
/// this program: `ScrollDown` zooms in, `ScrollUp` zooms out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
    Other(u8),
}

/// Events originating from the backend, delivered in FIFO order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// The user asked to close the window.
    CloseRequested,
    MouseButtonPress { button: MouseButton, x: i32, y: i32 },
    MouseButtonRelease { button: MouseButton, x: i32, y: i32 },
}

/// A whole-pixel device coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rounds to the nearest pixel. Out-of-range and NaN coordinates
    /// saturate rather than wrap.
    pub fn round(p: Point2D) -> Self {
        Self {
            x: p.x.round() as i32,
            y: p.y.round() as i32,
        }
    }
}

/// Backend-agnostic drawing commands, executed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Fills the whole surface with `bg`.
    ClearAll { bg: NamedColor },
    /// A filled dot of the given radius centred on `at`.
    DrawPoint {
        at: PixelPoint,
        color: NamedColor,
        radius: u32,
    },
    DrawLine {
        from: PixelPoint,
        to: PixelPoint,
        color: NamedColor,
        width: u32,
    },
}

/// The window, input and drawing surface used by the animator.
///
/// Window creation happens in the implementation's constructor; release
/// happens in `cleanup()` and, as a fallback, on `Drop`.
pub trait Driver {
    /// Drains pending native events without blocking.
    fn process_events(&mut self) -> Result<Vec<BackendEvent>>;

    /// Current pointer position in window pixels.
    fn pointer_position(&self) -> Result<Point2D>;

    /// Draws into the back surface; nothing is visible until `present()`.
    fn execute_render_commands(&mut self, commands: Vec<RenderCommand>) -> Result<()>;

    /// Shows the composed frame.
    fn present(&mut self) -> Result<()>;

    /// Releases window and device resources. Safe to call more than once.
    fn cleanup(&mut self) -> Result<()>;
}
