// src/backends/mock.rs

use crate::backends::{BackendEvent, Driver, RenderCommand};
use crate::geometry::Point2D;
use anyhow::Result;

/// Headless driver for tests: queued input, settable pointer, and a record of
/// everything drawn.
pub struct MockDriver {
    events: Vec<BackendEvent>,
    pointer: Point2D,
    render_commands: Vec<RenderCommand>,
    frames: Vec<Vec<RenderCommand>>,
    cleaned_up: bool,
}

impl MockDriver {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            pointer: Point2D::ZERO,
            render_commands: Vec::new(),
            frames: Vec::new(),
            cleaned_up: false,
        }
    }

    pub fn push_event(&mut self, event: BackendEvent) {
        self.events.push(event);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Point2D::new(x, y);
    }

    /// Commands of every presented frame, oldest first.
    pub fn presented_frames(&self) -> &[Vec<RenderCommand>] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&[RenderCommand]> {
        self.frames.last().map(Vec::as_slice)
    }

    pub fn is_cleaned_up(&self) -> bool {
        self.cleaned_up
    }
}

impl Driver for MockDriver {
    fn process_events(&mut self) -> Result<Vec<BackendEvent>> {
        Ok(self.events.drain(..).collect())
    }

    fn pointer_position(&self) -> Result<Point2D> {
        Ok(self.pointer)
    }

    fn execute_render_commands(&mut self, commands: Vec<RenderCommand>) -> Result<()> {
        self.render_commands.extend(commands);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.render_commands));
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.cleaned_up = true;
        Ok(())
    }
}
