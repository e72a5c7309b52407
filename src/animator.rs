// src/animator.rs
//! Runs the interactive session: advances the curve parameter, keeps the
//! trail, applies pan/zoom input and renders every frame.
//!
//! All mutable state lives in one `Session` owned by the `CurveAnimator`, and
//! all I/O goes through the `Driver` and `FrameClock` traits, so the whole
//! frame cycle can be driven headless in tests.

use crate::backends::{BackendEvent, Driver, MouseButton, XDriver};
use crate::clock::{FrameClock, SimulationClock, SleepClock};
use crate::config::ColorScheme;
use crate::curve::{Curve, CurveSample};
use crate::error::AnimatorError;
use crate::geometry::Point2D;
use crate::renderer::Renderer;
use crate::trail::Trail;
use crate::view::ViewTransform;

use anyhow::Context;
use log::{debug, error, info, trace};

const DEFAULT_TITLE: &str = "curve-trace";

/// Parameters of one animation session.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    /// Initial zoom, device pixels per curve unit. Must be positive.
    pub scale: f64,
    pub window_width: u32,
    pub window_height: u32,
    /// Parameter step per frame. Must be positive.
    pub ds: f64,
    /// Target frame rate; 0 means uncapped.
    pub fps: u32,
    /// Trail capacity. Must be at least 1.
    pub max_hist: usize,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        AnimatorConfig {
            scale: 1.0,
            window_width: 800,
            window_height: 600,
            ds: 0.05,
            fps: 30,
            max_hist: 200,
        }
    }
}

impl AnimatorConfig {
    pub fn validate(&self) -> Result<(), AnimatorError> {
        let invalid = |msg: String| Err(AnimatorError::InvalidConfiguration(msg));

        if !(self.ds.is_finite() && self.ds > 0.0) {
            return invalid(format!("ds must be a positive real number, got {}", self.ds));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return invalid(format!(
                "scale must be a positive real number, got {}",
                self.scale
            ));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return invalid(format!(
                "window dimensions must be positive, got {}x{}",
                self.window_width, self.window_height
            ));
        }
        if self.max_hist == 0 {
            return invalid("max_hist must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Whether the frame loop should keep going.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AnimatorStatus {
    Running,
    /// Terminal: a quit event was observed.
    Stopped,
}

/// Pointer drag state. Only button-up events clear `dragging`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    pub dragging: bool,
    pub last_pointer: Point2D,
}

/// Everything that changes from frame to frame.
#[derive(Debug, Clone)]
pub struct Session {
    pub clock: SimulationClock,
    pub view: ViewTransform,
    pub trail: Trail,
    pub input: InputState,
    pub status: AnimatorStatus,
}

impl Session {
    /// `config` must already be validated.
    fn new(config: &AnimatorConfig) -> Result<Self, AnimatorError> {
        let view = ViewTransform::centered(config.window_width, config.window_height, config.scale)
            .ok_or_else(|| {
                AnimatorError::InvalidConfiguration(format!("invalid scale {}", config.scale))
            })?;
        Ok(Session {
            clock: SimulationClock::new(config.ds),
            view,
            trail: Trail::with_capacity(config.max_hist),
            input: InputState {
                dragging: false,
                last_pointer: view.origin,
            },
            status: AnimatorStatus::Running,
        })
    }

    pub fn handle_event(&mut self, event: &BackendEvent) {
        debug!("Session: handling {:?}", event);
        match *event {
            BackendEvent::CloseRequested => {
                info!("Session: quit requested at s={}", self.clock.s);
                self.status = AnimatorStatus::Stopped;
            }
            BackendEvent::MouseButtonPress { button, .. } => match button {
                MouseButton::ScrollDown => self.view.zoom_in(),
                MouseButton::ScrollUp => self.view.zoom_out(),
                MouseButton::Left => self.input.dragging = true,
                _ => {}
            },
            BackendEvent::MouseButtonRelease {
                button: MouseButton::Left,
                ..
            } => self.input.dragging = false,
            BackendEvent::MouseButtonRelease { .. } => {}
        }
    }

    /// Evaluates the curve and its derivatives at the current `s` and appends
    /// the curve point to the trail.
    ///
    /// Derivatives use half the frame step so the second difference is
    /// centred on `s`.
    pub fn sample<C: Curve + ?Sized>(&mut self, curve: &C) -> Result<CurveSample, AnimatorError> {
        let s = self.clock.s;
        let position = curve
            .evaluate(s)
            .map_err(|source| AnimatorError::CurveEvaluation { s, source })?;
        self.trail.push(position);

        let half_step = self.clock.ds / 2.0;
        let velocity = curve.derivative(s, half_step, 1)?;
        let acceleration = curve.derivative(s, half_step, 2)?;
        Ok(CurveSample {
            s,
            position,
            velocity,
            acceleration,
        })
    }
}

/// Drives one curve through the frame loop.
pub struct CurveAnimator<C> {
    curve: C,
    config: AnimatorConfig,
    title: String,
    renderer: Renderer,
    session: Session,
}

impl<C: Curve> CurveAnimator<C> {
    /// Validates `config` and sets up the session. No window is opened here,
    /// so an invalid configuration never acquires display resources.
    pub fn configure(curve: C, config: AnimatorConfig) -> Result<Self, AnimatorError> {
        config.validate()?;
        let session = Session::new(&config)?;
        info!(
            "CurveAnimator configured: {}x{} px, scale={}, ds={}, fps={}, max_hist={}",
            config.window_width,
            config.window_height,
            config.scale,
            config.ds,
            config.fps,
            config.max_hist
        );
        Ok(Self {
            curve,
            config,
            title: DEFAULT_TITLE.to_string(),
            renderer: Renderer::new(ColorScheme::default()),
            session,
        })
    }

    pub fn with_colors(mut self, colors: ColorScheme) -> Self {
        self.renderer = Renderer::new(colors);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> AnimatorStatus {
        self.session.status
    }

    /// Opens the X11 window, runs until quit, and releases the window on
    /// every exit path.
    pub fn run(mut self) -> Result<(), AnimatorError> {
        let mut driver = XDriver::new(
            self.config.window_width,
            self.config.window_height,
            &self.title,
        )
        .context("Failed to initialize X11 driver")
        .map_err(AnimatorError::Driver)?;
        let mut clock = SleepClock::new();

        let result = self.run_with(&mut driver, &mut clock);

        if let Err(e) = driver.cleanup() {
            error!("Failed to release X11 resources: {:#}", e);
            if result.is_ok() {
                return Err(AnimatorError::Driver(e));
            }
        }
        result
    }

    /// Runs frames on the given collaborators until quit or a fatal error.
    pub fn run_with(
        &mut self,
        driver: &mut dyn Driver,
        clock: &mut dyn FrameClock,
    ) -> Result<(), AnimatorError> {
        self.session.input.last_pointer = driver
            .pointer_position()
            .context("Failed to read initial pointer position")
            .map_err(AnimatorError::Driver)?;

        info!("Starting frame loop...");
        loop {
            match self.process_frame(driver, clock) {
                Ok(AnimatorStatus::Running) => {}
                Ok(AnimatorStatus::Stopped) => {
                    info!(
                        "Frame loop stopped at s={} (scale={}).",
                        self.session.clock.s,
                        self.session.view.scale()
                    );
                    return Ok(());
                }
                Err(e) => {
                    error!("Fatal error in frame loop: {}", e);
                    return Err(e);
                }
            }
        }
    }

    /// Runs exactly one frame.
    ///
    /// A quit event does not cut the frame short: the frame is drawn, presented
    /// and `s` advanced before `Stopped` is returned. Once stopped, further
    /// calls do nothing.
    pub fn process_frame(
        &mut self,
        driver: &mut dyn Driver,
        clock: &mut dyn FrameClock,
    ) -> Result<AnimatorStatus, AnimatorError> {
        if self.session.status == AnimatorStatus::Stopped {
            return Ok(AnimatorStatus::Stopped);
        }

        clock.tick(self.config.fps);

        let previous_pointer = self.session.input.last_pointer;
        let pointer = driver
            .pointer_position()
            .context("Failed to read pointer position")
            .map_err(AnimatorError::Driver)?;
        self.session.input.last_pointer = pointer;

        let events = driver
            .process_events()
            .context("Failed to poll input events")
            .map_err(AnimatorError::Driver)?;
        for event in &events {
            self.session.handle_event(event);
        }

        if self.session.input.dragging {
            self.session.view.pan(pointer - previous_pointer);
        }

        let sample = self.session.sample(&self.curve)?;
        trace!(
            "Frame s={}: position={:?} velocity={:?} acceleration={:?}",
            sample.s,
            sample.position,
            sample.velocity,
            sample.acceleration
        );

        self.renderer
            .draw(
                driver,
                &self.session.view,
                &self.session.trail,
                &sample,
            )
            .map_err(AnimatorError::Driver)?;

        self.session.clock.advance();
        Ok(self.session.status)
    }
}
