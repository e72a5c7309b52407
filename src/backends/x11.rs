// src/backends/x11.rs

//! Xlib implementation of `Driver`.
//!
//! Frames are drawn into an off-screen pixmap (the "slate") and copied to the
//! window on `present()`, so a half-drawn frame is never visible.

use log::{debug, error, info, trace, warn};

use crate::backends::{BackendEvent, Driver, MouseButton, PixelPoint, RenderCommand};
use crate::color::NamedColor;
use crate::geometry::Point2D;

use anyhow::{Context, Result};
use std::cell::Cell;
use std::ffi::CString;
use std::mem;
use std::ptr;

use libc::{c_char, c_int, c_uint, c_ulong};
use x11::xlib;

// --- Constants ---
/// Full circle in Xlib arc units (1/64 degree).
const FULL_CIRCLE_ARC: c_int = 360 * 64;

/// Scales an 8-bit channel to the 16-bit range XColor uses.
const fn channel_to_x(c: u8) -> u16 {
    ((c as u16) << 8) | (c as u16)
}

/// X protocol coordinates are 16-bit; anything further out is pinned to the edge.
fn clamp_coord(v: i32) -> c_int {
    v.clamp(i16::MIN as i32, i16::MAX as i32)
}

pub struct XDriver {
    display: *mut xlib::Display,
    screen: c_int,
    window: xlib::Window,
    slate: xlib::Pixmap,
    gc: xlib::GC,
    palette: [c_ulong; NamedColor::COUNT],
    width_px: u32,
    height_px: u32,
    wm_delete_window: xlib::Atom,
    protocols_atom: xlib::Atom,
    last_pointer: Cell<Point2D>,
}

impl XDriver {
    /// Opens the display and shows a fixed-size window.
    ///
    /// If any step fails, whatever was already created is released by `Drop`.
    pub fn new(width_px: u32, height_px: u32, title: &str) -> Result<Self> {
        info!("XDriver::new() - opening {}x{} window", width_px, height_px);

        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(anyhow::anyhow!(
                "Failed to open X11 display. Is DISPLAY set?"
            ));
        }
        let screen = unsafe { xlib::XDefaultScreen(display) };

        let mut driver = XDriver {
            display,
            screen,
            window: 0,
            slate: 0,
            gc: ptr::null_mut(),
            palette: [0; NamedColor::COUNT],
            width_px,
            height_px,
            wm_delete_window: 0,
            protocols_atom: 0,
            last_pointer: Cell::new(Point2D::new(
                f64::from(width_px / 2),
                f64::from(height_px / 2),
            )),
        };

        driver.alloc_palette();
        driver.create_window()?;
        driver.create_slate_and_gc()?;
        driver
            .setup_wm_protocols_and_hints(title)
            .context("Failed to set window title")?;

        unsafe {
            xlib::XMapWindow(driver.display, driver.window);
            xlib::XFlush(driver.display);
        }
        info!("XDriver: window {} mapped.", driver.window);
        Ok(driver)
    }

    fn alloc_palette(&mut self) {
        let colormap = unsafe { xlib::XDefaultColormap(self.display, self.screen) };
        let black = unsafe { xlib::XBlackPixel(self.display, self.screen) };

        for color in NamedColor::ALL {
            let (r, g, b) = color.to_rgb();
            let mut xcolor: xlib::XColor = unsafe { mem::zeroed() };
            xcolor.red = channel_to_x(r);
            xcolor.green = channel_to_x(g);
            xcolor.blue = channel_to_x(b);
            xcolor.flags = (xlib::DoRed | xlib::DoGreen | xlib::DoBlue) as c_char;

            let pixel = if unsafe { xlib::XAllocColor(self.display, colormap, &mut xcolor) } != 0
            {
                xcolor.pixel
            } else {
                warn!("XAllocColor failed for {:?}, drawing it black.", color);
                black
            };
            trace!("Allocated {:?} -> pixel {}", color, pixel);
            self.palette[color.index()] = pixel;
        }
    }

    fn create_window(&mut self) -> Result<()> {
        let background = self.palette[NamedColor::Black.index()];
        self.window = unsafe {
            let root_window = xlib::XRootWindow(self.display, self.screen);
            xlib::XCreateSimpleWindow(
                self.display,
                root_window,
                0,
                0,
                self.width_px as c_uint,
                self.height_px as c_uint,
                0,
                background,
                background,
            )
        };
        if self.window == 0 {
            return Err(anyhow::anyhow!("XCreateSimpleWindow failed."));
        }

        unsafe {
            xlib::XSelectInput(
                self.display,
                self.window,
                xlib::ExposureMask
                    | xlib::StructureNotifyMask
                    | xlib::ButtonPressMask
                    | xlib::ButtonReleaseMask
                    | xlib::PointerMotionMask,
            );
        }
        debug!(
            "X window created (ID: {}), size: {}x{}px",
            self.window, self.width_px, self.height_px
        );
        Ok(())
    }

    fn create_slate_and_gc(&mut self) -> Result<()> {
        unsafe {
            let depth = xlib::XDefaultDepth(self.display, self.screen);
            self.slate = xlib::XCreatePixmap(
                self.display,
                self.window,
                self.width_px as c_uint,
                self.height_px as c_uint,
                depth as c_uint,
            );
        }
        if self.slate == 0 {
            return Err(anyhow::anyhow!("XCreatePixmap failed."));
        }

        let mut gc_values: xlib::XGCValues = unsafe { mem::zeroed() };
        self.gc = unsafe { xlib::XCreateGC(self.display, self.slate, 0, &mut gc_values) };
        if self.gc.is_null() {
            return Err(anyhow::anyhow!("XCreateGC failed."));
        }
        debug!("Slate pixmap and graphics context created.");
        Ok(())
    }

    fn setup_wm_protocols_and_hints(&mut self, title: &str) -> Result<()> {
        let title_cstr = CString::new(title)?;
        unsafe {
            self.wm_delete_window = xlib::XInternAtom(
                self.display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const c_char,
                xlib::False,
            );
            self.protocols_atom = xlib::XInternAtom(
                self.display,
                b"WM_PROTOCOLS\0".as_ptr() as *const c_char,
                xlib::False,
            );

            if self.wm_delete_window != 0 && self.protocols_atom != 0 {
                xlib::XSetWMProtocols(
                    self.display,
                    self.window,
                    [self.wm_delete_window].as_mut_ptr(),
                    1,
                );
                debug!("WM_PROTOCOLS (WM_DELETE_WINDOW) registered.");
            } else {
                warn!(
                    "Failed to get WM_DELETE_WINDOW or WM_PROTOCOLS atom. Window close button might not work as expected."
                );
            }

            xlib::XStoreName(self.display, self.window, title_cstr.as_ptr());

            // The slate has a fixed size, so the window does too.
            let mut size_hints: xlib::XSizeHints = mem::zeroed();
            size_hints.flags = xlib::PMinSize | xlib::PMaxSize;
            size_hints.min_width = self.width_px as c_int;
            size_hints.max_width = self.width_px as c_int;
            size_hints.min_height = self.height_px as c_int;
            size_hints.max_height = self.height_px as c_int;
            xlib::XSetWMNormalHints(self.display, self.window, &mut size_hints);
        }
        debug!("Window title '{}' and size hints set.", title);
        Ok(())
    }

    fn x_button_to_mouse_button(button: c_uint) -> MouseButton {
        match button {
            xlib::Button1 => MouseButton::Left,
            xlib::Button2 => MouseButton::Middle,
            xlib::Button3 => MouseButton::Right,
            // Wheel away from the user; this program has always called it scroll down.
            xlib::Button4 => MouseButton::ScrollDown,
            xlib::Button5 => MouseButton::ScrollUp,
            other => MouseButton::Other(other as u8),
        }
    }

    fn x_button_event_to_backend_event(xbutton: &xlib::XButtonEvent) -> BackendEvent {
        let button = Self::x_button_to_mouse_button(xbutton.button);
        if xbutton.type_ == xlib::ButtonRelease {
            BackendEvent::MouseButtonRelease {
                button,
                x: xbutton.x,
                y: xbutton.y,
            }
        } else {
            BackendEvent::MouseButtonPress {
                button,
                x: xbutton.x,
                y: xbutton.y,
            }
        }
    }

    fn pixel(&self, color: NamedColor) -> c_ulong {
        self.palette[color.index()]
    }

    fn draw(&mut self, command: &RenderCommand) {
        unsafe {
            match *command {
                RenderCommand::ClearAll { bg } => {
                    xlib::XSetForeground(self.display, self.gc, self.pixel(bg));
                    xlib::XFillRectangle(
                        self.display,
                        self.slate,
                        self.gc,
                        0,
                        0,
                        self.width_px as c_uint,
                        self.height_px as c_uint,
                    );
                }
                RenderCommand::DrawPoint { at, color, radius } => {
                    xlib::XSetForeground(self.display, self.gc, self.pixel(color));
                    let PixelPoint { x, y } = at;
                    if radius == 0 {
                        xlib::XDrawPoint(
                            self.display,
                            self.slate,
                            self.gc,
                            clamp_coord(x),
                            clamp_coord(y),
                        );
                    } else {
                        let r = radius as i32;
                        xlib::XFillArc(
                            self.display,
                            self.slate,
                            self.gc,
                            clamp_coord(x.saturating_sub(r)),
                            clamp_coord(y.saturating_sub(r)),
                            2 * radius,
                            2 * radius,
                            0,
                            FULL_CIRCLE_ARC,
                        );
                    }
                }
                RenderCommand::DrawLine {
                    from,
                    to,
                    color,
                    width,
                } => {
                    xlib::XSetForeground(self.display, self.gc, self.pixel(color));
                    xlib::XSetLineAttributes(
                        self.display,
                        self.gc,
                        width,
                        xlib::LineSolid,
                        xlib::CapRound,
                        xlib::JoinRound,
                    );
                    xlib::XDrawLine(
                        self.display,
                        self.slate,
                        self.gc,
                        clamp_coord(from.x),
                        clamp_coord(from.y),
                        clamp_coord(to.x),
                        clamp_coord(to.y),
                    );
                }
            }
        }
    }
}

impl Driver for XDriver {
    fn process_events(&mut self) -> Result<Vec<BackendEvent>> {
        let mut events = Vec::new();
        if self.display.is_null() {
            return Ok(events);
        }

        unsafe {
            while xlib::XPending(self.display) > 0 {
                let mut event: xlib::XEvent = mem::zeroed();
                xlib::XNextEvent(self.display, &mut event);

                match event.get_type() {
                    xlib::ButtonPress | xlib::ButtonRelease => {
                        let xbutton = event.button;
                        events.push(Self::x_button_event_to_backend_event(&xbutton));
                    }
                    xlib::ClientMessage => {
                        let xclient = event.client_message;
                        if xclient.message_type == self.protocols_atom
                            && xclient.data.get_long(0) as xlib::Atom == self.wm_delete_window
                        {
                            info!("XDriver: WM_DELETE_WINDOW received.");
                            events.push(BackendEvent::CloseRequested);
                        }
                    }
                    xlib::DestroyNotify => {
                        warn!("XDriver: window destroyed externally.");
                        events.push(BackendEvent::CloseRequested);
                    }
                    other => trace!("XDriver: ignoring X event type {}", other),
                }
            }
        }

        if !events.is_empty() {
            debug!("XDriver: {} input events", events.len());
        }
        Ok(events)
    }

    fn pointer_position(&self) -> Result<Point2D> {
        if self.display.is_null() {
            return Ok(self.last_pointer.get());
        }

        let mut root_return: xlib::Window = 0;
        let mut child_return: xlib::Window = 0;
        let (mut root_x, mut root_y, mut win_x, mut win_y): (c_int, c_int, c_int, c_int) =
            (0, 0, 0, 0);
        let mut mask: c_uint = 0;
        let same_screen = unsafe {
            xlib::XQueryPointer(
                self.display,
                self.window,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };
        // On another screen the window-relative coordinates are meaningless.
        if same_screen != xlib::False {
            self.last_pointer
                .set(Point2D::new(f64::from(win_x), f64::from(win_y)));
        }
        Ok(self.last_pointer.get())
    }

    fn execute_render_commands(&mut self, commands: Vec<RenderCommand>) -> Result<()> {
        if self.display.is_null() {
            return Err(anyhow::anyhow!("XDriver used after cleanup"));
        }
        trace!("XDriver: executing {} render commands", commands.len());
        for command in &commands {
            self.draw(command);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if self.display.is_null() {
            return Err(anyhow::anyhow!("XDriver used after cleanup"));
        }
        unsafe {
            xlib::XCopyArea(
                self.display,
                self.slate,
                self.window,
                self.gc,
                0,
                0,
                self.width_px as c_uint,
                self.height_px as c_uint,
                0,
                0,
            );
            xlib::XFlush(self.display);
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.display.is_null() {
            return Ok(());
        }
        info!("XDriver: cleaning up X resources.");
        unsafe {
            if !self.gc.is_null() {
                xlib::XFreeGC(self.display, self.gc);
                self.gc = ptr::null_mut();
            }
            if self.slate != 0 {
                xlib::XFreePixmap(self.display, self.slate);
                self.slate = 0;
            }
            if self.window != 0 {
                xlib::XDestroyWindow(self.display, self.window);
                self.window = 0;
            }
            xlib::XCloseDisplay(self.display);
        }
        self.display = ptr::null_mut();
        Ok(())
    }
}

impl Drop for XDriver {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            error!("Error during XDriver cleanup in drop: {}", e);
        }
    }
}
