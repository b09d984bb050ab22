use softbuffer::{Context, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use std::{num::NonZeroU32, time::Instant};

use crate::{
    data::{Program, FRAME_DELAY},
    error::BackendError,
    graphics::P2,
};

type WindowSurface = Surface<&'static Window, &'static Window>;

struct WindowState {
    prog: Program,
    window: Option<&'static Window>,
    surface: Option<WindowSurface>,
    surface_size: PhysicalSize<u32>,

    cursor: Option<P2>,

    next_frame: Instant,
    redraw_pending: bool,

    error: Option<BackendError>,
}

fn cursor_point(position: PhysicalPosition<f64>) -> P2 {
    P2(position.x.floor() as i32, position.y.floor() as i32)
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // The window is leaked into a static reference, so only the first
        // resume may create one.
        if self.window.is_some() {
            return;
        }

        let (w, h) = self.prog.pix.sizeu();
        let win_size = PhysicalSize::<u32>::new(w as u32, h as u32);

        let window_attributes = Window::default_attributes()
            .with_title(self.prog.title())
            .with_inner_size(win_size)
            .with_resizable(false);

        let window: &'static Window = match event_loop.create_window(window_attributes) {
            Ok(window) => Box::leak(Box::new(window)),
            Err(e) => return self.fail(event_loop, BackendError::Window(e.to_string())),
        };

        self.window = Some(window);

        let surface = Context::new(window)
            .and_then(|context| Surface::new(&context, window))
            .map_err(|e| BackendError::Surface(e.to_string()));

        let mut surface = match surface {
            Ok(surface) => surface,
            Err(e) => return self.fail(event_loop, e),
        };

        let size = window.inner_size();

        if let Err(e) = Self::resize_surface(&mut surface, size) {
            return self.fail(event_loop, e);
        }

        self.surface = Some(surface);
        self.surface_size = size;
        self.next_frame = Instant::now();

        log::debug!("Window created at {}x{}", size.width, size.height);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(cursor_point(position));
            }

            WindowEvent::Resized(size) => {
                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                match Self::resize_surface(surface, size) {
                    Ok(()) => self.surface_size = size,
                    Err(e) => log::warn!("{e}"),
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window else {
            return;
        };

        if self.redraw_pending {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        if Instant::now() >= self.next_frame {
            window.request_redraw();
            self.redraw_pending = true;
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
        }
    }
}

impl WindowState {
    fn new(prog: Program) -> Self {
        Self {
            prog,
            window: None,
            surface: None,
            surface_size: PhysicalSize::<u32>::new(0, 0),
            cursor: None,
            next_frame: Instant::now(),
            redraw_pending: false,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: BackendError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    // A zero-sized surface (minimised window) is left as it is.
    fn resize_surface(surface: &mut WindowSurface, size: PhysicalSize<u32>) -> Result<(), BackendError> {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(());
        };

        surface
            .resize(w, h)
            .map_err(|e| BackendError::Surface(e.to_string()))
    }

    fn redraw(&mut self) {
        self.redraw_pending = false;

        let (Some(window), Some(surface)) = (self.window, self.surface.as_mut()) else {
            return;
        };

        let started = Instant::now();

        self.prog.frame(self.cursor, started);

        match surface.buffer_mut() {
            Ok(mut buffer) => {
                buffer.fill(0);
                self.prog
                    .pix
                    .present_to(&mut buffer, self.surface_size.width as usize);

                window.pre_present_notify();
                if let Err(e) = buffer.present() {
                    log::warn!("Failed to present frame: {e}");
                }
            }

            Err(e) => log::warn!("Failed to get the surface buffer: {e}"),
        }

        self.prog.record_frame(started.elapsed());
        self.next_frame = Instant::now() + FRAME_DELAY;
    }

    fn finish(self) -> Result<Program, BackendError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.prog),
        }
    }
}

pub fn winit_main(prog: Program) -> Result<Program, BackendError> {
    let event_loop = EventLoop::new().map_err(|e| BackendError::EventLoop(e.to_string()))?;

    let mut state = WindowState::new(prog);

    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop
        .run_app(&mut state)
        .map_err(|e| BackendError::EventLoop(e.to_string()))?;

    state.finish()
}
