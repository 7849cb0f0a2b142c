use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use cgmath::{InnerSpace, Vector3, Zero};

use egui_glow::EguiGlow;

use thiserror::Error;

use winit::dpi::{PhysicalPosition, PhysicalSize, Size};
use winit::event::{ElementState, Event, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_wrapper::context::{GlContext, GraphicsContext, PolygonMode};

use threegp::{Camera, FrameStats, Renderer, RendererError};

use crate::args::Args;

/// Units per second.
const MOVE_SPEED: f32 = 2.5;
/// Degrees per pixel of mouse travel.
const MOUSE_SENSITIVITY: f64 = 0.1;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    gl: GlContext,
    egui_glow: EguiGlow,
    renderer: Renderer,
    camera: Camera,
}

impl App {
    pub fn new(args: &Args, mut renderer: Renderer) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(args.width, args.height)))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title("ThreeGP");
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new().with_depth_size(24);

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| {
                configs.next().expect("display offers no GL config")
            })
            .map_err(|e| AppError::Window(e.to_string()))?;

        let window = window.ok_or_else(|| AppError::Window("no window created".to_owned()))?;

        let handle = Some(window.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(handle);

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        let glow_context = unsafe {
            glow::Context::from_loader_function(|s| {
                gl_display
                    .get_proc_address(CString::new(s).unwrap().as_c_str())
                    .cast()
            })
        };

        // SAFETY: the function table was loaded above for the context made current on this thread
        let mut gl = unsafe { GlContext::new() };

        let (width, height): (u32, u32) = gl_window.window.inner_size().into();
        gl.viewport(width, height);

        if let Err(e) = renderer.initialise_geometry(&mut gl) {
            renderer.destroy(&mut gl);
            return Err(e.into());
        }
        log::info!("renderer ready, {} indices", renderer.index_count());

        let egui_glow = EguiGlow::new(&event_loop, Arc::new(glow_context), None);

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            gl,
            egui_glow,
            renderer,
            camera: Camera::default(),
        })
    }

    pub fn run(mut self) -> ! {
        let mut last_frame = Instant::now();
        let mut stats = FrameStats::new();
        let mut keys = ActiveKeys::default();
        let mut last_pos = PhysicalPosition::new(0.0, 0.0);
        let mut rmb_pressed = false;

        self.event_loop
            .run(move |event, _window_target, control_flow| {
                *control_flow = ControlFlow::Poll;
                match event {
                    Event::MainEventsCleared => {
                        self.gl_window.window.request_redraw();
                    }
                    Event::RedrawRequested(_) => {
                        let now = Instant::now();
                        let delta_time = (now - last_frame).as_secs_f32();
                        last_frame = now;
                        stats.push(delta_time);

                        let step = keys.direction(&self.camera);
                        if step.magnitude2() != 0.0 {
                            self.camera.location += step.normalize() * (MOVE_SPEED * delta_time);
                        }

                        self.renderer.render(&mut self.gl, &self.camera, delta_time);

                        // the GUI has to stay solid when the cube is in wireframe
                        self.gl.polygon_mode(PolygonMode::Fill);

                        let _repaint_after = self.egui_glow.run(&self.gl_window.window, |ctx| {
                            self.renderer.define_gui(ctx, &stats)
                        });
                        self.egui_glow.paint(&self.gl_window.window);

                        if let Err(e) = self.gl_window.surface.swap_buffers(&self.gl_context) {
                            log::error!("failed to swap buffers: {e}");
                        }
                    }
                    Event::WindowEvent { event, .. } => {
                        if self.egui_glow.on_event(&event).consumed {
                            return;
                        }

                        match event {
                            WindowEvent::Resized(size) => {
                                if let (Some(w), Some(h)) =
                                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                                {
                                    self.gl_window.surface.resize(&self.gl_context, w, h);
                                    self.gl.viewport(size.width, size.height);
                                }
                            }
                            WindowEvent::CursorMoved { position, .. } => {
                                let delta = (last_pos.x - position.x, last_pos.y - position.y);

                                if rmb_pressed {
                                    self.camera.rotate(
                                        (delta.0 * MOUSE_SENSITIVITY) as f32,
                                        (delta.1 * MOUSE_SENSITIVITY) as f32,
                                    );
                                }

                                last_pos = position;
                            }
                            WindowEvent::MouseInput { state, button, .. } => {
                                if let MouseButton::Right = button {
                                    rmb_pressed = state == ElementState::Pressed
                                }
                            }
                            WindowEvent::KeyboardInput { input, .. } => {
                                let pressed = input.state == ElementState::Pressed;
                                match input.virtual_keycode {
                                    Some(VirtualKeyCode::W) => keys.w = pressed,
                                    Some(VirtualKeyCode::A) => keys.a = pressed,
                                    Some(VirtualKeyCode::S) => keys.s = pressed,
                                    Some(VirtualKeyCode::D) => keys.d = pressed,
                                    Some(VirtualKeyCode::Q) => keys.q = pressed,
                                    Some(VirtualKeyCode::E) => keys.e = pressed,
                                    Some(VirtualKeyCode::Escape) if pressed => {
                                        control_flow.set_exit()
                                    }
                                    _ => {}
                                }
                            }
                            WindowEvent::CloseRequested => {
                                control_flow.set_exit();
                            }
                            _ => (),
                        }
                    }
                    Event::LoopDestroyed => {
                        log::info!("shutting down");
                        self.renderer.destroy(&mut self.gl);
                        self.egui_glow.destroy();
                    }
                    _ => (),
                }
            })
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not create window: {0}")]
    Window(String),
    #[error(transparent)]
    Gl(#[from] glutin::error::Error),
    #[error("could not initialise renderer: {0}")]
    Renderer(#[from] RendererError),
}

#[derive(Debug, Default)]
pub struct ActiveKeys {
    w: bool,
    a: bool,
    s: bool,
    d: bool,
    q: bool,
    e: bool,
}

impl ActiveKeys {
    /// Unnormalized movement direction in world space, zero when idle.
    pub fn direction(&self, camera: &Camera) -> Vector3<f32> {
        let axis = |neg: bool, pos: bool| pos as i8 as f32 - neg as i8 as f32;

        let x = axis(self.a, self.d);
        let y = axis(self.s, self.w);
        let z = axis(self.q, self.e);

        if x == 0.0 && y == 0.0 && z == 0.0 {
            return Vector3::zero();
        }

        camera.side_vector() * x + camera.look_vector() * y + camera.up_vector() * z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_keys_do_not_move() {
        let keys = ActiveKeys::default();
        assert_eq!(keys.direction(&Camera::default()), Vector3::zero());
    }

    #[test]
    fn forward_follows_look_vector() {
        let keys = ActiveKeys {
            w: true,
            ..Default::default()
        };
        let camera = Camera::default();

        assert_eq!(keys.direction(&camera), camera.look_vector());
    }

    #[test]
    fn opposite_keys_cancel() {
        let keys = ActiveKeys {
            a: true,
            d: true,
            ..Default::default()
        };
        assert_eq!(keys.direction(&Camera::default()), Vector3::zero());
    }
}
