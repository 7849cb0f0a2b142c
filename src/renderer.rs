use std::path::{Path, PathBuf};

use cgmath::{Deg, Matrix4, SquareMatrix};
use gl::types::GLuint;
use thiserror::Error;

use gl_wrapper::context::{Capability, ClearMask, GraphicsContext, PolygonMode, ShaderKind};
use gl_wrapper::error::check_for_gl_error;
use gl_wrapper::geometry::{GBError, IndexedGeometry, IndexedGeometryBuilder, VertexAttribute};
use gl_wrapper::program::{link_program_shaders, load_and_compile_shader, ShaderError};

use crate::camera::Camera;
use crate::cube::{CUBE_INDICES, CUBE_VERTICES};
use crate::stats::FrameStats;

pub const FOV_Y_DEGREES: f32 = 45.0;
// Fixed, not taken from the viewport.
pub const ASPECT_RATIO: f32 = 800.0 / 600.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

pub const COMBINED_UNIFORM: &str = "combined";
pub const MODEL_UNIFORM: &str = "model";

#[derive(Debug, Clone)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ShaderPaths {
    /// `vertex_shader.glsl` and `fragment_shader.glsl` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vertex: dir.join("vertex_shader.glsl"),
            fragment: dir.join("fragment_shader.glsl"),
        }
    }
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self::in_dir("Data/Shaders")
    }
}

#[derive(Debug, Error)]
pub enum RendererError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Geometry(#[from] GBError),
    #[error("OpenGL reported an error while building the shader program")]
    GlError,
}

/// Draws a single cube with one shader program.
///
/// Lifecycle: [`Renderer::new`] leaves it uninitialized, a successful
/// [`Renderer::initialise_geometry`] makes it ready, [`Renderer::destroy`]
/// releases everything. [`Renderer::render`] is only valid while ready.
///
/// GL objects are not released on drop, since that needs the context. Call
/// `destroy` exactly once per initialization.
#[derive(Debug, Default)]
pub struct Renderer {
    program: GLuint,
    geometry: Option<IndexedGeometry>,
    wireframe: bool,
    shader_paths: ShaderPaths,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shader_paths(shader_paths: ShaderPaths) -> Self {
        Self {
            shader_paths,
            ..Default::default()
        }
    }

    pub fn is_ready(&self) -> bool {
        self.program != 0 && self.geometry.is_some()
    }

    pub fn program(&self) -> GLuint {
        self.program
    }

    /// Indices drawn per frame, `0` until initialized.
    pub fn index_count(&self) -> usize {
        self.geometry.as_ref().map_or(0, |g| g.index_count())
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    /// Debug panel with the wireframe toggle and the frame time readout.
    pub fn define_gui(&mut self, ctx: &egui::Context, stats: &FrameStats) {
        egui::Window::new("RTG").show(ctx, |ui| {
            ui.label("Visibility.");
            ui.checkbox(&mut self.wireframe, "Wireframe");
            ui.label(frame_time_text(stats));
        });
    }

    /// Builds the shader program and uploads the cube.
    ///
    /// Errors from the program build leave no geometry behind. The renderer
    /// must not be rendered with after an error, only destroyed.
    pub fn initialise_geometry<C: GraphicsContext + ?Sized>(
        &mut self,
        ctx: &mut C,
    ) -> Result<(), RendererError> {
        if self.program != 0 || self.geometry.is_some() {
            log::debug!("re-initialising renderer, releasing previous resources");
            self.destroy(ctx);
        }

        self.build_program(ctx)?;

        let geometry = IndexedGeometryBuilder::new(&CUBE_VERTICES, &CUBE_INDICES)
            .with_attribute(VertexAttribute::Vec3)
            .build(ctx)?;

        log::debug!(
            "uploaded cube: {} vertices, {} indices",
            CUBE_VERTICES.len() / 3,
            geometry.index_count()
        );
        self.geometry = Some(geometry);

        // reported only, the geometry is kept either way
        if check_for_gl_error(ctx) {
            log::warn!("OpenGL error while uploading cube geometry");
        }

        Ok(())
    }

    fn build_program<C: GraphicsContext + ?Sized>(
        &mut self,
        ctx: &mut C,
    ) -> Result<(), RendererError> {
        self.program = ctx.create_program();

        let vertex = load_and_compile_shader(ctx, ShaderKind::Vertex, &self.shader_paths.vertex);
        let fragment =
            load_and_compile_shader(ctx, ShaderKind::Fragment, &self.shader_paths.fragment);

        let (vertex, fragment) = match (vertex, fragment) {
            (Ok(vertex), Ok(fragment)) => (vertex, fragment),
            (Ok(shader), Err(e)) | (Err(e), Ok(shader)) => {
                ctx.delete_shader(shader);
                return Err(e.into());
            }
            (Err(e), Err(_)) => return Err(e.into()),
        };

        ctx.attach_shader(self.program, vertex);
        ctx.attach_shader(self.program, fragment);

        let linked = link_program_shaders(ctx, self.program);

        // the program keeps its own copy of the compiled stages
        ctx.delete_shader(vertex);
        ctx.delete_shader(fragment);

        linked?;

        if check_for_gl_error(ctx) {
            return Err(RendererError::GlError);
        }

        log::info!("shader program {} linked", self.program);

        Ok(())
    }

    /// Draws one frame. `delta_time` is not used yet.
    pub fn render<C: GraphicsContext + ?Sized>(
        &mut self,
        ctx: &mut C,
        camera: &Camera,
        _delta_time: f32,
    ) {
        debug_assert!(self.is_ready(), "render called before initialise_geometry");

        ctx.enable(Capability::DepthTest);
        ctx.enable(Capability::CullFace);
        ctx.polygon_mode(if self.wireframe {
            PolygonMode::Line
        } else {
            PolygonMode::Fill
        });

        let [r, g, b, a] = CLEAR_COLOR;
        ctx.clear_color(r, g, b, a);
        ctx.clear(ClearMask::COLOR_DEPTH);

        let combined = projection_matrix() * view_matrix(camera);

        ctx.use_program(self.program);
        self.upload_matrix(ctx, COMBINED_UNIFORM, &combined);
        self.upload_matrix(ctx, MODEL_UNIFORM, &Matrix4::identity());

        if let Some(geometry) = &self.geometry {
            geometry.draw(ctx);
        }
    }

    fn upload_matrix<C: GraphicsContext + ?Sized>(
        &self,
        ctx: &mut C,
        name: &str,
        matrix: &Matrix4<f32>,
    ) {
        match ctx.uniform_location(self.program, name) {
            Some(location) => ctx.uniform_matrix4(location, &matrix_to_array(matrix)),
            None => log::trace!("uniform {name} not active in program {}", self.program),
        }
    }

    /// Releases the program and the cube's buffers. Handles are reset, so the
    /// renderer returns to the uninitialized state.
    pub fn destroy<C: GraphicsContext + ?Sized>(&mut self, ctx: &mut C) {
        ctx.delete_program(self.program);
        self.program = 0;

        if let Some(geometry) = self.geometry.take() {
            geometry.release(ctx);
        }
    }
}

pub fn projection_matrix() -> Matrix4<f32> {
    cgmath::perspective(Deg(FOV_Y_DEGREES), ASPECT_RATIO, Z_NEAR, Z_FAR)
}

pub fn view_matrix(camera: &Camera) -> Matrix4<f32> {
    let eye = camera.position();
    Matrix4::look_at_rh(eye, eye + camera.look_vector(), camera.up_vector())
}

/// Column-major, as GL expects it.
pub fn matrix_to_array(matrix: &Matrix4<f32>) -> [f32; 16] {
    let cols: [[f32; 4]; 4] = (*matrix).into();
    let mut out = [0.0; 16];
    for (i, col) in cols.iter().enumerate() {
        out[i * 4..i * 4 + 4].copy_from_slice(col);
    }
    out
}

pub fn frame_time_text(stats: &FrameStats) -> String {
    format!(
        "Application average {:.3} ms/frame ({:.1} FPS)",
        stats.average_ms(),
        stats.fps()
    )
}
