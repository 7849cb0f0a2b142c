use gl::types::{GLenum, GLint, GLuint};
use std::ffi::{c_char, c_void, CString};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn gl_enum(&self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    pub fn gl_enum(&self) -> GLenum {
        match self {
            BufferTarget::Array => gl::ARRAY_BUFFER,
            BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Capability {
    DepthTest,
    CullFace,
}

impl Capability {
    pub fn gl_enum(&self) -> GLenum {
        match self {
            Capability::DepthTest => gl::DEPTH_TEST,
            Capability::CullFace => gl::CULL_FACE,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

impl PolygonMode {
    pub fn gl_enum(&self) -> GLenum {
        match self {
            PolygonMode::Fill => gl::FILL,
            PolygonMode::Line => gl::LINE,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClearMask {
    pub color: bool,
    pub depth: bool,
}

impl ClearMask {
    pub const COLOR_DEPTH: ClearMask = ClearMask {
        color: true,
        depth: true,
    };

    pub fn bits(&self) -> GLenum {
        let mut bits = 0;
        if self.color {
            bits |= gl::COLOR_BUFFER_BIT;
        }
        if self.depth {
            bits |= gl::DEPTH_BUFFER_BIT;
        }
        bits
    }
}

/// Every GL command issued by the sample goes through this trait, so callers
/// hand the context in explicitly instead of relying on the ambient one.
///
/// Handles follow GL conventions: `0` is never a valid object.
pub trait GraphicsContext {
    fn create_program(&mut self) -> GLuint;
    fn delete_program(&mut self, program: GLuint);
    fn attach_shader(&mut self, program: GLuint, shader: GLuint);
    fn link_program(&mut self, program: GLuint);
    fn link_status(&mut self, program: GLuint) -> bool;
    fn program_info_log(&mut self, program: GLuint) -> String;
    fn use_program(&mut self, program: GLuint);

    fn create_shader(&mut self, kind: ShaderKind) -> GLuint;
    fn shader_source(&mut self, shader: GLuint, source: &str);
    fn compile_shader(&mut self, shader: GLuint);
    fn compile_status(&mut self, shader: GLuint) -> bool;
    fn shader_info_log(&mut self, shader: GLuint) -> String;
    fn delete_shader(&mut self, shader: GLuint);

    fn gen_buffer(&mut self) -> GLuint;
    fn bind_buffer(&mut self, target: BufferTarget, buffer: GLuint);
    /// Uploads `data` as `STATIC_DRAW` into the buffer bound to `target`.
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&mut self, buffer: GLuint);

    fn gen_vertex_array(&mut self) -> GLuint;
    fn bind_vertex_array(&mut self, vao: GLuint);
    fn delete_vertex_array(&mut self, vao: GLuint);
    /// Float attribute with `size` components; `stride` and `offset` in bytes.
    fn vertex_attrib_pointer(&mut self, index: GLuint, size: GLint, stride: GLint, offset: usize);
    fn enable_vertex_attrib_array(&mut self, index: GLuint);

    fn enable(&mut self, cap: Capability);
    fn polygon_mode(&mut self, mode: PolygonMode);
    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32);
    fn clear(&mut self, mask: ClearMask);
    fn viewport(&mut self, width: u32, height: u32);

    fn uniform_location(&mut self, program: GLuint, name: &str) -> Option<GLint>;
    fn uniform_matrix4(&mut self, location: GLint, matrix: &[f32; 16]);

    /// Indexed triangle list with `u32` indices from the bound element buffer.
    fn draw_elements(&mut self, count: GLint);

    /// Pops one entry from the error queue, `gl::NO_ERROR` when empty.
    fn get_error(&mut self) -> GLenum;
}

/// [`GraphicsContext`] over the function table loaded by `gl::load_with`.
pub struct GlContext {
    _private: (),
}

impl GlContext {
    /// # Safety
    ///
    /// `gl::load_with` must have been called for a context that is current on
    /// this thread, and it has to stay current while this value is used.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

fn read_info_log(len: GLint, fill: impl FnOnce(GLint, *mut c_char)) -> String {
    if len <= 0 {
        return String::new();
    }

    let mut buf = vec![0_u8; len as usize];
    fill(len, buf.as_mut_ptr() as *mut c_char);

    let data = buf.split(|a| *a == 0).next().unwrap_or(&[]);
    String::from_utf8_lossy(data).into_owned()
}

impl GraphicsContext for GlContext {
    fn create_program(&mut self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn delete_program(&mut self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn attach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&mut self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn link_status(&mut self, program: GLuint) -> bool {
        let mut success: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut GLint) };
        success == gl::TRUE as GLint
    }

    fn program_info_log(&mut self, program: GLuint) -> String {
        let mut len: GLint = 0;
        unsafe { gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, (&mut len) as *mut GLint) };

        read_info_log(len, |len, buf| unsafe {
            gl::GetProgramInfoLog(program, len, std::ptr::null_mut(), buf)
        })
    }

    fn use_program(&mut self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn create_shader(&mut self, kind: ShaderKind) -> GLuint {
        unsafe { gl::CreateShader(kind.gl_enum()) }
    }

    fn shader_source(&mut self, shader: GLuint, source: &str) {
        let ptr = source.as_ptr() as *const c_char;
        let len = source.len() as GLint;

        unsafe {
            gl::ShaderSource(
                shader,
                1,
                (&ptr) as *const *const c_char,
                (&len) as *const GLint,
            )
        }
    }

    fn compile_shader(&mut self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }

    fn compile_status(&mut self, shader: GLuint) -> bool {
        let mut success: GLint = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut GLint) };
        success == gl::TRUE as GLint
    }

    fn shader_info_log(&mut self, shader: GLuint) -> String {
        let mut len: GLint = 0;
        unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, (&mut len) as *mut GLint) };

        read_info_log(len, |len, buf| unsafe {
            gl::GetShaderInfoLog(shader, len, std::ptr::null_mut(), buf)
        })
    }

    fn delete_shader(&mut self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn gen_buffer(&mut self) -> GLuint {
        let mut id = 0;
        unsafe { gl::GenBuffers(1, (&mut id) as *mut GLuint) };
        id
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: GLuint) {
        unsafe { gl::BindBuffer(target.gl_enum(), buffer) }
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]) {
        unsafe {
            gl::BufferData(
                target.gl_enum(),
                data.len() as isize,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            )
        }
    }

    fn delete_buffer(&mut self, buffer: GLuint) {
        unsafe { gl::DeleteBuffers(1, (&buffer) as *const GLuint) }
    }

    fn gen_vertex_array(&mut self) -> GLuint {
        let mut id = 0;
        unsafe { gl::GenVertexArrays(1, (&mut id) as *mut GLuint) };
        id
    }

    fn bind_vertex_array(&mut self, vao: GLuint) {
        unsafe { gl::BindVertexArray(vao) }
    }

    fn delete_vertex_array(&mut self, vao: GLuint) {
        unsafe { gl::DeleteVertexArrays(1, (&vao) as *const GLuint) }
    }

    fn vertex_attrib_pointer(&mut self, index: GLuint, size: GLint, stride: GLint, offset: usize) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                size,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            )
        }
    }

    fn enable_vertex_attrib_array(&mut self, index: GLuint) {
        unsafe { gl::EnableVertexAttribArray(index) }
    }

    fn enable(&mut self, cap: Capability) {
        unsafe { gl::Enable(cap.gl_enum()) }
    }

    fn polygon_mode(&mut self, mode: PolygonMode) {
        unsafe { gl::PolygonMode(gl::FRONT_AND_BACK, mode.gl_enum()) }
    }

    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { gl::ClearColor(r, g, b, a) }
    }

    fn clear(&mut self, mask: ClearMask) {
        unsafe { gl::Clear(mask.bits()) }
    }

    fn viewport(&mut self, width: u32, height: u32) {
        unsafe { gl::Viewport(0, 0, width as i32, height as i32) }
    }

    fn uniform_location(&mut self, program: GLuint, name: &str) -> Option<GLint> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(program, name.as_ptr()) };

        if location < 0 {
            None
        } else {
            Some(location)
        }
    }

    fn uniform_matrix4(&mut self, location: GLint, matrix: &[f32; 16]) {
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, matrix.as_ptr()) }
    }

    fn draw_elements(&mut self, count: GLint) {
        unsafe { gl::DrawElements(gl::TRIANGLES, count, gl::UNSIGNED_INT, std::ptr::null()) }
    }

    fn get_error(&mut self) -> GLenum {
        unsafe { gl::GetError() }
    }
}
