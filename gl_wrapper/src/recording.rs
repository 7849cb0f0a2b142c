//! Headless [`GraphicsContext`] that records commands instead of issuing them.

use std::collections::{HashMap, VecDeque};

use gl::types::{GLenum, GLint, GLuint};

use crate::context::{
    BufferTarget, Capability, ClearMask, GraphicsContext, PolygonMode, ShaderKind,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateProgram(GLuint),
    DeleteProgram(GLuint),
    AttachShader(GLuint, GLuint),
    LinkProgram(GLuint),
    UseProgram(GLuint),
    CreateShader(ShaderKind, GLuint),
    ShaderSource(GLuint),
    CompileShader(GLuint),
    DeleteShader(GLuint),
    GenBuffer(GLuint),
    BindBuffer(BufferTarget, GLuint),
    BufferData(BufferTarget, usize),
    DeleteBuffer(GLuint),
    GenVertexArray(GLuint),
    BindVertexArray(GLuint),
    DeleteVertexArray(GLuint),
    VertexAttribPointer {
        index: GLuint,
        size: GLint,
        stride: GLint,
        offset: usize,
    },
    EnableVertexAttribArray(GLuint),
    Enable(Capability),
    PolygonMode(PolygonMode),
    ClearColor([f32; 4]),
    Clear(ClearMask),
    Viewport(u32, u32),
    UniformMatrix4(String, [f32; 16]),
    DrawElements(GLint),
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    pub calls: Vec<Call>,
    /// Shader kinds whose compilation reports failure.
    pub failing_shaders: Vec<ShaderKind>,
    pub fail_link: bool,
    /// Uniform names reported as inactive by `uniform_location`.
    pub missing_uniforms: Vec<String>,
    /// Codes returned by `get_error`, in order, before `NO_ERROR`.
    pub pending_errors: VecDeque<GLenum>,
    next_handle: GLuint,
    shader_kinds: HashMap<GLuint, ShaderKind>,
    uniforms: HashMap<GLint, String>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_compile(mut self, kind: ShaderKind) -> Self {
        self.failing_shaders.push(kind);
        self
    }

    pub fn failing_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    pub fn without_uniform(mut self, name: &str) -> Self {
        self.missing_uniforms.push(name.to_owned());
        self
    }

    pub fn with_error(mut self, code: GLenum) -> Self {
        self.pending_errors.push_back(code);
        self
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn polygon_modes(&self) -> Vec<PolygonMode> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::PolygonMode(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    /// Last matrix uploaded to the uniform called `name`.
    pub fn last_uniform(&self, name: &str) -> Option<[f32; 16]> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::UniformMatrix4(n, m) if n == name => Some(*m),
            _ => None,
        })
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn next(&mut self) -> GLuint {
        self.next_handle += 1;
        self.next_handle
    }
}

impl GraphicsContext for RecordingContext {
    fn create_program(&mut self) -> GLuint {
        let id = self.next();
        self.calls.push(Call::CreateProgram(id));
        id
    }

    fn delete_program(&mut self, program: GLuint) {
        self.calls.push(Call::DeleteProgram(program));
    }

    fn attach_shader(&mut self, program: GLuint, shader: GLuint) {
        self.calls.push(Call::AttachShader(program, shader));
    }

    fn link_program(&mut self, program: GLuint) {
        self.calls.push(Call::LinkProgram(program));
    }

    fn link_status(&mut self, _program: GLuint) -> bool {
        !self.fail_link
    }

    fn program_info_log(&mut self, _program: GLuint) -> String {
        if self.fail_link {
            "error: unresolved varying".to_owned()
        } else {
            String::new()
        }
    }

    fn use_program(&mut self, program: GLuint) {
        self.calls.push(Call::UseProgram(program));
    }

    fn create_shader(&mut self, kind: ShaderKind) -> GLuint {
        let id = self.next();
        self.shader_kinds.insert(id, kind);
        self.calls.push(Call::CreateShader(kind, id));
        id
    }

    fn shader_source(&mut self, shader: GLuint, _source: &str) {
        self.calls.push(Call::ShaderSource(shader));
    }

    fn compile_shader(&mut self, shader: GLuint) {
        self.calls.push(Call::CompileShader(shader));
    }

    fn compile_status(&mut self, shader: GLuint) -> bool {
        match self.shader_kinds.get(&shader) {
            Some(kind) => !self.failing_shaders.contains(kind),
            None => false,
        }
    }

    fn shader_info_log(&mut self, shader: GLuint) -> String {
        format!("0:1(1): error: syntax error in shader {shader}")
    }

    fn delete_shader(&mut self, shader: GLuint) {
        self.calls.push(Call::DeleteShader(shader));
    }

    fn gen_buffer(&mut self) -> GLuint {
        let id = self.next();
        self.calls.push(Call::GenBuffer(id));
        id
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: GLuint) {
        self.calls.push(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]) {
        self.calls.push(Call::BufferData(target, data.len()));
    }

    fn delete_buffer(&mut self, buffer: GLuint) {
        self.calls.push(Call::DeleteBuffer(buffer));
    }

    fn gen_vertex_array(&mut self) -> GLuint {
        let id = self.next();
        self.calls.push(Call::GenVertexArray(id));
        id
    }

    fn bind_vertex_array(&mut self, vao: GLuint) {
        self.calls.push(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&mut self, vao: GLuint) {
        self.calls.push(Call::DeleteVertexArray(vao));
    }

    fn vertex_attrib_pointer(&mut self, index: GLuint, size: GLint, stride: GLint, offset: usize) {
        self.calls.push(Call::VertexAttribPointer {
            index,
            size,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&mut self, index: GLuint) {
        self.calls.push(Call::EnableVertexAttribArray(index));
    }

    fn enable(&mut self, cap: Capability) {
        self.calls.push(Call::Enable(cap));
    }

    fn polygon_mode(&mut self, mode: PolygonMode) {
        self.calls.push(Call::PolygonMode(mode));
    }

    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.calls.push(Call::ClearColor([r, g, b, a]));
    }

    fn clear(&mut self, mask: ClearMask) {
        self.calls.push(Call::Clear(mask));
    }

    fn viewport(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Viewport(width, height));
    }

    fn uniform_location(&mut self, _program: GLuint, name: &str) -> Option<GLint> {
        if self.missing_uniforms.iter().any(|n| n == name) {
            return None;
        }

        let known = self
            .uniforms
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(loc, _)| *loc);

        if known.is_some() {
            return known;
        }

        let location = self.uniforms.len() as GLint;
        self.uniforms.insert(location, name.to_owned());
        Some(location)
    }

    fn uniform_matrix4(&mut self, location: GLint, matrix: &[f32; 16]) {
        let name = self.uniforms.get(&location).cloned().unwrap_or_default();
        self.calls.push(Call::UniformMatrix4(name, *matrix));
    }

    fn draw_elements(&mut self, count: GLint) {
        self.calls.push(Call::DrawElements(count));
    }

    fn get_error(&mut self) -> GLenum {
        self.pending_errors.pop_front().unwrap_or(gl::NO_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_uniform_has_no_location() {
        let mut ctx = RecordingContext::new().without_uniform("model");

        assert_eq!(ctx.uniform_location(1, "model"), None);
        assert_eq!(ctx.uniform_location(1, "combined"), Some(0));
        assert_eq!(ctx.uniform_location(1, "combined"), Some(0));
    }
}
