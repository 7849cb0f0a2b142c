use gl::types::{GLint, GLuint};
use thiserror::Error;

use crate::context::{BufferTarget, GraphicsContext};

pub struct IndexedGeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    vertices: &'a [f32],
    indices: &'a [u32],
}

impl<'a> IndexedGeometryBuilder<'a> {
    pub fn new(vertices: &'a [f32], indices: &'a [u32]) -> Self {
        Self {
            vertices,
            indices,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn build<C: GraphicsContext + ?Sized>(self, ctx: &mut C) -> Result<IndexedGeometry, GBError> {
        let total_len: usize = self.attributes.iter().map(|a| a.size()).sum();

        if total_len == 0 || self.vertices.len() % total_len != 0 {
            return Err(GBError::InvalidDataLength);
        }

        let vertex_count = self.vertices.len() / total_len;

        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(GBError::IndexOutOfRange {
                index,
                vertices: vertex_count,
            });
        }

        let vbo = ctx.gen_buffer();
        let ebo = ctx.gen_buffer();
        let vao = ctx.gen_vertex_array();

        ctx.bind_vertex_array(vao);

        ctx.bind_buffer(BufferTarget::Array, vbo);
        ctx.buffer_data(BufferTarget::Array, bytemuck::cast_slice(self.vertices));

        // the element binding is VAO state, it has to stay bound until the VAO is unbound
        ctx.bind_buffer(BufferTarget::ElementArray, ebo);
        ctx.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(self.indices));

        let stride = (total_len * std::mem::size_of::<f32>()) as GLint;
        let mut offset = 0;

        for (i, attr) in self.attributes.iter().enumerate() {
            ctx.vertex_attrib_pointer(
                i as GLuint,
                attr.size() as GLint,
                stride,
                offset * std::mem::size_of::<f32>(),
            );
            offset += attr.size();
            ctx.enable_vertex_attrib_array(i as GLuint);
        }

        ctx.bind_buffer(BufferTarget::Array, 0);
        ctx.bind_vertex_array(0);

        Ok(IndexedGeometry {
            vao,
            vbo,
            ebo,
            index_count: self.indices.len(),
        })
    }
}

#[derive(Debug, Error)]
pub enum GBError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexAttribute {
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Vec3 => 3,
        }
    }
}

/// GPU-side mesh. Has no `Drop`; GL objects need the context, see [`IndexedGeometry::release`].
#[derive(Debug)]
pub struct IndexedGeometry {
    vao: GLuint,
    vbo: GLuint,
    ebo: GLuint,
    index_count: usize,
}

impl IndexedGeometry {
    pub fn vao(&self) -> GLuint {
        self.vao
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn draw<C: GraphicsContext + ?Sized>(&self, ctx: &mut C) {
        ctx.bind_vertex_array(self.vao);
        ctx.draw_elements(self.index_count as GLint);
    }

    pub fn release<C: GraphicsContext + ?Sized>(self, ctx: &mut C) {
        ctx.delete_vertex_array(self.vao);
        ctx.delete_buffer(self.vbo);
        ctx.delete_buffer(self.ebo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Call, RecordingContext};

    const TRIANGLE: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

    #[test]
    fn builds_and_records_layout() {
        let mut ctx = RecordingContext::new();
        let geometry = IndexedGeometryBuilder::new(&TRIANGLE, &[0, 1, 2])
            .with_attribute(VertexAttribute::Vec3)
            .build(&mut ctx)
            .unwrap();

        assert_eq!(geometry.index_count(), 3);
        assert!(ctx.calls.contains(&Call::BufferData(BufferTarget::Array, 36)));
        assert!(ctx.calls.contains(&Call::BufferData(BufferTarget::ElementArray, 12)));
        assert!(ctx.calls.contains(&Call::VertexAttribPointer {
            index: 0,
            size: 3,
            stride: 12,
            offset: 0
        }));
        assert!(ctx.calls.contains(&Call::EnableVertexAttribArray(0)));
        assert_eq!(ctx.calls.last(), Some(&Call::BindVertexArray(0)));

        // element buffer must never be unbound while the VAO is recording
        assert!(!ctx
            .calls
            .contains(&Call::BindBuffer(BufferTarget::ElementArray, 0)));
    }

    #[test]
    fn interleaved_offsets() {
        let data = [0.0; 12];
        let mut ctx = RecordingContext::new();
        IndexedGeometryBuilder::new(&data, &[0, 1])
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3)
            .build(&mut ctx)
            .unwrap();

        assert!(ctx.calls.contains(&Call::VertexAttribPointer {
            index: 1,
            size: 3,
            stride: 24,
            offset: 12
        }));
    }

    #[test]
    fn rejects_bad_length_before_allocating() {
        let mut ctx = RecordingContext::new();
        let res = IndexedGeometryBuilder::new(&TRIANGLE[..8], &[0])
            .with_attribute(VertexAttribute::Vec3)
            .build(&mut ctx);

        assert!(matches!(res, Err(GBError::InvalidDataLength)));
        assert!(ctx.calls.is_empty());
    }

    #[test]
    fn rejects_out_of_range_index() {
        let mut ctx = RecordingContext::new();
        let res = IndexedGeometryBuilder::new(&TRIANGLE, &[0, 1, 3])
            .with_attribute(VertexAttribute::Vec3)
            .build(&mut ctx);

        assert!(matches!(res, Err(GBError::IndexOutOfRange { index: 3, .. })));
        assert!(ctx.calls.is_empty());
    }

    #[test]
    fn release_deletes_all_handles() {
        let mut ctx = RecordingContext::new();
        let geometry = IndexedGeometryBuilder::new(&TRIANGLE, &[0, 1, 2])
            .with_attribute(VertexAttribute::Vec3)
            .build(&mut ctx)
            .unwrap();
        let vao = geometry.vao();
        ctx.clear_calls();

        geometry.release(&mut ctx);
        assert!(ctx.calls.contains(&Call::DeleteVertexArray(vao)));
        assert_eq!(ctx.count(|c| matches!(c, Call::DeleteBuffer(_))), 2);
    }
}
