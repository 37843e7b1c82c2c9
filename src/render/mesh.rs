use gl::types::*;
use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};
use std::mem::size_of;
use std::ptr;

/// Vertex attribute slot the position data is bound to.
pub const POSITION_ATTRIBUTE: GLuint = 0;
const POSITION_COMPONENTS: GLint = 3;

/// Which fixed geometry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    /// One triangle, drawn from 3 vertices without an index buffer.
    #[default]
    Triangle,
    /// A square made of two triangles sharing 4 vertices through 6 indices.
    Quad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCall {
    Arrays { count: GLsizei },
    Elements { count: GLsizei },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle() -> Self {
        Self {
            vertices: vec![
                Vec3::new(-0.5, -0.5, 0.0),
                Vec3::new(0.5, -0.5, 0.0),
                Vec3::new(0.0, 0.5, 0.0),
            ],
            indices: Vec::new(),
        }
    }

    pub fn quad() -> Self {
        Self {
            vertices: vec![
                Vec3::new(0.5, 0.5, 0.0),   // top right
                Vec3::new(0.5, -0.5, 0.0),  // bottom right
                Vec3::new(-0.5, -0.5, 0.0), // bottom left
                Vec3::new(-0.5, 0.5, 0.0),  // top left
            ],
            indices: vec![0, 1, 3, 1, 2, 3],
        }
    }

    pub fn for_scene(scene: Scene) -> Self {
        match scene {
            Scene::Triangle => Self::triangle(),
            Scene::Quad => Self::quad(),
        }
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn draw_call(&self) -> DrawCall {
        if self.is_indexed() {
            DrawCall::Elements {
                count: self.indices.len() as GLsizei,
            }
        } else {
            DrawCall::Arrays {
                count: self.vertices.len() as GLsizei,
            }
        }
    }

    /// Tightly packed xyz floats, the layout attribute 0 reads.
    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.to_array()).collect()
    }
}

/// GPU copy of a [`MeshData`]: vertex buffer, optional index buffer and the vertex array
/// binding that ties them to attribute 0.
#[derive(Debug)]
pub struct Mesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: Option<GLuint>,
    draw_call: DrawCall,
}

impl Mesh {
    pub fn upload(data: &MeshData) -> Self {
        let positions = data.positions();
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&positions);

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = None;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertex_bytes.len() as GLsizeiptr,
                vertex_bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            if data.is_indexed() {
                let index_bytes: &[u8] = bytemuck::cast_slice(&data.indices);
                let mut id = 0;
                gl::GenBuffers(1, &mut id);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    index_bytes.len() as GLsizeiptr,
                    index_bytes.as_ptr() as *const _,
                    gl::STATIC_DRAW,
                );
                ebo = Some(id);
            }

            gl::VertexAttribPointer(
                POSITION_ATTRIBUTE,
                POSITION_COMPONENTS,
                gl::FLOAT,
                gl::FALSE,
                (POSITION_COMPONENTS as usize * size_of::<f32>()) as GLsizei,
                ptr::null(),
            );
            gl::EnableVertexAttribArray(POSITION_ATTRIBUTE);

            // The element buffer binding is VAO state, so only the VAO is unbound.
            gl::BindVertexArray(0);
        }

        debug!(
            "Uploaded {} vertices, {} indices",
            data.vertices.len(),
            data.indices.len()
        );

        Self {
            vao,
            vbo,
            ebo,
            draw_call: data.draw_call(),
        }
    }

    /// Binds the vertex array, issues the single draw call and unbinds it again.
    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            match self.draw_call {
                DrawCall::Arrays { count } => gl::DrawArrays(gl::TRIANGLES, 0, count),
                DrawCall::Elements { count } => {
                    gl::DrawElements(gl::TRIANGLES, count, gl::UNSIGNED_INT, ptr::null())
                }
            }
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            if let Some(ebo) = self.ebo {
                gl::DeleteBuffers(1, &ebo);
            }
        }
    }
}
