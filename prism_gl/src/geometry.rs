use std::ffi::c_void;

use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Draw order for an indexed draw; without it the vertices are drawn
    /// in upload order.
    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn build(self) -> Result<Geometry, GeometryError> {
        let stride: usize = self.attributes.iter().map(|a| a.size()).sum();

        if stride == 0 {
            return Err(GeometryError::NoAttributes);
        }

        if self.data.len() % stride != 0 {
            return Err(GeometryError::InvalidDataLength);
        }

        let vertex_count = self.data.len() / stride;

        if let Some(indices) = self.indices {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(GeometryError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
        }

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = None;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (i, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (stride * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                offset += attr.size();
                gl::EnableVertexAttribArray(i as u32);
            }

            if let Some(indices) = self.indices {
                let mut id = 0;
                gl::GenBuffers(1, (&mut id) as *mut u32);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    std::mem::size_of_val(indices) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
                ebo = Some(id);
            }

            // the element buffer binding lives in the vao, unbind that first
            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0);
        }

        let count = match self.indices {
            Some(indices) => indices.len(),
            None => vertex_count,
        };

        Ok(Geometry {
            vao,
            vbo,
            ebo,
            count,
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("no vertex attributes given")]
    NoAttributes,
    #[error("vertex data length is not a multiple of the attribute stride")]
    InvalidDataLength,
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

#[derive(Debug)]
pub struct Geometry {
    vao: u32,
    vbo: u32,
    ebo: Option<u32>,
    count: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn indexed(&self) -> bool {
        self.ebo.is_some()
    }

    /// Index count for indexed geometry, vertex count otherwise.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if let Some(ebo) = self.ebo {
                gl::DeleteBuffers(1, (&ebo) as *const u32);
            }
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_sizes() {
        assert_eq!(VertexAttribute::Float.size(), 1);
        assert_eq!(VertexAttribute::Vec2.size(), 2);
        assert_eq!(VertexAttribute::Vec3.size(), 3);
    }

    #[test]
    fn rejects_empty_attribute_list() {
        let err = GeometryBuilder::new(&[0.0; 6]).build().unwrap_err();

        assert_eq!(err, GeometryError::NoAttributes);
    }

    #[test]
    fn rejects_mismatched_data_length() {
        let err = GeometryBuilder::new(&[0.0; 7])
            .with_attribute(VertexAttribute::Vec2)
            .build()
            .unwrap_err();

        assert_eq!(err, GeometryError::InvalidDataLength);
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = GeometryBuilder::new(&crate::QUAD_VERTICES)
            .with_attribute(VertexAttribute::Vec2)
            .with_indices(&[0, 1, 4])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            GeometryError::IndexOutOfRange {
                index: 4,
                vertex_count: 4
            }
        );
    }
}
