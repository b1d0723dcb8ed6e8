use crate::error::DriverError;
use crate::geometry::Geometry;
use crate::gl_call;
use crate::program::Program;

pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) -> Result<(), DriverError> {
        let p_id = program.id();
        if self.current_program != p_id {
            gl_call!(gl::UseProgram(p_id))?;
            self.current_program = p_id;
        }

        gl_call!(gl::BindVertexArray(geometry.vao()))?;

        if geometry.indexed() {
            gl_call!(gl::DrawElements(
                gl::TRIANGLES,
                geometry.count() as i32,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            ))?;
        } else {
            gl_call!(gl::DrawArrays(gl::TRIANGLES, 0, geometry.count() as i32))?;
        }

        Ok(())
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
