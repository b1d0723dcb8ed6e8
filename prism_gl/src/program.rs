use std::ffi::{c_char, CString};
use std::fmt;

use gl::types::{GLenum, GLint, GLuint};
use thiserror::Error;

use crate::source::ShaderSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("failed to link shader program:\n{log}")]
    Link { log: String },
}

pub struct ProgramBuilder {
    vert: String,
    frag: String,
}

impl ProgramBuilder {
    pub fn new(source: &ShaderSource) -> Self {
        Self {
            vert: source.vertex.clone(),
            frag: source.fragment.clone(),
        }
    }

    pub fn from_sources(vert: &str, frag: &str) -> Self {
        Self {
            vert: vert.to_owned(),
            frag: frag.to_owned(),
        }
    }

    /// Compiles both stages, links them and validates the result.
    ///
    /// Both compiles always run, so one pass reports diagnostics for both
    /// stages when both are broken; the second failure is logged and the
    /// first is returned. Linking is only attempted once both stages have
    /// compiled. A failed validation is reported as a warning only, since
    /// drivers may validate against state that is not bound yet.
    pub fn build(self) -> Result<Program, ProgramError> {
        let vert = compile_stage(ShaderStage::Vertex, &self.vert);
        let frag = compile_stage(ShaderStage::Fragment, &self.frag);

        let (vert, frag) = match (vert, frag) {
            (Ok(vert), Ok(frag)) => (vert, frag),
            (Err(first), Err(second)) => {
                log::error!("{second}");
                return Err(first);
            }
            (Err(err), Ok(id)) | (Ok(id), Err(err)) => {
                unsafe { gl::DeleteShader(id) };
                return Err(err);
            }
        };

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            let mut success: GLint = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);

            // stage objects are transient, gone whether or not the link worked
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            if success != 1 {
                let log = program_info_log(program);
                gl::DeleteProgram(program);

                return Err(ProgramError::Link { log });
            }

            gl::ValidateProgram(program);
            gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut success);
            if success != 1 {
                log::warn!(
                    "program validation failed:\n{}",
                    program_info_log(program)
                );
            }

            Ok(Program { id: program })
        }
    }
}

fn compile_stage(stage: ShaderStage, source: &str) -> Result<GLuint, ProgramError> {
    let source = CString::new(source).map_err(|_| ProgramError::Compile {
        stage,
        log: "source contains an interior NUL byte".to_owned(),
    })?;

    unsafe {
        let id = gl::CreateShader(stage.gl_enum());

        gl::ShaderSource(
            id,
            1,
            (&source.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );
        gl::CompileShader(id);

        let mut success: GLint = 0;
        gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
        if success != 1 {
            let log = shader_info_log(id);
            gl::DeleteShader(id);

            return Err(ProgramError::Compile { stage, log });
        }

        Ok(id)
    }
}

unsafe fn shader_info_log(id: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);

    let mut buf = vec![0_u8; len.max(0) as usize];
    let mut written: GLint = 0;
    gl::GetShaderInfoLog(
        id,
        buf.len() as GLint,
        &mut written,
        buf.as_mut_ptr() as *mut c_char,
    );
    buf.truncate(written.max(0) as usize);

    String::from_utf8_lossy(&buf).into_owned()
}

unsafe fn program_info_log(id: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);

    let mut buf = vec![0_u8; len.max(0) as usize];
    let mut written: GLint = 0;
    gl::GetProgramInfoLog(
        id,
        buf.len() as GLint,
        &mut written,
        buf.as_mut_ptr() as *mut c_char,
    );
    buf.truncate(written.max(0) as usize);

    String::from_utf8_lossy(&buf).into_owned()
}

/// A linked program handle. Only ever constructed fully linked; failed
/// builds return an error instead of a handle.
pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// `None` when the uniform does not exist or was optimized out.
    pub fn uniform_location(&self, name: &str) -> Option<GLint> {
        let name = CString::new(name).ok()?;
        let location = unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) };

        (location >= 0).then_some(location)
    }

    pub fn set_uniform_4f(&self, location: GLint, x: f32, y: f32, z: f32, w: f32) {
        unsafe {
            gl::UseProgram(self.id);
            gl::Uniform4f(location, x, y, z, w);
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn stage_gl_enums() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn compile_error_carries_stage_and_log() {
        let err = ProgramError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3(1): error: syntax error".to_owned(),
        };

        assert_eq!(
            err.to_string(),
            "failed to compile fragment shader:\n0:3(1): error: syntax error"
        );
    }

    #[test]
    fn link_error_carries_log() {
        let err = ProgramError::Link {
            log: "error: unresolved varying".to_owned(),
        };

        assert_eq!(
            err.to_string(),
            "failed to link shader program:\nerror: unresolved varying"
        );
    }
}
