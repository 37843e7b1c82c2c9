// shaders.rs - Shader compilation and program linking

use crate::assets::shaders::{ShaderSource, SourceText};
use crate::config::shaders::ShaderConfig;
use gl::types::*;
use log::{debug, error, warn};
use std::fmt;
use std::ptr;
use thiserror::Error;

/// Upper bound on the diagnostic text read back from the driver.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("No shader source available from {0}")]
    MissingSource(String),
    #[error("{kind} shader compilation failed: {log}")]
    Compilation { kind: ShaderKind, log: String },
    #[error("Program linking failed: {0}")]
    Linking(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => write!(f, "Vertex"),
            ShaderKind::Fragment => write!(f, "Fragment"),
        }
    }
}

/// Sources compiled into the binary; `assets/shaders/basic.{vert,frag}` carry the same text.
pub mod builtin {
    pub const VERTEX_SRC: &str = "#version 330 core
layout (location = 0) in vec3 position;
void main() {
    gl_Position = vec4(position.x, position.y, position.z, 1.0);
}
";

    pub const FRAGMENT_SRC: &str = "#version 330 core
out vec4 color;
void main() {
    color = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";
}

type InfoLogFn = unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar);

fn read_info_log(id: GLuint, getter: InfoLogFn) -> String {
    let mut buffer = vec![0u8; INFO_LOG_CAPACITY];
    let mut written: GLsizei = 0;
    unsafe {
        getter(
            id,
            INFO_LOG_CAPACITY as GLsizei,
            &mut written,
            buffer.as_mut_ptr() as *mut GLchar,
        );
    }
    info_log_to_string(&buffer, written)
}

/// Decodes the first `written` bytes of a driver log buffer, clamped to the buffer.
pub(crate) fn info_log_to_string(buffer: &[u8], written: GLsizei) -> String {
    let len = usize::try_from(written).unwrap_or(0).min(buffer.len());
    let text = &buffer[..len];
    let text = match text.iter().position(|&b| b == 0) {
        Some(end) => &text[..end],
        None => text,
    };
    String::from_utf8_lossy(text).trim_end().to_string()
}

/// A compiled (or failed) shader object. Deleted on drop.
#[derive(Debug)]
pub struct ShaderUnit {
    id: GLuint,
    compiled: bool,
    info_log: String,
}

impl ShaderUnit {
    /// Compiles `source` as a shader of the given kind.
    ///
    /// A failed compile is logged and still yields a unit; linking it later fails as well.
    pub fn compile(source: &SourceText, kind: ShaderKind) -> Self {
        if source.has_no_contents() {
            warn!("{} shader source is empty", kind);
        }

        let id = unsafe { gl::CreateShader(kind.gl_enum()) };
        let c_source = source.as_c_str();

        unsafe {
            gl::ShaderSource(id, 1, &c_source.as_ptr(), ptr::null());
            gl::CompileShader(id);
        }

        let mut success: GLint = 0;
        unsafe {
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
        }

        let compiled = success != 0;
        let info_log = if compiled {
            debug!("{} shader compilation - success", kind);
            String::new()
        } else {
            let log = read_info_log(id, gl::GetShaderInfoLog);
            error!("{} shader compilation - failed\n{}", kind, log);
            log
        };

        Self {
            id,
            compiled,
            info_log,
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    pub fn info_log(&self) -> &str {
        &self.info_log
    }
}

impl Drop for ShaderUnit {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) };
    }
}

/// A linked program object. Deleted on drop.
#[derive(Debug)]
pub struct ShaderProgram {
    id: GLuint,
    linked: bool,
    info_log: String,
}

impl ShaderProgram {
    /// Attaches every unit and links them. The units are deleted afterwards; the driver keeps
    /// them alive for as long as the program references them.
    pub fn link<I>(units: I) -> Self
    where
        I: IntoIterator<Item = ShaderUnit>,
    {
        let id = unsafe { gl::CreateProgram() };
        let units: Vec<ShaderUnit> = units.into_iter().collect();

        unsafe {
            for unit in &units {
                gl::AttachShader(id, unit.id());
            }
            gl::LinkProgram(id);
        }

        let mut success: GLint = 0;
        unsafe {
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
        }

        let linked = success != 0;
        let info_log = if linked {
            debug!("Shader program link - success ({} units)", units.len());
            String::new()
        } else {
            let log = read_info_log(id, gl::GetProgramInfoLog);
            error!("Shader program link - failed\n{}", log);
            log
        };

        drop(units);

        Self {
            id,
            linked,
            info_log,
        }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn info_log(&self) -> &str {
        &self.info_log
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) };
    }
}

fn compile_stage(
    source: &ShaderSource<'_>,
    kind: ShaderKind,
    strict: bool,
) -> Result<ShaderUnit, ShaderError> {
    let text = match source.load() {
        Some(text) => text,
        None if strict => return Err(ShaderError::MissingSource(source.describe())),
        None => {
            error!(
                "No {} shader source from {}, compiling empty source",
                kind,
                source.describe()
            );
            SourceText::empty()
        }
    };

    let unit = ShaderUnit::compile(&text, kind);
    if strict && !unit.is_compiled() {
        return Err(ShaderError::Compilation {
            kind,
            log: unit.info_log().to_string(),
        });
    }
    Ok(unit)
}

/// Builds the vertex/fragment program and makes it current.
///
/// Unless `strict` is set, missing sources and failed compiles or links are logged and the
/// resulting (unusable) program is returned anyway.
pub fn build_program(
    vertex: ShaderSource<'_>,
    fragment: ShaderSource<'_>,
    strict: bool,
) -> Result<ShaderProgram, ShaderError> {
    debug!("Commencing shader compile");
    let vertex_unit = compile_stage(&vertex, ShaderKind::Vertex, strict)?;
    let fragment_unit = compile_stage(&fragment, ShaderKind::Fragment, strict)?;

    let program = ShaderProgram::link([vertex_unit, fragment_unit]);
    if strict && !program.is_linked() {
        return Err(ShaderError::Linking(program.info_log().to_string()));
    }

    program.set_used();
    debug!("Shader compile complete");
    Ok(program)
}

/// [`build_program`] with the sources and strictness from config.
pub fn program_from_config(config: &ShaderConfig) -> Result<ShaderProgram, ShaderError> {
    let (vertex, fragment) = config.sources();
    build_program(vertex, fragment, config.strict)
}
