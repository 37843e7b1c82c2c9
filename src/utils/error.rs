use thiserror::Error;

use crate::render::{BootstrapError, RenderError, ShaderError};

/// Exit code for any error that stops the program before or during rendering.
pub const FATAL_EXIT_CODE: i32 = -1;

#[derive(Debug, Error)]
pub enum LearnGlError {
    #[error("Initialization failed: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("Shader program build failed: {0}")]
    Shader(#[from] ShaderError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl LearnGlError {
    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ShaderKind;

    #[test]
    fn test_errors_are_fatal() {
        let error: LearnGlError = BootstrapError::Loader("glClear").into();
        assert_eq!(error.exit_code(), -1);
        assert_eq!(
            error.to_string(),
            "Initialization failed: Failed to load OpenGL function: glClear"
        );
    }

    #[test]
    fn test_shader_error_message_carries_log() {
        let error: LearnGlError = ShaderError::Compilation {
            kind: ShaderKind::Fragment,
            log: "0:1: syntax error".to_string(),
        }
        .into();
        assert_eq!(error.exit_code(), FATAL_EXIT_CODE);
        assert!(error.to_string().contains("Fragment shader compilation failed: 0:1: syntax error"));
    }
}
