use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::assets::shaders::ShaderSource;
use crate::render::shaders::builtin;

/// Where the vertex/fragment source text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderSourceMode {
    /// The sources compiled into the binary.
    #[default]
    Inline,
    /// `vertex_path` and `fragment_path`, read at startup.
    Files,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    pub source: ShaderSourceMode,
    pub vertex_path: PathBuf,
    pub fragment_path: PathBuf,
    /// Treat a missing source file, a failed compile or a failed link as fatal.
    /// Off by default: failures are logged and the broken program is still used.
    pub strict: bool,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            source: ShaderSourceMode::Inline,
            vertex_path: PathBuf::from("assets/shaders/basic.vert"),
            fragment_path: PathBuf::from("assets/shaders/basic.frag"),
            strict: false,
        }
    }
}

impl ShaderConfig {
    /// The vertex and fragment sources selected by `source`.
    pub fn sources(&self) -> (ShaderSource<'_>, ShaderSource<'_>) {
        match self.source {
            ShaderSourceMode::Inline => (
                ShaderSource::Inline(builtin::VERTEX_SRC),
                ShaderSource::Inline(builtin::FRAGMENT_SRC),
            ),
            ShaderSourceMode::Files => (
                ShaderSource::File(&self.vertex_path),
                ShaderSource::File(&self.fragment_path),
            ),
        }
    }
}
