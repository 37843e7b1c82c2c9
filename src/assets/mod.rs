pub mod shaders;

pub use shaders::{load_text, ShaderSource, SourceText};
