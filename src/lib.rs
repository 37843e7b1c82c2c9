pub mod assets;
pub mod config;
pub mod input;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use assets::shaders::{load_text, ShaderSource, SourceText};
pub use config::core::AppConfig;
pub use input::{EventQueue, EventSource, InputEvent, WindowEvents};
pub use render::context::GlContext;
pub use render::mesh::{Mesh, MeshData, Scene};
pub use render::pipeline::{FrameTarget, GlFrame, LoopState, RenderLoop};
pub use render::shaders::{ShaderKind, ShaderProgram, ShaderUnit};
pub use utils::error::LearnGlError;
