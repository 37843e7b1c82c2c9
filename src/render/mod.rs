pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod shaders;

pub use context::{BootstrapError, GlContext};
pub use mesh::{DrawCall, Mesh, MeshData, Scene};
pub use pipeline::{FrameTarget, GlFrame, LoopState, RenderError, RenderLoop};
pub use shaders::{build_program, program_from_config, ShaderError, ShaderKind, ShaderProgram, ShaderUnit};
