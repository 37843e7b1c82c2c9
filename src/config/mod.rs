pub mod core;
pub mod rendering;
pub mod shaders;
pub mod window;

pub use self::core::{load_from_path, load_or_create_config, load_or_create_config_at, AppConfig};
pub use rendering::RenderConfig;
pub use shaders::{ShaderConfig, ShaderSourceMode};
pub use window::WindowConfig;
