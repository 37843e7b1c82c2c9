use serde::{Deserialize, Serialize};

use crate::render::mesh::Scene;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// RGBA colour the color buffer is cleared to every frame.
    pub clear_color: [f32; 4],
    pub scene: Scene,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.3, 0.3, 1.0],
            scene: Scene::Triangle,
        }
    }
}
