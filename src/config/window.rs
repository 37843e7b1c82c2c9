use serde::{Deserialize, Serialize};

/// Title and size only. The context version and the fixed, non-resizable frame are not
/// configurable, so unknown keys such as `resizable` are rejected instead of ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL".to_string(),
            width: 800,
            height: 600,
        }
    }
}
