use std::time::Duration;

/// Construction-time configuration for the lifecycle runtime.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ArViewConfig {
    /// Application identity token handed to the engine factory at Create.
    pub app_signature: String,

    /// Steady-state frame pacing of the render context, in milliseconds.
    pub frame_interval_ms: u64,
}

impl Default for ArViewConfig {
    fn default() -> Self {
        Self {
            app_signature: String::new(),
            frame_interval_ms: 16,
        }
    }
}

impl ArViewConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
