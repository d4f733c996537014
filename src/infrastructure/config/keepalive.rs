//! Keep-alive responder configuration.

use serde::Deserialize;

/// Liveness endpoint for hosts that poll an HTTP port.
#[derive(Debug, Clone, Deserialize)]
pub struct KeepaliveConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Socket address to listen on (default: `0.0.0.0:8080`).
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for KeepaliveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind: default_bind(),
        }
    }
}
