//! Application configuration
//!
//! Env-derived settings shared by the binary and tests.

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Camera API base URL (including the protocol prefix path)
    pub base_url: String,
    /// State poll period in milliseconds, measured from the end of the
    /// previous fetch
    pub poll_interval_ms: u64,
    /// Connect timeout for every camera call in milliseconds
    pub connect_timeout_ms: u64,
    /// Total timeout for a state poll in milliseconds
    pub poll_timeout_ms: u64,
    /// Total timeout for a user command in milliseconds
    pub command_timeout_ms: u64,
    /// Max entries requested per file listing
    pub list_entry_count: u32,
    /// Max thumbnail size requested per file listing
    pub list_thumb_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("CAMERA_BASE_URL")
                .unwrap_or_else(|_| "http://192.168.1.1/osc".to_string()),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            connect_timeout_ms: std::env::var("CONNECT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            poll_timeout_ms: std::env::var("POLL_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            command_timeout_ms: std::env::var("COMMAND_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),
            list_entry_count: std::env::var("LIST_ENTRY_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            list_thumb_size: std::env::var("LIST_THUMB_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(640),
        }
    }
}
