use tracing::warn;

#[derive(Debug, Clone)]
pub struct AdapterConfig {
    pub ncc_base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            ncc_base_url: "http://127.0.0.1:8989/ncc/api".to_owned(),
            request_timeout_ms: 15_000,
        }
    }
}

impl AdapterConfig {
    /// Defaults overridden by `NEM_NCC_URL` and `NEM_NCC_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("NEM_NCC_URL") {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                config.ncc_base_url = url.to_owned();
            }
        }
        if let Ok(raw) = std::env::var("NEM_NCC_TIMEOUT_MS") {
            match raw.trim().parse() {
                Ok(ms) => config.request_timeout_ms = ms,
                Err(e) => warn!(value = %raw, error = %e, "ignoring invalid NEM_NCC_TIMEOUT_MS"),
            }
        }
        config
    }
}
