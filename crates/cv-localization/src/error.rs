#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Request for {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("Failed to load {url} - status: {status}")]
    Status { url: String, status: u16 },
    #[error("Invalid dictionary JSON from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn network(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
