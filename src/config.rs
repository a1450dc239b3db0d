use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use crate::domain::{ProxyError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// PAC script consulted for every request (`http(s)://` or `file://`).
    pub pac_url: Option<String>,
    /// Fixed directive list used when no PAC script is configured,
    /// e.g. `"PROXY proxy.example.net:8080; DIRECT"`.
    pub proxy: Option<String>,
    /// Give up on a resolver that has not answered after this long.
    pub resolve_timeout_ms: Option<u64>,
    /// Bound on the number of distinct directives kept in the connector cache.
    pub connector_cache_capacity: Option<usize>,
}

impl AgentConfig {
    pub fn load(app_name: &str) -> Result<Self> {
        confy::load(app_name, None).map_err(|e| ProxyError::Config(format!("failed to load {}: {}", app_name, e)))
    }

    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        confy::load_path(path).map_err(|e| ProxyError::Config(format!("failed to load {}: {}", path.display(), e)))
    }

    pub fn resolve_timeout(&self) -> Option<Duration> {
        self.resolve_timeout_ms.map(Duration::from_millis)
    }

    pub fn cache_capacity(&self) -> Option<NonZeroUsize> {
        self.connector_cache_capacity.and_then(NonZeroUsize::new)
    }
}
