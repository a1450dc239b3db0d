mod fixed;
mod pac_evaluator;
mod resolver;

use std::sync::Arc;
use tracing::debug;

use crate::config::AgentConfig;
use crate::ports::ProxyResolverPort;

pub use fixed::StaticResolver;
pub use pac_evaluator::evaluate_pac;
pub use resolver::PacProxyResolver;

/// Resolver used when the caller does not bring its own: the configured PAC
/// script, else the configured directive list, else direct.
pub fn default_resolver(config: &AgentConfig) -> Arc<dyn ProxyResolverPort> {
    if let Some(pac_url) = &config.pac_url {
        debug!("resolving proxies with PAC script {}", pac_url);
        return Arc::new(PacProxyResolver::with_pac_url(pac_url.clone()));
    }

    match &config.proxy {
        Some(proxy) => {
            debug!("resolving every URL to {}", proxy);
            Arc::new(StaticResolver::new(proxy.clone()))
        }
        None => Arc::new(StaticResolver::direct()),
    }
}
