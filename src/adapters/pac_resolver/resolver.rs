use super::pac_evaluator::evaluate_pac;
use crate::domain::{ProxyError, Result};
use crate::ports::{ProxyReply, ProxyResolverPort, ResolveFuture};
use lru::LruCache;
use reqwest::ClientBuilder;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

const PAC_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(size) => size,
    None => panic!("PAC cache size must not be zero"),
};

#[derive(Clone)]
struct PacState {
    pac_cache: Arc<RwLock<LruCache<String, String>>>,
    pac_url: Arc<RwLock<Option<String>>>,
}

/// Resolver evaluating a PAC script for every request.
///
/// Without a PAC URL every request goes direct. Answers are delivered through
/// the returned future.
#[derive(Clone)]
pub struct PacProxyResolver {
    state: PacState,
}

impl PacProxyResolver {
    pub fn new() -> Self {
        Self {
            state: PacState {
                pac_cache: Arc::new(RwLock::new(LruCache::new(PAC_CACHE_SIZE))),
                pac_url: Arc::new(RwLock::new(None)),
            },
        }
    }

    pub fn with_pac_url(pac_url: impl Into<String>) -> Self {
        let mut resolver = Self::new();
        resolver.state.pac_url = Arc::new(RwLock::new(Some(pac_url.into())));
        resolver
    }

    pub async fn update_pac_url(&self, pac_url: Option<String>) -> Result<()> {
        let mut url_guard = self.state.pac_url.write().await;
        *url_guard = pac_url;

        // Clear cache when PAC URL changes
        let mut cache = self.state.pac_cache.write().await;
        cache.clear();

        Ok(())
    }

    pub async fn pac_url(&self) -> Option<String> {
        self.state.pac_url.read().await.clone()
    }
}

impl PacState {
    async fn load_pac(&self, pac_url: &str) -> Result<String> {
        debug!("Attempting to load PAC file at {}", pac_url);

        let parsed: Url = pac_url
            .parse()
            .map_err(|e| ProxyError::ResolutionFailed(format!("Invalid PAC URL {}: {}", pac_url, e)))?;

        let pac_file = if parsed.scheme() == "file" {
            let path = parsed
                .to_file_path()
                .map_err(|_| ProxyError::ResolutionFailed(format!("Invalid PAC file path: {}", pac_url)))?;
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| ProxyError::ResolutionFailed(format!("PAC read error: {}", e)))?
        } else {
            ClientBuilder::new()
                .no_proxy()
                .build()
                .map_err(|e| ProxyError::ResolutionFailed(format!("HTTP client error: {}", e)))?
                .get(parsed)
                .send()
                .await
                .and_then(|response| response.error_for_status())
                .map_err(|e| ProxyError::ResolutionFailed(format!("PAC download error: {}", e)))?
                .text()
                .await
                .map_err(|e| ProxyError::ResolutionFailed(format!("PAC read error: {}", e)))?
        };

        let mut cache = self.pac_cache.write().await;
        cache.put(pac_url.to_string(), pac_file.clone());

        info!("Loaded PAC file from {} ({} bytes)", pac_url, pac_file.len());
        Ok(pac_file)
    }

    async fn get_pac_file(&self, pac_url: &str) -> Result<String> {
        {
            let mut cache = self.pac_cache.write().await;
            if let Some(cached) = cache.get(pac_url) {
                return Ok(cached.clone());
            }
        }

        self.load_pac(pac_url).await
    }

    async fn resolve(&self, target_url: String) -> Result<Option<String>> {
        let pac_url = self.pac_url.read().await.clone();

        let Some(pac_url) = pac_url else {
            return Ok(None);
        };

        let pac_file = self.get_pac_file(&pac_url).await?;
        tokio::task::spawn_blocking(move || evaluate_pac(&pac_file, &target_url))
            .await
            .map_err(|e| ProxyError::ResolutionFailed(format!("PAC evaluation aborted: {}", e)))?
    }
}

impl ProxyResolverPort for PacProxyResolver {
    fn resolve_proxy(&self, url: &str, _reply: ProxyReply) -> Option<ResolveFuture> {
        let state = self.state.clone();
        let url = url.to_string();
        Some(Box::pin(async move { state.resolve(url).await }))
    }
}

impl Default for PacProxyResolver {
    fn default() -> Self {
        Self::new()
    }
}
