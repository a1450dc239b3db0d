use crate::ports::{ProxyReply, ProxyResolverPort, ResolveFuture};

/// Resolver giving the same directive list for every URL.
///
/// Answers synchronously through the reply callback.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    answer: Option<String>,
}

impl StaticResolver {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }

    pub fn direct() -> Self {
        Self::default()
    }
}

impl ProxyResolverPort for StaticResolver {
    fn resolve_proxy(&self, _url: &str, reply: ProxyReply) -> Option<ResolveFuture> {
        reply.answer(self.answer.clone());
        None
    }
}
