use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tracing::debug;

use crate::domain::Result;

/// Resolver answer: the raw directive list, `None` meaning direct.
pub type ResolverAnswer = Result<Option<String>>;

pub type ResolveFuture = BoxFuture<'static, ResolverAnswer>;

/// Port for asking which proxy to use for a given URL
///
/// A resolver may answer through `reply`, through the returned future, or
/// both. Only the first answer is used.
pub trait ProxyResolverPort: Send + Sync {
    fn resolve_proxy(&self, url: &str, reply: ProxyReply) -> Option<ResolveFuture>;
}

struct ReplySlot {
    handled: AtomicBool,
    sender: Mutex<Option<oneshot::Sender<ResolverAnswer>>>,
}

/// Single-shot answer channel handed to a resolver.
///
/// Clones share the same slot; whichever clone answers first wins.
#[derive(Clone)]
pub struct ProxyReply {
    slot: Arc<ReplySlot>,
}

impl ProxyReply {
    pub fn channel() -> (Self, oneshot::Receiver<ResolverAnswer>) {
        let (sender, receiver) = oneshot::channel();
        let reply = Self {
            slot: Arc::new(ReplySlot {
                handled: AtomicBool::new(false),
                sender: Mutex::new(Some(sender)),
            }),
        };
        (reply, receiver)
    }

    /// Delivers the raw directive list. Returns `false` when an answer was
    /// already delivered.
    pub fn answer(&self, proxy: Option<String>) -> bool {
        self.send(Ok(proxy))
    }

    pub fn fail(&self, error: crate::domain::ProxyError) -> bool {
        self.send(Err(error))
    }

    pub fn send(&self, answer: ResolverAnswer) -> bool {
        if self.slot.handled.swap(true, Ordering::AcqRel) {
            debug!("ignoring late resolver answer");
            return false;
        }

        let sender = match self.slot.sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(sender) => sender.send(answer).is_ok(),
            None => false,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.slot.handled.load(Ordering::Acquire)
    }
}
