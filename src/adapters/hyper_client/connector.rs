use crate::domain::{ConnectionRequest, Dispatcher, ProxyError};
use futures::Future;
use hyper::Uri;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower_service::Service;

use super::connection::ProxyConnection;

/// Lets a `hyper_util` client open its connections through a [`Dispatcher`].
#[derive(Clone)]
pub struct HyperConnector {
    dispatcher: Arc<Dispatcher>,
}

impl HyperConnector {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }
}

impl Service<Uri> for HyperConnector {
    type Response = ProxyConnection;
    type Error = ProxyError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, uri: Uri) -> Self::Future {
        let dispatcher = self.dispatcher.clone();

        Box::pin(async move {
            let request = ConnectionRequest::from_uri(&uri)?;
            let stream = dispatcher.connect(&request).await?;
            Ok(ProxyConnection::from(stream))
        })
    }
}
