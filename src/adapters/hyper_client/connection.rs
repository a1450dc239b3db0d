use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use hyper::rt::{Read, ReadBufCursor, Write};
use hyper_util::client::legacy::connect::{Connected, Connection};
use hyper_util::rt::TokioIo;

use crate::domain::ProxyStream;

/// Dispatched stream as seen by a hyper client.
pub struct ProxyConnection {
    inner: TokioIo<ProxyStream>,
    proxied: bool,
}

impl ProxyConnection {
    pub fn into_inner(self) -> ProxyStream {
        self.inner.into_inner()
    }
}

impl From<ProxyStream> for ProxyConnection {
    fn from(stream: ProxyStream) -> Self {
        Self {
            proxied: stream.uses_absolute_form(),
            inner: TokioIo::new(stream),
        }
    }
}

impl Read for ProxyConnection {
    fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context<'_>, buf: ReadBufCursor<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl Write for ProxyConnection {
    fn poll_write(mut self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.inner).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

impl Connection for ProxyConnection {
    fn connected(&self) -> Connected {
        Connected::new().proxy(self.proxied)
    }
}
