use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;

/// Any byte stream a proxy connector can hand back.
pub trait ProxyIo: AsyncRead + AsyncWrite + Send + Unpin {}

impl<T: AsyncRead + AsyncWrite + Send + Unpin> ProxyIo for T {}

/// The socket handed back to the caller once a request is dispatched.
pub enum ProxyStream {
    Tcp(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
    Proxied {
        io: Box<dyn ProxyIo>,
        /// Requests on this stream must use absolute-form targets
        /// (plain HTTP forwarded by a proxy).
        absolute_form: bool,
    },
}

impl ProxyStream {
    /// A stream tunnelled through a proxy to the destination.
    pub fn tunneled(io: impl ProxyIo + 'static) -> Self {
        ProxyStream::Proxied {
            io: Box::new(io),
            absolute_form: false,
        }
    }

    /// A stream to an HTTP proxy that forwards requests itself.
    pub fn forwarding(io: impl ProxyIo + 'static) -> Self {
        ProxyStream::Proxied {
            io: Box::new(io),
            absolute_form: true,
        }
    }

    pub fn is_proxied(&self) -> bool {
        matches!(self, ProxyStream::Proxied { .. })
    }

    pub fn uses_absolute_form(&self) -> bool {
        matches!(self, ProxyStream::Proxied { absolute_form: true, .. })
    }
}

impl fmt::Debug for ProxyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyStream::Tcp(stream) => f.debug_tuple("Tcp").field(stream).finish(),
            ProxyStream::Tls(_) => f.write_str("Tls"),
            ProxyStream::Proxied { absolute_form, .. } => f
                .debug_struct("Proxied")
                .field("absolute_form", absolute_form)
                .finish_non_exhaustive(),
        }
    }
}

impl AsyncRead for ProxyStream {
    fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            ProxyStream::Tcp(inner) => Pin::new(inner).poll_read(cx, buf),
            ProxyStream::Tls(inner) => Pin::new(inner.as_mut()).poll_read(cx, buf),
            ProxyStream::Proxied { io, .. } => Pin::new(io.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for ProxyStream {
    fn poll_write(mut self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        match &mut *self {
            ProxyStream::Tcp(inner) => Pin::new(inner).poll_write(cx, buf),
            ProxyStream::Tls(inner) => Pin::new(inner.as_mut()).poll_write(cx, buf),
            ProxyStream::Proxied { io, .. } => Pin::new(io.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            ProxyStream::Tcp(inner) => Pin::new(inner).poll_flush(cx),
            ProxyStream::Tls(inner) => Pin::new(inner.as_mut()).poll_flush(cx),
            ProxyStream::Proxied { io, .. } => Pin::new(io.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            ProxyStream::Tcp(inner) => Pin::new(inner).poll_shutdown(cx),
            ProxyStream::Tls(inner) => Pin::new(inner.as_mut()).poll_shutdown(cx),
            ProxyStream::Proxied { io, .. } => Pin::new(io.as_mut()).poll_shutdown(cx),
        }
    }
}
