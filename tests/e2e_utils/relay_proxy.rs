#![cfg(test)]
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Stand-in for an upstream proxy: relays every accepted connection to a
/// fixed upstream and records the first line the client sent.
pub struct RelayProxy {
    addr: SocketAddr,
    seen: Arc<Mutex<Vec<String>>>,
    _handle: JoinHandle<()>,
}

impl RelayProxy {
    pub async fn start(upstream: SocketAddr) -> Result<Self, Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();

        let handle = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(Self::relay(socket, upstream, recorder.clone()));
            }
        });

        Ok(Self {
            addr,
            seen,
            _handle: handle,
        })
    }

    async fn relay(mut client: TcpStream, upstream: SocketAddr, seen: Arc<Mutex<Vec<String>>>) {
        let mut buffer = vec![0; 4096];
        let n = match client.read(&mut buffer).await {
            Ok(n) if n > 0 => n,
            _ => return,
        };

        let request = String::from_utf8_lossy(&buffer[..n]);
        let first_line = request.lines().next().unwrap_or_default().to_string();
        eprintln!("[RelayProxy] {}", first_line);
        seen.lock().unwrap().push(first_line);

        let Ok(mut server) = TcpStream::connect(upstream).await else {
            let _ = client.write_all(b"HTTP/1.1 502 Bad Gateway\r\n\r\n").await;
            return;
        };
        if server.write_all(&buffer[..n]).await.is_ok() {
            let _ = tokio::io::copy_bidirectional(&mut client, &mut server).await;
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}
