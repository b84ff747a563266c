//! A hand-driven HTTP/1.1 server for cases wiremock cannot express: custom
//! reason phrases, truncated bodies and connection counting.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub struct RawServer {
    addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
}

impl RawServer {
    /// Answer every request with `response` written verbatim. Connections are
    /// kept open for further requests unless `close_after_response` is set.
    pub async fn start(response: impl Into<String>, close_after_response: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind raw server");
        let addr = listener.local_addr().expect("Failed to read local address");
        let accepted = Arc::new(AtomicUsize::new(0));
        let response: Arc<str> = response.into().into();

        let counter = accepted.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let response = response.clone();
                tokio::spawn(serve_connection(stream, response, close_after_response));
            }
        });

        Self { addr, accepted }
    }

    pub fn uri(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of TCP connections accepted so far.
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}

/// Build a complete response with a correct `Content-Length`.
pub fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    )
}

async fn serve_connection(mut stream: TcpStream, response: Arc<str>, close_after_response: bool) {
    loop {
        match read_request(&mut stream).await {
            Ok(true) => {}
            _ => return,
        }
        if stream.write_all(response.as_bytes()).await.is_err() {
            return;
        }
        let _ = stream.flush().await;
        if close_after_response {
            let _ = stream.shutdown().await;
            return;
        }
    }
}

/// Read one request (headers plus `Content-Length` body). Returns false on EOF.
async fn read_request(stream: &mut TcpStream) -> std::io::Result<bool> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);

            while buf.len() < end + 4 + content_length {
                let n = stream.read(&mut chunk).await?;
                if n == 0 {
                    return Ok(false);
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            return Ok(true);
        }

        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(false);
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}
