//! Canned-response HTTP stub for tests.
//!
//! Speaks just enough HTTP/1.1 over a real socket to exercise the client
//! and the pollers: accept one connection, read the request head, write a
//! fixed response, close.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Serve exactly one request with the given response, returning the base
/// URL to point a client at.
pub async fn serve_once(
    status_line: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> String {
    let (base, _request) = serve_once_capturing(status_line, content_type, body).await;
    base
}

/// Like [`serve_once`], also handing back the request head (request line
/// plus headers) that the server received.
pub async fn serve_once_capturing(
    status_line: &'static str,
    content_type: &'static str,
    body: &'static str,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (head_tx, head_rx) = oneshot::channel();

    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            let head = respond(socket, status_line, content_type, body).await;
            let _ = head_tx.send(head);
        }
    });

    (format!("http://{addr}/"), head_rx)
}

async fn respond(
    mut socket: TcpStream,
    status_line: &str,
    content_type: &str,
    body: &str,
) -> String {
    let mut buf = [0u8; 4096];
    let mut head = Vec::new();
    loop {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                head.extend_from_slice(&buf[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }

    let response = format!(
        "HTTP/1.1 {status_line}\r\n\
         Content-Type: {content_type}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;

    String::from_utf8_lossy(&head).into_owned()
}
