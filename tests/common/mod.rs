//! Minimal stand-in for the APOD endpoint.
//!
//! Serves one canned response for every request on a random local port and
//! records the request targets, so tests can assert on the query string.

#![allow(dead_code)]

use std::io::{Read as _, Write as _};
use std::net::TcpListener;
use std::sync::mpsc::TryRecvError;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct ApodServer {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
    _stop: std::sync::mpsc::Sender<()>,
}

impl ApodServer {
    /// Respond to every request with `status` (e.g. `"200 OK"`) and `body`.
    pub fn start(status: &'static str, body: impl Into<String>) -> Self {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let (tx, rx) = std::sync::mpsc::channel::<()>();

        thread::spawn(move || {
            listener.set_nonblocking(true).unwrap();
            loop {
                // Stops once the server handle is dropped
                if !matches!(rx.try_recv(), Err(TryRecvError::Empty)) {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => serve_request(stream, status, &body, &seen),
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            port,
            requests,
            _stop: tx,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}/planetary/apod", self.port)
    }

    /// Request targets (path + query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Answer one request. The target is recorded before the response is sent,
/// so it is visible as soon as the client has its answer.
fn serve_request(
    mut stream: std::net::TcpStream,
    status: &str,
    body: &str,
    seen: &Mutex<Vec<String>>,
) {
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 4096];
    let n = match stream.read(&mut buf) {
        Ok(n) if n > 0 => n,
        _ => return,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
    seen.lock().unwrap().push(target);

    let header = format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body.as_bytes());
}

/// One image record titled "Test" for 2024-01-01.
pub const SINGLE_IMAGE: &str = r#"[
  {
    "date": "2024-01-01",
    "explanation": "A test image of the sky.",
    "hdurl": "https://apod.nasa.gov/apod/image/2401/test_big.jpg",
    "media_type": "image",
    "service_version": "v1",
    "title": "Test",
    "url": "https://apod.nasa.gov/apod/image/2401/test.jpg"
  }
]"#;
