//! Helpers shared by unit and behaviour tests.

use std::future::Future;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

/// Drive `future` to completion on a fresh current-thread runtime.
///
/// # Panics
///
/// Panics when the runtime cannot be constructed.
pub fn block_on_for_tests<F: Future>(future: F) -> F::Output {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|err| panic!("failed to build test runtime: {err}"));
    runtime.block_on(future)
}

/// Request captured by [`OneShotServer`].
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    /// Request line, for example `POST /api/interpreter HTTP/1.1`.
    pub request_line: String,
    /// Header lines exactly as received.
    pub headers: Vec<String>,
    /// Raw request body.
    pub body: String,
}

impl CapturedRequest {
    /// Return the value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then_some(value.trim())
        })
    }
}

/// Loopback HTTP server answering exactly one request with a canned reply.
///
/// Keeps HTTP adapters testable without reaching the public services.
#[derive(Debug)]
pub struct OneShotServer {
    address: SocketAddr,
    handle: JoinHandle<CapturedRequest>,
}

impl OneShotServer {
    /// Bind to an ephemeral port and serve `body` with the given status.
    ///
    /// # Panics
    ///
    /// Panics when the listener cannot be bound.
    pub fn respond_with(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("failed to bind loopback listener: {err}"));
        let address = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("listener has no local address: {err}"));
        let body = body.into();
        let handle = thread::spawn(move || serve_once(&listener, status, &body));
        Self { address, handle }
    }

    /// Base URL of the server, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Wait for the request to be served and return what was received.
    ///
    /// # Panics
    ///
    /// Panics when the server thread panicked.
    pub fn finish(self) -> CapturedRequest {
        self.handle
            .join()
            .unwrap_or_else(|_| panic!("one-shot server thread panicked"))
    }
}

fn serve_once(listener: &TcpListener, status: u16, body: &str) -> CapturedRequest {
    let (stream, _) = listener
        .accept()
        .unwrap_or_else(|err| panic!("failed to accept connection: {err}"));
    let mut reader = BufReader::new(
        stream
            .try_clone()
            .unwrap_or_else(|err| panic!("failed to clone stream: {err}")),
    );
    let mut captured = CapturedRequest::default();
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .unwrap_or_else(|err| panic!("failed to read request line: {err}"));
    captured.request_line = line.trim_end().to_owned();
    loop {
        line.clear();
        reader
            .read_line(&mut line)
            .unwrap_or_else(|err| panic!("failed to read header: {err}"));
        let header = line.trim_end();
        if header.is_empty() {
            break;
        }
        captured.headers.push(header.to_owned());
    }
    let length = captured
        .header("content-length")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut buffer = vec![0_u8; length];
    reader
        .read_exact(&mut buffer)
        .unwrap_or_else(|err| panic!("failed to read request body: {err}"));
    captured.body = String::from_utf8_lossy(&buffer).into_owned();

    let response = format!(
        "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {len}\r\nconnection: close\r\n\r\n{body}",
        reason = reason_phrase(status),
        len = body.len(),
    );
    let mut stream = stream;
    stream
        .write_all(response.as_bytes())
        .unwrap_or_else(|err| panic!("failed to write response: {err}"));
    stream
        .flush()
        .unwrap_or_else(|err| panic!("failed to flush response: {err}"));
    captured
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        504 => "Gateway Timeout",
        _ => "Status",
    }
}
