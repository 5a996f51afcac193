//! Local HTTP fixtures for exercising [`HttpDirectionsSource`] end to end.
//!
//! [`HttpDirectionsSource`]: conveyor_data::routing::HttpDirectionsSource

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

/// Directions response with one route, one leg and two steps.
pub const SPRINGFIELD_ROUTE: &str = r#"{
    "geocoded_waypoints": [],
    "routes": [
        {
            "summary": "I-95 S",
            "legs": [
                {
                    "start_address": "123 Main St, Springfield",
                    "end_address": "1 Oak Ave",
                    "distance": { "text": "3.1 km", "value": 3100 },
                    "duration": { "text": "7 mins", "value": 420 },
                    "steps": [
                        { "html_instructions": "Head <b>north</b> on <b>Main St</b>" },
                        { "html_instructions": "Turn <b>left</b> onto Elm Street" }
                    ]
                }
            ]
        }
    ],
    "status": "OK"
}"#;

/// Directions response rejecting the access key.
pub const REQUEST_DENIED: &str = r#"{
    "error_message": "The provided API key is invalid.",
    "routes": [],
    "status": "REQUEST_DENIED"
}"#;

/// A server answering a fixed number of requests with a canned response.
#[derive(Debug)]
pub struct CannedServer {
    addr: SocketAddr,
    handle: JoinHandle<Vec<String>>,
}

impl CannedServer {
    /// Serve `count` requests, each answered with `status` and `body`.
    pub fn serve(count: usize, status: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("bind local listener: {err}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("read listener address: {err}"));
        let handle = thread::spawn(move || {
            (0..count)
                .map(|_| answer_one(&listener, status, body))
                .collect()
        });
        Self { addr, handle }
    }

    /// Endpoint URL to configure the source with.
    pub fn endpoint(&self) -> String {
        format!("http://{}/maps/api/directions/json", self.addr)
    }

    /// Wait for every expected request and return their request lines.
    pub fn request_lines(self) -> Vec<String> {
        self.handle
            .join()
            .unwrap_or_else(|_| panic!("canned server thread panicked"))
    }
}

fn answer_one(listener: &TcpListener, status: &str, body: &str) -> String {
    let (mut stream, _) = listener
        .accept()
        .unwrap_or_else(|err| panic!("accept connection: {err}"));
    let mut reader = BufReader::new(
        stream
            .try_clone()
            .unwrap_or_else(|err| panic!("clone stream: {err}")),
    );
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .unwrap_or_else(|err| panic!("read request line: {err}"));
    loop {
        let mut header = String::new();
        let read = reader
            .read_line(&mut header)
            .unwrap_or_else(|err| panic!("read header: {err}"));
        if read == 0 || header == "\r\n" {
            break;
        }
    }
    write!(
        stream,
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .unwrap_or_else(|err| panic!("write response: {err}"));
    stream
        .flush()
        .unwrap_or_else(|err| panic!("flush response: {err}"));
    request_line.trim_end().to_owned()
}

/// An endpoint on a port nothing is listening on.
pub fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .unwrap_or_else(|err| panic!("bind local listener: {err}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|err| panic!("read listener address: {err}"));
    drop(listener);
    format!("http://{addr}/maps/api/directions/json")
}

/// A listener that takes connections into its backlog and never answers.
#[derive(Debug)]
pub struct SilentServer {
    listener: TcpListener,
}

impl SilentServer {
    /// Bind a listener on an ephemeral local port.
    pub fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .unwrap_or_else(|err| panic!("bind local listener: {err}"));
        Self { listener }
    }

    /// Endpoint URL to configure the source with.
    pub fn endpoint(&self) -> String {
        let addr = self
            .listener
            .local_addr()
            .unwrap_or_else(|err| panic!("read listener address: {err}"));
        format!("http://{addr}/maps/api/directions/json")
    }
}
