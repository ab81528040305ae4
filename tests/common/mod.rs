//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves bodies registered by path and 404s everything else. Every response closes
//! the connection. Request lines and User-Agent headers are recorded so tests
//! can check what the client sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A request as seen by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub path: String,
    pub user_agent: Option<String>,
}

pub struct TestServer {
    pub base_url: String,
    routes: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl TestServer {
    /// Serve `body` at `path` from now on
    pub fn route(&self, path: &str, body: &[u8]) {
        self.routes.lock().unwrap().insert(path.to_string(), body.to_vec());
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Start a server in a background thread with no routes. Runs until the
/// process exits.
pub fn start() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(Mutex::new(HashMap::new()));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let routes_for_server = Arc::clone(&routes);
    let seen_for_server = Arc::clone(&seen);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream, &routes_for_server, &seen_for_server);
        }
    });

    TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        routes,
        seen,
    }
}

/// A URL on a port nothing listens on
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/latestVersion.php", port)
}

fn handle(
    mut stream: TcpStream,
    routes: &Mutex<HashMap<String, Vec<u8>>>,
    seen: &Mutex<Vec<SeenRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&request);

    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let user_agent = request.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("user-agent")
            .then(|| value.trim().to_string())
    });
    seen.lock().unwrap().push(SeenRequest {
        path: path.clone(),
        user_agent,
    });

    let (status, body) = match routes.lock().unwrap().get(&path) {
        Some(body) => ("200 OK", body.clone()),
        None => ("404 Not Found", b"not found".to_vec()),
    };
    let header = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&body);
    let _ = stream.flush();
}
