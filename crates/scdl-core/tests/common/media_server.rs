//! Minimal HTTP/1.1 server standing in for both the API host and the media origin.
//!
//! `GET /tracks/<id>...` answers 302 with `Location: <base>media/<id>.mp3?sig=xyz`
//! (or 404 for ids listed in `missing_tracks`). `GET /media/...` answers 200
//! with the body, written in small pieces. Requests are counted per route.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct MediaServerOptions {
    /// If false, the media response omits `Content-Length` and ends by closing the connection.
    pub send_content_length: bool,
    /// Track ids the API answers with 404 instead of a redirect.
    pub missing_tracks: &'static [&'static str],
}

impl Default for MediaServerOptions {
    fn default() -> Self {
        Self {
            send_content_length: true,
            missing_tracks: &[],
        }
    }
}

#[derive(Default)]
struct Counters {
    api_hits: AtomicUsize,
    media_hits: AtomicUsize,
    api_targets: Mutex<Vec<String>>,
}

pub struct MediaServer {
    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub base: String,
    counters: Arc<Counters>,
}

impl MediaServer {
    pub fn api_hits(&self) -> usize {
        self.counters.api_hits.load(Ordering::SeqCst)
    }

    pub fn media_hits(&self) -> usize {
        self.counters.media_hits.load(Ordering::SeqCst)
    }

    /// Request targets (path and query) seen on the API route, in order.
    pub fn api_targets(&self) -> Vec<String> {
        self.counters.api_targets.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `body`. The server runs until the process exits.
pub fn start(body: Vec<u8>) -> MediaServer {
    start_with_options(body, MediaServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: MediaServerOptions) -> MediaServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}/", port);
    let counters = Arc::new(Counters::default());
    let body = Arc::new(body);
    {
        let base = base.clone();
        let counters = Arc::clone(&counters);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let body = Arc::clone(&body);
                let counters = Arc::clone(&counters);
                let base = base.clone();
                thread::spawn(move || handle(stream, &base, &body, &counters, opts));
            }
        });
    }
    MediaServer { base, counters }
}

fn handle(
    mut stream: std::net::TcpStream,
    base: &str,
    body: &[u8],
    counters: &Counters,
    opts: MediaServerOptions,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, target) = parse_request_line(request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    if let Some(rest) = target.strip_prefix("/tracks/") {
        counters.api_hits.fetch_add(1, Ordering::SeqCst);
        counters.api_targets.lock().unwrap().push(target.to_string());
        let id = rest.split(['/', '?']).next().unwrap_or("");
        if opts.missing_tracks.iter().any(|m| *m == id) {
            let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            return;
        }
        let response = format!(
            "HTTP/1.1 302 Found\r\nLocation: {}media/{}.mp3?sig=xyz\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            base, id
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if target.starts_with("/media/") {
        counters.media_hits.fetch_add(1, Ordering::SeqCst);
        let length = if opts.send_content_length {
            format!("Content-Length: {}\r\n", body.len())
        } else {
            String::new()
        };
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: audio/mpeg\r\n{}Connection: close\r\n\r\n",
            length
        );
        let _ = stream.write_all(head.as_bytes());
        for piece in body.chunks(4096) {
            if stream.write_all(piece).is_err() {
                return;
            }
            let _ = stream.flush();
        }
        return;
    }

    let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
}

/// Returns (method, request target) from the first request line.
fn parse_request_line(request: &str) -> (&str, &str) {
    let line = request.lines().next().unwrap_or("");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("");
    (method, target)
}
