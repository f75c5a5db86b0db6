// src/core/net.rs
//! Raw text sources for the ingestion pipeline.
//!
//! The pipeline only needs "give me the current payload as text". Remote reads
//! go through a blocking `reqwest` client and always ask for the freshest copy:
//! a cache-busting query parameter plus no-cache request headers.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use tracing::debug;

use crate::config::consts::{CACHE_BUST_PARAM, USER_AGENT};
use crate::config::options::{SourceLocation, SourceOptions};
use crate::error::{IngestError, Result};

pub trait Fetch: Send + Sync {
    /// Fetch the whole payload. Called once per refresh cycle.
    fn fetch(&self) -> Result<String>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// Build the fetcher for the configured location.
pub fn fetcher_for(source: &SourceOptions) -> Result<Box<dyn Fetch>> {
    Ok(match &source.location {
        SourceLocation::Url(url) => Box::new(HttpFetcher::new(url, source.timeout)?),
        SourceLocation::File(path) => Box::new(FileFetcher::new(path)),
    })
}

/* ---------------- HTTP ---------------- */

pub struct HttpFetcher {
    client: Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self::with_client(client, url))
    }

    /// Use a caller-built client (proxy, TLS roots). Request headers are still ours.
    pub fn with_client(client: Client, url: &str) -> Self {
        Self { client, url: s!(url) }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self) -> Result<String> {
        let url = cache_busted(&self.url, unix_millis());
        debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache, no-store, max-age=0")
            .header(PRAGMA, "no-cache")
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(IngestError::Http { status: status.as_u16(), url: self.url.clone() });
        }

        Ok(resp.text()?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Append `_cb=<stamp>` so no intermediary can answer from cache.
pub fn cache_busted(url: &str, stamp: u128) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((b, f)) => (b, Some(f)),
        None => (url, None),
    };
    let sep = if base.contains('?') { '&' } else { '?' };
    let mut out = format!("{base}{sep}{CACHE_BUST_PARAM}={stamp}");
    if let Some(f) = fragment {
        out.push('#');
        out.push_str(f);
    }
    out
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/* ---------------- Local file ---------------- */

/// Reads a saved export from disk. Re-read on every refresh, so editing the
/// file while `watch` runs behaves like editing the sheet.
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl Fetch for FileFetcher {
    fn fetch(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    use super::*;
    use crate::error::ErrorKind;

    /// Answer one request with `response`; the raw request head comes back on the channel.
    fn serve_once(response: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
            }
            tx.send(String::from_utf8_lossy(&head).into_owned()).unwrap();
            stream.write_all(response.as_bytes()).unwrap();
        });

        (format!("http://{addr}/sheet?tqx=out:csv"), rx)
    }

    fn local_fetcher(url: &str) -> HttpFetcher {
        // Keep a proxy from the environment out of a loopback test.
        let client = Client::builder().no_proxy().timeout(Duration::from_secs(5)).build().unwrap();
        HttpFetcher::with_client(client, url)
    }

    #[test]
    fn request_bypasses_caches() {
        let (url, head) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\na,b\n");

        let body = local_fetcher(&url).fetch().unwrap();
        assert_eq!(body, "a,b\n");

        let head = head.recv().unwrap().to_lowercase();
        let request_line = head.lines().next().unwrap();
        assert!(request_line.starts_with("get /sheet?tqx=out:csv&_cb="), "{request_line}");
        assert!(head.contains("\r\ncache-control: no-cache"), "{head}");
        assert!(head.contains("\r\npragma: no-cache"), "{head}");
    }

    #[test]
    fn error_status_is_transport_failure() {
        let (url, _head) = serve_once("HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");

        let err = local_fetcher(&url).fetch().unwrap_err();
        assert!(matches!(err, IngestError::Http { status: 500, .. }), "{err:?}");
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
    }

    #[test]
    fn cache_bust_picks_separator() {
        assert_eq!(cache_busted("https://x/y", 7), "https://x/y?_cb=7");
        assert_eq!(cache_busted("https://x/y?tqx=out:csv", 7), "https://x/y?tqx=out:csv&_cb=7");
        assert_eq!(cache_busted("https://x/y?a=1#gid=0", 7), "https://x/y?a=1&_cb=7#gid=0");
    }
}
