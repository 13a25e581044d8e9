//! Blocking HTTP feed and event source.

use crate::atom;
use crate::constants::{MediaTypes, USER_AGENT};
use crate::error::HttpError;
use bytes::Bytes;
use feedwalk_core::{FeedConfig, FeedResult, Page};
use feedwalk_log::{EventSource, FeedSource};
use reqwest::header::ACCEPT;
use tracing::trace;

/// Feed and event source backed by a blocking HTTP client.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    http_client: reqwest::blocking::Client,
}

impl HttpFeedClient {
    /// Build a client using the timeout from `config`
    ///
    /// # Errors
    ///
    /// Returns error if the TLS backend cannot be initialised
    pub fn new(config: &FeedConfig) -> Result<Self, HttpError> {
        let http_client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { http_client })
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(http_client: reqwest::blocking::Client) -> Self {
        Self { http_client }
    }

    fn get(&self, url: &str, accept: &'static str) -> Result<Bytes, HttpError> {
        trace!(url, accept, "GET");
        let response = self.http_client.get(url).header(ACCEPT, accept).send()?;

        let status = response.status();
        trace!(url, %status, "response");
        if !status.is_success() {
            return Err(HttpError::Status(status));
        }
        Ok(response.bytes()?)
    }
}

impl FeedSource for HttpFeedClient {
    fn fetch_page(&self, url: &str) -> FeedResult<Page> {
        self.get(url, MediaTypes::ATOM_JSON)
            .and_then(|body| atom::parse(&body).map_err(HttpError::from))
            .map_err(|e| e.into_feed_error(url))
    }
}

impl EventSource for HttpFeedClient {
    fn fetch_event(&self, url: &str) -> FeedResult<Bytes> {
        self.get(url, MediaTypes::JSON)
            .map_err(|e| e.into_feed_error(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedwalk_core::{FeedEndpoint, FeedError, StreamId};
    use feedwalk_log::EventCursor;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answer one connection per canned response, returning the raw requests.
    /// `responses` receives the server's base URL.
    fn serve<F>(responses: F) -> (String, JoinHandle<Vec<String>>)
    where
        F: FnOnce(&str) -> Vec<(&'static str, String)>,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let responses = responses(&base);

        let handle = thread::spawn(move || {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut conn, _) = listener.accept().unwrap();
                let mut raw = Vec::new();
                let mut buf = [0u8; 1024];
                while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = conn.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    raw.extend_from_slice(&buf[..n]);
                }
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                conn.write_all(response.as_bytes()).unwrap();
                requests.push(String::from_utf8_lossy(&raw).to_lowercase());
            }
            requests
        });

        (base, handle)
    }

    fn page_json(base: &str, sequences: &[u64]) -> String {
        let entries: Vec<String> = sequences
            .iter()
            .map(|seq| {
                format!(
                    r#"{{"title": "{seq}@orders", "summary": "OrderPlaced", "links": [{{"uri": "{base}/streams/orders/{seq}", "relation": "alternate"}}]}}"#
                )
            })
            .collect();
        format!(r#"{{"headOfStream": true, "links": [], "entries": [{}]}}"#, entries.join(","))
    }

    fn client() -> HttpFeedClient {
        HttpFeedClient::new(&FeedConfig::default()).unwrap()
    }

    #[test]
    fn test_fetch_page_sends_atom_accept() {
        let (base, server) = serve(|base| vec![("200 OK", page_json(base, &[1, 0]))]);

        let page = client()
            .fetch_page(&format!("{}/streams/orders/0/forward/20", base))
            .unwrap();
        assert_eq!(page.len(), 2);
        assert!(page.head_of_stream);
        assert_eq!(
            page.at_causal(0).and_then(|e| e.alternate()),
            Some(format!("{}/streams/orders/0", base).as_str())
        );

        let requests = server.join().unwrap();
        assert!(requests[0].starts_with("get /streams/orders/0/forward/20 "));
        assert!(requests[0].contains("accept: application/vnd.eventstore.atom+json"));
    }

    #[test]
    fn test_fetch_event_returns_raw_body() {
        let (base, server) = serve(|_| vec![("200 OK", r#"{"orderId": 7}"#.to_string())]);

        let body = client()
            .fetch_event(&format!("{}/streams/orders/0", base))
            .unwrap();
        assert_eq!(&body[..], br#"{"orderId": 7}"#);

        let requests = server.join().unwrap();
        assert!(requests[0].contains("accept: application/json"));
    }

    #[test]
    fn test_non_success_status() {
        let (base, server) = serve(|_| vec![("404 Not Found", String::new())]);
        let url = format!("{}/streams/missing/0/forward/20", base);

        let err = client().fetch_page(&url).unwrap_err();
        assert_eq!(err, FeedError::Status { url, status: 404 });
        server.join().unwrap();
    }

    #[test]
    fn test_malformed_document() {
        let (base, server) = serve(|_| vec![("200 OK", "<feed/>".to_string())]);

        let err = client()
            .fetch_page(&format!("{}/streams/orders/0/forward/20", base))
            .unwrap_err();
        assert!(matches!(err, FeedError::Malformed { .. }));
        server.join().unwrap();
    }

    #[test]
    fn test_connection_refused_is_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/streams/orders/0", listener.local_addr().unwrap());
        drop(listener);

        let err = client().fetch_event(&url).unwrap_err();
        assert!(matches!(err, FeedError::Transport { .. }));
    }

    #[test]
    fn test_cursor_over_http() {
        // open, then one refresh once the walk runs out of local entries
        let (base, server) = serve(|base| {
            let page = page_json(base, &[1, 0]);
            vec![("200 OK", page.clone()), ("200 OK", page)]
        });

        let endpoint = FeedEndpoint::parse(&base).unwrap();
        let stream = StreamId::new("orders").unwrap();
        let mut cursor = EventCursor::open(client(), &endpoint, &stream, 0, 20).unwrap();
        assert_eq!(cursor.event_url(), format!("{}/streams/orders/0", base));

        let mut second = cursor.next().unwrap().unwrap();
        assert_eq!(second.event_url(), format!("{}/streams/orders/1", base));
        assert!(second.next().unwrap().is_none());

        let requests = server.join().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].starts_with("get /streams/orders/0/forward/20 "));
    }
}
