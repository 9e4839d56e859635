use crate::dispatcher::HeaderVec;
use may_minihttp::Request;
use std::sync::Arc;
use tracing::debug;

/// Parsed head of an incoming HTTP request.
///
/// The path is kept verbatim as received from the connection. A query
/// string, if present, stays part of the path: routing compares the whole
/// string literally, so no splitting is performed here.
#[derive(Debug)]
pub struct RequestHead {
    /// Raw HTTP method token (GET, POST, ...)
    pub method: String,
    /// Request path including any query string, unmodified
    pub path: String,
    /// HTTP headers (lowercase names)
    pub headers: HeaderVec,
}

/// Extract the request head from a `may_minihttp::Request`.
///
/// The body is deliberately left untouched; it is streamed to the handler by
/// the dispatcher, not buffered here.
pub fn parse_head(req: &Request) -> RequestHead {
    let method = req.method().to_string();
    let path = req.path().to_string();

    let headers: HeaderVec = req
        .headers()
        .iter()
        .map(|h| {
            (
                Arc::from(h.name.to_ascii_lowercase().as_str()),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    debug!(
        method = %method,
        path = %path,
        header_count = headers.len(),
        "http request head parsed"
    );

    RequestHead {
        method,
        path,
        headers,
    }
}
