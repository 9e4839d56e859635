//! Dispatcher core - hot path for request dispatch.

use crate::ids::RequestId;
use crate::router::RouteTable;
use http::Method;
use may::coroutine;
use may::sync::mpsc;
use smallvec::SmallVec;
use std::io::Read;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Maximum inline headers before heap allocation.
/// Most requests have ≤16 headers.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Read size used when pumping a request body to a handler.
pub const BODY_CHUNK_SIZE: usize = 8 * 1024;

/// Stack-allocated header storage for the hot path.
///
/// Header names use `Arc<str>` instead of `String` because names repeat
/// across requests (Content-Type, Host, ...) and `Arc::clone()` is an O(1)
/// atomic increment. Values remain `String` as they are per-request data.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Type alias for a channel sender that feeds requests to a handler coroutine.
pub type HandlerSender = mpsc::Sender<HandlerRequest>;

/// Request data passed to a handler coroutine.
///
/// The body arrives as a sequence of chunks on the `body` channel, mirroring
/// the event-driven delivery of the underlying connection. The dispatcher
/// drops its sender once the stream is exhausted, which ends the channel and
/// signals end-of-stream to the handler. Handlers that do not care about the
/// body simply never read the channel.
pub struct HandlerRequest {
    /// Unique request ID for log correlation
    pub request_id: RequestId,
    /// HTTP method (GET, POST, ...)
    pub method: Method,
    /// Request path, verbatim as received (query string included)
    pub path: String,
    /// HTTP headers with lowercased names
    pub headers: HeaderVec,
    /// Body chunks in arrival order; the channel closes at end-of-stream
    pub body: mpsc::Receiver<Vec<u8>>,
    /// Channel for completing the response. The handler owns completion:
    /// the dispatcher never replies on its behalf.
    pub reply_tx: mpsc::Sender<HandlerResponse>,
}

impl HandlerRequest {
    /// Get a header by name (case-insensitive per RFC 7230).
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Drain the body channel and concatenate all chunks into one buffer.
    ///
    /// Blocks the handler coroutine between chunks; returns once the
    /// dispatcher signals end-of-stream by dropping its sender.
    #[must_use]
    pub fn collect_body(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for chunk in self.body.iter() {
            buf.extend_from_slice(&chunk);
        }
        buf
    }
}

/// Response data sent back from a handler coroutine.
#[derive(Debug, Clone)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, ...)
    pub status: u16,
    /// HTTP response headers
    pub headers: HeaderVec,
    /// Raw response body bytes
    pub body: Vec<u8>,
}

impl HandlerResponse {
    /// Create a response with the given status and body and no headers.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderVec::new(),
            body: body.into(),
        }
    }

    /// The fixed response written when a method is routed but the path is not.
    #[must_use]
    pub fn route_not_found() -> Self {
        let mut resp = Self::new(404, "Route Not Found");
        resp.set_header("Content-Type", "text/plain".to_string());
        resp
    }

    /// Get a header by name.
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or update a header.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// Spawn a long-lived coroutine that serves requests for one handler.
///
/// The coroutine loops over its request channel and invokes `handler_fn` for
/// each request. A handler that returns an error is logged and the request is
/// abandoned: the reply channel closed when the request was dropped, so no
/// response reaches the client. The coroutine itself survives and serves the
/// next request.
///
/// # Safety
///
/// This function is marked unsafe because it calls
/// `may::coroutine::Builder::spawn()`, which is unsafe in the `may` runtime.
/// The caller must ensure the may runtime is configured before spawning.
pub unsafe fn spawn_handler<F>(name: &str, stack_size: usize, handler_fn: F) -> HandlerSender
where
    F: Fn(HandlerRequest) -> anyhow::Result<()> + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<HandlerRequest>();
    let name = name.to_string();
    let coroutine_name = name.clone();

    // SAFETY: spawn() is unsafe because of the coroutine runtime's stack
    // requirements, not this function's logic. The handler is Send + 'static
    // and faults are reported over the reply channel closing, not by unwind.
    let spawn_result = unsafe {
        coroutine::Builder::new()
            .stack_size(stack_size)
            .spawn(move || {
                debug!(
                    handler = %coroutine_name,
                    stack_size = stack_size,
                    "handler coroutine start"
                );

                for req in rx.iter() {
                    let request_id = req.request_id;
                    let start = Instant::now();

                    if let Err(err) = handler_fn(req) {
                        // Dropping `req` above closed its reply channel; the
                        // request is abandoned without a response.
                        error!(
                            request_id = %request_id,
                            handler = %coroutine_name,
                            error = %err,
                            "handler failed without replying"
                        );
                    } else {
                        debug!(
                            request_id = %request_id,
                            handler = %coroutine_name,
                            elapsed_us = start.elapsed().as_micros() as u64,
                            "handler execution complete"
                        );
                    }
                }
            })
    };

    if let Err(e) = spawn_result {
        // The receiver is gone, so sends to this handler fail and dispatch
        // reports the request as abandoned.
        error!(
            handler = %name,
            error = %e,
            stack_size = stack_size,
            "failed to spawn handler coroutine"
        );
    }

    tx
}

/// Terminal states of a single dispatch.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A handler accepted the request and completed a response.
    Dispatched(HandlerResponse),
    /// The method is routed but the exact path is not: fixed 404.
    NotFound,
    /// No route was ever registered for the method. No response is produced
    /// and the connection is left hanging. This reproduces the original
    /// behavior, which has no fallback branch for an unrouted method; it is
    /// flagged as a defect rather than a designed contract.
    MethodNotRegistered,
    /// The handler went away without completing a response. The connection
    /// is dropped without writing anything.
    Abandoned,
}

/// Dispatcher that routes requests to registered handler coroutines.
///
/// Holds a shared reference to an immutable [`RouteTable`] built during
/// startup. Dispatch is a pure read of the table plus channel traffic, so any
/// number of connection coroutines can dispatch concurrently without locking.
#[derive(Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(table: Arc<RouteTable>) -> Self {
        Dispatcher { table }
    }

    /// The route table this dispatcher reads from.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Dispatch a request to the handler registered for (method, path).
    ///
    /// On a hit, sends the request to the handler coroutine, pumps the
    /// connection body into it in [`BODY_CHUNK_SIZE`] chunks, then blocks on
    /// the reply channel until the handler completes the response.
    pub fn dispatch<R: Read>(
        &self,
        request_id: RequestId,
        method: &Method,
        path: &str,
        headers: HeaderVec,
        body: &mut R,
    ) -> DispatchOutcome {
        let Some(routes) = self.table.routes_for(method) else {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                "no routes registered for method"
            );
            return DispatchOutcome::MethodNotRegistered;
        };

        let Some(tx) = routes.get(path) else {
            warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                "no route matched"
            );
            return DispatchOutcome::NotFound;
        };

        let (reply_tx, reply_rx) = mpsc::channel();
        let (body_tx, body_rx) = mpsc::channel();

        let request = HandlerRequest {
            request_id,
            method: method.clone(),
            path: path.to_string(),
            headers,
            body: body_rx,
            reply_tx,
        };

        if tx.send(request).is_err() {
            error!(
                request_id = %request_id,
                method = %method,
                path = %path,
                "handler channel closed before dispatch"
            );
            return DispatchOutcome::Abandoned;
        }

        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "request dispatched to handler"
        );

        // Pump the body into the handler as it arrives. The handler runs
        // concurrently in its own coroutine; dropping the sender afterwards
        // signals end-of-stream.
        let mut chunk = [0u8; BODY_CHUNK_SIZE];
        loop {
            match body.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    if body_tx.send(chunk[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(request_id = %request_id, error = %e, "body read failed");
                    break;
                }
            }
        }
        drop(body_tx);

        match reply_rx.recv() {
            Ok(resp) => {
                info!(
                    request_id = %request_id,
                    status = resp.status,
                    "handler response received"
                );
                DispatchOutcome::Dispatched(resp)
            }
            Err(_) => {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    "handler dropped the reply channel without responding"
                );
                DispatchOutcome::Abandoned
            }
        }
    }
}
