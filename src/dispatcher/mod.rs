//! # Dispatcher Module
//!
//! Coroutine-based request handler dispatch. The dispatcher bridges an
//! accepted HTTP request to a handler invocation:
//!
//! 1. Look up the method's sub-table in the route table, then the exact path
//! 2. Send the request head to the handler coroutine via its channel
//! 3. Pump the request body into the handler chunk by chunk as it arrives,
//!    then drop the body sender to signal end-of-stream
//! 4. Block the connection coroutine on the reply channel until the handler
//!    completes the response
//!
//! Each handler runs in its own long-lived `may` coroutine, fed by an MPSC
//! channel. The handler owns response completion: it must send exactly one
//! [`HandlerResponse`] on the reply channel. A handler that returns an error
//! without replying abandons the request, and the connection is dropped
//! without a response being written.
//!
//! There are only two dispatcher-side terminal states: a response delegated
//! to a handler, or a fixed 404 when the method is routed but the path is
//! not. A method with no routes at all produces no response (see
//! [`DispatchOutcome::MethodNotRegistered`]).

mod core;

pub use core::{
    spawn_handler, DispatchOutcome, Dispatcher, HandlerRequest, HandlerResponse, HandlerSender,
    HeaderVec, BODY_CHUNK_SIZE, MAX_INLINE_HEADERS,
};
