//! # flatroute
//!
//! **flatroute** is a minimal coroutine-powered HTTP server that dispatches
//! incoming requests to handlers on an exact match of (method, path).
//!
//! ## Architecture
//!
//! - **[`router`]** - the route table: a two-level map from HTTP method to
//!   exact path string to handler channel
//! - **[`dispatcher`]** - coroutine-based handler dispatch over `may` channels
//! - **[`server`]** - HTTP server built on `may_minihttp` with request/response
//!   plumbing
//! - **[`handlers`]** - the route handlers served by the binary
//! - **[`registry`]** - handler registration for the binary's route set
//!
//! ## Request Flow
//!
//! 1. The server parses the request head and hands it to the dispatcher
//! 2. The dispatcher looks up the method sub-table, then the exact path
//! 3. On a hit the request is sent to the handler's coroutine and the body is
//!    streamed to it chunk by chunk; the handler owns response completion and
//!    replies over a dedicated channel
//! 4. On a path miss the dispatcher reports not-found and the server writes a
//!    fixed 404
//!
//! Matching is literal: no path parameters, no wildcards, no normalization.
//! A trailing slash or a query string makes a different key.
//!
//! ## Runtime Considerations
//!
//! flatroute uses the `may` coroutine runtime, not tokio or async-std. All
//! handlers run in coroutines, and the stack size is configurable via the
//! `FLATROUTE_STACK_SIZE` environment variable.

pub mod dispatcher;
pub mod handlers;
pub mod ids;
pub mod registry;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use dispatcher::{DispatchOutcome, Dispatcher, HandlerRequest, HandlerResponse};
pub use router::RouteTable;
