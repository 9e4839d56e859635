//! # Router Module
//!
//! The route table: an in-memory two-level mapping from HTTP method to exact
//! path string to handler channel, built once during startup and read-only
//! afterwards.
//!
//! Matching is exact string equality on the path as received. There is no
//! pattern syntax, no parameter extraction, and no normalization: `/x/` and
//! `/x` are distinct keys, and a query string is part of the key.

mod core;

pub use core::RouteTable;
