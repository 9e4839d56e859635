//! Route handlers served by the flatroute binary, one file per route.
//!
//! Every handler has the same shape: it receives a
//! [`HandlerRequest`](crate::dispatcher::HandlerRequest) and owns completion
//! of the response via the request's reply channel. The static pages reply
//! immediately; `create_product` consumes the body stream first.

pub mod about;
pub mod contact;
pub mod create_product;
pub mod index;
pub mod products;
