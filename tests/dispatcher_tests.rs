//! Tests for the dispatcher and coroutine handler plumbing, without sockets.
//!
//! Drives `Dispatcher::dispatch` directly with an in-memory body reader and
//! asserts on the outcome variants: delegated response, fixed 404, the
//! unrouted-method gap, and the abandoned-request fault path.

use flatroute::dispatcher::{DispatchOutcome, Dispatcher, HandlerResponse, HeaderVec};
use flatroute::ids::RequestId;
use flatroute::router::RouteTable;
use http::Method;
use std::io::Cursor;
use std::sync::Arc;

mod common;
use common::test_server::setup_may_runtime;

fn dispatch(
    dispatcher: &Dispatcher,
    method: Method,
    path: &str,
    body: &[u8],
) -> DispatchOutcome {
    let mut reader = Cursor::new(body.to_vec());
    dispatcher.dispatch(
        RequestId::new(),
        &method,
        path,
        HeaderVec::new(),
        &mut reader,
    )
}

#[test]
fn test_dispatch_routes_to_handler() {
    setup_may_runtime();
    let mut table = RouteTable::new();
    unsafe {
        table.register(Method::GET, "/ping", |req| {
            let _ = req.reply_tx.send(HandlerResponse::new(200, "pong"));
            Ok(())
        });
    }
    let dispatcher = Dispatcher::new(Arc::new(table));

    match dispatch(&dispatcher, Method::GET, "/ping", b"") {
        DispatchOutcome::Dispatched(resp) => {
            assert_eq!(resp.status, 200);
            assert_eq!(resp.body.as_slice(), b"pong");
        }
        other => panic!("expected Dispatched, got {other:?}"),
    }
}

#[test]
fn test_dispatch_path_miss_is_not_found() {
    setup_may_runtime();
    let mut table = RouteTable::new();
    unsafe {
        table.register(Method::GET, "/ping", |req| {
            let _ = req.reply_tx.send(HandlerResponse::new(200, "pong"));
            Ok(())
        });
    }
    let dispatcher = Dispatcher::new(Arc::new(table));

    assert!(matches!(
        dispatch(&dispatcher, Method::GET, "/pong", b""),
        DispatchOutcome::NotFound
    ));
}

#[test]
fn test_dispatch_unrouted_method_has_no_sub_table() {
    setup_may_runtime();
    let mut table = RouteTable::new();
    unsafe {
        table.register(Method::GET, "/ping", |req| {
            let _ = req.reply_tx.send(HandlerResponse::new(200, "pong"));
            Ok(())
        });
    }
    let dispatcher = Dispatcher::new(Arc::new(table));

    assert!(matches!(
        dispatch(&dispatcher, Method::DELETE, "/ping", b""),
        DispatchOutcome::MethodNotRegistered
    ));
}

#[test]
fn test_handler_fault_abandons_the_request() {
    setup_may_runtime();
    let mut table = RouteTable::new();
    unsafe {
        table.register(Method::POST, "/fail", |_req| {
            Err(anyhow::anyhow!("boom"))
        });
    }
    let dispatcher = Dispatcher::new(Arc::new(table));

    assert!(matches!(
        dispatch(&dispatcher, Method::POST, "/fail", b"ignored"),
        DispatchOutcome::Abandoned
    ));
}

#[test]
fn test_body_chunks_are_concatenated_in_order() {
    setup_may_runtime();
    let mut table = RouteTable::new();
    unsafe {
        table.register(Method::POST, "/echo", |req| {
            let body = req.collect_body();
            let _ = req.reply_tx.send(HandlerResponse::new(200, body));
            Ok(())
        });
    }
    let dispatcher = Dispatcher::new(Arc::new(table));

    // Larger than one read chunk so the body crosses chunk boundaries
    let body = vec![b'x'; 3 * flatroute::dispatcher::BODY_CHUNK_SIZE + 17];
    match dispatch(&dispatcher, Method::POST, "/echo", &body) {
        DispatchOutcome::Dispatched(resp) => {
            assert_eq!(resp.status, 200);
            assert_eq!(resp.body, body);
        }
        other => panic!("expected Dispatched, got {other:?}"),
    }
}

#[test]
fn test_last_registered_handler_wins() {
    setup_may_runtime();
    let mut table = RouteTable::new();
    unsafe {
        table.register(Method::GET, "/", |req| {
            let _ = req.reply_tx.send(HandlerResponse::new(200, "first"));
            Ok(())
        });
        table.register(Method::GET, "/", |req| {
            let _ = req.reply_tx.send(HandlerResponse::new(200, "second"));
            Ok(())
        });
    }
    let dispatcher = Dispatcher::new(Arc::new(table));

    match dispatch(&dispatcher, Method::GET, "/", b"") {
        DispatchOutcome::Dispatched(resp) => assert_eq!(resp.body.as_slice(), b"second"),
        other => panic!("expected Dispatched, got {other:?}"),
    }
}

#[test]
fn test_create_product_handler_envelope() {
    setup_may_runtime();
    let mut table = RouteTable::new();
    unsafe {
        table.register(
            Method::POST,
            "/create-product",
            flatroute::handlers::create_product::handler,
        );
    }
    let dispatcher = Dispatcher::new(Arc::new(table));

    match dispatch(&dispatcher, Method::POST, "/create-product", br#"{"a":1}"#) {
        DispatchOutcome::Dispatched(resp) => {
            assert_eq!(resp.status, 200);
            assert_eq!(
                String::from_utf8_lossy(&resp.body),
                r#"{"body":{"a":1},"message":"Product Created"}"#
            );
            // The original sets no Content-Type on this route
            assert!(resp.get_header("content-type").is_none());
        }
        other => panic!("expected Dispatched, got {other:?}"),
    }
}
