use super::request::parse_head;
use super::response::write_response;
use crate::dispatcher::{DispatchOutcome, Dispatcher, HandlerResponse};
use crate::ids::RequestId;
use http::Method;
use may::coroutine;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;
use tracing::{error, warn};

/// The HTTP service bound to the listener.
///
/// Stateless aside from reading the dispatcher's route table: each call
/// parses the request head, dispatches, and maps the outcome to the wire.
#[derive(Clone)]
pub struct AppService {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppService {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let head = parse_head(&req);
        let request_id = RequestId::new();

        // A token outside the routed method set behaves exactly like a
        // routed-method miss at the table level: no sub-table, no response.
        let method: Option<Method> = head.method.parse().ok();

        let outcome = match method {
            Some(ref m) => {
                let mut body = req.body();
                self.dispatcher
                    .dispatch(request_id, m, &head.path, head.headers, &mut body)
            }
            None => DispatchOutcome::MethodNotRegistered,
        };

        match outcome {
            DispatchOutcome::Dispatched(hr) => {
                write_response(res, hr);
                Ok(())
            }
            DispatchOutcome::NotFound => {
                write_response(res, HandlerResponse::route_not_found());
                Ok(())
            }
            DispatchOutcome::MethodNotRegistered => {
                // There is no fallback branch for a method without routes:
                // the connection is held open without a response ever being
                // written. Known defect, kept for behavioral parity.
                warn!(
                    request_id = %request_id,
                    method = %head.method,
                    path = %head.path,
                    "method has no routes; connection left without a response"
                );
                loop {
                    coroutine::park();
                }
            }
            DispatchOutcome::Abandoned => {
                // The handler faulted without replying. No error payload is
                // synthesized on its behalf; the connection is left without
                // a response. Known defect, kept for behavioral parity.
                error!(
                    request_id = %request_id,
                    method = %head.method,
                    path = %head.path,
                    "request abandoned without a response"
                );
                loop {
                    coroutine::park();
                }
            }
        }
    }
}
