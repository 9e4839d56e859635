use crate::dispatcher::{HandlerRequest, HandlerResponse};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct ProductCreated {
    body: Value,
    message: &'static str,
}

/// Accumulates the request body as it streams in, then echoes the parsed
/// JSON back inside a confirmation envelope.
///
/// A body that is not UTF-8 JSON bails out via `?` before any reply is sent,
/// so the request is abandoned instead of answered with a 400. Known defect,
/// kept for behavioral parity.
pub fn handler(req: HandlerRequest) -> anyhow::Result<()> {
    let raw = req.collect_body();
    let text = String::from_utf8(raw)?;
    let parsed: Value = serde_json::from_str(&text)?;

    let reply = ProductCreated {
        body: parsed,
        message: "Product Created",
    };
    let _ = req
        .reply_tx
        .send(HandlerResponse::new(200, serde_json::to_vec(&reply)?));
    Ok(())
}
