use crate::dispatcher::{HandlerRequest, HandlerResponse};

pub fn handler(req: HandlerRequest) -> anyhow::Result<()> {
    let _ = req.reply_tx.send(HandlerResponse::new(200, "Our Products"));
    Ok(())
}
