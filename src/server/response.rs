use crate::dispatcher::HandlerResponse;
use may_minihttp::Response;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Write a handler-produced response to the wire.
///
/// Headers are emitted exactly as the handler set them; nothing is added or
/// defaulted on its behalf.
pub fn write_response(res: &mut Response, hr: HandlerResponse) {
    res.status_code(hr.status as usize, status_reason(hr.status));
    for (name, value) in &hr.headers {
        // may_minihttp wants 'static header strings
        let header = format!("{name}: {value}").into_boxed_str();
        res.header(Box::leak(header));
    }
    res.body_vec(hr.body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(404), "Not Found");
    }
}
