//! Span and metric names for API routes.
//!
//! Ids never reach a span name or a metric label. Known routes are named after the route's own
//! parameters; anything else falls back to `{uuid}` placeholders.

use uuid::Uuid;

const UUID_PLACEHOLDER: &str = "{uuid}";

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let shape = path_shape(path);
    let otel_path = route_template(method, &shape).map_or(shape, str::to_owned);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// `/cart/{user}/{restaurant}` and `/cart/{restaurant}/{menu_item}` share a shape, so the method
/// decides which one was hit.
fn route_template(method: &str, shape: &str) -> Option<&'static str> {
    let template = match (method, shape) {
        ("GET", "/cart/active/{uuid}") => "/cart/active/{user}",
        ("POST", "/cart/reorder/{uuid}") => "/cart/reorder/{order}",
        ("DELETE", "/cart/{uuid}") => "/cart/{restaurant}",
        ("GET", "/cart/{uuid}/{uuid}") => "/cart/{user}/{restaurant}",
        ("PUT" | "DELETE", "/cart/{uuid}/{uuid}") => "/cart/{restaurant}/{menu_item}",
        ("GET", "/orders/{uuid}") => "/orders/{order}",
        _ => return None,
    };

    Some(template)
}

fn path_shape(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        return "/".to_owned();
    }

    let mut shape = String::new();

    for segment in trimmed.split('/') {
        shape.push('/');

        if Uuid::parse_str(segment).is_ok() {
            shape.push_str(UUID_PLACEHOLDER);
        } else {
            shape.push_str(segment);
        }
    }

    shape
}
