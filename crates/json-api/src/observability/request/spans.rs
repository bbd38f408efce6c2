//! HTTP span helpers.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestSpanName {
    /// Path with identifier segments replaced by `{id}`, used as a low-cardinality label.
    pub(super) route: String,
    pub(super) otel_span_name: String,
    /// Raw id segment of `/api/products/{product_id}` requests.
    pub(super) product_id: Option<String>,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = normalise_path(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
        product_id: product_id(path).map(ToOwned::to_owned),
    }
}

fn product_id(path: &str) -> Option<&str> {
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());

    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some("api"), Some("products"), Some(id), None) => Some(id),
        _ => None,
    }
}

fn normalise_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if is_identifier(segment) {
                "{id}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

fn is_identifier(segment: &str) -> bool {
    let digits = segment.strip_prefix('-').unwrap_or(segment);

    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
