//! Parent trace context extraction from HTTP headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// Payment calls always root their own trace; a caller-supplied `traceparent` cannot attach
/// order creation or signature checks to a foreign trace.
const OWN_TRACE_PREFIXES: [&str; 1] = ["/payment"];

pub(super) fn extract_parent_context(path: &str, headers: &HeaderMap) -> Option<Context> {
    if starts_own_trace(path) {
        return None;
    }

    let extractor = HeaderExtractor::new(headers);

    global::get_text_map_propagator(|propagator| {
        // A fresh base context keeps requests without trace headers off the in-process chain.
        let context = propagator.extract_with_context(&Context::new(), &extractor);
        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

fn starts_own_trace(path: &str) -> bool {
    OWN_TRACE_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

#[derive(Debug)]
struct HeaderExtractor<'a> {
    headers: &'a HeaderMap,
}

impl<'a> HeaderExtractor<'a> {
    fn new(headers: &'a HeaderMap) -> Self {
        Self { headers }
    }
}

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.headers.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.headers.keys().map(HeaderName::as_str).collect()
    }
}
