use super::headers::{header_value, vary_values};
use edge_cors::constants::header;
use edge_cors::{CorsDecision, Headers, RejectionReason};
use std::collections::HashSet;

pub fn assert_simple_accepted(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::SimpleAccepted { headers } => headers,
        other => panic!("expected accepted simple request, got {:?}", other),
    }
}

pub fn assert_simple_rejected(decision: CorsDecision) -> (Headers, RejectionReason) {
    match decision {
        CorsDecision::SimpleRejected(rejection) => (rejection.headers, rejection.reason),
        other => panic!("expected rejected simple request, got {:?}", other),
    }
}

pub fn assert_preflight_accepted(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::PreflightAccepted { headers } => headers,
        other => panic!("expected accepted preflight, got {:?}", other),
    }
}

pub fn assert_preflight_rejected(decision: CorsDecision) -> (Headers, RejectionReason) {
    match decision {
        CorsDecision::PreflightRejected(rejection) => (rejection.headers, rejection.reason),
        other => panic!("expected rejected preflight, got {:?}", other),
    }
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "header {name} mismatch"
    );
}

pub fn assert_vary_eq<I, S>(headers: &Headers, expected: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let expected: HashSet<String> = expected.into_iter().map(Into::into).collect();
    assert_eq!(vary_values(headers), expected);
}

pub fn assert_only_vary(headers: &Headers) {
    assert_eq!(headers.len(), 1, "expected only Vary, got {headers:?}");
    assert!(header_value(headers, header::VARY).is_some());
}
