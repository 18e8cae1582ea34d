use crate::constants::{MAX_REQUEST_HEADER_ELEMENTS, method};
use crate::util::split_header_list;

/// CORS-relevant view of an inbound request. Absent headers are empty strings.
#[derive(Debug, Clone, Default)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: &'a str,
    pub access_control_request_method: &'a str,
    pub access_control_request_headers: &'a str,
}

impl<'a> RequestContext<'a> {
    pub fn kind(&self) -> RequestKind {
        RequestKind::classify(self)
    }

    /// Requested header names, split from the raw value and capped.
    pub fn requested_headers(&self) -> Vec<&'a str> {
        split_header_list(
            self.access_control_request_headers,
            MAX_REQUEST_HEADER_ELEMENTS,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `OPTIONS` carrying a non-empty `Access-Control-Request-Method`.
    Preflight,
    /// Anything else, cross-origin or not.
    Simple,
}

impl RequestKind {
    pub fn classify(request: &RequestContext<'_>) -> Self {
        if request.method == method::OPTIONS && !request.access_control_request_method.is_empty() {
            Self::Preflight
        } else {
            Self::Simple
        }
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
