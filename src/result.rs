use crate::headers::Headers;
use std::fmt;

/// Why a request did not receive permission headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    MissingOrigin,
    OriginNotAllowed { origin: String },
    MethodNotAllowed { method: String },
    HeadersNotAllowed { headers: Vec<String> },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::MissingOrigin => write!(f, "empty origin"),
            RejectionReason::OriginNotAllowed { origin } => {
                write!(f, "origin '{origin}' not allowed")
            }
            RejectionReason::MethodNotAllowed { method } => {
                write!(f, "method '{method}' not allowed")
            }
            RejectionReason::HeadersNotAllowed { headers } => {
                write!(f, "certain headers not allowed {headers:?}")
            }
        }
    }
}

/// A preflight that will be answered without permission headers.
#[derive(Debug, Clone)]
pub struct PreflightRejection {
    pub headers: Headers,
    pub reason: RejectionReason,
}

/// A simple request forwarded without permission headers.
#[derive(Debug, Clone)]
pub struct SimpleRejection {
    pub headers: Headers,
    pub reason: RejectionReason,
}

/// Overall decision returned by the policy engine. Every variant carries the
/// headers to emit; rejections only ever carry `Vary`.
#[derive(Debug, Clone)]
pub enum CorsDecision {
    PreflightAccepted { headers: Headers },
    PreflightRejected(PreflightRejection),
    SimpleAccepted { headers: Headers },
    SimpleRejected(SimpleRejection),
}

impl CorsDecision {
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            CorsDecision::PreflightAccepted { .. } | CorsDecision::PreflightRejected(_)
        )
    }

    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            CorsDecision::PreflightAccepted { .. } | CorsDecision::SimpleAccepted { .. }
        )
    }

    pub fn headers(&self) -> &Headers {
        match self {
            CorsDecision::PreflightAccepted { headers }
            | CorsDecision::SimpleAccepted { headers } => headers,
            CorsDecision::PreflightRejected(rejection) => &rejection.headers,
            CorsDecision::SimpleRejected(rejection) => &rejection.headers,
        }
    }

    pub fn into_headers(self) -> Headers {
        match self {
            CorsDecision::PreflightAccepted { headers }
            | CorsDecision::SimpleAccepted { headers } => headers,
            CorsDecision::PreflightRejected(rejection) => rejection.headers,
            CorsDecision::SimpleRejected(rejection) => rejection.headers,
        }
    }

    pub fn rejection_reason(&self) -> Option<&RejectionReason> {
        match self {
            CorsDecision::PreflightRejected(rejection) => Some(&rejection.reason),
            CorsDecision::SimpleRejected(rejection) => Some(&rejection.reason),
            _ => None,
        }
    }
}
