//! CORS policy engine for API servers exposed to browsers.
//!
//! [`Cors`] compiles the allow-lists in [`CorsOptions`] once and classifies each
//! request as a preflight or a simple request, producing the response headers
//! in a [`CorsDecision`]. [`CorsLayer`] wraps any tower service with it.

mod allowed_headers;
mod allowed_methods;
pub mod constants;
mod context;
mod cors;
mod header_builder;
mod headers;
mod layer;
mod logger;
mod options;
mod origin;
mod result;
mod util;

#[cfg(test)]
mod test_support;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use context::{RequestContext, RequestKind};
pub use cors::Cors;
pub use headers::Headers;
pub use layer::{CorsLayer, CorsService, ResponseFuture};
pub use logger::{CorsLogger, TracingLogger};
pub use options::{ConfigError, CorsOptions};
pub use origin::{OriginMatcher, PatternError, compile_wildcard, wildcard_pattern};
pub use result::{CorsDecision, PreflightRejection, RejectionReason, SimpleRejection};
pub use util::{canonical_header_key, normalize_lower, normalize_upper, split_header_list};
