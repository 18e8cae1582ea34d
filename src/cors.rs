use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::context::{RequestContext, RequestKind};
use crate::header_builder::HeaderBuilder;
use crate::headers::{HeaderCollection, Headers};
use crate::logger::{CorsLogger, TracingLogger};
use crate::options::CorsOptions;
use crate::origin::OriginMatcher;
use crate::result::{CorsDecision, PreflightRejection, RejectionReason, SimpleRejection};
use std::fmt;
use std::sync::Arc;

/// Core CORS policy engine compiled from [`CorsOptions`].
///
/// Built once and never mutated afterwards, so a single instance can be shared
/// behind an `Arc` by any number of concurrent requests.
pub struct Cors {
    origins: OriginMatcher,
    methods: AllowedMethods,
    allowed_headers: AllowedHeaders,
    allow_credentials: bool,
    max_age: u32,
    logger: Arc<dyn CorsLogger>,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Self {
        Self::with_logger(options, Arc::new(TracingLogger))
    }

    /// Compiles the allow-lists, reporting invalid wildcard origins to `logger`.
    pub fn with_logger(options: CorsOptions, logger: Arc<dyn CorsLogger>) -> Self {
        let CorsOptions {
            allow_origins,
            allow_methods,
            allow_headers,
            allow_credentials,
            max_age,
        } = options;

        Self {
            origins: OriginMatcher::compile(&allow_origins, logger.as_ref()),
            methods: AllowedMethods::list(allow_methods),
            allowed_headers: AllowedHeaders::list(allow_headers),
            allow_credentials,
            max_age,
            logger,
        }
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.origins.is_allowed(origin)
    }

    pub fn is_method_allowed(&self, method: &str) -> bool {
        self.methods.allows_method(method)
    }

    pub fn is_headers_allowed(&self, headers: &[&str]) -> bool {
        self.allowed_headers.allows_headers(headers)
    }

    pub fn check(&self, request: &RequestContext<'_>) -> CorsDecision {
        match request.kind() {
            RequestKind::Preflight => {
                self.logger
                    .debug(format_args!("Preflight request from remote client."));
                self.process_preflight(request)
            }
            RequestKind::Simple => self.process_simple(request),
        }
    }

    fn process_preflight(&self, request: &RequestContext<'_>) -> CorsDecision {
        let builder = self.header_builder();
        let mut headers = builder.build_preflight_vary();

        let requested_method = request.access_control_request_method;
        let requested_headers = request.requested_headers();
        let verdict = self
            .authorize_origin(request.origin)
            .and_then(|()| self.authorize_method(requested_method))
            .and_then(|()| self.authorize_headers(&requested_headers));

        if let Err(reason) = verdict {
            self.log_rejection(&reason);
            return CorsDecision::PreflightRejected(PreflightRejection {
                headers: headers.into_headers(),
                reason,
            });
        }

        headers.extend(builder.build_origin_header(request.origin));
        headers.extend(builder.build_methods_header(requested_method));
        headers.extend(builder.build_allowed_headers(&requested_headers));
        headers.extend(builder.build_credentials_header());
        headers.extend(builder.build_max_age_header());

        let headers = self.finish(headers);
        CorsDecision::PreflightAccepted { headers }
    }

    fn process_simple(&self, request: &RequestContext<'_>) -> CorsDecision {
        let builder = self.header_builder();
        let mut headers = builder.build_simple_vary();

        // Not required for simple requests; a disallowed method still only loses headers.
        let verdict = self
            .authorize_origin(request.origin)
            .and_then(|()| self.authorize_method(request.method));

        if let Err(reason) = verdict {
            self.log_rejection(&reason);
            return CorsDecision::SimpleRejected(SimpleRejection {
                headers: headers.into_headers(),
                reason,
            });
        }

        headers.extend(builder.build_origin_header(request.origin));
        headers.extend(builder.build_credentials_header());

        let headers = self.finish(headers);
        CorsDecision::SimpleAccepted { headers }
    }

    fn authorize_origin(&self, origin: &str) -> Result<(), RejectionReason> {
        if origin.is_empty() {
            return Err(RejectionReason::MissingOrigin);
        }
        if !self.is_origin_allowed(origin) {
            return Err(RejectionReason::OriginNotAllowed {
                origin: origin.to_owned(),
            });
        }
        Ok(())
    }

    fn authorize_method(&self, method: &str) -> Result<(), RejectionReason> {
        if self.is_method_allowed(method) {
            Ok(())
        } else {
            Err(RejectionReason::MethodNotAllowed {
                method: method.to_owned(),
            })
        }
    }

    fn authorize_headers(&self, headers: &[&str]) -> Result<(), RejectionReason> {
        if self.is_headers_allowed(headers) {
            Ok(())
        } else {
            Err(RejectionReason::HeadersNotAllowed {
                headers: headers.iter().map(|value| value.to_string()).collect(),
            })
        }
    }

    pub(crate) fn logger(&self) -> Arc<dyn CorsLogger> {
        Arc::clone(&self.logger)
    }

    fn header_builder(&self) -> HeaderBuilder {
        HeaderBuilder::new(self.allow_credentials, self.max_age)
    }

    fn log_rejection(&self, reason: &RejectionReason) {
        self.logger
            .debug(format_args!("CORS headers withheld: {reason}."));
    }

    fn finish(&self, headers: HeaderCollection) -> Headers {
        let headers = headers.into_headers();
        self.logger
            .debug(format_args!("Response headers {headers:?}."));
        headers
    }
}

impl fmt::Debug for Cors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cors")
            .field("origins", &self.origins)
            .field("methods", &self.methods)
            .field("allowed_headers", &self.allowed_headers)
            .field("allow_credentials", &self.allow_credentials)
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
