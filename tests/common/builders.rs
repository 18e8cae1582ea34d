use edge_cors::constants::method;
use edge_cors::{Cors, CorsDecision, CorsLogger, CorsOptions, RequestContext};
use std::sync::Arc;

#[derive(Default)]
pub struct CorsBuilder {
    origins: Option<Vec<String>>,
    methods: Option<Vec<String>>,
    headers: Option<Vec<String>>,
    credentials: Option<bool>,
    max_age: Option<u32>,
    logger: Option<Arc<dyn CorsLogger>>,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = Some(origins.into_iter().map(Into::into).collect());
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.credentials = Some(enabled);
        self
    }

    pub fn max_age(mut self, value: u32) -> Self {
        self.max_age = Some(value);
        self
    }

    pub fn logger(mut self, logger: Arc<dyn CorsLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn options(&self) -> CorsOptions {
        let defaults = CorsOptions::default();
        CorsOptions {
            allow_origins: self.origins.clone().unwrap_or(defaults.allow_origins),
            allow_methods: self.methods.clone().unwrap_or(defaults.allow_methods),
            allow_headers: self.headers.clone().unwrap_or(defaults.allow_headers),
            allow_credentials: self.credentials.unwrap_or(defaults.allow_credentials),
            max_age: self.max_age.unwrap_or(defaults.max_age),
        }
    }

    pub fn build(self) -> Cors {
        let options = self.options();
        match self.logger {
            Some(logger) => Cors::with_logger(options, logger),
            None => Cors::new(options),
        }
    }
}

pub struct SimpleRequestBuilder {
    method: String,
    origin: Option<String>,
}

impl SimpleRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: method::GET.into(),
            origin: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn check(self, cors: &Cors) -> CorsDecision {
        let ctx = RequestContext {
            method: &self.method,
            origin: self.origin.as_deref().unwrap_or_default(),
            ..RequestContext::default()
        };
        cors.check(&ctx)
    }
}

#[derive(Default)]
pub struct PreflightRequestBuilder {
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
}

impl PreflightRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn check(self, cors: &Cors) -> CorsDecision {
        let ctx = RequestContext {
            method: method::OPTIONS,
            origin: self.origin.as_deref().unwrap_or_default(),
            access_control_request_method: self.request_method.as_deref().unwrap_or_default(),
            access_control_request_headers: self.request_headers.as_deref().unwrap_or_default(),
        };
        cors.check(&ctx)
    }
}

pub fn cors() -> CorsBuilder {
    CorsBuilder::new()
}

pub fn simple_request() -> SimpleRequestBuilder {
    SimpleRequestBuilder::new()
}

pub fn preflight_request() -> PreflightRequestBuilder {
    PreflightRequestBuilder::new()
}
