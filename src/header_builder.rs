use crate::constants::header;
use crate::headers::HeaderCollection;
use crate::util::normalize_upper;

const PREFLIGHT_VARY: [&str; 3] = [
    header::ORIGIN,
    header::ACCESS_CONTROL_REQUEST_METHOD,
    header::ACCESS_CONTROL_REQUEST_HEADERS,
];

pub(crate) struct HeaderBuilder {
    allow_credentials: bool,
    max_age: u32,
}

impl HeaderBuilder {
    pub(crate) fn new(allow_credentials: bool, max_age: u32) -> Self {
        Self {
            allow_credentials,
            max_age,
        }
    }

    pub(crate) fn build_preflight_vary(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        for name in PREFLIGHT_VARY {
            headers.add_vary(name);
        }
        headers
    }

    pub(crate) fn build_simple_vary(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.add_vary(header::ORIGIN);
        headers
    }

    /// Reflects the request origin; `*` is never emitted.
    pub(crate) fn build_origin_header(&self, origin: &str) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(
            header::ACCESS_CONTROL_ALLOW_ORIGIN.to_string(),
            origin.to_string(),
        );
        headers
    }

    pub(crate) fn build_methods_header(&self, requested_method: &str) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(
            header::ACCESS_CONTROL_ALLOW_METHODS.to_string(),
            normalize_upper(requested_method).into_owned(),
        );
        headers
    }

    pub(crate) fn build_allowed_headers(&self, requested_headers: &[&str]) -> HeaderCollection {
        if requested_headers.is_empty() {
            return HeaderCollection::new();
        }

        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(
            header::ACCESS_CONTROL_ALLOW_HEADERS.to_string(),
            requested_headers.join(", "),
        );
        headers
    }

    pub(crate) fn build_credentials_header(&self) -> HeaderCollection {
        if !self.allow_credentials {
            return HeaderCollection::new();
        }

        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS.to_string(),
            "true".to_string(),
        );
        headers
    }

    pub(crate) fn build_max_age_header(&self) -> HeaderCollection {
        if self.max_age == 0 {
            return HeaderCollection::new();
        }

        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(
            header::ACCESS_CONTROL_MAX_AGE.to_string(),
            self.max_age.to_string(),
        );
        headers
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
