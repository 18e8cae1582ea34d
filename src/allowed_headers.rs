use crate::util::canonical_header_key;

/// Request headers a preflight may ask for, in canonical capitalization.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct AllowedHeaders(Vec<String>);

impl AllowedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// Every requested header must be listed once canonicalized; an empty
    /// request is always allowed.
    pub fn allows_headers(&self, requested: &[&str]) -> bool {
        requested.iter().all(|header| {
            let header = canonical_header_key(header);
            self.0.iter().any(|allowed| allowed == header.as_ref())
        })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
