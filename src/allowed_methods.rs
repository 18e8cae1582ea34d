use crate::util::normalize_upper;

/// Methods a cross-origin caller may use. Entries are kept verbatim and are
/// expected in upper case.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct AllowedMethods(Vec<String>);

impl AllowedMethods {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// Upper-cases `method` and checks it against the configured entries.
    pub fn allows_method(&self, method: &str) -> bool {
        let method = normalize_upper(method);
        self.0.iter().any(|allowed| allowed == method.as_ref())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
