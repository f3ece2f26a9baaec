use std::fmt;

/// Errors raised while requiring or permitting parameters.
///
/// Both kinds abort the caller's current operation. Translating them into a
/// response (typically `400 Bad Request`) is up to the web layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required key was absent or blank
    ParameterMissing(ParameterMissing),
    /// Keys were left unpermitted while raising was enabled
    UnpermittedParameters(UnpermittedParameters),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ParameterMissing(e) => fmt::Display::fmt(e, f),
            Error::UnpermittedParameters(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ParameterMissing(e) => Some(e),
            Error::UnpermittedParameters(e) => Some(e),
        }
    }
}

impl From<ParameterMissing> for Error {
    fn from(e: ParameterMissing) -> Self {
        Error::ParameterMissing(e)
    }
}

impl From<UnpermittedParameters> for Error {
    fn from(e: UnpermittedParameters) -> Self {
        Error::UnpermittedParameters(e)
    }
}

/// A required parameter was absent, null or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMissing {
    param: String,
}

impl ParameterMissing {
    /// Creates the error for the given canonical key.
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }

    /// The key that was required.
    pub fn param(&self) -> &str {
        &self.param
    }
}

impl fmt::Display for ParameterMissing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "param is missing or the value is empty: {}", self.param)
    }
}

impl std::error::Error for ParameterMissing {}

/// Keys at one mapping level that no filter covered, reported when raising is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpermittedParameters {
    params: Vec<String>,
}

impl UnpermittedParameters {
    /// Creates the error for the given keys, in source order.
    pub fn new(params: Vec<String>) -> Self {
        Self { params }
    }

    /// The keys that were not permitted.
    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for UnpermittedParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "found unpermitted parameters: {}", self.params.join(", "))
    }
}

impl std::error::Error for UnpermittedParameters {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn parameter_missing_message_names_key() {
        let err = ParameterMissing::new("foo");
        assert_eq!(err.param(), "foo");
        assert_eq!(
            err.to_string(),
            "param is missing or the value is empty: foo"
        );
    }

    #[test]
    fn unpermitted_message_lists_keys() {
        let err = UnpermittedParameters::new(vec!["bar".to_string(), "baz".to_string()]);
        assert_eq!(err.params(), ["bar", "baz"]);
        assert_eq!(err.to_string(), "found unpermitted parameters: bar, baz");
    }

    #[test]
    fn error_wraps_and_displays_inner() {
        let err: Error = ParameterMissing::new("id").into();
        assert_eq!(err.to_string(), "param is missing or the value is empty: id");
        assert!(err.source().is_some());

        let err: Error = UnpermittedParameters::new(vec!["x".to_string()]).into();
        assert!(matches!(err, Error::UnpermittedParameters(_)));
    }
}
