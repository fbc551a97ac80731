use thiserror::Error;

/// Request-level rejection produced before any external call is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("parameters must be a JSON object")]
    NotAnObject,

    #[error("{0}: unknown field (allowed: keywords, category, region, timezoneOffsetMinutes, timeframe, scope)")]
    UnknownField(String),

    #[error("{field}: field required")]
    Missing { field: &'static str },

    #[error("{field}: expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{field}: {message}")]
    Rule {
        field: &'static str,
        message: String,
    },
}

impl ValidationError {
    /// Name of the offending field, if the error is attributable to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::NotAnObject => None,
            ValidationError::UnknownField(name) => Some(name),
            ValidationError::Missing { field }
            | ValidationError::InvalidType { field, .. }
            | ValidationError::Rule { field, .. } => Some(field),
        }
    }

    pub(crate) fn rule(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError::Rule {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field() {
        let err = ValidationError::rule("timeframe", "now #-d supports only 1 or 7 days");
        assert_eq!(err.to_string(), "timeframe: now #-d supports only 1 or 7 days");
        assert_eq!(err.field(), Some("timeframe"));

        let err = ValidationError::UnknownField("foo".to_string());
        assert!(err.to_string().starts_with("foo: unknown field"));
        assert_eq!(err.field(), Some("foo"));

        assert_eq!(ValidationError::NotAnObject.field(), None);
    }
}
