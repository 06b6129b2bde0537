//! Boundary coercion of untyped input into a candidate string.

use std::borrow::Cow;

use serde_json::Value;

use super::error::ValidatorError;

/// A value submitted for validation, after type coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate<'a> {
    /// Null, missing, or the empty string. Never a violation.
    Absent,
    /// A string to run through the pipeline.
    Present(Cow<'a, str>),
}

impl<'a> Candidate<'a> {
    /// Coerce an untyped JSON value.
    ///
    /// Strings pass through, numbers use their decimal rendering and booleans
    /// become `"1"` / `""`. The empty-value test runs before coercion, so
    /// `false` becomes a present empty string and fails the length check.
    /// Arrays and objects have no string form and are a usage error.
    pub fn from_value(value: &'a Value) -> Result<Self, ValidatorError> {
        match value {
            Value::Null => Ok(Self::Absent),
            Value::String(s) if s.is_empty() => Ok(Self::Absent),
            Value::String(s) => Ok(Self::Present(Cow::Borrowed(s))),
            Value::Number(n) => Ok(Self::Present(Cow::Owned(n.to_string()))),
            Value::Bool(true) => Ok(Self::Present(Cow::Borrowed("1"))),
            Value::Bool(false) => Ok(Self::Present(Cow::Borrowed(""))),
            Value::Array(_) => Err(ValidatorError::UnexpectedType {
                expected: "string",
                found: "array",
            }),
            Value::Object(_) => Err(ValidatorError::UnexpectedType {
                expected: "string",
                found: "object",
            }),
        }
    }

    /// Wrap an optional string slice.
    pub fn from_opt_str(value: Option<&'a str>) -> Self {
        match value {
            None | Some("") => Self::Absent,
            Some(s) => Self::Present(Cow::Borrowed(s)),
        }
    }

    /// The candidate string, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Present(s) => Some(&**s),
        }
    }
}

impl<'a> From<&'a str> for Candidate<'a> {
    fn from(value: &'a str) -> Self {
        Self::from_opt_str(Some(value))
    }
}

impl<'a> From<Option<&'a str>> for Candidate<'a> {
    fn from(value: Option<&'a str>) -> Self {
        Self::from_opt_str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_empty_are_absent() {
        assert_eq!(Candidate::from_value(&Value::Null), Ok(Candidate::Absent));
        assert_eq!(Candidate::from_value(&json!("")), Ok(Candidate::Absent));
        assert_eq!(Candidate::from_opt_str(None), Candidate::Absent);
        assert_eq!(Candidate::from(""), Candidate::Absent);
    }

    #[test]
    fn strings_pass_through() {
        let v = json!("01743030304");
        let c = Candidate::from_value(&v).unwrap();
        assert_eq!(c.as_str(), Some("01743030304"));
    }

    #[test]
    fn numbers_are_rendered() {
        let v = json!(1743030304u64);
        let c = Candidate::from_value(&v).unwrap();
        assert_eq!(c.as_str(), Some("1743030304"));
    }

    #[test]
    fn booleans_coerce() {
        assert_eq!(Candidate::from_value(&json!(true)).unwrap().as_str(), Some("1"));
        assert_eq!(Candidate::from_value(&json!(false)).unwrap().as_str(), Some(""));
    }

    #[test]
    fn structured_values_are_rejected() {
        assert_eq!(
            Candidate::from_value(&json!({})),
            Err(ValidatorError::UnexpectedType {
                expected: "string",
                found: "object",
            })
        );
        assert!(matches!(
            Candidate::from_value(&json!(["0174303030", "4"])),
            Err(ValidatorError::UnexpectedType { found: "array", .. })
        ));
    }
}
