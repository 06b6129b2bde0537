use thiserror::Error;

/// Usage errors raised by the validator itself.
///
/// These indicate a programming error upstream (the caller handed over a value
/// that cannot be read as a VAT number at all). They are never produced for
/// malformed VAT numbers; those are reported as [`ViolationCode`](super::ViolationCode)s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidatorError {
    /// The candidate is neither absent, a string, nor a string-convertible scalar.
    #[error("expected argument of type \"{expected}\", \"{found}\" given")]
    UnexpectedType {
        /// The type the validator accepts.
        expected: &'static str,
        /// The type that was supplied.
        found: &'static str,
    },
}

/// Infrastructure faults from a [`RegistryClient`](super::RegistryClient).
///
/// The validator never turns one of these into a violation: every variant
/// degrades to [`Confirmation::Indeterminate`](super::Confirmation::Indeterminate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Connection, TLS, or HTTP transport error.
    #[error("registry network error: {0}")]
    Network(String),

    /// The remote call did not complete within the configured timeout.
    #[error("registry call timed out after {0}ms")]
    Timeout(u64),

    /// The caller cancelled the lookup before it completed.
    #[error("registry call cancelled")]
    Cancelled,

    /// The registry answered with a fault (SOAP fault, error wrapper, non-2xx status).
    #[error("registry fault: {0}")]
    Fault(String),

    /// The response body could not be decoded.
    #[error("registry parse error: {0}")]
    Parse(String),
}
