//! The validation pipeline: structure first, then remote confirmation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::future::{self, Future};
use std::sync::Arc;
use tracing::{debug, warn};

use super::candidate::Candidate;
use super::checksum::{Digits, check_structure};
use super::codes::ViolationCode;
use super::config::ValidatorConfig;
use super::error::{RegistryError, ValidatorError};
use super::registry::{Confirmation, RegistryClient};

/// Final classification of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "code", rename_all = "snake_case")]
pub enum Outcome {
    /// No violation.
    Valid,
    /// Exactly one violation, the first check that failed.
    Invalid(ViolationCode),
}

impl Outcome {
    /// Whether the outcome carries no violation.
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }

    /// The violation code, if any.
    pub fn code(self) -> Option<ViolationCode> {
        match self {
            Self::Valid => None,
            Self::Invalid(code) => Some(code),
        }
    }
}

/// What one validation call produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The coerced candidate string, `None` when absent.
    pub value: Option<String>,
    /// Valid, or the first violation.
    pub outcome: Outcome,
    /// What the registry said, if it was asked.
    pub confirmation: Confirmation,
}

impl Verdict {
    fn absent() -> Self {
        Self {
            value: None,
            outcome: Outcome::Valid,
            confirmation: Confirmation::Skipped,
        }
    }

    /// Whether the candidate was accepted.
    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }
}

/// Validates Italian VAT numbers.
///
/// Structural checks run locally. When they pass and a [`RegistryClient`] is
/// configured, one confirmation call is made. A registry that is down, slow,
/// or answers nonsense never causes a rejection; only an explicit
/// `valid = false` does.
///
/// ```
/// use partita_iva::{Outcome, VatNumberValidator, ViolationCode};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let validator = VatNumberValidator::offline();
/// let verdict = validator.validate_str(Some("12345678901")).await;
/// assert_eq!(verdict.outcome, Outcome::Invalid(ViolationCode::ChecksumFailed));
/// # }
/// ```
#[derive(Clone)]
pub struct VatNumberValidator {
    config: ValidatorConfig,
    registry: Option<Arc<dyn RegistryClient>>,
}

impl fmt::Debug for VatNumberValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VatNumberValidator")
            .field("config", &self.config)
            .field("registry", &self.registry.is_some())
            .finish()
    }
}

impl VatNumberValidator {
    /// Validator that confirms structurally valid numbers with `registry`.
    pub fn new(registry: Arc<dyn RegistryClient>) -> Self {
        Self {
            config: ValidatorConfig::default(),
            registry: Some(registry),
        }
    }

    /// Validator that never leaves the process. Structurally valid numbers are valid.
    pub fn offline() -> Self {
        Self {
            config: ValidatorConfig::default(),
            registry: None,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate an untyped value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::UnexpectedType`] for arrays and objects.
    /// Malformed numbers are not errors; they come back as
    /// [`Outcome::Invalid`].
    pub async fn validate(&self, value: &Value) -> Result<Verdict, ValidatorError> {
        let candidate = Candidate::from_value(value)?;
        Ok(self.validate_candidate(candidate).await)
    }

    /// Validate an untyped value, abandoning the registry call once `cancel`
    /// resolves. A cancelled lookup soft-fails like any other.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub async fn validate_until<F>(&self, value: &Value, cancel: F) -> Result<Verdict, ValidatorError>
    where
        F: Future<Output = ()>,
    {
        let candidate = Candidate::from_value(value)?;
        Ok(self.run(candidate, cancel).await)
    }

    /// Validate an optional string.
    pub async fn validate_str(&self, value: Option<&str>) -> Verdict {
        self.validate_candidate(Candidate::from_opt_str(value)).await
    }

    /// Validate an already coerced candidate.
    pub async fn validate_candidate(&self, candidate: Candidate<'_>) -> Verdict {
        self.run(candidate, future::pending()).await
    }

    async fn run<F>(&self, candidate: Candidate<'_>, cancel: F) -> Verdict
    where
        F: Future<Output = ()>,
    {
        let Some(value) = candidate.as_str() else {
            return Verdict::absent();
        };

        let digits = match check_structure(value) {
            Ok(digits) => digits,
            Err(code) => {
                debug!(vat_number = %value, %code, "VAT number failed structural check");
                return Verdict {
                    value: Some(value.to_string()),
                    outcome: Outcome::Invalid(code),
                    confirmation: Confirmation::Skipped,
                };
            }
        };

        let confirmation = match &self.registry {
            Some(registry) => self.confirm(&**registry, &digits, cancel).await,
            None => Confirmation::Skipped,
        };

        let outcome = if confirmation.is_rejected() {
            Outcome::Invalid(ViolationCode::OnlineValidationFailed)
        } else {
            Outcome::Valid
        };

        Verdict {
            value: Some(value.to_string()),
            outcome,
            confirmation,
        }
    }

    async fn confirm<F>(&self, registry: &dyn RegistryClient, digits: &Digits, cancel: F) -> Confirmation
    where
        F: Future<Output = ()>,
    {
        let number = digits.to_number_string();
        let country_code = self.config.country_code.as_str();

        let lookup = tokio::select! {
            res = tokio::time::timeout(self.config.timeout(), registry.check_vat(country_code, &number)) => {
                res.unwrap_or(Err(RegistryError::Timeout(self.config.timeout_ms)))
            }
            () = cancel => Err(RegistryError::Cancelled),
        };

        let confirmation = Confirmation::from_lookup(lookup);
        match &confirmation {
            Confirmation::Indeterminate(reason) => {
                warn!(
                    country_code,
                    vat_number = %number,
                    %reason,
                    "VAT number on-line validation unavailable, accepting number"
                );
            }
            other => debug!(vat_number = %number, confirmation = ?other, "registry answered"),
        }
        confirmation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::CheckVatResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed(Option<bool>, AtomicUsize);

    #[async_trait]
    impl RegistryClient for Fixed {
        async fn check_vat(
            &self,
            _country_code: &str,
            _vat_number: &str,
        ) -> Result<Option<CheckVatResponse>, RegistryError> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Ok(Some(CheckVatResponse {
                valid: self.0,
                ..CheckVatResponse::default()
            }))
        }
    }

    #[tokio::test]
    async fn offline_accepts_checksum_valid_number() {
        let verdict = VatNumberValidator::offline()
            .validate_str(Some("01743030304"))
            .await;
        assert_eq!(verdict.outcome, Outcome::Valid);
        assert_eq!(verdict.confirmation, Confirmation::Skipped);
    }

    #[tokio::test]
    async fn structural_failure_skips_registry() {
        let registry = Arc::new(Fixed(Some(true), AtomicUsize::new(0)));
        let validator = VatNumberValidator::new(registry.clone());
        let verdict = validator.validate_str(Some("12345678901")).await;
        assert_eq!(verdict.outcome.code(), Some(ViolationCode::ChecksumFailed));
        assert_eq!(registry.1.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn registry_rejection_is_a_violation() {
        let registry = Arc::new(Fixed(Some(false), AtomicUsize::new(0)));
        let validator = VatNumberValidator::new(registry.clone());
        let verdict = validator.validate_str(Some("12345678903")).await;
        assert_eq!(
            verdict.outcome,
            Outcome::Invalid(ViolationCode::OnlineValidationFailed)
        );
        assert_eq!(registry.1.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_flag_soft_fails() {
        let validator = VatNumberValidator::new(Arc::new(Fixed(None, AtomicUsize::new(0))));
        let verdict = validator.validate_str(Some("12345678903")).await;
        assert!(verdict.is_valid());
        assert!(matches!(verdict.confirmation, Confirmation::Indeterminate(_)));
    }

    #[test]
    fn debug_hides_client() {
        let s = format!("{:?}", VatNumberValidator::offline());
        assert!(s.contains("registry: false"));
    }
}
