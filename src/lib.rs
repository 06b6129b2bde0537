//! # partita-iva
//!
//! Validation of Italian VAT numbers (*partita IVA*): length, character class,
//! and check digit locally, then an optional confirmation against the EU VIES
//! registry.
//!
//! The registry is only consulted when every local check passes, and an
//! unreachable or misbehaving registry never rejects a number. Only an
//! explicit "not valid" answer produces
//! [`ViolationCode::OnlineValidationFailed`].
//!
//! ## Quick Start
//!
//! ```rust
//! use partita_iva::*;
//!
//! assert_eq!(check_structure("01743030304").map(|d| d.check_digit()), Ok(4));
//! assert_eq!(check_structure("1234567890"), Err(ViolationCode::TooShort));
//! assert_eq!(check_structure("12345678901"), Err(ViolationCode::ChecksumFailed));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Structural checks, violation codes, validator pipeline |
//! | `vies` | VIES REST and SOAP registry clients |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "vies")]
pub mod vies;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
