//! # vies-check
//!
//! EU VAT number validation against the VIES REST API, plus per-member-state
//! service availability checks.
//!
//! Country codes are checked against the closed VIES member-state registry
//! before any request is sent. Validation retries within a wall-clock budget
//! and every failure converges on a single [`ValidationError`].
//!
//! ## Quick Start
//!
//! ```rust
//! use vies_check::core::*;
//!
//! let de = CountryCode::parse("de").unwrap();
//! assert_eq!(de.as_str(), "DE");
//!
//! let err = CountryCode::parse("US").unwrap_err();
//! assert_eq!(err.kind(), ValidationErrorKind::UnsupportedCountry);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Member-state registry, error model, VIES error-code table |
//! | `vies` (default) | Async VIES client: validation, availability, status |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "vies")]
pub mod vies;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

#[cfg(feature = "vies")]
pub use crate::vies::{
    ValidationOptions, ValidationResult, VatCheck, ViesClient, check_service_available,
    validate_vat_number,
};
