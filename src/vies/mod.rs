//! VIES VAT number validation and service availability.
//!
//! Talks to the EU VIES REST API. Validation retries within a wall-clock
//! budget; availability checks make a single request and degrade to
//! `false` when VIES cannot be reached.
//!
//! # Example
//!
//! ```ignore
//! use vies_check::vies::*;
//!
//! // Full record (default)
//! let result = validate_vat_number("de", "814145736", ValidationOptions::new()).await?;
//! assert!(result.is_valid());
//!
//! // Validity flag only, with a tighter budget
//! let options = ValidationOptions::new().timeout_ms(3_000).full_response(false);
//! let valid = validate_vat_number("NL", "006181338B01", options).await?;
//!
//! // Is the German registry reachable right now?
//! let up = check_service_available("DE").await?;
//! ```

mod client;
mod options;
mod result;
mod status;
mod wire;

pub use client::{
    CHECK_STATUS_URL, CHECK_VAT_URL, ViesClient, ViesClientBuilder, check_service_available,
    validate_vat_number,
};
pub use options::{DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_MS, ValidationConfig, ValidationOptions};
pub use result::{ValidationResult, VatCheck};
pub use status::{Availability, AvailabilityStatus};
pub use tokio_util::sync::CancellationToken;
