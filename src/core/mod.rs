//! Member-state registry and the shared error model.
//!
//! Everything here is network-free and usable without the `vies` feature.

mod countries;
mod error;
pub mod error_codes;

pub use countries::{CountryCode, MEMBER_STATES, is_member_state};
pub use error::*;
pub use error_codes::describe_error_code;
