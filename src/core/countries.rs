//! VIES member-state country codes.
//!
//! The closed set of codes the VIES gateway routes to a national VAT
//! registry. Greece is `EL` (not ISO `GR`) and Northern Ireland is `XI`.

use std::fmt;

use serde::{Serialize, Serializer};

use super::error::ValidationError;

/// All member-state codes accepted by VIES.
/// Sorted for binary search.
pub static MEMBER_STATES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "ES", "FI", "FR", "HR", "HU", "IE", "IT",
    "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK", "XI",
];

/// A canonical (uppercase) VIES member-state code.
///
/// Only obtainable through [`CountryCode::parse`], so holding one proves the
/// code is in [`MEMBER_STATES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountryCode(&'static str);

impl CountryCode {
    /// Canonicalize `input` against the member-state registry.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an [`UnsupportedCountry`](super::ValidationErrorKind::UnsupportedCountry)
    /// error naming the rejected code and listing every supported one.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let upper = input.trim().to_ascii_uppercase();
        match MEMBER_STATES.binary_search(&upper.as_str()) {
            Ok(idx) => Ok(Self(MEMBER_STATES[idx])),
            Err(_) => Err(ValidationError::unsupported_country(input)),
        }
    }

    /// The uppercase two-letter code.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Iterate over every member state in registry order.
    pub fn all() -> impl Iterator<Item = CountryCode> {
        MEMBER_STATES.iter().map(|code| CountryCode(*code))
    }
}

/// Check whether `code` is a VIES member state, ignoring case.
pub fn is_member_state(code: &str) -> bool {
    CountryCode::parse(code).is_ok()
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl std::str::FromStr for CountryCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CountryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}
