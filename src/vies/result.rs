//! Normalized validation results.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// The record VIES returns for a completed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatCheck {
    /// Member-state code as echoed by VIES.
    pub country_code: String,
    /// VAT number as echoed by VIES.
    pub vat_number: String,
    /// Timestamp of the check as sent by VIES.
    pub request_date: String,
    /// Whether the VAT number is currently valid.
    pub valid: bool,
    /// Registered name, when the member state discloses it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Registered address, when the member state discloses it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl VatCheck {
    /// Parse [`request_date`](Self::request_date).
    ///
    /// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as UTC
    /// midnight). Returns `None` for anything else.
    pub fn requested_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.request_date.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts);
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
        let utc = FixedOffset::east_opt(0)?;
        date.and_hms_opt(0, 0, 0)?
            .and_local_timezone(utc)
            .single()
    }
}

/// Outcome of a successful validation call.
///
/// The shape follows the `full_response` option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationResult {
    /// Full record (`full_response = true`).
    Full(VatCheck),
    /// Validity flag only (`full_response = false`).
    Valid(bool),
}

impl ValidationResult {
    /// Whether VIES reported the number as valid.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Full(check) => check.valid,
            Self::Valid(valid) => *valid,
        }
    }

    /// The full record, if one was requested.
    pub fn as_check(&self) -> Option<&VatCheck> {
        match self {
            Self::Full(check) => Some(check),
            Self::Valid(_) => None,
        }
    }

    pub fn into_check(self) -> Option<VatCheck> {
        match self {
            Self::Full(check) => Some(check),
            Self::Valid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn check(request_date: &str) -> VatCheck {
        VatCheck {
            country_code: "DE".into(),
            vat_number: "814145736".into(),
            request_date: request_date.into(),
            valid: true,
            name: None,
            address: None,
        }
    }

    #[test]
    fn requested_at_rfc3339() {
        let ts = check("2024-01-15T10:23:45.123Z").requested_at().unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn requested_at_plain_date() {
        let ts = check("2024-01-15").requested_at().unwrap();
        assert_eq!(ts.day(), 15);
        assert_eq!(ts.hour(), 0);
    }

    #[test]
    fn requested_at_garbage() {
        assert!(check("yesterday").requested_at().is_none());
        assert!(check("").requested_at().is_none());
    }

    #[test]
    fn absent_identity_not_serialized() {
        let json = serde_json::to_string(&check("2024-01-15")).unwrap();
        assert!(!json.contains("name"));
        assert!(!json.contains("address"));
        assert!(json.contains("\"requestDate\":\"2024-01-15\""));
    }

    #[test]
    fn untagged_shapes() {
        let flag = ValidationResult::Valid(false);
        assert_eq!(serde_json::to_string(&flag).unwrap(), "false");
        assert!(!flag.is_valid());
        assert!(flag.as_check().is_none());

        let full = ValidationResult::Full(check("2024-01-15"));
        assert!(full.is_valid());
        assert_eq!(full.into_check().unwrap().vat_number, "814145736");
    }
}
