//! VIES REST API wire types.

use serde::{Deserialize, Serialize};

use crate::core::{ErrorWrapper, UpstreamErrorDetail};

use super::result::VatCheck;

/// Request body for `check-vat-number`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckVatRequest<'a> {
    pub country_code: &'a str,
    pub vat_number: &'a str,
}

/// Response of `check-vat-number`.
///
/// VIES uses one shape for results and error envelopes, so every field is
/// optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckVatResponse {
    pub country_code: Option<String>,
    pub vat_number: Option<String>,
    pub request_date: Option<String>,
    pub valid: Option<bool>,
    pub name: Option<String>,
    pub address: Option<String>,
    // Error fields
    #[serde(alias = "actionSucceeded")]
    pub action_succeed: Option<bool>,
    pub error_wrappers: Option<Vec<ErrorWrapper>>,
}

/// What a decoded `check-vat-number` payload means.
#[derive(Debug)]
pub(crate) enum CheckVatOutcome {
    Checked(VatCheck),
    Rejected(UpstreamErrorDetail),
}

impl CheckVatResponse {
    /// Classify the payload.
    ///
    /// `None` means neither a result nor an error envelope could be read.
    pub fn into_outcome(self) -> Option<CheckVatOutcome> {
        let failed = self.action_succeed == Some(false)
            || (self.valid.is_none() && self.error_wrappers.is_some());
        if failed {
            return self.into_envelope().map(CheckVatOutcome::Rejected);
        }

        let valid = self.valid?;
        Some(CheckVatOutcome::Checked(VatCheck {
            country_code: self.country_code.unwrap_or_default(),
            vat_number: self.vat_number.unwrap_or_default(),
            request_date: self.request_date.unwrap_or_default(),
            valid,
            name: self.name.and_then(disclosed),
            address: self.address.and_then(disclosed),
        }))
    }

    /// The error envelope, if the payload carries one.
    ///
    /// An envelope is any payload with `actionSucceed: false` or an
    /// `errorWrappers` array, even an empty one.
    pub fn into_envelope(self) -> Option<UpstreamErrorDetail> {
        if self.action_succeed != Some(false) && self.error_wrappers.is_none() {
            return None;
        }
        Some(UpstreamErrorDetail {
            action_succeeded: false,
            error_wrappers: self.error_wrappers.unwrap_or_default(),
        })
    }
}

/// Member states that withhold identity send `---` or an empty string.
fn disclosed(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "---" {
        None
    } else {
        Some(value)
    }
}

/// Response of `check-status`.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusResponse {
    pub vow: VowStatus,
    #[serde(default)]
    pub countries: Vec<CountryStatus>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VowStatus {
    pub available: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CountryStatus {
    pub country_code: String,
    pub availability: String,
}
