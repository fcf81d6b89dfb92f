//! VIES service availability.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::CountryCode;

use super::wire::StatusResponse;

/// Availability of one member-state registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Availability {
    Available,
    Unavailable,
    /// Any other label. Treated as unavailable.
    Unknown,
}

impl Availability {
    /// Map the upstream label. Only the exact string `"Available"` counts.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Available" => Self::Available,
            "Unavailable" => Self::Unavailable,
            _ => Self::Unknown,
        }
    }

    pub fn is_available(self) -> bool {
        self == Self::Available
    }
}

/// Snapshot of the VIES gateway and its member-state registries.
///
/// Fetched fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityStatus {
    /// Whether the central gateway is up.
    pub global_available: bool,
    /// Per-member-state availability. Codes outside the registry are dropped.
    pub per_country: BTreeMap<CountryCode, Availability>,
}

impl AvailabilityStatus {
    /// Whether `country` can currently be validated.
    ///
    /// `false` when the gateway is down or the member state is missing.
    pub fn is_available(&self, country: CountryCode) -> bool {
        self.global_available
            && self
                .per_country
                .get(&country)
                .is_some_and(|a| a.is_available())
    }
}

impl From<StatusResponse> for AvailabilityStatus {
    fn from(resp: StatusResponse) -> Self {
        let per_country = resp
            .countries
            .iter()
            .filter_map(|entry| {
                // upstream codes are already uppercase; a lowercase entry is not the same code
                let code = CountryCode::parse(&entry.country_code).ok()?;
                (code.as_str() == entry.country_code)
                    .then(|| (code, Availability::from_label(&entry.availability)))
            })
            .collect();
        Self {
            global_available: resp.vow.available,
            per_country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(json: &str) -> AvailabilityStatus {
        serde_json::from_str::<StatusResponse>(json).unwrap().into()
    }

    fn de() -> CountryCode {
        CountryCode::parse("DE").unwrap()
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(Availability::from_label("Available"), Availability::Available);
        assert_eq!(Availability::from_label("available"), Availability::Unknown);
        assert_eq!(Availability::from_label("Unavailable"), Availability::Unavailable);
        assert!(!Availability::from_label("AVAILABLE").is_available());
    }

    #[test]
    fn available_member_state() {
        let s = status(
            r#"{"vow":{"available":true},"countries":[{"countryCode":"DE","availability":"Available"},{"countryCode":"FR","availability":"Unavailable"}]}"#,
        );
        assert!(s.is_available(de()));
        assert!(!s.is_available(CountryCode::parse("FR").unwrap()));
        assert!(!s.is_available(CountryCode::parse("AT").unwrap()));
    }

    #[test]
    fn global_outage_overrides_member_state() {
        let s = status(
            r#"{"vow":{"available":false},"countries":[{"countryCode":"DE","availability":"Available"}]}"#,
        );
        assert!(!s.is_available(de()));
    }

    #[test]
    fn foreign_codes_dropped() {
        let s = status(
            r#"{"vow":{"available":true},"countries":[{"countryCode":"ZZ","availability":"Available"},{"countryCode":"de","availability":"Available"}]}"#,
        );
        assert!(s.per_country.is_empty());
        assert!(!s.is_available(de()));
    }
}
