//! VIES upstream error codes.
//!
//! The gateway returns `errorWrappers` whose `error` field is one of these
//! codes. Some responses omit the human-readable message, so the published
//! descriptions are kept here for backfill.

/// Placeholder used when an error code has no known description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "not available";

/// Look up the published description for a VIES error code.
pub fn describe_error_code(code: &str) -> Option<&'static str> {
    ERROR_CODES
        .binary_search_by(|(known, _)| (*known).cmp(code))
        .ok()
        .map(|idx| ERROR_CODES[idx].1)
}

/// Check whether `code` is a documented VIES error code.
pub fn is_known_error_code(code: &str) -> bool {
    describe_error_code(code).is_some()
}

/// VIES error codes and their published descriptions (sorted for binary search).
static ERROR_CODES: &[(&str, &str)] = &[
    (
        "GLOBAL_MAX_CONCURRENT_REQ",
        "The request has been rejected because the maximum concurrent request for the application has been reached. Please retry later on.",
    ),
    ("INVALID_INPUT", "Some data are invalid in the request."),
    (
        "MS_MAX_CONCURRENT_REQ",
        "The request has been rejected because the maximum concurrent request for this Member State has been reached. Please retry later on.",
    ),
    (
        "MS_UNAVAILABLE",
        "The request has been processed but the Member State service to validate the request is unavailable. Please retry later on.",
    ),
    (
        "TIMEOUT",
        "The request has been processed but the Member State service did not answer in the expected time.",
    ),
    (
        "VAT_BLOCKED",
        "The VAT number is blocked due to a specific filter on this number.",
    ),
];
