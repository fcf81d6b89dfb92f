use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::countries::MEMBER_STATES;
use super::error_codes::{UNKNOWN_ERROR_MESSAGE, describe_error_code};

/// Why a validation call was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationErrorKind {
    /// The country code is not a VIES member state. No request was sent.
    UnsupportedCountry,
    /// The time budget ran out before VIES produced a result.
    Exhausted,
    /// The caller cancelled the call.
    Cancelled,
    /// VIES could not be reached or sent an unusable response.
    Transport,
    /// The HTTP client could not be constructed.
    Client,
}

/// One entry of the VIES `errorWrappers` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorWrapper {
    /// Upstream error code (e.g. `MS_UNAVAILABLE`).
    #[serde(rename = "error", default)]
    pub code: String,
    /// Human-readable description, backfilled from the error table when
    /// VIES omits it.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorWrapper {
    /// Create a wrapper for `code` with an optional upstream message.
    pub fn new(code: impl Into<String>, message: Option<String>) -> Self {
        Self {
            code: code.into(),
            message,
        }
    }
}

/// The VIES error envelope, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamErrorDetail {
    /// The upstream's own success flag (`actionSucceed` on the wire).
    #[serde(rename = "actionSucceed", alias = "actionSucceeded", default)]
    pub action_succeeded: bool,
    /// Error entries in the order VIES returned them.
    #[serde(default)]
    pub error_wrappers: Vec<ErrorWrapper>,
}

impl UpstreamErrorDetail {
    /// Fill in missing wrapper messages from the error-code table.
    ///
    /// Unknown codes get the literal `"not available"`.
    pub fn backfilled(mut self) -> Self {
        for wrapper in &mut self.error_wrappers {
            if wrapper.message.is_none() {
                let text = describe_error_code(&wrapper.code).unwrap_or(UNKNOWN_ERROR_MESSAGE);
                wrapper.message = Some(text.to_string());
            }
        }
        self
    }

    /// One `code: message` line per wrapper.
    pub fn summary(&self) -> String {
        self.error_wrappers
            .iter()
            .map(|w| {
                format!(
                    "{}: {}",
                    w.code,
                    w.message.as_deref().unwrap_or(UNKNOWN_ERROR_MESSAGE)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any wrapper carries `code`.
    pub fn has_code(&self, code: &str) -> bool {
        self.error_wrappers.iter().any(|w| w.code == code)
    }
}

/// Error returned by every VIES entry point.
///
/// Callers tell causes apart through [`kind`](Self::kind) and the optional
/// upstream [`details`](Self::details).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationError {
    kind: ValidationErrorKind,
    message: String,
    details: Option<UpstreamErrorDetail>,
}

impl ValidationError {
    /// Create an error without upstream detail.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Create an error carrying upstream detail.
    ///
    /// Missing wrapper messages are backfilled here, once.
    pub fn with_details(
        kind: ValidationErrorKind,
        message: impl Into<String>,
        details: UpstreamErrorDetail,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Some(details.backfilled()),
        }
    }

    /// Budget exhausted after VIES answered with an error envelope.
    ///
    /// The message lists every wrapper as `code: message`.
    pub fn from_upstream(details: UpstreamErrorDetail) -> Self {
        let details = details.backfilled();
        let message = if details.error_wrappers.is_empty() {
            "VIES reported an unsuccessful action without error details".to_string()
        } else {
            details.summary()
        };
        Self {
            kind: ValidationErrorKind::Exhausted,
            message,
            details: Some(details),
        }
    }

    pub(crate) fn unsupported_country(input: &str) -> Self {
        Self::new(
            ValidationErrorKind::UnsupportedCountry,
            format!(
                "Country code '{input}' is not supported. Supported codes: {}",
                MEMBER_STATES.join(", ")
            ),
        )
    }

    /// Why the call was abandoned.
    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The last upstream error envelope, if VIES returned one.
    pub fn details(&self) -> Option<&UpstreamErrorDetail> {
        self.details.as_ref()
    }
}
