//! EU VIES REST API client.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::{CountryCode, UpstreamErrorDetail, ValidationError, ValidationErrorKind};

use super::options::ValidationOptions;
use super::result::{ValidationResult, VatCheck};
use super::status::AvailabilityStatus;
use super::wire::{CheckVatOutcome, CheckVatRequest, CheckVatResponse, StatusResponse};

/// VIES `check-vat-number` endpoint.
pub const CHECK_VAT_URL: &str =
    "https://ec.europa.eu/taxation_customs/vies/rest-api/check-vat-number";
/// VIES `check-status` endpoint.
pub const CHECK_STATUS_URL: &str =
    "https://ec.europa.eu/taxation_customs/vies/rest-api/check-status";

/// Per-request HTTP timeout. The retry budget is enforced separately.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest slice of a non-JSON error body kept for diagnostics.
const MAX_BODY_EXCERPT: usize = 200;

/// Why a single attempt failed.
#[derive(Debug, Error)]
enum AttemptError {
    #[error("VIES network error: {0}")]
    Network(String),
    #[error("VIES HTTP {status}: {excerpt}")]
    Http { status: StatusCode, excerpt: String },
    #[error("VIES API error: {}", .0.summary())]
    Upstream(UpstreamErrorDetail),
    #[error("VIES parse error: {0}")]
    Parse(String),
}

impl AttemptError {
    fn network(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Builder for [`ViesClient`].
#[derive(Debug, Clone)]
pub struct ViesClientBuilder {
    check_vat_url: String,
    status_url: String,
    request_timeout: Duration,
    http: Option<reqwest::Client>,
}

impl Default for ViesClientBuilder {
    fn default() -> Self {
        Self {
            check_vat_url: CHECK_VAT_URL.to_string(),
            status_url: CHECK_STATUS_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            http: None,
        }
    }
}

impl ViesClientBuilder {
    /// Override the `check-vat-number` endpoint.
    pub fn check_vat_url(mut self, url: impl Into<String>) -> Self {
        self.check_vat_url = url.into();
        self
    }

    /// Override the `check-status` endpoint.
    pub fn status_url(mut self, url: impl Into<String>) -> Self {
        self.status_url = url.into();
        self
    }

    /// Timeout for each individual HTTP request.
    ///
    /// Ignored when a custom client is supplied.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Use a preconfigured `reqwest` client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// # Errors
    ///
    /// Fails with [`ValidationErrorKind::Client`] if the TLS backend cannot
    /// be initialised.
    pub fn build(self) -> Result<ViesClient, ValidationError> {
        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(self.request_timeout)
                .build()
                .map_err(|e| {
                    ValidationError::new(
                        ValidationErrorKind::Client,
                        format!("failed to build HTTP client: {e}"),
                    )
                })?,
        };
        Ok(ViesClient {
            http,
            check_vat_url: self.check_vat_url,
            status_url: self.status_url,
        })
    }
}

/// Reusable VIES client.
///
/// Cloning is cheap and shares the connection pool. The client holds no
/// per-call state, so one instance can serve concurrent validations.
#[derive(Debug, Clone)]
pub struct ViesClient {
    http: reqwest::Client,
    check_vat_url: String,
    status_url: String,
}

impl ViesClient {
    /// Client for the public VIES endpoints.
    pub fn new() -> Result<Self, ValidationError> {
        Self::builder().build()
    }

    pub fn builder() -> ViesClientBuilder {
        ViesClientBuilder::default()
    }

    /// Validate a VAT number, retrying until VIES answers or the time budget
    /// in `options` runs out.
    ///
    /// `country_code` is matched case-insensitively against the member-state
    /// registry. `vat_number` is the number without the country prefix and is
    /// passed through unchecked.
    ///
    /// A number VIES reports as invalid is an `Ok` result, not an error.
    ///
    /// # Errors
    ///
    /// - [`ValidationErrorKind::UnsupportedCountry`] before any request.
    /// - [`ValidationErrorKind::Exhausted`] when no attempt succeeded within
    ///   the budget; carries the last upstream error envelope if any.
    pub async fn validate(
        &self,
        country_code: &str,
        vat_number: &str,
        options: ValidationOptions,
    ) -> Result<ValidationResult, ValidationError> {
        self.validate_with_cancel(country_code, vat_number, options, &CancellationToken::new())
            .await
    }

    /// Like [`validate`](Self::validate), but stops early with
    /// [`ValidationErrorKind::Cancelled`] once `cancel` fires.
    ///
    /// Cancellation is observed before each request, while a request is in
    /// flight, and during the pause between attempts.
    pub async fn validate_with_cancel(
        &self,
        country_code: &str,
        vat_number: &str,
        options: ValidationOptions,
        cancel: &CancellationToken,
    ) -> Result<ValidationResult, ValidationError> {
        let country = CountryCode::parse(country_code)?;
        let config = options.resolve();
        let request = CheckVatRequest {
            country_code: country.as_str(),
            vat_number,
        };

        let start = Instant::now();
        let mut attempt: u32 = 0;
        let mut last_detail: Option<UpstreamErrorDetail> = None;
        let mut last_failure: Option<AttemptError> = None;

        while start.elapsed() < config.timeout {
            if cancel.is_cancelled() {
                return Err(cancelled(attempt));
            }
            attempt += 1;
            debug!(country = %country, vat_number, attempt, "sending VIES check");

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(attempt)),
                outcome = self.check_once(&request) => outcome,
            };

            match outcome {
                Ok(check) => {
                    info!(country = %country, attempt, valid = check.valid, "VIES check completed");
                    return Ok(if config.full_response {
                        ValidationResult::Full(check)
                    } else {
                        ValidationResult::Valid(check.valid)
                    });
                }
                Err(AttemptError::Upstream(detail)) => {
                    warn!(country = %country, attempt, error = %detail.summary(), "VIES rejected attempt");
                    last_detail = Some(detail);
                }
                Err(err) => {
                    warn!(country = %country, attempt, error = %err, "VIES attempt failed");
                    last_failure = Some(err);
                }
            }

            // never pause past the deadline
            let remaining = config.timeout.saturating_sub(start.elapsed());
            if !remaining.is_zero() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(cancelled(attempt)),
                    _ = tokio::time::sleep(config.retry_delay.min(remaining)) => {}
                }
            }
        }

        warn!(
            country = %country,
            attempts = attempt,
            budget_ms = config.timeout.as_millis() as u64,
            "VIES retry budget exhausted"
        );
        Err(exhausted(config.timeout, last_detail, last_failure))
    }

    /// Whether VIES can currently validate numbers for `country_code`.
    ///
    /// Makes a single request. Any transport or decode failure yields
    /// `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Only [`ValidationErrorKind::UnsupportedCountry`].
    pub async fn check_available(&self, country_code: &str) -> Result<bool, ValidationError> {
        let country = CountryCode::parse(country_code)?;
        match self.fetch_status().await {
            Ok(status) => {
                let available = status.is_available(country);
                debug!(country = %country, available, "VIES status checked");
                Ok(available)
            }
            Err(err) => {
                warn!(country = %country, error = %err, "VIES status unavailable, reporting member state as down");
                Ok(false)
            }
        }
    }

    /// Fetch availability of the gateway and every member state.
    ///
    /// # Errors
    ///
    /// [`ValidationErrorKind::Transport`] when VIES cannot be reached or the
    /// response cannot be decoded.
    pub async fn service_status(&self) -> Result<AvailabilityStatus, ValidationError> {
        self.fetch_status()
            .await
            .map_err(|e| ValidationError::new(ValidationErrorKind::Transport, e.to_string()))
    }

    async fn check_once(&self, request: &CheckVatRequest<'_>) -> Result<VatCheck, AttemptError> {
        let resp = self
            .http
            .post(&self.check_vat_url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(AttemptError::network)?;

        let status = resp.status();
        let body = resp.text().await.map_err(AttemptError::network)?;

        if !status.is_success() {
            let envelope = serde_json::from_str::<CheckVatResponse>(&body)
                .ok()
                .and_then(CheckVatResponse::into_envelope);
            return Err(match envelope {
                Some(detail) => AttemptError::Upstream(detail),
                None => AttemptError::Http {
                    status,
                    excerpt: excerpt(&body),
                },
            });
        }

        let payload: CheckVatResponse = serde_json::from_str(&body)
            .map_err(|e: serde_json::Error| AttemptError::Parse(e.to_string()))?;

        match payload.into_outcome() {
            Some(CheckVatOutcome::Checked(check)) => Ok(check),
            Some(CheckVatOutcome::Rejected(detail)) => Err(AttemptError::Upstream(detail)),
            None => Err(AttemptError::Parse(format!(
                "response has neither a result nor an error envelope: {}",
                excerpt(&body)
            ))),
        }
    }

    async fn fetch_status(&self) -> Result<AvailabilityStatus, AttemptError> {
        let resp = self
            .http
            .get(&self.status_url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(AttemptError::network)?;

        let status = resp.status();
        let body = resp.text().await.map_err(AttemptError::network)?;

        if !status.is_success() {
            return Err(AttemptError::Http {
                status,
                excerpt: excerpt(&body),
            });
        }

        let payload: StatusResponse = serde_json::from_str(&body)
            .map_err(|e: serde_json::Error| AttemptError::Parse(e.to_string()))?;
        Ok(payload.into())
    }
}

fn cancelled(attempts: u32) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::Cancelled,
        format!("VIES validation cancelled after {attempts} attempt(s)"),
    )
}

fn exhausted(
    budget: Duration,
    last_detail: Option<UpstreamErrorDetail>,
    last_failure: Option<AttemptError>,
) -> ValidationError {
    if let Some(detail) = last_detail {
        return ValidationError::from_upstream(detail);
    }
    let mut message = format!("VIES request timed out after {} ms", budget.as_millis());
    if let Some(err) = last_failure {
        message.push_str(&format!(" (last error: {err})"));
    }
    ValidationError::new(ValidationErrorKind::Exhausted, message)
}

fn excerpt(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Validate a VAT number against VIES with a one-off client.
///
/// See [`ViesClient::validate`].
pub async fn validate_vat_number(
    country_code: &str,
    vat_number: &str,
    options: ValidationOptions,
) -> Result<ValidationResult, ValidationError> {
    CountryCode::parse(country_code)?;
    ViesClient::new()?
        .validate(country_code, vat_number, options)
        .await
}

/// Check whether VIES can currently validate numbers for `country_code`.
///
/// See [`ViesClient::check_available`].
pub async fn check_service_available(country_code: &str) -> Result<bool, ValidationError> {
    let country = CountryCode::parse(country_code)?;
    match ViesClient::new() {
        Ok(client) => client.check_available(country.as_str()).await,
        Err(err) => {
            warn!(country = %country, error = %err, "no HTTP client, reporting member state as down");
            Ok(false)
        }
    }
}
