//! HTTP boundary to the remote calculation service.
//!
//! A single endpoint is spoken to: `POST {base}/calculator?type=<TAG>` with
//! a JSON request body, answering a JSON [`CalculationResult`]. HTTP 500 is
//! the service's "unusable input" signal and gets its own outcome; every
//! other failure surfaces as a [`ClientError`].

use reqwest::StatusCode;

use crate::core::{CalculationRequest, CalculationResult, ContractType};

/// Errors from the calculation service boundary.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    /// Transport-level failure reaching the endpoint.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The response body did not parse as a calculation result.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Outcome of one submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    Calculated(CalculationResult),
    /// The service answered 500: the submitted values were unusable.
    Rejected,
}

/// Typed client for the `/calculator` endpoint.
#[derive(Debug, Clone)]
pub struct CalculatorClient {
    http: reqwest::Client,
    base_url: String,
}

impl CalculatorClient {
    /// Builds a client for the service at `base_url`. No request timeout is
    /// configured; a calculation runs as long as the service needs.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Build)?;
        let base_url: String = base_url.into();
        Ok(CalculatorClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issues one calculation request. Fire-once: no retries, no
    /// sequencing against other in-flight submissions.
    pub async fn calculate(
        &self,
        contract: ContractType,
        request: &CalculationRequest,
    ) -> Result<SubmitOutcome, ClientError> {
        let endpoint = format!("{}/calculator", self.base_url);

        let response = self
            .http
            .post(&endpoint)
            .query(&[("type", contract.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        // The internal-error status is the only one given special meaning.
        if response.status() == StatusCode::INTERNAL_SERVER_ERROR {
            return Ok(SubmitOutcome::Rejected);
        }

        let result = response
            .json::<CalculationResult>()
            .await
            .map_err(|source| ClientError::Deserialization { endpoint, source })?;

        Ok(SubmitOutcome::Calculated(result))
    }
}
