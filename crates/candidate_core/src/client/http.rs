//! Blocking HTTP implementations of the lookup clients.
//!
//! # Invariants
//! - One GET per lookup; no retries.
//! - No request timeout unless the endpoint config sets `timeout_ms`.

use super::{ElectionLookup, LookupError, LookupResult, PartyLookup};
use crate::config::EndpointConfig;
use crate::model::candidate::{
    ElectionId, ElectionResult, ElectionSummary, PartyId, PartySummary,
};
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Shared GET + JSON decode plumbing for one peer service.
struct JsonEndpoint {
    client: Client,
    base_url: String,
    service: &'static str,
}

impl JsonEndpoint {
    fn new(config: &EndpointConfig, service: &'static str) -> LookupResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|err| LookupError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> LookupResult<T> {
        let url = format!("{}{path}", self.base_url);
        let started_at = Instant::now();

        let response = self.client.get(&url).send().map_err(|err| {
            let error = LookupError::Transport(err.to_string());
            self.log_failure(path, &error, started_at);
            error
        })?;

        let status = response.status();
        if !status.is_success() {
            let error = LookupError::from_status(status.as_u16());
            self.log_failure(path, &error, started_at);
            return Err(error);
        }

        let body = response
            .bytes()
            .map_err(|err| LookupError::Transport(err.to_string()))
            .and_then(|bytes| decode_body::<T>(&bytes))
            .map_err(|error| {
                self.log_failure(path, &error, started_at);
                error
            })?;

        debug!(
            "event=lookup module=client status=ok service={} path={} duration_ms={}",
            self.service,
            path,
            started_at.elapsed().as_millis()
        );
        Ok(body)
    }

    fn log_failure(&self, path: &str, error: &LookupError, started_at: Instant) {
        warn!(
            "event=lookup module=client status=error service={} path={} duration_ms={} error_code={} error={}",
            self.service,
            path,
            started_at.elapsed().as_millis(),
            error.code(),
            error
        );
    }
}

/// Decodes a success body; missing required fields are `LookupError::Decode`.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> LookupResult<T> {
    serde_json::from_slice(bytes).map_err(|err| LookupError::Decode(err.to_string()))
}

/// Party service client (`GET /v1/party/{id}`).
pub struct HttpPartyClient {
    endpoint: JsonEndpoint,
}

impl HttpPartyClient {
    pub fn new(config: &EndpointConfig) -> LookupResult<Self> {
        Ok(Self {
            endpoint: JsonEndpoint::new(config, "party")?,
        })
    }
}

impl PartyLookup for HttpPartyClient {
    fn party_by_id(&self, id: PartyId) -> LookupResult<PartySummary> {
        self.endpoint.get_json(&format!("/v1/party/{id}"))
    }
}

/// Election service client.
///
/// - `GET /v1/election/{id}` for the summary.
/// - `GET /v1/result/election/{id}` for vote totals.
pub struct HttpElectionClient {
    endpoint: JsonEndpoint,
}

impl HttpElectionClient {
    pub fn new(config: &EndpointConfig) -> LookupResult<Self> {
        Ok(Self {
            endpoint: JsonEndpoint::new(config, "election")?,
        })
    }
}

impl ElectionLookup for HttpElectionClient {
    fn election_by_id(&self, id: ElectionId) -> LookupResult<ElectionSummary> {
        self.endpoint.get_json(&format!("/v1/election/{id}"))
    }

    fn election_result(&self, id: ElectionId) -> LookupResult<ElectionResult> {
        self.endpoint.get_json(&format!("/v1/result/election/{id}"))
    }
}
