//! Client for the remote impact simulation service.
//!
//! One call to [`SimulationClient::execute`] is one `POST /api/simulate`
//! exchange. The client never retries; retry is a caller decision.

use std::future::Future;
use std::sync::Arc;

use impact_config::ServiceConfig;
use thiserror::Error;
use tracing::{debug, warn};

pub mod payload;
pub mod request;

pub use payload::{Crater, HeliocentricCoordinates, ImpactLocation, SimulationResult};
pub use request::{RequestError, SimulationRequest};

use payload::SimulationResponse;

const SIMULATE_PATH: &str = "/api/simulate";

/// Failures of a single simulation exchange.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("Simulation failed: {status}")]
    Service { status: u16 },
    #[error("malformed simulation response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Anything that can turn a request into a simulation result.
///
/// The session store is generic over this so transports can be swapped.
pub trait SimulationBackend: Send + Sync + 'static {
    fn execute(
        &self,
        request: &SimulationRequest,
    ) -> impl Future<Output = Result<SimulationResult, ClientError>> + Send;
}

/// HTTP implementation of [`SimulationBackend`].
#[derive(Debug, Clone)]
pub struct SimulationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SimulationClient {
    /// Build a client for the endpoint and timeout in `config`.
    pub fn new(config: &ServiceConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::Network)?;
        Ok(Self {
            http,
            endpoint: endpoint_url(&config.base_url),
        })
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one simulation exchange.
    pub async fn execute(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, ClientError> {
        debug!(
            endpoint = %self.endpoint,
            asteroid_id = request.asteroid_id(),
            "posting simulation request"
        );
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "simulation service rejected request");
            return Err(ClientError::Service {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(ClientError::Network)?;
        let envelope: SimulationResponse = serde_json::from_slice(&body)?;
        debug!(bytes = body.len(), "simulation response decoded");
        Ok(envelope.output)
    }
}

impl SimulationBackend for SimulationClient {
    fn execute(
        &self,
        request: &SimulationRequest,
    ) -> impl Future<Output = Result<SimulationResult, ClientError>> + Send {
        SimulationClient::execute(self, request)
    }
}

impl<T: SimulationBackend> SimulationBackend for Arc<T> {
    fn execute(
        &self,
        request: &SimulationRequest,
    ) -> impl Future<Output = Result<SimulationResult, ClientError>> + Send {
        (**self).execute(request)
    }
}

fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), SIMULATE_PATH)
}
