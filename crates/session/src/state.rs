use std::sync::Arc;

use impact_client::{ClientError, RequestError, SimulationResult};
use serde::Serialize;

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl Phase {
    /// True while an exchange is in flight.
    pub fn is_running(self) -> bool {
        matches!(self, Phase::Running)
    }

    /// Lower-case name used in logs and exports.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        }
    }
}

/// Classification of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidRequest,
    Network,
    Service { status: u16 },
    MalformedResponse,
}

/// Display-ready description of why the last run failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ClientError> for SessionError {
    fn from(err: &ClientError) -> Self {
        let kind = match err {
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Service { status } => ErrorKind::Service { status: *status },
            ClientError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<&RequestError> for SessionError {
    fn from(err: &RequestError) -> Self {
        Self {
            kind: ErrorKind::InvalidRequest,
            message: err.to_string(),
        }
    }
}

/// Snapshot of the simulation session.
///
/// A result is only present in [`Phase::Succeeded`] and an error only in
/// [`Phase::Failed`]; the constructors are the only way to build one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationSession {
    phase: Phase,
    last_result: Option<Arc<SimulationResult>>,
    last_error: Option<SessionError>,
    generation: u64,
}

impl SimulationSession {
    /// Fresh session, before any run.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Session with an exchange in flight and nothing stored.
    pub fn running(generation: u64) -> Self {
        Self {
            phase: Phase::Running,
            generation,
            ..Self::default()
        }
    }

    /// Session holding the result of a completed run.
    pub fn succeeded(generation: u64, result: impl Into<Arc<SimulationResult>>) -> Self {
        Self {
            phase: Phase::Succeeded,
            last_result: Some(result.into()),
            last_error: None,
            generation,
        }
    }

    /// Session holding the error of a failed run.
    pub fn failed(generation: u64, error: SessionError) -> Self {
        Self {
            phase: Phase::Failed,
            last_result: None,
            last_error: Some(error),
            generation,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_result(&self) -> Option<&SimulationResult> {
        self.last_result.as_deref()
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Number of runs started on the owning store when this snapshot was published.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
