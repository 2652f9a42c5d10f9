// Error types for the dashboard use cases
use crate::domain::chart::SurfaceId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("backend reported error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("backend response carried neither a result nor an error")]
    EmptyResponse,

    #[error("could not decode dashboard payload")]
    Decode(#[from] serde_json::Error),

    #[error("could not read snapshot {}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("could not reach action endpoint {endpoint}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("action endpoint rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface {0} is not available")]
    Unavailable(SurfaceId),

    #[error("surface {surface} could not draw the chart: {reason}")]
    Draw { surface: SurfaceId, reason: String },
}
