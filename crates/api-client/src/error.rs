use crate::endpoints::Endpoint;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {endpoint} failed: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("Failed to parse the {endpoint} response: {message}")]
    Parse { endpoint: Endpoint, message: String },

    #[error("Failed to read {endpoint} from disk: {source}")]
    Io {
        endpoint: Endpoint,
        #[source]
        source: std::io::Error,
    },

    #[error("{endpoint} does not support {operation}")]
    Unsupported {
        endpoint: Endpoint,
        operation: &'static str,
    },

    #[error("Unknown endpoint '{0}'")]
    UnknownEndpoint(String),
}
