use crate::EndpointFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefreshError {
    #[error("A dashboard refresh is already in progress.")]
    InProgress,

    #[error("Every endpoint failed; keeping the current dashboard ({} failures).", failures.len())]
    AllEndpointsFailed { failures: Vec<EndpointFailure> },
}
