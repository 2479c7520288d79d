use serde::{Deserialize, Serialize};

/// Lifecycle of a background job, polled by clients through the status endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    /// Percentage of work done so far.
    InProgress(u32),
    Completed(String),
    Failed(String),
}
