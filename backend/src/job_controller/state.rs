//! Shared state of long-running background jobs.
//!
//! Jobs such as the CSV content import run outside the request/response
//! cycle. They report progress by sending [`JobUpdate`] messages over an MPSC
//! channel; [`start_job_updater`] applies them to the status map that the
//! status endpoint reads.

use common::jobs::JobStatus;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

/// Clonable handle injected into the Actix application as `web::Data`.
#[derive(Clone)]
pub struct JobsState {
    /// Job id -> latest known status.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,
    /// Sender used by background workers to report progress.
    pub tx: mpsc::Sender<JobUpdate>,
}

impl JobsState {
    /// Creates the state together with the receiving end that
    /// [`start_job_updater`] must drain.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(capacity);
        let state = JobsState {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tx,
        };
        (state, rx)
    }

    pub async fn status(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs.read().await.get(job_id).cloned()
    }
}

/// A status change for one job.
#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

/// Applies incoming updates to the status map until every sender is gone.
pub async fn start_job_updater(
    jobs: Arc<RwLock<HashMap<String, JobStatus>>>,
    mut rx: mpsc::Receiver<JobUpdate>,
) {
    while let Some(update) = rx.recv().await {
        jobs.write().await.insert(update.job_id, update.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn updater_records_latest_status() {
        let (state, rx) = JobsState::new(8);
        let updater = tokio::spawn(start_job_updater(state.jobs.clone(), rx));

        for status in [JobStatus::Pending, JobStatus::InProgress(50)] {
            state
                .tx
                .send(JobUpdate {
                    job_id: "job-1".into(),
                    status,
                })
                .await
                .unwrap();
        }

        // Dropping every sender ends the updater loop.
        let JobsState { jobs, tx } = state;
        drop(tx);
        updater.await.unwrap();

        assert_eq!(
            jobs.read().await.get("job-1"),
            Some(&JobStatus::InProgress(50))
        );
    }
}
