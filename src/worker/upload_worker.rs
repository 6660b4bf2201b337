use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, Duration};
use tracing::{info, warn};
use validator::Validate;

use crate::store::forms::{JobPostingForm, UploadForm};
use crate::store::models::{JobId, ResumeId};
use crate::store::AppStore;

/// A form submission queued for simulated processing
#[derive(Debug, Clone)]
pub enum Submission {
    Resume(UploadForm),
    Posting(JobPostingForm),
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    ResumeAdded(ResumeId),
    JobPosted(JobId),
    /// Validation or store precondition failed; nothing was mutated
    Rejected(String),
    /// Shutdown fired mid-delay; the pending mutation was suppressed
    Cancelled,
}

/// Background worker that stands in for the original "AI processing" step:
/// each submission waits out a fixed delay, then commits through the store.
///
/// # Concurrency model
/// Submissions are processed strictly one at a time, so at most one
/// mutation is ever in flight. The simulated delay races the shutdown
/// signal; cancellation suppresses the commit entirely, so a consumer torn
/// down mid-delay can never be mutated against.
pub struct UploadWorker {
    store: Arc<AppStore>,
    upload_delay: Duration,
    posting_delay: Duration,
}

impl UploadWorker {
    pub fn new(store: Arc<AppStore>, upload_delay: Duration, posting_delay: Duration) -> Self {
        Self {
            store,
            upload_delay,
            posting_delay,
        }
    }

    /// Drain the submission queue until it closes or shutdown is signalled
    pub async fn run(
        &self,
        mut queue: mpsc::Receiver<Submission>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        info!("Submission worker started");

        loop {
            let submission = tokio::select! {
                _ = shutdown.changed() => {
                    info!("Submission worker received shutdown signal");
                    break;
                }
                next = queue.recv() => match next {
                    Some(submission) => submission,
                    None => {
                        info!("Submission queue closed");
                        break;
                    }
                },
            };

            match self.process(submission, &mut shutdown).await {
                SubmissionOutcome::ResumeAdded(id) => {
                    info!("Submission complete: resume id={}", id)
                }
                SubmissionOutcome::JobPosted(id) => info!("Submission complete: job id={}", id),
                SubmissionOutcome::Rejected(reason) => {
                    warn!("Submission rejected: {}", reason)
                }
                SubmissionOutcome::Cancelled => warn!("Submission cancelled mid-processing"),
            }
        }

        info!("Submission worker stopped");
    }

    /// Validate, wait out the simulated delay, then commit. Cancellation
    /// during the delay returns `Cancelled` without touching the store.
    pub async fn process(
        &self,
        submission: Submission,
        shutdown: &mut watch::Receiver<bool>,
    ) -> SubmissionOutcome {
        match submission {
            Submission::Resume(form) => {
                if let Err(errors) = form.validate() {
                    return SubmissionOutcome::Rejected(errors.to_string());
                }
                info!("Processing CV upload: file={}", form.file_name);
                if !self.simulate(self.upload_delay, shutdown).await {
                    return SubmissionOutcome::Cancelled;
                }
                let id = self.store.add_resume(form.into_new_resume());
                SubmissionOutcome::ResumeAdded(id)
            }
            Submission::Posting(form) => {
                if let Err(errors) = form.validate() {
                    return SubmissionOutcome::Rejected(errors.to_string());
                }
                info!("Processing job posting: title={}", form.title);
                if !self.simulate(self.posting_delay, shutdown).await {
                    return SubmissionOutcome::Cancelled;
                }
                match self.store.add_job(form.into_new_job()) {
                    Ok(id) => SubmissionOutcome::JobPosted(id),
                    Err(e) => SubmissionOutcome::Rejected(e.to_string()),
                }
            }
        }
    }

    /// Returns false if shutdown fired before the delay elapsed
    async fn simulate(&self, delay: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
        tokio::select! {
            _ = sleep(delay) => true,
            _ = shutdown.changed() => false,
        }
    }
}
