//! Job-related API endpoints

use std::time::Duration;

use async_trait::async_trait;
use hireflow_core::domain::job::Job;
use hireflow_core::dto::submission::{Submission, VideoUpload};
use reqwest::multipart::{Form, Part};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::ServiceClient;
use crate::endpoints;
use crate::error::Result;

/// Remote job operations the engine depends on
///
/// Every call carries the timeout budget for that operation. Responses are
/// returned unreconciled, as the envelope's `data`.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Submit a validated job
    async fn submit(&self, submission: &Submission, timeout: Duration) -> Result<JsonValue>;

    /// Fetch the current status payload of a remotely tracked job
    async fn status(&self, job: &Job, timeout: Duration) -> Result<JsonValue>;

    /// Cancel or delete a remotely tracked job
    async fn cancel(&self, job: &Job, timeout: Duration) -> Result<()>;
}

#[async_trait]
impl JobService for ServiceClient {
    async fn submit(&self, submission: &Submission, timeout: Duration) -> Result<JsonValue> {
        let url = self.url(&endpoints::submit_path(submission));
        debug!("Submitting {} job to {}", submission.kind(), url);

        let request = match submission {
            Submission::VideoAnalysis(upload) => self.client.post(&url).multipart(video_form(upload)),
            _ => match submission.json_body() {
                Some(body) => self.client.post(&url).json(&body),
                None => self.client.post(&url),
            },
        };

        self.send_enveloped(request, timeout).await
    }

    async fn status(&self, job: &Job, timeout: Duration) -> Result<JsonValue> {
        let url = self.url(&endpoints::status_path(job)?);
        debug!("Fetching status of {} job {}", job.kind, job.id);

        let request = self.client.get(&url);
        self.send_enveloped(request, timeout).await
    }

    async fn cancel(&self, job: &Job, timeout: Duration) -> Result<()> {
        let url = self.url(&endpoints::cancel_path(job)?);
        debug!("Cancelling {} job {}", job.kind, job.id);

        let request = self.client.delete(&url);
        self.send_enveloped(request, timeout).await?;
        Ok(())
    }
}

fn video_form(upload: &VideoUpload) -> Form {
    let file = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
    let form = Form::new()
        .part("video_file", file)
        .text("candidate_name", upload.candidate_name.clone())
        .text("position_applied", upload.position_applied.clone());

    match &upload.resume_data_id {
        Some(id) => form.text("resume_data_id", id.clone()),
        None => form,
    }
}
