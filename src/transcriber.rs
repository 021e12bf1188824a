//! Job lifecycle orchestration: submit, poll, fetch output.

use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::client::{SpeechmaticsClient, SubmitOptions};
use crate::config::TranscriptionConfig;
use crate::types::{JobDetails, JobStatus, OutputKind};
use crate::{Error, Result};

/// The three service operations a transcription run needs.
///
/// [`SpeechmaticsClient`] is the production implementation; tests run
/// the lifecycle against scripted stand-ins.
pub trait JobService {
    /// Upload an audio file as a new job and return its id.
    fn submit_job(&self, audio: &Path, language: &str, options: &SubmitOptions) -> Result<u64>;

    /// Fetch the current state of a job.
    fn job_details(&self, job_id: u64) -> Result<JobDetails>;

    /// Download the output of a finished job.
    fn job_output(&self, job_id: u64, formatted: bool, kind: OutputKind) -> Result<String>;
}

impl JobService for SpeechmaticsClient {
    fn submit_job(&self, audio: &Path, language: &str, options: &SubmitOptions) -> Result<u64> {
        SpeechmaticsClient::submit_job(self, audio, language, options)
    }

    fn job_details(&self, job_id: u64) -> Result<JobDetails> {
        SpeechmaticsClient::job_details(self, job_id)
    }

    fn job_output(&self, job_id: u64, formatted: bool, kind: OutputKind) -> Result<String> {
        SpeechmaticsClient::job_output(self, job_id, formatted, kind)
    }
}

/// Drives one job from submission to downloaded output.
///
/// The whole lifecycle runs on the calling thread; between polls the
/// orchestrator sleeps for however long the service asked.
pub struct Transcriber {
    config: TranscriptionConfig,
    service: Box<dyn JobService>,
    wait: Box<dyn Fn(Duration)>,
}

impl Transcriber {
    /// Run the lifecycle against an explicit service implementation.
    pub fn new(config: TranscriptionConfig, service: impl JobService + 'static) -> Self {
        Self {
            config,
            service: Box::new(service),
            wait: Box::new(thread::sleep),
        }
    }

    /// Production wiring: a [`SpeechmaticsClient`] built from the
    /// config's credentials, talking to the production endpoint.
    pub fn from_config(config: TranscriptionConfig) -> Result<Self> {
        let client = SpeechmaticsClient::builder()
            .user_id(config.user_id.clone())
            .auth_token(config.api_auth_token.clone())
            .build()?;
        Ok(Self::new(config, client))
    }

    /// Submit `audio`, poll until the job settles, and return its
    /// output as UTF-8 bytes.
    pub fn transcribe_audio(&self, audio: &Path) -> Result<Vec<u8>> {
        let options = SubmitOptions {
            alignment_text: self.config.text_path().map(Path::to_path_buf),
            callback_url: non_empty(&self.config.callback_url),
            notification: non_empty(&self.config.notification),
            notification_email: non_empty(&self.config.notification_email),
        };

        let job_id = self
            .service
            .submit_job(audio, &self.config.language, &options)?;
        info!(job_id, "job started");

        let mut details = self.service.job_details(job_id)?;
        while !details.job_status.is_terminal() {
            let wait_secs = details.check_wait.unwrap_or(0);
            info!(
                job_id,
                status = details.job_status.as_str(),
                wait_secs,
                "waiting for job to be processed"
            );
            (self.wait)(Duration::from_secs(wait_secs));
            details = self.service.job_details(job_id)?;
        }

        match details.job_status {
            JobStatus::UnsupportedFileFormat => {
                return Err(Error::job_failed(
                    "File was in an unsupported file format and could not be transcribed. \
                     You have been reimbursed all credits for this job.",
                ));
            }
            JobStatus::CouldNotAlign => {
                return Err(Error::job_failed(
                    "Could not align text and audio file. \
                     You have been reimbursed all credits for this job.",
                ));
            }
            _ => {}
        }

        info!(
            job_id,
            status = details.job_status.as_str(),
            "processing complete, getting output"
        );
        let output = self.service.job_output(
            job_id,
            self.config.wants_formatted_output(),
            details.job_type.output_kind(),
        )?;
        debug!(job_id, bytes = output.len(), "output received");
        Ok(output.into_bytes())
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
