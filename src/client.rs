//! Blocking HTTP client for the batch jobs REST API.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::multipart::Form;
use tracing::{debug, error};

use crate::types::{JobDetails, JobDetailsResponse, JobSubmitResponse, OutputKind};
use crate::{Error, Result};

/// Production endpoint of the batch jobs API.
pub const DEFAULT_BASE_URL: &str = "https://api.speechmatics.com/v1.0";

const FETCH_DIAGNOSTIC: &str = "If you are still unsure why your request failed \
                                please contact speechmatics: support@speechmatics.com";

/// Client for the batch jobs REST API.
///
/// Holds the account credentials and a blocking HTTP client. Every
/// method performs a single request; no state is carried between
/// calls.
pub struct SpeechmaticsClient {
    http_client: reqwest::blocking::Client,
    user_id: String,
    auth_token: String,
    base_url: String,
}

/// Optional parts of a job submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitOptions {
    /// Text file to align against the audio. Setting this makes the
    /// submission an alignment job.
    pub alignment_text: Option<PathBuf>,
    /// URL for the completion callback.
    pub callback_url: Option<String>,
    /// Notification mode. The callback URL is only sent when this is
    /// `"callback"`.
    pub notification: Option<String>,
    /// Address for completion e-mails.
    pub notification_email: Option<String>,
}

impl SpeechmaticsClient {
    pub fn builder() -> SpeechmaticsClientBuilder {
        SpeechmaticsClientBuilder::new()
    }

    /// Upload an audio file as a new job.
    ///
    /// When `options.alignment_text` is set, the text file is uploaded
    /// alongside the audio. Returns the id the service assigned to the
    /// job.
    pub fn submit_job(
        &self,
        audio: &Path,
        language: &str,
        options: &SubmitOptions,
    ) -> Result<u64> {
        let url = format!("{}/user/{}/jobs/", self.base_url, self.user_id);

        let mut form = Form::new().file("data_file", audio).map_err(|e| {
            error!(path = %audio.display(), "problem opening audio file");
            Error::Io(e)
        })?;
        if let Some(text) = &options.alignment_text {
            form = form.file("text_file", text).map_err(|e| {
                error!(path = %text.display(), "problem opening text file");
                Error::Io(e)
            })?;
        }

        let (model, version) = split_language(language);
        form = form.text("model", model.to_string());
        if let Some(version) = version {
            form = form.text("version", version.to_string());
        }
        if let Some(notification) = &options.notification {
            form = form.text("notification", notification.clone());
            if notification == "callback" {
                if let Some(callback) = &options.callback_url {
                    form = form.text("callback", callback.clone());
                }
            }
        }
        if let Some(email) = &options.notification_email {
            form = form.text("notification_email_address", email.clone());
        }

        debug!(url = %url, model, "submitting job");
        let response = self
            .http_client
            .post(&url)
            .query(&[("auth_token", self.auth_token.as_str())])
            .multipart(form)
            .send()?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(Error::remote(status, submit_diagnostic(status)));
        }
        let body = response.text()?;
        let accepted: JobSubmitResponse = serde_json::from_str(&body)?;
        Ok(accepted.id)
    }

    /// Fetch the current state of a job.
    pub fn job_details(&self, job_id: u64) -> Result<JobDetails> {
        let url = format!("{}/user/{}/jobs/{}/", self.base_url, self.user_id, job_id);
        debug!(url = %url, job_id, "fetching job details");
        let response = self
            .http_client
            .get(&url)
            .query(&[("auth_token", self.auth_token.as_str())])
            .send()?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(Error::remote(status, FETCH_DIAGNOSTIC));
        }
        let body = response.text()?;
        let details: JobDetailsResponse = serde_json::from_str(&body)?;
        Ok(details.job)
    }

    /// Download the output of a finished job.
    ///
    /// With `formatted` set, transcripts are requested as plain text
    /// and alignments with one tag per line. The body is decoded as
    /// UTF-8 no matter what the response declares.
    pub fn job_output(&self, job_id: u64, formatted: bool, kind: OutputKind) -> Result<String> {
        let url = format!(
            "{}/user/{}/jobs/{}/{}",
            self.base_url,
            self.user_id,
            job_id,
            kind.path_segment()
        );
        let mut query: Vec<(&str, &str)> = vec![("auth_token", self.auth_token.as_str())];
        if formatted {
            match kind {
                OutputKind::Transcript => query.push(("format", "txt")),
                OutputKind::Alignment => query.push(("tags", "one_per_line")),
            }
        }
        debug!(url = %url, job_id, formatted, "fetching job output");
        let response = self.http_client.get(&url).query(&query).send()?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(Error::remote(status, FETCH_DIAGNOSTIC));
        }
        let bytes = response.bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Split a `model=version` language selector into its two form fields.
fn split_language(language: &str) -> (&str, Option<&str>) {
    match language.split_once('=') {
        Some((model, version)) => (model, Some(version)),
        None => (language, None),
    }
}

fn submit_diagnostic(status: u16) -> String {
    let causes = match status {
        400 => {
            "Common causes of this error are:\n\
             Malformed arguments\n\
             Missing data file\n\
             Absent / unsupported language selection.\n"
        }
        401 => {
            "Common causes of this error are:\n\
             Invalid user id or authentication token.\n"
        }
        403 => {
            "Common causes of this error are:\n\
             Insufficient credit\n\
             User id not in our database\n\
             Incorrect authentication token.\n"
        }
        429 => {
            "Common causes of this error are:\n\
             You are submitting too many POSTs in a short period of time.\n"
        }
        503 => {
            "Common causes of this error are:\n\
             The system is temporarily unavailable or overloaded.\n\
             Your POST will typically succeed if you try again soon.\n"
        }
        _ => "",
    };
    format!(
        "{}If you are still unsure why your POST failed \
         please contact speechmatics: support@speechmatics.com",
        causes
    )
}

pub struct SpeechmaticsClientBuilder {
    user_id: Option<String>,
    auth_token: Option<String>,
    base_url: Option<String>,
    timeout_secs: u64,
}

impl SpeechmaticsClientBuilder {
    pub fn new() -> Self {
        Self {
            user_id: None,
            auth_token: None,
            base_url: None,
            timeout_secs: 60,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<SpeechmaticsClient> {
        let user_id = self
            .user_id
            .ok_or_else(|| Error::configuration("user id must be specified"))?;
        let auth_token = self
            .auth_token
            .ok_or_else(|| Error::configuration("auth token must be specified"))?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(SpeechmaticsClient {
            http_client,
            user_id,
            auth_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Default for SpeechmaticsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn test_split_language_without_version() {
        assert_eq!(split_language("en-US"), ("en-US", None));
    }

    #[test]
    fn test_split_language_with_version() {
        assert_eq!(split_language("en-US=2.4"), ("en-US", Some("2.4")));
    }

    #[test]
    fn test_split_language_splits_on_first_equals() {
        assert_eq!(split_language("en-US=2=beta"), ("en-US", Some("2=beta")));
    }

    #[test]
    fn test_split_language_keeps_empty_version() {
        assert_eq!(split_language("en-US="), ("en-US", Some("")));
    }

    #[test]
    fn test_submit_diagnostics_are_distinct_per_status() {
        let messages: HashSet<String> = [400, 401, 403, 429, 503, 418]
            .iter()
            .map(|&status| submit_diagnostic(status))
            .collect();
        assert_eq!(messages.len(), 6);
        for message in &messages {
            assert!(message.contains("support@speechmatics.com"));
        }
    }

    #[test]
    fn test_builder_requires_credentials() {
        match SpeechmaticsClient::builder().auth_token("token").build() {
            Err(Error::Configuration { message }) => assert!(message.contains("user id")),
            _ => panic!("build must fail without a user id"),
        }

        match SpeechmaticsClient::builder().user_id("1234").build() {
            Err(Error::Configuration { message }) => assert!(message.contains("auth token")),
            _ => panic!("build must fail without an auth token"),
        }
    }

    #[test]
    fn test_builder_defaults_to_production_endpoint() {
        let client = SpeechmaticsClient::builder()
            .user_id("1234")
            .auth_token("token")
            .build()
            .unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = SpeechmaticsClient::builder()
            .user_id("1234")
            .auth_token("token")
            .base_url("http://localhost:9999/v1.0/")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/v1.0");
    }
}
