//! Configuration record for a transcription run.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Default location of the configuration record.
pub const DEFAULT_CONFIG_PATH: &str = "./keys/speechmatics_config.json";

fn default_language() -> String {
    "en-US".to_string()
}

fn default_format() -> String {
    "txt".to_string()
}

/// Settings for one transcription run.
///
/// Loaded from a JSON record (see [`TranscriptionConfig::from_file`]) or
/// assembled through [`TranscriptionConfig::builder`]. An instance is
/// never mutated after construction.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    /// Account identifier, used in every endpoint path.
    #[serde(rename = "userId")]
    pub user_id: String,

    /// API token, sent as the `auth_token` query parameter.
    #[serde(rename = "apiAuthToken")]
    pub api_auth_token: String,

    /// Language model, optionally suffixed with `=<version>`.
    #[serde(default = "default_language")]
    pub language: String,

    /// Output format hint. A non-empty value requests plain-text
    /// output instead of the raw service response.
    #[serde(default = "default_format")]
    pub format: String,

    /// Path to a text file to align against the audio. Present only
    /// for alignment jobs.
    #[serde(default)]
    pub text: Option<String>,

    /// URL the service should call once the job finishes.
    #[serde(default)]
    pub callback_url: Option<String>,

    /// Notification mode. The callback URL is only sent when this is
    /// `"callback"`.
    #[serde(default)]
    pub notification: Option<String>,

    /// Address for completion e-mails.
    #[serde(default)]
    pub notification_email: Option<String>,
}

impl TranscriptionConfig {
    pub fn builder() -> TranscriptionConfigBuilder {
        TranscriptionConfigBuilder::new()
    }

    /// Parse and validate a configuration record.
    pub fn from_json(raw: &str) -> Result<TranscriptionConfig> {
        let config: TranscriptionConfig = serde_json::from_str(raw)
            .map_err(|e| Error::configuration(format!("cannot parse config record: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration record from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<TranscriptionConfig> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let config: TranscriptionConfig = serde_json::from_str(&raw).map_err(|e| {
            Error::configuration(format!("cannot parse config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Path to the alignment text file, if one is configured.
    pub fn text_path(&self) -> Option<&Path> {
        match self.text.as_deref() {
            Some(t) if !t.is_empty() => Some(Path::new(t)),
            _ => None,
        }
    }

    /// Whether the output should be fetched in formatted form.
    pub fn wants_formatted_output(&self) -> bool {
        !self.format.is_empty()
    }

    fn validate(&self) -> Result<()> {
        if self.user_id.is_empty() {
            return Err(Error::configuration("required userId is empty"));
        }
        if self.api_auth_token.is_empty() {
            return Err(Error::configuration("required apiAuthToken is empty"));
        }
        if self.language.is_empty() {
            return Err(Error::configuration("required language is empty"));
        }
        if self.format.is_empty() {
            return Err(Error::configuration("required format is empty"));
        }
        Ok(())
    }
}

pub struct TranscriptionConfigBuilder {
    user_id: Option<String>,
    api_auth_token: Option<String>,
    language: Option<String>,
    format: Option<String>,
    text: Option<String>,
    callback_url: Option<String>,
    notification: Option<String>,
    notification_email: Option<String>,
}

impl TranscriptionConfigBuilder {
    pub fn new() -> Self {
        Self {
            user_id: None,
            api_auth_token: None,
            language: None,
            format: None,
            text: None,
            callback_url: None,
            notification: None,
            notification_email: None,
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn api_auth_token(mut self, token: impl Into<String>) -> Self {
        self.api_auth_token = Some(token.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn notification(mut self, notification: impl Into<String>) -> Self {
        self.notification = Some(notification.into());
        self
    }

    pub fn notification_email(mut self, email: impl Into<String>) -> Self {
        self.notification_email = Some(email.into());
        self
    }

    /// Apply the defaults and validate the required fields.
    pub fn build(self) -> Result<TranscriptionConfig> {
        let config = TranscriptionConfig {
            user_id: self.user_id.unwrap_or_default(),
            api_auth_token: self.api_auth_token.unwrap_or_default(),
            language: self.language.unwrap_or_else(default_language),
            format: self.format.unwrap_or_else(default_format),
            text: self.text,
            callback_url: self.callback_url,
            notification: self.notification,
            notification_email: self.notification_email,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for TranscriptionConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
