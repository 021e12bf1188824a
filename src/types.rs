//! Wire types for the batch jobs API.

use serde::Deserialize;

/// Lifecycle state reported by the service for a submitted job.
///
/// The service keeps returning intermediate states while the job is
/// queued or running; only the four named states below stop the poll
/// loop. States this crate does not know about are treated as still
/// in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Processing finished and output is ready to fetch.
    Done,
    /// The job's retention window has passed.
    Expired,
    /// The uploaded audio is not a format the service accepts.
    UnsupportedFileFormat,
    /// The provided text could not be aligned against the audio.
    CouldNotAlign,
    /// Any state the service reports while the job is still running.
    #[serde(other)]
    InProgress,
}

impl JobStatus {
    /// Whether the job has stopped changing state on the service side.
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::InProgress)
    }

    /// Canonical label for the status. In-flight wire states all
    /// report as `in_progress`, whatever string the service sent.
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Done => "done",
            JobStatus::Expired => "expired",
            JobStatus::UnsupportedFileFormat => "unsupported_file_format",
            JobStatus::CouldNotAlign => "could_not_align",
            JobStatus::InProgress => "in_progress",
        }
    }
}

/// Kind of processing the service ran for a job.
///
/// Determines which output endpoint holds the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Transcription,
    Alignment,
}

impl JobType {
    /// The output artifact a finished job of this kind exposes.
    pub fn output_kind(self) -> OutputKind {
        match self {
            JobType::Transcription => OutputKind::Transcript,
            JobType::Alignment => OutputKind::Alignment,
        }
    }
}

/// Output artifact addressed by the output endpoint.
///
/// The endpoint path segment differs from the job type name: a
/// `transcription` job exposes its result under `transcript`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Transcript,
    Alignment,
}

impl OutputKind {
    /// URL path segment of the output endpoint.
    pub fn path_segment(self) -> &'static str {
        match self {
            OutputKind::Transcript => "transcript",
            OutputKind::Alignment => "alignment",
        }
    }
}

/// Envelope returned when the service accepts a new job.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSubmitResponse {
    /// Numeric identifier assigned to the job.
    pub id: u64,
}

/// Envelope returned by the job details endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDetailsResponse {
    pub job: JobDetails,
}

/// Snapshot of a job's state as reported by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDetails {
    pub job_status: JobStatus,
    pub job_type: JobType,
    /// Seconds the service asks the caller to wait before polling
    /// again. Absent once the job is terminal.
    #[serde(default)]
    pub check_wait: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_wire_names() {
        let status: JobStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(status, JobStatus::Done);
        let status: JobStatus = serde_json::from_str("\"unsupported_file_format\"").unwrap();
        assert_eq!(status, JobStatus::UnsupportedFileFormat);
        let status: JobStatus = serde_json::from_str("\"could_not_align\"").unwrap();
        assert_eq!(status, JobStatus::CouldNotAlign);
    }

    #[test]
    fn test_unknown_status_is_in_progress() {
        let status: JobStatus = serde_json::from_str("\"transcribing\"").unwrap();
        assert_eq!(status, JobStatus::InProgress);
        assert_eq!(status.as_str(), "in_progress");
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_terminal_classification() {
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Expired.is_terminal());
        assert!(JobStatus::UnsupportedFileFormat.is_terminal());
        assert!(JobStatus::CouldNotAlign.is_terminal());
        assert!(!JobStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_details_parse() {
        let body = r#"{"job": {"job_status": "transcribing", "job_type": "transcription", "check_wait": 30}}"#;
        let details: JobDetailsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(details.job.job_status, JobStatus::InProgress);
        assert_eq!(details.job.job_type, JobType::Transcription);
        assert_eq!(details.job.check_wait, Some(30));
    }

    #[test]
    fn test_details_without_check_wait() {
        let body = r#"{"job": {"job_status": "done", "job_type": "alignment"}}"#;
        let details: JobDetailsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(details.job.job_status, JobStatus::Done);
        assert_eq!(details.job.job_type, JobType::Alignment);
        assert_eq!(details.job.check_wait, None);
    }

    #[test]
    fn test_output_path_segments() {
        assert_eq!(JobType::Transcription.output_kind(), OutputKind::Transcript);
        assert_eq!(JobType::Transcription.output_kind().path_segment(), "transcript");
        assert_eq!(JobType::Alignment.output_kind().path_segment(), "alignment");
    }
}
