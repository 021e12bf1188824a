//! # speechmatics-batch
//!
//! Blocking client for the Speechmatics V1 batch transcription API.
//!
//! ## Overview
//!
//! The service runs speech-to-text as asynchronous jobs: an audio file
//! is uploaded, the job is polled until it settles, and the finished
//! output is downloaded. This crate drives that lifecycle end to end
//! on a single thread, sleeping between polls for however long the
//! service asks. Alignment jobs (timing an existing text against the
//! audio) use the same lifecycle and are selected by configuring a
//! text file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use speechmatics_batch::{Transcriber, TranscriptionConfig};
//!
//! fn main() -> speechmatics_batch::Result<()> {
//!     let config = TranscriptionConfig::builder()
//!         .user_id("12345")
//!         .api_auth_token("your-api-token")
//!         .build()?;
//!
//!     let transcriber = Transcriber::from_config(config)?;
//!     let transcript = transcriber.transcribe_audio(Path::new("interview.mp3"))?;
//!     println!("{}", String::from_utf8_lossy(&transcript));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Configuration record loading and validation |
//! | [`client`] | REST client for the batch jobs endpoints |
//! | [`transcriber`] | Submit / poll / fetch lifecycle orchestration |
//! | [`types`] | Wire types (job status, details, output kind) |
//! | [`error`] | Unified error type |

pub mod client;
pub mod config;
pub mod error;
pub mod transcriber;
pub mod types;

// Re-export main types for convenience
pub use client::{SpeechmaticsClient, SpeechmaticsClientBuilder, SubmitOptions, DEFAULT_BASE_URL};
pub use config::{TranscriptionConfig, TranscriptionConfigBuilder, DEFAULT_CONFIG_PATH};
pub use error::Error;
pub use transcriber::{JobService, Transcriber};
pub use types::{JobDetails, JobStatus, JobType, OutputKind};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
