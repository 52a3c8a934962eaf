//! Error types for the payrun pipeline.

use snafu::prelude::*;
use std::path::PathBuf;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    /// An environment variable held a value that failed to parse.
    #[snafu(display("Invalid value for {name}: {value:?}"))]
    VarParse { name: &'static str, value: String },

    /// Retry attempts must allow at least one delivery attempt.
    #[snafu(display("RETRY_MAX_ATTEMPTS must be >= 1, got {value}"))]
    InvalidMaxAttempts { value: u32 },

    /// Base retry delay cannot be negative.
    #[snafu(display("RETRY_BASE_DELAY must be >= 0, got {value}"))]
    InvalidBaseDelay { value: f64 },

    /// Failure rate must be a probability.
    #[snafu(display("FAIL_RATE must be within [0.0, 1.0], got {value}"))]
    InvalidFailRate { value: f64 },
}

/// Errors that can occur while fingerprinting a source file.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ChecksumError {
    /// Failed to open the file for hashing.
    #[snafu(display("Failed to open {} for hashing: {source}", path.display()))]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read file bytes during hashing.
    #[snafu(display("Failed to read {} while hashing: {source}", path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that can occur against the dedup cache backing store.
///
/// The in-memory backend never fails; these surface only from the
/// remote backend after a connection was established at startup.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CacheError {
    /// A redis command failed.
    #[snafu(display("Cache command failed: {source}"))]
    Command { source: redis::RedisError },
}

/// Errors produced by the delivery collaborator boundary.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DeliveryError {
    /// The endpoint reported anything other than an explicit success.
    #[snafu(display("Upload rejected: {message}"))]
    Rejected { message: String },
}

/// Errors that can occur while archiving a delivered file.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ArchiveError {
    /// Failed to create the archive directory.
    #[snafu(display("Failed to create archive directory {}: {source}", path.display()))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to copy the file into the archive.
    #[snafu(display("Failed to archive {}: {source}", src.display()))]
    Copy {
        src: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that can occur while loading the employee directory.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DirectoryError {
    /// Failed to read the directory file.
    #[snafu(display("Failed to read employee directory {}: {source}", path.display()))]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the directory JSON.
    #[snafu(display("Failed to parse employee directory: {source}"))]
    DirectoryParse { source: serde_json::Error },
}

/// Errors that abort processing of a single file.
///
/// These are caught at the run loop: the file is logged and counted,
/// no dedup entry is written, and the run continues with the next file.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FileError {
    /// The source file could not be read for fingerprinting.
    #[snafu(display("Checksum failed: {source}"))]
    Checksum { source: ChecksumError },

    /// The archive copy failed after a successful delivery.
    #[snafu(display("Archive failed: {source}"))]
    Archive { source: ArchiveError },

    /// The dedup cache backing store failed mid-file.
    #[snafu(display("Cache failed: {source}"))]
    Cache { source: CacheError },
}

/// Top-level pipeline errors.
///
/// These abort the whole run before (or instead of) processing files;
/// per-file failures never reach this type.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PipelineError {
    /// Configuration error.
    #[snafu(display("Configuration error: {source}"))]
    Config { source: ConfigError },

    /// Employee directory error.
    #[snafu(display("Employee directory error: {source}"))]
    Directory { source: DirectoryError },

    /// The input directory could not be listed.
    #[snafu(display("Failed to list input directory {}: {source}", path.display()))]
    ListInput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Cache administration failed (e.g. an explicit flush).
    #[snafu(display("Cache error: {source}"))]
    CacheAdmin { source: CacheError },

    /// Filesystem error outside the per-file sequence (demo seeding).
    #[snafu(display("IO error at {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ConfigError> for PipelineError {
    fn from(source: ConfigError) -> Self {
        PipelineError::Config { source }
    }
}

impl From<DirectoryError> for PipelineError {
    fn from(source: DirectoryError) -> Self {
        PipelineError::Directory { source }
    }
}

impl From<ChecksumError> for FileError {
    fn from(source: ChecksumError) -> Self {
        FileError::Checksum { source }
    }
}

impl From<ArchiveError> for FileError {
    fn from(source: ArchiveError) -> Self {
        FileError::Archive { source }
    }
}

impl From<CacheError> for FileError {
    fn from(source: CacheError) -> Self {
        FileError::Cache { source }
    }
}
