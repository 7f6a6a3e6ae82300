//! Error handling utilities for the travel diary.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Domain failures are described by dedicated enums (`ValidationError`,
//! `DiaryError`, `StorageError`) that convert into `AppError` through `From`.

use chrono::NaiveDateTime;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents values rejected by a diary entry.
///
/// Invalid values are never clamped or replaced with a default; the setter or
/// constructor that received them fails with one of these variants.
///
/// # Examples
///
/// ```
/// use travel_diary::errors::ValidationError;
///
/// let error = ValidationError::RatingOutOfRange { rating: 11.0 };
/// assert!(format!("{}", error).contains("between 0 and 10"));
/// assert!(format!("{}", error).contains("11"));
/// ```
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The rating is outside the closed interval [0, 10] or is not a finite number.
    #[error("Rating must be between 0 and 10, got {rating}")]
    RatingOutOfRange {
        /// The rejected rating
        rating: f64,
    },

    /// A reconstructed entry claims it was edited before it was written.
    #[error("Entry cannot be edited ({edited}) before it was written ({written})")]
    EditedBeforeWritten {
        /// Creation timestamp of the entry
        written: NaiveDateTime,
        /// Last edit timestamp of the entry
        edited: NaiveDateTime,
    },

    /// A requested time window does not start before it ends.
    #[error("Time window start ({start}) must be before its end ({end})")]
    InvalidTimeWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Represents failures of structural operations on a diary.
///
/// # Examples
///
/// ```
/// use travel_diary::errors::DiaryError;
///
/// let error = DiaryError::DuplicateTitle { title: "Alps".to_string() };
/// assert!(format!("{}", error).contains("Alps"));
/// assert!(format!("{}", error).contains("already exists"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiaryError {
    /// An entry with the same title is already stored, or appears twice in a batch.
    #[error("An entry titled '{title}' already exists. Entry titles must be unique.")]
    DuplicateTitle {
        /// The colliding title
        title: String,
    },

    /// No entry with the given title is stored.
    #[error("No entry titled '{title}' was found")]
    NotFound {
        /// The title that was looked up
        title: String,
    },
}

/// Represents failures when reading the diary file back into entries.
///
/// A missing or empty file is not an error. These variants only describe a
/// file that is present but cannot be turned into valid entries.
///
/// # Examples
///
/// ```
/// use travel_diary::errors::StorageError;
///
/// let error = StorageError::TitleMismatch {
///     key: "Alps".to_string(),
///     title: "Andes".to_string(),
/// };
/// assert!(format!("{}", error).contains("Alps"));
/// assert!(format!("{}", error).contains("Andes"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file does not contain a JSON array or object of diary records.
    #[error("Diary file {} is corrupt: {source}", .path.display())]
    Corrupt {
        /// The diary file
        path: PathBuf,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A stored timestamp could not be parsed.
    #[error("Entry '{title}' has a malformed {field} timestamp '{value}': {source}")]
    InvalidTimestamp {
        /// Title of the offending record
        title: String,
        /// Name of the timestamp field
        field: &'static str,
        /// The stored value
        value: String,
        /// The underlying parse error
        #[source]
        source: chrono::ParseError,
    },

    /// A record stored under a key that is not its own title.
    #[error("Record stored under key '{key}' has title '{title}'")]
    TitleMismatch {
        /// The object key
        key: String,
        /// The title inside the record
        title: String,
    },
}

/// Represents all possible errors that can occur in the travel diary.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use travel_diary::errors::AppError;
///
/// let error = AppError::Config("Diary file path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Diary file path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use travel_diary::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::PermissionDenied, "permission denied");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::PermissionDenied),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Rejected entry values.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Title collisions and lookups of unknown titles.
    #[error("Diary error: {0}")]
    Diary(#[from] DiaryError),

    /// A diary file that is present but unreadable as entries.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use travel_diary::errors::{AppResult, AppError, DiaryError};
///
/// fn find(title: &str) -> AppResult<()> {
///     Err(DiaryError::NotFound { title: title.to_string() }.into())
/// }
///
/// assert!(matches!(find("Alps"), Err(AppError::Diary(DiaryError::NotFound { .. }))));
/// ```
pub type AppResult<T> = Result<T, AppError>;
