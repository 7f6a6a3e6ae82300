//! Persistence of diary entries to a JSON file.
//!
//! Two pieces live here:
//!
//! - the record codec: `DiaryEntryRecord` is the on-disk shape of an entry, with
//!   both timestamps written as ISO-8601 strings. `DiaryEntryRecord::from`
//!   encodes, `DiaryEntryRecord::decode` turns a record back into an entry.
//! - the storage gateway: `DiaryStorage` reads and writes the whole diary file.
//!
//! # File format
//!
//! The diary file holds either a JSON array of records or a JSON object mapping
//! each title to its record:
//!
//! ```json
//! [
//!   {
//!     "timeWritten": "2024-01-15T14:30:00.123456789",
//!     "timeEdited": "2024-01-16T09:12:44.5",
//!     "author": "Alice",
//!     "destination": "Backpacking Europe",
//!     "activity": "hiking",
//!     "rating": 8.5,
//!     "title": "Alps Adventure",
//!     "text": "Climbed several peaks over three days."
//!   }
//! ]
//! ```
//!
//! A missing or empty file counts as an empty diary and is initialized to `[]`
//! the first time it is loaded. Saving always writes an array and replaces the
//! file atomically.

use crate::constants::{EMPTY_DIARY_CONTAINER, TIMESTAMP_FORMAT, TIMESTAMP_FORMAT_MINUTES};
use crate::diary::Diary;
use crate::entry::{DiaryEntry, NewEntry};
use crate::errors::{AppError, AppResult, DiaryError, StorageError};
use chrono::NaiveDateTime;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs;
#[cfg(unix)]
use std::fs::Permissions;
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Formats a timestamp in the storage format.
///
/// The fractional part is written only when it is non-zero, with as many
/// digits as needed to keep full nanosecond precision.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use travel_diary::storage::format_timestamp;
///
/// let time = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_nano_opt(14, 30, 5, 120_000_000).unwrap();
/// assert_eq!(format_timestamp(time), "2024-01-15T14:30:05.120");
///
/// let time = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(14, 30, 0).unwrap();
/// assert_eq!(format_timestamp(time), "2024-01-15T14:30:00");
/// ```
pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored timestamp.
///
/// Accepts the storage format with or without a fraction, and the
/// minute-precision form (`2024-01-15T14:30`) found in older diary files.
///
/// # Errors
///
/// Returns a `chrono::ParseError` if the value matches neither form.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT_MINUTES))
}

/// The on-disk shape of a diary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntryRecord {
    pub time_written: String,
    pub time_edited: String,
    pub author: String,
    pub destination: String,
    pub activity: String,
    pub rating: f64,
    pub title: String,
    pub text: String,
}

impl From<&DiaryEntry> for DiaryEntryRecord {
    fn from(entry: &DiaryEntry) -> Self {
        Self {
            time_written: format_timestamp(entry.time_written()),
            time_edited: format_timestamp(entry.time_edited()),
            author: entry.author().to_string(),
            destination: entry.destination().to_string(),
            activity: entry.activity().to_string(),
            rating: entry.rating(),
            title: entry.title().to_string(),
            text: entry.text().to_string(),
        }
    }
}

impl DiaryEntryRecord {
    /// Turns the record back into an entry.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `StorageError::InvalidTimestamp` if either timestamp cannot be parsed
    /// - `AppError::Validation` if the rating is outside [0, 10] or the entry
    ///   was edited before it was written
    pub fn decode(self) -> AppResult<DiaryEntry> {
        let time_written = self.parse_field("timeWritten", &self.time_written)?;
        let time_edited = self.parse_field("timeEdited", &self.time_edited)?;

        DiaryEntry::restore(
            time_written,
            time_edited,
            NewEntry {
                author: self.author,
                destination: self.destination,
                activity: self.activity,
                rating: self.rating,
                title: self.title,
                text: self.text,
            },
        )
    }

    fn parse_field(&self, field: &'static str, value: &str) -> AppResult<NaiveDateTime> {
        parse_timestamp(value).map_err(|source| {
            StorageError::InvalidTimestamp {
                title: self.title.clone(),
                field,
                value: value.to_string(),
                source,
            }
            .into()
        })
    }
}

impl TryFrom<DiaryEntryRecord> for DiaryEntry {
    type Error = AppError;

    fn try_from(record: DiaryEntryRecord) -> AppResult<Self> {
        record.decode()
    }
}

/// Top-level shape of the diary file.
///
/// Object keys are kept in file order, repeats included, so a title that
/// appears twice is reported instead of silently overwritten.
enum StoredContainer {
    Empty,
    List(Vec<Value>),
    Keyed(Vec<(String, Value)>),
}

impl<'de> Deserialize<'de> for StoredContainer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StoredContainerVisitor)
    }
}

struct StoredContainerVisitor;

impl<'de> Visitor<'de> for StoredContainerVisitor {
    type Value = StoredContainer;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON array or object of diary entries")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StoredContainer::Empty)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(StoredContainer::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::new();
        while let Some(pair) = map.next_entry::<String, Value>()? {
            pairs.push(pair);
        }
        Ok(StoredContainer::Keyed(pairs))
    }
}

/// Reads and writes the diary file at a fixed path.
///
/// Each call opens the file, reads or writes it completely, and closes it
/// again. No handle is kept between calls.
///
/// The storage never creates the file's parent directory. Call
/// `ensure_parent_directory_exists` during start-up for that.
///
/// # Examples
///
/// ```
/// use travel_diary::storage::DiaryStorage;
///
/// let dir = tempfile::tempdir().unwrap();
/// let storage = DiaryStorage::new(dir.path().join("diary.json"));
///
/// // A missing file loads as an empty diary and is initialized on disk
/// let diary = storage.load_diary().unwrap();
/// assert!(diary.is_empty());
/// assert_eq!(std::fs::read_to_string(storage.path()).unwrap(), "[]");
/// ```
#[derive(Debug, Clone)]
pub struct DiaryStorage {
    path: PathBuf,
}

impl DiaryStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every entry stored in the file.
    ///
    /// A missing, empty or whitespace-only file (or a literal `null`) yields no
    /// entries, and the file is initialized to `[]` so later reads are
    /// well-formed.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `AppError::Io` if the file cannot be read or initialized
    /// - `StorageError::Corrupt` if the file is not an array or object of records
    /// - `StorageError::TitleMismatch` if an object key differs from its record's title
    /// - `DiaryError::DuplicateTitle` if an object repeats a key
    /// - any decoding error of a record (see `DiaryEntryRecord::decode`)
    pub fn load(&self) -> AppResult<Vec<DiaryEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            debug!("Diary file missing or empty, initializing {:?}", self.path);
            self.write_atomically(EMPTY_DIARY_CONTAINER)?;
            return Ok(Vec::new());
        }

        let container: StoredContainer =
            serde_json::from_str(&content).map_err(|e| self.corrupt(e))?;
        let entries = match container {
            StoredContainer::Empty => Vec::new(),
            StoredContainer::List(items) => items
                .into_iter()
                .map(|item| self.record_from_value(item)?.decode())
                .collect::<AppResult<Vec<_>>>()?,
            StoredContainer::Keyed(pairs) => {
                let mut seen = HashSet::new();
                pairs
                    .into_iter()
                    .map(|(key, item)| {
                        if !seen.insert(key.clone()) {
                            return Err(DiaryError::DuplicateTitle { title: key }.into());
                        }
                        let record = self.record_from_value(item)?;
                        if record.title != key {
                            return Err(StorageError::TitleMismatch {
                                key,
                                title: record.title,
                            }
                            .into());
                        }
                        record.decode()
                    })
                    .collect::<AppResult<Vec<_>>>()?
            }
        };

        debug!("Loaded {} entries from {:?}", entries.len(), self.path);
        Ok(entries)
    }

    /// Loads the file into a new diary.
    ///
    /// # Errors
    ///
    /// Everything `load` returns, plus `DiaryError::DuplicateTitle` if the file
    /// holds two records with the same title.
    pub fn load_diary(&self) -> AppResult<Diary> {
        let mut diary = Diary::new();
        diary.add_all(self.load()?)?;
        Ok(diary)
    }

    /// Writes the given entries to the file, replacing its previous contents.
    ///
    /// The entries are written to a temporary file next to the diary file,
    /// which is then renamed over it, so a reader sees either the old or the
    /// new contents and never a partial write.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be written or replaced.
    pub fn save<'a, I>(&self, entries: I) -> AppResult<()>
    where
        I: IntoIterator<Item = &'a DiaryEntry>,
    {
        let records: Vec<DiaryEntryRecord> = entries.into_iter().map(DiaryEntryRecord::from).collect();
        let json = serde_json::to_string_pretty(&records).map_err(io::Error::from)?;

        self.write_atomically(&json)?;
        debug!("Saved {} entries to {:?}", records.len(), self.path);
        Ok(())
    }

    /// Writes every entry of the diary to the file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be written or replaced.
    pub fn save_diary(&self, diary: &Diary) -> AppResult<()> {
        self.save(diary.iter())
    }

    fn write_atomically(&self, contents: &str) -> AppResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn record_from_value(&self, value: Value) -> AppResult<DiaryEntryRecord> {
        serde_json::from_value(value).map_err(|e| self.corrupt(e))
    }

    fn corrupt(&self, source: serde_json::Error) -> AppError {
        StorageError::Corrupt {
            path: self.path.clone(),
            source,
        }
        .into()
    }
}

/// Ensures the directory that will hold the diary file exists, creating it if necessary.
///
/// This is a start-up step; `DiaryStorage` itself never creates directories.
/// A newly created directory gets owner-only permissions (0o700) on Unix.
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the path is not absolute
/// - `AppError::Io` if the directory cannot be created
pub fn ensure_parent_directory_exists(diary_file: &Path) -> AppResult<()> {
    if !diary_file.is_absolute() {
        return Err(AppError::Config(format!(
            "Diary file path must be absolute: {}",
            diary_file.display()
        )));
    }

    let Some(dir) = diary_file.parent() else {
        return Ok(());
    };

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create diary directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            use crate::constants::DEFAULT_DIR_PERMISSIONS;

            fs::set_permissions(dir, Permissions::from_mode(DEFAULT_DIR_PERMISSIONS)).map_err(
                |e| {
                    AppError::Io(io::Error::new(
                        e.kind(),
                        format!("Failed to set secure permissions on diary directory: {}", e),
                    ))
                },
            )?;
            debug!("Set 0o700 permissions on diary directory");
        }
    }
    Ok(())
}
