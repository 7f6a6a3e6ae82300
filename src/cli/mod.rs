//! Command-line interface of the travel diary.
//!
//! Argument parsing uses clap's derive API. Each subcommand maps onto one
//! diary operation; `commands` executes them and `render` formats their
//! output for the terminal.

pub mod commands;
pub mod render;

use crate::constants::{APP_DESCRIPTION, APP_NAME, DATE_FORMAT_ISO, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::storage::parse_timestamp;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// A personal travel journal
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, version, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Diary file to use instead of TRAVEL_DIARY_FILE
    #[arg(short = 'f', long, global = true)]
    pub file: Option<String>,

    /// Print debug logs
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(
        long,
        global = true,
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Write a new entry (the text is read from stdin when --text is omitted)
    Add(AddArgs),

    /// List entries, optionally filtered and sorted
    List(ListArgs),

    /// Show one entry in full
    Show {
        /// Title of the entry
        title: String,
    },

    /// Change fields of an existing entry
    Edit(EditArgs),

    /// Delete an entry
    Remove {
        /// Title of the entry
        title: String,
    },

    /// Delete every entry
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Print the distinct values of a field, sorted
    Distinct {
        #[arg(value_enum)]
        field: DistinctField,
    },

    /// Fill an empty diary with 64 sample entries
    Seed,
}

#[derive(Args, Debug, PartialEq)]
pub struct AddArgs {
    #[arg(long)]
    pub author: String,

    #[arg(long)]
    pub destination: String,

    #[arg(long)]
    pub activity: String,

    /// Rating from 0 to 10
    #[arg(long, allow_negative_numbers = true)]
    pub rating: f64,

    /// Unique title of the entry
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Args, Debug, PartialEq, Default)]
pub struct ListArgs {
    /// Only entries by this author (exact match)
    #[arg(long)]
    pub author: Option<String>,

    /// Only entries for this destination (case-insensitive)
    #[arg(long)]
    pub destination: Option<String>,

    /// Only entries for this activity (case-insensitive)
    #[arg(long)]
    pub activity: Option<String>,

    /// Only entries written after this time (format: YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, requires = "to", value_parser = parse_cli_timestamp)]
    pub from: Option<NaiveDateTime>,

    /// Only entries written before this time (format: YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, requires = "from", value_parser = parse_cli_timestamp)]
    pub to: Option<NaiveDateTime>,

    /// Only entries whose text contains this term (ignoring case and whitespace)
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,
}

#[derive(Args, Debug, PartialEq)]
pub struct EditArgs {
    /// Current title of the entry
    pub title: String,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub destination: Option<String>,

    #[arg(long)]
    pub activity: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub rating: Option<f64>,

    /// New title for the entry
    #[arg(long = "title")]
    pub new_title: Option<String>,

    #[arg(long)]
    pub text: Option<String>,
}

impl EditArgs {
    /// Whether any field was given to change.
    pub fn has_changes(&self) -> bool {
        self.author.is_some()
            || self.destination.is_some()
            || self.activity.is_some()
            || self.rating.is_some()
            || self.new_title.is_some()
            || self.text.is_some()
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    /// Lowest rating first
    Rating,
    /// Oldest first
    Time,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistinctField {
    Author,
    Destination,
    Activity,
}

/// Parses a timestamp given on the command line.
///
/// Accepts a date (`2024-01-15`, meaning midnight) or a date and time
/// (`2024-01-15T14:30` or `2024-01-15T14:30:05`).
///
/// # Examples
///
/// ```
/// use travel_diary::cli::parse_cli_timestamp;
///
/// let midnight = parse_cli_timestamp("2024-01-15").unwrap();
/// assert_eq!(midnight.to_string(), "2024-01-15 00:00:00");
///
/// assert!(parse_cli_timestamp("2024-01-15T14:30").is_ok());
/// assert!(parse_cli_timestamp("15.01.2024").is_err());
/// ```
pub fn parse_cli_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT_ISO) {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight);
        }
    }

    parse_timestamp(value).map_err(|_| {
        format!(
            "Invalid timestamp '{}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]",
            value
        )
    })
}
