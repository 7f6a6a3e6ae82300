//! Constants used throughout the application.
//!
//! This module contains all constants used in the travel diary, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "travel-diary";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A personal travel journal for writing, filtering and sorting diary entries";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the diary storage file.
pub const ENV_VAR_DIARY_FILE: &str = "TRAVEL_DIARY_FILE";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default location of the diary file relative to the user's home directory.
pub const DEFAULT_DIARY_SUBPATH: &str = "Documents/travel-diary/diary.json";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Contents written to a missing or empty diary file.
pub const EMPTY_DIARY_CONTAINER: &str = "[]";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Entry Rules
/// Lowest rating an entry may carry.
pub const MIN_RATING: f64 = 0.0;
/// Highest rating an entry may carry.
pub const MAX_RATING: f64 = 10.0;

// Date/Time Logic
/// Storage format for timestamps. The fraction is only written when non-zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
/// Minute-precision timestamps, as written by older diary files.
pub const TIMESTAMP_FORMAT_MINUTES: &str = "%Y-%m-%dT%H:%M";
/// Date-only input accepted on the command line.
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Format used when timestamps are shown to the user.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// Sample Data
/// Authors used by the sample entry generator.
pub const SAMPLE_AUTHORS: [&str; 4] = ["Einar", "Kevin", "Kristian", "Synne"];
/// Destinations used by the sample entry generator.
pub const SAMPLE_DESTINATIONS: [&str; 4] = ["Oslo", "Bergen", "Stockholm", "Narvik"];
/// Activities used by the sample entry generator.
pub const SAMPLE_ACTIVITIES: [&str; 4] = ["Climbing", "Bathing", "Dining", "Hiking"];
/// First year (inclusive) for generated creation dates.
pub const SAMPLE_FIRST_YEAR: i32 = 2015;
/// Number of years covered by generated creation dates.
pub const SAMPLE_YEAR_SPAN: i32 = 10;
/// Prefix of generated entry titles.
pub const SAMPLE_TITLE_PREFIX: &str = "title";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "travel-diary";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
