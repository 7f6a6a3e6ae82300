/*!
# Travel Diary

Command-line front end of the travel diary.

## Usage

```
travel-diary [OPTIONS] <COMMAND>

Commands:
  add       Write a new entry (the text is read from stdin when --text is omitted)
  list      List entries, optionally filtered and sorted
  show      Show one entry in full
  edit      Change fields of an existing entry
  remove    Delete an entry
  clear     Delete every entry
  distinct  Print the distinct values of a field, sorted
  seed      Fill an empty diary with 64 sample entries

Options:
  -f, --file <FILE>              Diary file to use instead of TRAVEL_DIARY_FILE
  -v, --verbose                  Print debug logs
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
```

## Configuration

- `TRAVEL_DIARY_FILE`: The diary file (defaults to "~/Documents/travel-diary/diary.json")
- `RUST_LOG`: Log filter, overriding the default level
*/

use clap::Parser;
use std::io;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;
use travel_diary::cli::commands::execute;
use travel_diary::cli::CliArgs;
use travel_diary::config::Config;
use travel_diary::constants::{
    APP_NAME, DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
    VERBOSE_LOG_LEVEL,
};
use travel_diary::errors::{AppError, AppResult};
use travel_diary::storage::{ensure_parent_directory_exists, DiaryStorage};
use uuid::Uuid;

/// The main entry point for the travel diary.
///
/// 1. Parses command-line arguments
/// 2. Initializes logging
/// 3. Loads and validates configuration
/// 4. Ensures the diary file's directory exists
/// 5. Loads the diary
/// 6. Runs the command and saves the diary if it changed
///
/// Errors are logged once here and returned, so the process exits non-zero.
fn main() -> AppResult<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose, &args.log_format)?;

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    let result = run(args);
    if let Err(e) = &result {
        error!(error = %e, "Command failed");
    }
    result
}

fn run(args: CliArgs) -> AppResult<()> {
    info!("Starting {}", APP_NAME);
    debug!("CLI arguments: {:?}", args.command);

    let config = match &args.file {
        Some(raw) => Config::from_path(raw)?,
        None => Config::load()?,
    };
    config.validate()?;

    ensure_parent_directory_exists(&config.diary_file)?;

    let storage = DiaryStorage::new(&config.diary_file);
    let mut diary = storage.load_diary()?;
    debug!(entries = diary.len(), "Diary loaded");

    let stdout = io::stdout();
    let stdin = io::stdin();
    let outcome = execute(&args.command, &mut diary, &mut stdout.lock(), &mut stdin.lock())?;

    if outcome.is_modified() {
        storage.save_diary(&diary)?;
        info!(entries = diary.len(), "Diary saved");
    }
    Ok(())
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the default level chosen from `verbose`.
fn init_tracing(verbose: bool, log_format: &str) -> AppResult<()> {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let result = if log_format == LOG_FORMAT_JSON {
        builder
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}
