/*!
# Travel Diary

Travel Diary keeps a personal travel journal: entries with an author, a
destination, an activity, a rating from 0 to 10, a unique title and free
text. Entries can be filtered, sorted and summarized, and the whole diary is
kept in a single JSON file.

## Core Features

- Write, edit and delete entries with unique titles
- Filter by author, destination, activity, time window or text
- Sort by rating or by the time an entry was written
- List the distinct authors, destinations or activities
- Fill an empty diary with generated sample entries

## Architecture

- `entry`: The diary entry value object and its validation
- `diary`: The title-keyed collection of entries
- `query`: Sorting, filtering and distinct-value functions over entries
- `factory`: Sample entry generator
- `storage`: JSON codec and the file-backed storage gateway
- `config`: Configuration loading and validation
- `cli`: Command-line arguments, command execution and rendering
- `errors`: Error handling infrastructure

## Usage Example

```rust,no_run
use travel_diary::{Config, DiaryStorage};
use travel_diary::query;

fn main() -> travel_diary::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let storage = DiaryStorage::new(&config.diary_file);
    let diary = storage.load_diary()?;

    for entry in query::sort_by_rating(diary.iter()) {
        println!("{:.1} {}", entry.rating(), entry.title());
    }
    Ok(())
}
```
*/

/// Command-line interface: argument parsing, command execution and rendering
pub mod cli;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// The diary collection
pub mod diary;

/// The diary entry value object
pub mod entry;

/// Error types and utilities
pub mod errors;

/// Sample entry generator
pub mod factory;

/// Sorting, filtering and distinct values over entries
pub mod query;

/// JSON persistence
pub mod storage;

// Re-export commonly used items for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use diary::Diary;
pub use entry::{DiaryEntry, NewEntry};
pub use errors::{AppError, AppResult};
pub use storage::DiaryStorage;
