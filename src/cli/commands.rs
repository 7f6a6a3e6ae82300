//! Execution of parsed subcommands against a loaded diary.
//!
//! Commands write their output to any `Write` and read entry text from any
//! `Read`, so they run the same against a terminal and against buffers in
//! tests. Saving is left to the caller.

use crate::cli::render::{write_table, write_values};
use crate::cli::{AddArgs, Command, DistinctField, EditArgs, ListArgs, SortKey};
use crate::diary::Diary;
use crate::entry::{DiaryEntry, NewEntry};
use crate::errors::{AppError, AppResult, DiaryError, ValidationError};
use crate::factory::seed_if_empty;
use crate::query;
use std::io::{Read, Write};
use tracing::info;

/// Result of running a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The diary is unchanged.
    Unchanged,
    /// The diary was modified and needs to be saved.
    Modified,
}

impl Outcome {
    pub fn is_modified(self) -> bool {
        self == Outcome::Modified
    }
}

/// Runs a command against the diary.
///
/// # Errors
///
/// Returns whatever the underlying diary operation fails with, for example
/// `DiaryError::DuplicateTitle` on `add` or `DiaryError::NotFound` on `show`,
/// and `AppError::Io` if output cannot be written or input cannot be read.
/// The diary is unchanged whenever an error is returned.
pub fn execute<W: Write, R: Read>(
    command: &Command,
    diary: &mut Diary,
    out: &mut W,
    input: &mut R,
) -> AppResult<Outcome> {
    match command {
        Command::Add(args) => add(args, diary, out, input),
        Command::List(args) => list(args, diary, out),
        Command::Show { title } => {
            let entry = diary.get(title).ok_or_else(|| DiaryError::NotFound {
                title: title.clone(),
            })?;
            writeln!(out, "{}", entry)?;
            Ok(Outcome::Unchanged)
        }
        Command::Edit(args) => edit(args, diary, out),
        Command::Remove { title } => {
            diary.remove(title)?;
            info!("Removed entry");
            writeln!(out, "Removed entry '{}'", title)?;
            Ok(Outcome::Modified)
        }
        Command::Clear { yes } => {
            if !yes {
                writeln!(
                    out,
                    "This would remove {} entries. Run again with --yes to confirm.",
                    diary.len()
                )?;
                return Ok(Outcome::Unchanged);
            }
            let removed = diary.remove_all();
            info!(removed, "Cleared diary");
            writeln!(out, "Removed {} entries", removed)?;
            Ok(Outcome::Modified)
        }
        Command::Distinct { field } => {
            let values = match field {
                DistinctField::Author => query::distinct_authors(diary.iter()),
                DistinctField::Destination => query::distinct_destinations(diary.iter()),
                DistinctField::Activity => query::distinct_activities(diary.iter()),
            };
            write_values(out, &values)?;
            Ok(Outcome::Unchanged)
        }
        Command::Seed => {
            let added = seed_if_empty(diary, &mut rand::thread_rng())?;
            if added == 0 {
                writeln!(
                    out,
                    "The diary already has {} entries; nothing was seeded",
                    diary.len()
                )?;
                return Ok(Outcome::Unchanged);
            }
            writeln!(out, "Seeded {} sample entries", added)?;
            Ok(Outcome::Modified)
        }
    }
}

fn add<W: Write, R: Read>(
    args: &AddArgs,
    diary: &mut Diary,
    out: &mut W,
    input: &mut R,
) -> AppResult<Outcome> {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut text = String::new();
            input.read_to_string(&mut text)?;
            text.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let entry = DiaryEntry::new(NewEntry::new(
        args.author.as_str(),
        args.destination.as_str(),
        args.activity.to_lowercase(),
        args.rating,
        args.title.as_str(),
        text,
    ))?;
    diary.add(entry)?;

    info!("Added entry");
    writeln!(out, "Added entry '{}'", args.title)?;
    Ok(Outcome::Modified)
}

fn list<W: Write>(args: &ListArgs, diary: &Diary, out: &mut W) -> AppResult<Outcome> {
    let mut entries = diary.all();

    if let Some(author) = &args.author {
        entries = query::filter_by_author(&entries, author);
    }
    if let Some(destination) = &args.destination {
        entries = query::filter_by_destination(&entries, destination);
    }
    if let Some(activity) = &args.activity {
        entries = query::filter_by_activity(&entries, activity);
    }
    if let (Some(start), Some(end)) = (args.from, args.to) {
        if start >= end {
            return Err(AppError::Validation(ValidationError::InvalidTimeWindow {
                start,
                end,
            }));
        }
        entries = query::filter_by_time_window(&entries, start, end);
    }
    if let Some(term) = &args.search {
        entries = query::filter_by_content(&entries, term);
    }

    let entries = match args.sort {
        Some(SortKey::Rating) => query::sort_by_rating(&entries),
        Some(SortKey::Time) => query::sort_by_time(&entries),
        None => entries,
    };

    write_table(out, &entries)?;
    Ok(Outcome::Unchanged)
}

fn edit<W: Write>(args: &EditArgs, diary: &mut Diary, out: &mut W) -> AppResult<Outcome> {
    if !args.has_changes() {
        if !diary.contains(&args.title) {
            return Err(DiaryError::NotFound {
                title: args.title.clone(),
            }
            .into());
        }
        writeln!(out, "Nothing to change for '{}'", args.title)?;
        return Ok(Outcome::Unchanged);
    }

    diary.edit(&args.title, |entry| {
        if let Some(author) = &args.author {
            entry.set_author(author.as_str());
        }
        if let Some(destination) = &args.destination {
            entry.set_destination(destination.as_str());
        }
        if let Some(activity) = &args.activity {
            entry.set_activity(activity.to_lowercase());
        }
        if let Some(rating) = args.rating {
            entry.set_rating(rating)?;
        }
        if let Some(title) = &args.new_title {
            entry.set_title(title.as_str());
        }
        if let Some(text) = &args.text {
            entry.set_text(text.as_str());
        }
        Ok(())
    })?;

    let title = args.new_title.as_deref().unwrap_or(&args.title);
    info!("Edited entry");
    writeln!(out, "Updated entry '{}'", title)?;
    Ok(Outcome::Modified)
}
