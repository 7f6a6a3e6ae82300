//! The diary: an in-memory, duplicate-free store of entries keyed by title.
//!
//! A `Diary` exclusively owns the entries added to it. Callers read entries
//! through borrowed references or snapshot copies, and every structural change
//! (adding, removing, retitling) goes through the diary so that no two entries
//! ever share a title. Titles are compared case-sensitively.
//!
//! The diary performs no I/O. It is filled from and written back to disk by
//! `storage::DiaryStorage`.

use crate::entry::DiaryEntry;
use crate::errors::{AppResult, DiaryError};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// A collection of diary entries with unique titles.
///
/// # Examples
///
/// ```
/// use travel_diary::diary::Diary;
/// use travel_diary::entry::{DiaryEntry, NewEntry};
///
/// let mut diary = Diary::new();
/// let entry = DiaryEntry::new(NewEntry::new("Alice", "Oslo", "dining", 7.0, "Dinner", "")).unwrap();
/// diary.add(entry.clone()).unwrap();
///
/// // A second entry with the same title is rejected
/// assert!(diary.add(entry).is_err());
/// assert_eq!(diary.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Diary {
    entries: BTreeMap<String, DiaryEntry>,
}

impl Diary {
    /// Creates an empty diary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single entry.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::DuplicateTitle` if an entry with the same title is
    /// already stored. The diary is unchanged in that case.
    pub fn add(&mut self, entry: DiaryEntry) -> AppResult<()> {
        if self.entries.contains_key(entry.title()) {
            return Err(DiaryError::DuplicateTitle {
                title: entry.title().to_string(),
            }
            .into());
        }

        debug!("Adding entry '{}'", entry.title());
        self.entries.insert(entry.title().to_string(), entry);
        Ok(())
    }

    /// Adds a batch of entries, all or nothing.
    ///
    /// Every incoming title is checked against the stored titles and against the
    /// other titles of the batch before anything is inserted.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::DuplicateTitle` naming the first colliding title.
    /// No entry of the batch is added in that case.
    pub fn add_all(&mut self, entries: impl IntoIterator<Item = DiaryEntry>) -> AppResult<()> {
        let entries: Vec<DiaryEntry> = entries.into_iter().collect();

        let mut batch_titles = HashSet::with_capacity(entries.len());
        for entry in &entries {
            let title = entry.title();
            if self.entries.contains_key(title) || !batch_titles.insert(title) {
                return Err(DiaryError::DuplicateTitle {
                    title: title.to_string(),
                }
                .into());
            }
        }

        debug!("Adding batch of {} entries", entries.len());
        for entry in entries {
            self.entries.insert(entry.title().to_string(), entry);
        }
        Ok(())
    }

    /// Removes the entry with the given title and hands it back.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::NotFound` if no entry has that title.
    pub fn remove(&mut self, title: &str) -> AppResult<DiaryEntry> {
        let removed = self
            .entries
            .remove(title)
            .ok_or_else(|| DiaryError::NotFound {
                title: title.to_string(),
            })?;

        debug!("Removed entry '{}'", title);
        Ok(removed)
    }

    /// Removes every entry, returning how many were removed.
    pub fn remove_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        debug!("Removed all {} entries", count);
        count
    }

    /// Returns a copy of all entries, ordered by title.
    ///
    /// The returned vector is detached from the diary: changing it, or the
    /// entries inside it, never affects the stored entries.
    pub fn all(&self) -> Vec<DiaryEntry> {
        self.entries.values().cloned().collect()
    }

    /// Iterates over the stored entries by reference, ordered by title.
    pub fn iter(&self) -> impl Iterator<Item = &DiaryEntry> {
        self.entries.values()
    }

    pub fn get(&self, title: &str) -> Option<&DiaryEntry> {
        self.entries.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.entries.contains_key(title)
    }

    /// Returns the stored titles in lexicographic order.
    pub fn titles(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies an edit to the entry with the given title.
    ///
    /// The edit runs against a copy of the entry, which replaces the stored
    /// entry only when the edit succeeds. If the edit changed the title, the
    /// entry is re-keyed under the new title.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `DiaryError::NotFound` if no entry has the given title
    /// - `DiaryError::DuplicateTitle` if the edit retitles the entry to a title
    ///   another entry already uses
    /// - any error returned by `edit` itself (e.g. a rejected rating)
    ///
    /// The stored entry is unchanged whenever an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use travel_diary::diary::Diary;
    /// use travel_diary::entry::{DiaryEntry, NewEntry};
    ///
    /// let mut diary = Diary::new();
    /// diary.add(DiaryEntry::new(NewEntry::new("Alice", "Oslo", "dining", 7.0, "Dinner", "")).unwrap()).unwrap();
    ///
    /// diary.edit("Dinner", |entry| {
    ///     entry.set_title("Late dinner");
    ///     entry.set_rating(9.0)
    /// }).unwrap();
    ///
    /// assert!(!diary.contains("Dinner"));
    /// assert_eq!(diary.get("Late dinner").unwrap().rating(), 9.0);
    /// ```
    pub fn edit<F>(&mut self, title: &str, edit: F) -> AppResult<()>
    where
        F: FnOnce(&mut DiaryEntry) -> AppResult<()>,
    {
        let mut edited = self
            .entries
            .get(title)
            .cloned()
            .ok_or_else(|| DiaryError::NotFound {
                title: title.to_string(),
            })?;

        edit(&mut edited)?;

        if edited.title() != title {
            if self.entries.contains_key(edited.title()) {
                return Err(DiaryError::DuplicateTitle {
                    title: edited.title().to_string(),
                }
                .into());
            }
            debug!("Retitling entry '{}' to '{}'", title, edited.title());
            self.entries.remove(title);
        }

        self.entries.insert(edited.title().to_string(), edited);
        Ok(())
    }
}
