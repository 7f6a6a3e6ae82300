//! Sorting, filtering and distinct-value queries over diary entries.
//!
//! Every function here is pure. It reads the supplied entries, never mutates
//! them, and returns a new vector. Empty input gives empty output. The
//! functions accept anything that yields `&DiaryEntry`, so they work on
//! `Diary::iter()`, on a snapshot from `Diary::all()`, or on the result of a
//! previous query.
//!
//! # Examples
//!
//! ```
//! use travel_diary::entry::{DiaryEntry, NewEntry};
//! use travel_diary::query;
//!
//! let entries = vec![
//!     DiaryEntry::new(NewEntry::new("Ann", "Paris", "dining", 2.0, "A", "")).unwrap(),
//!     DiaryEntry::new(NewEntry::new("Ann", "Oslo", "hiking", 8.0, "B", "")).unwrap(),
//!     DiaryEntry::new(NewEntry::new("Ann", "Paris", "bathing", 5.0, "C", "")).unwrap(),
//! ];
//!
//! let in_paris = query::filter_by_destination(&entries, "paris");
//! let by_rating = query::sort_by_rating(&in_paris);
//! let titles: Vec<&str> = by_rating.iter().map(|e| e.title()).collect();
//! assert_eq!(titles, vec!["A", "C"]);
//! ```

use crate::entry::DiaryEntry;
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Sorts entries by rating, lowest first.
///
/// The sort is stable: entries with equal ratings keep their relative input order.
pub fn sort_by_rating<'a, I>(entries: I) -> Vec<DiaryEntry>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    let mut sorted: Vec<DiaryEntry> = entries.into_iter().cloned().collect();
    sorted.sort_by(|a, b| {
        a.rating()
            .partial_cmp(&b.rating())
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

/// Sorts entries by the time they were written, oldest first.
///
/// The sort is stable: entries written at the same instant keep their relative input order.
pub fn sort_by_time<'a, I>(entries: I) -> Vec<DiaryEntry>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    let mut sorted: Vec<DiaryEntry> = entries.into_iter().cloned().collect();
    sorted.sort_by_key(|entry| entry.time_written());
    sorted
}

/// Keeps the entries matching `predicate`, in input order.
pub fn filter<'a, I, P>(entries: I, predicate: P) -> Vec<DiaryEntry>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
    P: Fn(&DiaryEntry) -> bool,
{
    entries
        .into_iter()
        .filter(|entry| predicate(entry))
        .cloned()
        .collect()
}

/// Keeps the entries written by exactly `author`.
pub fn filter_by_author<'a, I>(entries: I, author: &str) -> Vec<DiaryEntry>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    filter(entries, |entry| entry.author() == author)
}

/// Keeps the entries whose destination equals `destination`, ignoring case.
pub fn filter_by_destination<'a, I>(entries: I, destination: &str) -> Vec<DiaryEntry>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    let destination = destination.to_lowercase();
    filter(entries, |entry| entry.destination().to_lowercase() == destination)
}

/// Keeps the entries whose activity equals `activity`, ignoring case.
pub fn filter_by_activity<'a, I>(entries: I, activity: &str) -> Vec<DiaryEntry>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    let activity = activity.to_lowercase();
    filter(entries, |entry| entry.activity().to_lowercase() == activity)
}

/// Keeps the entries written strictly between `start` and `end`.
///
/// Both bounds are exclusive. When `start >= end` nothing can match and the
/// result is empty; validating the window is up to the caller.
pub fn filter_by_time_window<'a, I>(
    entries: I,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<DiaryEntry>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    filter(entries, |entry| {
        start < entry.time_written() && entry.time_written() < end
    })
}

/// Keeps the entries whose text contains `term`.
///
/// Both the text and the term are lowercased and stripped of all whitespace
/// before comparing, so line breaks and spacing never prevent a match.
pub fn filter_by_content<'a, I>(entries: I, term: &str) -> Vec<DiaryEntry>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    let term = normalize_for_search(term);
    filter(entries, |entry| normalize_for_search(entry.text()).contains(&term))
}

fn normalize_for_search(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns the distinct values of one field, sorted lexicographically.
///
/// Used to offer "pick an existing value or type a new one" choices.
pub fn distinct_values<'a, I, F>(entries: I, field: F) -> Vec<String>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
    F: Fn(&DiaryEntry) -> &str,
{
    entries
        .into_iter()
        .map(|entry| field(entry).to_string())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

pub fn distinct_authors<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    distinct_values(entries, DiaryEntry::author)
}

pub fn distinct_destinations<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    distinct_values(entries, DiaryEntry::destination)
}

pub fn distinct_activities<'a, I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a DiaryEntry>,
{
    distinct_values(entries, DiaryEntry::activity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::NewEntry;
    use chrono::{Duration, NaiveDate};

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn entry_at(
        title: &str,
        author: &str,
        destination: &str,
        activity: &str,
        rating: f64,
        day_offset: i64,
    ) -> DiaryEntry {
        DiaryEntry::written_at(
            base_time() + Duration::days(day_offset),
            NewEntry::new(author, destination, activity, rating, title, "text"),
        )
        .unwrap()
    }

    fn titles(entries: &[DiaryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.title()).collect()
    }

    fn sample() -> Vec<DiaryEntry> {
        vec![
            entry_at("A", "Ann", "paris", "dining", 2.0, 3),
            entry_at("B", "Bob", "oslo", "hiking", 8.0, 1),
            entry_at("C", "Ann", "paris", "Hiking", 5.0, 2),
        ]
    }

    #[test]
    fn test_sort_by_rating() {
        let sorted = sort_by_rating(&sample());
        assert_eq!(titles(&sorted), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_sort_by_rating_is_stable() {
        let entries = vec![
            entry_at("first", "Ann", "oslo", "dining", 5.0, 0),
            entry_at("low", "Ann", "oslo", "dining", 1.0, 0),
            entry_at("second", "Ann", "oslo", "dining", 5.0, 0),
            entry_at("third", "Ann", "oslo", "dining", 5.0, 0),
        ];

        let sorted = sort_by_rating(&entries);
        assert_eq!(titles(&sorted), vec!["low", "first", "second", "third"]);

        // Re-sorting keeps the same order
        let resorted = sort_by_rating(&sorted);
        assert_eq!(titles(&resorted), titles(&sorted));
    }

    #[test]
    fn test_sort_by_time() {
        let sorted = sort_by_time(&sample());
        assert_eq!(titles(&sorted), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_sort_by_time_is_stable() {
        let entries = vec![
            entry_at("x", "Ann", "oslo", "dining", 1.0, 0),
            entry_at("y", "Ann", "oslo", "dining", 9.0, 0),
            entry_at("early", "Ann", "oslo", "dining", 4.0, -1),
        ];
        let sorted = sort_by_time(&entries);
        assert_eq!(titles(&sorted), vec!["early", "x", "y"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let entries = sample();
        let _ = sort_by_rating(&entries);
        let _ = sort_by_time(&entries);
        assert_eq!(titles(&entries), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_filter_by_destination_keeps_input_order() {
        let filtered = filter_by_destination(&sample(), "paris");
        assert_eq!(titles(&filtered), vec!["A", "C"]);
    }

    #[test]
    fn test_filter_by_destination_ignores_case() {
        let filtered = filter_by_destination(&sample(), "PARIS");
        assert_eq!(titles(&filtered), vec!["A", "C"]);
    }

    #[test]
    fn test_filter_by_activity_ignores_case() {
        let filtered = filter_by_activity(&sample(), "hiking");
        assert_eq!(titles(&filtered), vec!["B", "C"]);
    }

    #[test]
    fn test_filter_by_author_is_exact() {
        assert_eq!(titles(&filter_by_author(&sample(), "Ann")), vec!["A", "C"]);
        assert!(filter_by_author(&sample(), "ann").is_empty());
    }

    #[test]
    fn test_filter_with_custom_predicate() {
        let filtered = filter(&sample(), |e| e.rating() >= 5.0);
        assert_eq!(titles(&filtered), vec!["B", "C"]);
    }

    #[test]
    fn test_filter_by_time_window_is_exclusive() {
        let entries = sample();
        let day = |offset| base_time() + Duration::days(offset);

        // Bounds equal to an entry's time exclude it
        let filtered = filter_by_time_window(&entries, day(1), day(3));
        assert_eq!(titles(&filtered), vec!["C"]);

        let filtered = filter_by_time_window(&entries, day(0), day(4));
        assert_eq!(titles(&filtered), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_filter_by_time_window_inverted_is_empty() {
        let entries = sample();
        let day = |offset| base_time() + Duration::days(offset);
        assert!(filter_by_time_window(&entries, day(4), day(0)).is_empty());
        assert!(filter_by_time_window(&entries, day(2), day(2)).is_empty());
    }

    #[test]
    fn test_filter_by_content_ignores_case_and_whitespace() {
        let mut entry = entry_at("Oslo", "Ann", "oslo", "hiking", 6.0, 0);
        entry.set_text("I went\nto Oslo");
        let other = entry_at("Other", "Ann", "oslo", "hiking", 6.0, 0);
        let entries = vec![entry, other];

        assert_eq!(titles(&filter_by_content(&entries, "went to oslo")), vec!["Oslo"]);
        assert_eq!(titles(&filter_by_content(&entries, "WENTTO")), vec!["Oslo"]);
        assert_eq!(titles(&filter_by_content(&entries, " i  went\tto ")), vec!["Oslo"]);
        assert!(filter_by_content(&entries, "bergen").is_empty());
    }

    #[test]
    fn test_filter_by_content_empty_term_matches_all() {
        assert_eq!(filter_by_content(&sample(), "").len(), 3);
    }

    #[test]
    fn test_distinct_values_sorted_and_unique() {
        let entries = sample();
        assert_eq!(distinct_authors(&entries), vec!["Ann", "Bob"]);
        assert_eq!(distinct_destinations(&entries), vec!["oslo", "paris"]);
        // Distinct values are case-sensitive; uppercase sorts first
        assert_eq!(distinct_activities(&entries), vec!["Hiking", "dining", "hiking"]);
        assert_eq!(
            distinct_values(&entries, |e| e.title()),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let empty: Vec<DiaryEntry> = Vec::new();
        assert!(sort_by_rating(&empty).is_empty());
        assert!(sort_by_time(&empty).is_empty());
        assert!(filter_by_author(&empty, "Ann").is_empty());
        assert!(filter_by_content(&empty, "x").is_empty());
        assert!(filter_by_time_window(&empty, base_time(), base_time() + Duration::days(1)).is_empty());
        assert!(distinct_authors(&empty).is_empty());
    }
}
