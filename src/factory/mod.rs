//! Sample entry generator for demos and tests.
//!
//! Builds one entry for every combination of four authors, four destinations
//! and four activities (64 entries). Ratings are random with one decimal, and
//! creation dates fall on a random day between 2015 and 2024. Titles are
//! `title1` through `title64`, so a generated batch never collides with itself.

use crate::constants::{
    SAMPLE_ACTIVITIES, SAMPLE_AUTHORS, SAMPLE_DESTINATIONS, SAMPLE_FIRST_YEAR, SAMPLE_TITLE_PREFIX,
    SAMPLE_YEAR_SPAN,
};
use crate::diary::Diary;
use crate::entry::{DiaryEntry, NewEntry};
use crate::errors::AppResult;
use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use tracing::{debug, info};

/// Fabricates the full set of sample entries using the thread-local RNG.
///
/// # Errors
///
/// Only fails if a generated entry is rejected, which the generator's rating
/// range rules out.
pub fn fabricate_entries() -> AppResult<Vec<DiaryEntry>> {
    fabricate_entries_with_rng(&mut rand::thread_rng())
}

/// Fabricates the full set of sample entries from the given RNG.
///
/// A seeded RNG yields the same entries on every call.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use travel_diary::factory::fabricate_entries_with_rng;
///
/// let entries = fabricate_entries_with_rng(&mut StdRng::seed_from_u64(7)).unwrap();
/// assert_eq!(entries.len(), 64);
/// assert_eq!(entries[0].title(), "title1");
/// ```
pub fn fabricate_entries_with_rng<R: Rng>(rng: &mut R) -> AppResult<Vec<DiaryEntry>> {
    let mut entries = Vec::with_capacity(
        SAMPLE_AUTHORS.len() * SAMPLE_DESTINATIONS.len() * SAMPLE_ACTIVITIES.len(),
    );
    let mut counter = 0;

    for author in SAMPLE_AUTHORS {
        for destination in SAMPLE_DESTINATIONS {
            for activity in SAMPLE_ACTIVITIES {
                counter += 1;

                let written = random_midnight(rng);
                let rating = f64::from(rng.gen_range(0..=100u8)) / 10.0;
                let text = format!(
                    "I was {} in {}.\nI would rate the experience a: {:.1}",
                    activity, destination, rating
                );
                let title = format!("{}{}", SAMPLE_TITLE_PREFIX, counter);

                entries.push(DiaryEntry::written_at(
                    written,
                    NewEntry::new(author, destination, activity, rating, title, text),
                )?);
            }
        }
    }

    debug!("Fabricated {} sample entries", entries.len());
    Ok(entries)
}

/// Fills an empty diary with sample entries.
///
/// Returns the number of entries added, which is zero when the diary already
/// holds entries.
///
/// # Errors
///
/// Returns `DiaryError::DuplicateTitle` if the batch cannot be added; the diary
/// is left unchanged in that case.
pub fn seed_if_empty<R: Rng>(diary: &mut Diary, rng: &mut R) -> AppResult<usize> {
    if !diary.is_empty() {
        debug!("Diary has {} entries, not seeding", diary.len());
        return Ok(0);
    }

    let entries = fabricate_entries_with_rng(rng)?;
    let count = entries.len();
    diary.add_all(entries)?;
    info!("Seeded diary with {} sample entries", count);
    Ok(count)
}

fn random_midnight<R: Rng>(rng: &mut R) -> NaiveDateTime {
    let year = SAMPLE_FIRST_YEAR + rng.gen_range(0..SAMPLE_YEAR_SPAN);
    let month = rng.gen_range(1..=12);
    // Days past 27 are never generated
    let day = rng.gen_range(1..=27);

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_RATING, MIN_RATING};
    use crate::diary::Diary;
    use crate::entry::NewEntry;
    use chrono::{Datelike, Timelike};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_fabricates_64_unique_titles() {
        let entries = fabricate_entries().unwrap();
        assert_eq!(entries.len(), 64);

        let titles: HashSet<&str> = entries.iter().map(|e| e.title()).collect();
        assert_eq!(titles.len(), 64);
        for n in 1..=64 {
            assert!(titles.contains(format!("title{}", n).as_str()));
        }
    }

    #[test]
    fn test_covers_every_combination() {
        let entries = fabricate_entries_with_rng(&mut StdRng::seed_from_u64(1)).unwrap();
        let combinations: HashSet<(&str, &str, &str)> = entries
            .iter()
            .map(|e| (e.author(), e.destination(), e.activity()))
            .collect();
        assert_eq!(combinations.len(), 64);
    }

    #[test]
    fn test_ratings_and_dates_within_bounds() {
        let entries = fabricate_entries_with_rng(&mut StdRng::seed_from_u64(42)).unwrap();

        for entry in &entries {
            assert!(entry.rating() >= MIN_RATING && entry.rating() <= MAX_RATING);
            // One decimal place
            let scaled = entry.rating() * 10.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);

            let written = entry.time_written();
            assert!((2015..=2024).contains(&written.year()));
            assert!((1..=27).contains(&written.day()));
            assert_eq!(written.hour(), 0);
            assert_eq!(entry.time_edited(), written);
            assert!(entry.text().contains(entry.activity()));
            assert!(entry.text().contains(entry.destination()));
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let first = fabricate_entries_with_rng(&mut StdRng::seed_from_u64(9)).unwrap();
        let second = fabricate_entries_with_rng(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_batch_adds_to_empty_diary() {
        let mut diary = Diary::new();
        diary.add_all(fabricate_entries().unwrap()).unwrap();
        assert_eq!(diary.len(), 64);
    }

    #[test]
    fn test_second_batch_is_rejected_atomically() {
        let mut diary = Diary::new();
        diary.add_all(fabricate_entries().unwrap()).unwrap();

        assert!(diary.add_all(fabricate_entries().unwrap()).is_err());
        assert_eq!(diary.len(), 64);
    }

    #[test]
    fn test_seed_if_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut diary = Diary::new();

        assert_eq!(seed_if_empty(&mut diary, &mut rng).unwrap(), 64);
        assert_eq!(diary.len(), 64);

        // Already populated: nothing happens
        assert_eq!(seed_if_empty(&mut diary, &mut rng).unwrap(), 0);
        assert_eq!(diary.len(), 64);
    }

    #[test]
    fn test_seed_skips_diary_with_entries() {
        let mut diary = Diary::new();
        diary
            .add(DiaryEntry::new(NewEntry::new("Ann", "Oslo", "dining", 4.0, "Mine", "")).unwrap())
            .unwrap();

        assert_eq!(
            seed_if_empty(&mut diary, &mut StdRng::seed_from_u64(3)).unwrap(),
            0
        );
        assert_eq!(diary.titles(), vec!["Mine"]);
    }
}
