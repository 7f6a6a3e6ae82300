//! The diary entry value object.
//!
//! A `DiaryEntry` describes one experience during a trip: who wrote it, where,
//! what activity it is about, a rating from 0 to 10, a title and the main text.
//! Every entry carries two timestamps. `time_written` is fixed when the entry is
//! created; `time_edited` is re-stamped by every setter and never falls behind
//! `time_written`.
//!
//! Entries are built from a `NewEntry` holding the user-supplied fields. Input
//! acquisition (prompting, parsing command-line values) happens elsewhere; this
//! module only ever receives already-parsed values.

use crate::constants::{DISPLAY_TIME_FORMAT, MAX_RATING, MIN_RATING};
use crate::errors::{AppResult, ValidationError};
use chrono::{Duration, Local, NaiveDateTime};
use std::fmt;

/// The user-supplied fields of a diary entry.
///
/// # Examples
///
/// ```
/// use travel_diary::entry::{DiaryEntry, NewEntry};
///
/// let fields = NewEntry::new("Alice", "Backpacking Europe", "hiking", 8.5, "Alps Adventure",
///     "Climbed several peaks over three days.");
/// let entry = DiaryEntry::new(fields).unwrap();
/// assert_eq!(entry.title(), "Alps Adventure");
/// assert_eq!(entry.time_written(), entry.time_edited());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub author: String,
    /// A destination, or a more general travel context ("Traveling through Europe").
    pub destination: String,
    /// Usually one descriptive word ("bathing", "hiking").
    pub activity: String,
    pub rating: f64,
    pub title: String,
    pub text: String,
}

impl NewEntry {
    pub fn new(
        author: impl Into<String>,
        destination: impl Into<String>,
        activity: impl Into<String>,
        rating: f64,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            destination: destination.into(),
            activity: activity.into(),
            rating,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// A single travel diary entry.
///
/// Fields are private so the rating bound and the timestamp ordering cannot be
/// bypassed. Use the setters to change an entry; each of them moves
/// `time_edited` strictly forward.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaryEntry {
    time_written: NaiveDateTime,
    time_edited: NaiveDateTime,
    author: String,
    destination: String,
    activity: String,
    rating: f64,
    title: String,
    text: String,
}

/// Checks that a rating lies within [0, 10].
///
/// `NaN` and infinities are rejected as well.
///
/// # Errors
///
/// Returns `ValidationError::RatingOutOfRange` for any rating outside the interval.
///
/// # Examples
///
/// ```
/// use travel_diary::entry::validate_rating;
///
/// assert_eq!(validate_rating(0.0), Ok(0.0));
/// assert_eq!(validate_rating(10.0), Ok(10.0));
/// assert!(validate_rating(10.1).is_err());
/// assert!(validate_rating(f64::NAN).is_err());
/// ```
pub fn validate_rating(rating: f64) -> Result<f64, ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(ValidationError::RatingOutOfRange { rating })
    }
}

impl DiaryEntry {
    /// Creates an entry written now.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the rating is outside [0, 10].
    pub fn new(fields: NewEntry) -> AppResult<Self> {
        Self::written_at(Local::now().naive_local(), fields)
    }

    /// Creates an entry with a caller-supplied creation time.
    ///
    /// Both timestamps are set to `time_written`. This is how sample entries are
    /// fabricated with creation dates in the past.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the rating is outside [0, 10].
    pub fn written_at(time_written: NaiveDateTime, fields: NewEntry) -> AppResult<Self> {
        Self::restore(time_written, time_written, fields)
    }

    /// Rebuilds an entry with both timestamps known, e.g. when reading it back from storage.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if:
    /// - the rating is outside [0, 10]
    /// - `time_edited` is earlier than `time_written`
    pub fn restore(
        time_written: NaiveDateTime,
        time_edited: NaiveDateTime,
        fields: NewEntry,
    ) -> AppResult<Self> {
        let rating = validate_rating(fields.rating)?;
        if time_edited < time_written {
            return Err(ValidationError::EditedBeforeWritten {
                written: time_written,
                edited: time_edited,
            }
            .into());
        }

        Ok(Self {
            time_written,
            time_edited,
            author: fields.author,
            destination: fields.destination,
            activity: fields.activity,
            rating,
            title: fields.title,
            text: fields.text,
        })
    }

    pub fn time_written(&self) -> NaiveDateTime {
        self.time_written
    }

    pub fn time_edited(&self) -> NaiveDateTime {
        self.time_edited
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
        self.touch();
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = destination.into();
        self.touch();
    }

    pub fn set_activity(&mut self, activity: impl Into<String>) {
        self.activity = activity.into();
        self.touch();
    }

    /// Updates the rating.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the rating is outside [0, 10]. The entry,
    /// including `time_edited`, is left untouched in that case.
    pub fn set_rating(&mut self, rating: f64) -> AppResult<()> {
        self.rating = validate_rating(rating)?;
        self.touch();
        Ok(())
    }

    /// Updates the title.
    ///
    /// The title is the key of an entry inside a `Diary`. Entries owned by a diary
    /// must be retitled through `Diary::edit` so the key follows the new title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.touch();
    }

    /// Moves `time_edited` strictly forward, even if the clock has not advanced
    /// (or went backwards) since the previous stamp.
    ///
    /// At the largest representable time there is no later instant; the stamp
    /// then stays where it is.
    fn touch(&mut self) {
        let now = Local::now().naive_local();
        self.time_edited = if now > self.time_edited {
            now
        } else {
            self.time_edited
                .checked_add_signed(Duration::nanoseconds(1))
                .unwrap_or(self.time_edited)
        };
    }
}

impl fmt::Display for DiaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Written: {}", self.time_written.format(DISPLAY_TIME_FORMAT))?;
        writeln!(f, "Last edit: {}", self.time_edited.format(DISPLAY_TIME_FORMAT))?;
        writeln!(f)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Destination: {}", self.destination)?;
        writeln!(f, "Activity: {}", self.activity)?;
        writeln!(f, "Rating: {:.1}", self.rating)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "Main entry:")?;
        write!(f, "{}", self.text)
    }
}
