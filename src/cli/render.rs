//! Terminal rendering of entries and value lists.

use crate::constants::DISPLAY_TIME_FORMAT;
use crate::entry::DiaryEntry;
use std::io::{self, Write};

const TABLE_HEADERS: [&str; 6] = ["Rating", "Author", "Title", "Destination", "Activity", "Written"];
const COLUMN_GAP: &str = "  ";

/// Writes entries as an aligned table, one row per entry in the given order.
///
/// # Examples
///
/// ```
/// use travel_diary::cli::render::write_table;
///
/// let mut out = Vec::new();
/// write_table(&mut out, &[]).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "No entries found\n");
/// ```
pub fn write_table<W: Write>(out: &mut W, entries: &[DiaryEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No entries found");
    }

    let rows: Vec<[String; 6]> = entries.iter().map(table_row).collect();

    let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &TABLE_HEADERS.map(String::from), &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join(COLUMN_GAP))?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

/// Writes one value per line, or a placeholder if there are none.
pub fn write_values<W: Write>(out: &mut W, values: &[String]) -> io::Result<()> {
    if values.is_empty() {
        return writeln!(out, "No values found");
    }
    for value in values {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}

fn table_row(entry: &DiaryEntry) -> [String; 6] {
    [
        format!("{:.1}", entry.rating()),
        entry.author().to_string(),
        entry.title().to_string(),
        entry.destination().to_string(),
        entry.activity().to_string(),
        entry.time_written().format(DISPLAY_TIME_FORMAT).to_string(),
    ]
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    writeln!(out, "{}", padded.join(COLUMN_GAP).trim_end())
}
