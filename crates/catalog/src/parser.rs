//! Parser for the song catalog CSV.
//!
//! Format: a header row followed by one song per row. The header must name
//! `title`, `artist` and `mood` (any order, case-insensitive); other columns
//! are ignored.
//!
//! ```text
//! title,artist,mood
//! Blue in Green,Miles Davis,"late night, quiet, introspective"
//! ```
//!
//! Quoting follows the usual CSV rules: fields may be wrapped in double
//! quotes, quoted fields may contain commas and newlines, and `""` inside a
//! quoted field is a literal quote.

use crate::error::{CatalogError, Result};
use crate::types::{SongId, SongRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Columns every catalog must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["title", "artist", "mood"];

/// A raw CSV record and the line it started on.
#[derive(Debug, Clone, PartialEq)]
struct RawRecord {
    line: usize,
    fields: Vec<String>,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    title: usize,
    artist: usize,
    mood: usize,
    width: usize,
}

/// Parse the catalog file at `path`.
pub fn parse_songs(path: &Path) -> Result<Vec<SongRecord>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;

    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_songs_str(&content, &file)
}

/// Parse catalog content already in memory; `file` is only used in errors.
pub fn parse_songs_str(content: &str, file: &str) -> Result<Vec<SongRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = split_records(content, file)?.into_iter();

    let header = records.next().ok_or_else(|| CatalogError::EmptyFile {
        file: file.to_string(),
    })?;
    let columns = resolve_columns(&header.fields, file)?;

    let mut songs = Vec::new();
    for record in records {
        if record.fields.len() != columns.width {
            return Err(CatalogError::FieldCountMismatch {
                expected: columns.width,
                found: record.fields.len(),
                line: record.line,
            });
        }

        let id = SongId::try_from(songs.len() + 1).map_err(|_| CatalogError::ParseError {
            file: file.to_string(),
            line: record.line,
            reason: "Too many rows for a song id".to_string(),
        })?;

        songs.push(SongRecord {
            id,
            title: record.fields[columns.title].trim().to_string(),
            artist: record.fields[columns.artist].trim().to_string(),
            mood: record.fields[columns.mood].trim().to_string(),
        });
    }

    Ok(songs)
}

/// Find the required columns in the header row.
fn resolve_columns(header: &[String], file: &str) -> Result<ColumnMap> {
    let position = |name: &str| -> Result<usize> {
        header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| CatalogError::MissingColumn {
                file: file.to_string(),
                column: name.to_string(),
            })
    };

    Ok(ColumnMap {
        title: position(REQUIRED_COLUMNS[0])?,
        artist: position(REQUIRED_COLUMNS[1])?,
        mood: position(REQUIRED_COLUMNS[2])?,
        width: header.len(),
    })
}

/// Split CSV content into records, skipping blank lines.
fn split_records(content: &str, file: &str) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    // Set once the current record has any content (even an empty quoted field).
    let mut touched = false;

    let mut chars = content.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                in_quotes = true;
                touched = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                touched = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if touched || !field.trim().is_empty() {
                    fields.push(std::mem::take(&mut field));
                    records.push(RawRecord {
                        line: record_line,
                        fields: std::mem::take(&mut fields),
                    });
                }
                field.clear();
                touched = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(CatalogError::ParseError {
            file: file.to_string(),
            line: record_line,
            reason: "Unterminated quoted field".to_string(),
        });
    }

    if touched || !field.trim().is_empty() {
        fields.push(field);
        records.push(RawRecord {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}
