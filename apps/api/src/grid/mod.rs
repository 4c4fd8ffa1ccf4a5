//! CSV interpreter — turns the model's raw CSV text into a tabular `Grid`.
//!
//! Parsing is deliberately lenient and never fails: the model is not
//! contractually guaranteed to emit clean output, and downstream consumers
//! (display, export) depend on always receiving *some* grid. Rows with the
//! wrong cell count are passed through as-is; the export compiler pads them.

pub mod extract;

use serde::{Deserialize, Serialize};

/// Parsed tabular structure: one header row plus ordered data rows.
/// Header uniqueness and per-row cell counts are not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Parses CSV text into a `Grid`. Never fails; worst case is a
    /// degenerate grid with uneven rows.
    ///
    /// Single left-to-right scan with one `in_quotes` flag. A field is in
    /// quotes from an opening `"` to the matching closing `"`; a doubled
    /// `""` inside quotes is an escaped literal quote. Commas and line
    /// breaks inside quotes are field content. CR and CRLF are normalized
    /// to LF before scanning.
    pub fn parse(text: &str) -> Grid {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let normalized = normalized.trim();

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut row: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;

        let mut chars = normalized.chars().peekable();
        while let Some(c) = chars.next() {
            if in_quotes {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        // Escaped quote: consume both, emit one literal quote.
                        field.push('"');
                        chars.next();
                    }
                    '"' => in_quotes = false,
                    _ => field.push(c),
                }
            } else {
                match c {
                    '"' => in_quotes = true,
                    ',' => row.push(std::mem::take(&mut field)),
                    '\n' => {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    _ => field.push(c),
                }
            }
        }
        // Flush the last field and row even without a trailing line break.
        row.push(field);
        rows.push(row);

        // A trailing or interior blank line scans as a single empty field;
        // drop those rows. A single-field row with content is kept.
        rows.retain(|r| r.len() > 1 || (r.len() == 1 && !r[0].is_empty()));

        let mut iter = rows.into_iter();
        Grid {
            headers: iter.next().unwrap_or_default(),
            rows: iter.collect(),
        }
    }

    /// Serializes back to CSV with every field quoted and inner quotes
    /// doubled. `Grid::parse(grid.to_csv())` reconstructs `grid` exactly.
    pub fn to_csv(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| {
                row.iter()
                    .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}
