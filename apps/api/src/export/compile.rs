//! Grid-to-spreadsheet compiler.
//!
//! Rewrites a parsed grid into the value matrix actually written to the
//! sheet (relabeled score header, per-row scoring formulas, padded rows) and
//! builds the formatting request batch. Everything here is deterministic and
//! synchronous; the network side lives in the backend trait.

use serde_json::{json, Value};

use crate::grid::Grid;

/// Label of the score column, always at column index 6 (column G).
pub const SCORE_HEADER: &str = "Score Obtenu";

/// Number of data rows that receive a scoring formula. The instruction
/// templates ask the model for exactly 20 questions; extra rows are written
/// verbatim but not scored.
pub const SCORED_ROWS: usize = 20;

/// Range the summary row is appended at: one blank row below the scored block.
pub const SUMMARY_RANGE: &str = "A23";

/// The four values a recruiter may record in the given-answer column.
/// Table order is also the conditional-format rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMark {
    Correct,
    Partial,
    Wrong,
    Unanswered,
}

impl AnswerMark {
    pub const ALL: [AnswerMark; 4] = [
        AnswerMark::Correct,
        AnswerMark::Partial,
        AnswerMark::Wrong,
        AnswerMark::Unanswered,
    ];

    /// The literal the recruiter picks in the sheet. Drives both the formula
    /// branches and the dropdown validation.
    pub fn literal(&self) -> &'static str {
        match self {
            AnswerMark::Correct => "OK",
            AnswerMark::Partial => "Part.",
            AnswerMark::Wrong => "Faux",
            AnswerMark::Unanswered => "---",
        }
    }

    /// Background color shown when a cell holds this mark.
    fn background(&self) -> Value {
        let (red, green, blue) = match self {
            AnswerMark::Correct => (0.8, 1.0, 0.8),    // light green
            AnswerMark::Partial => (1.0, 0.8, 0.6),    // light orange
            AnswerMark::Wrong => (1.0, 0.8, 0.8),      // light red
            AnswerMark::Unanswered => (0.9, 0.9, 0.9), // light gray
        };
        json!({ "red": red, "green": green, "blue": blue })
    }
}

/// A grid rewritten for export: value matrix with the score header in place
/// and live formulas in column G of the scored rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredGrid {
    values: Vec<Vec<String>>,
}

impl ScoredGrid {
    pub fn values(&self) -> &[Vec<String>] {
        &self.values
    }
}

/// Scoring formula for one spreadsheet row, in the sheet's French locale:
/// full points for the correct marker, half for the partial marker, zero for
/// everything else (wrong, unanswered, or any unrecognized value).
fn score_formula(sheet_row: usize) -> String {
    format!(
        "=SI(F{r}=\"{ok}\"; E{r}*1; SI(F{r}=\"{part}\"; E{r}*0,5; 0))",
        r = sheet_row,
        ok = AnswerMark::Correct.literal(),
        part = AnswerMark::Partial.literal(),
    )
}

/// Compiles a grid into a `ScoredGrid`.
///
/// The score always lands at column index 6 regardless of how many columns
/// the model produced: a short header is padded then given the label, and
/// short data rows are padded before the formula cell is written. Only the
/// first `SCORED_ROWS` data rows receive formulas.
pub fn compile(grid: &Grid) -> ScoredGrid {
    let mut values: Vec<Vec<String>> = Vec::with_capacity(grid.rows.len() + 1);
    values.push(grid.headers.clone());
    values.extend(grid.rows.iter().cloned());

    let header = &mut values[0];
    if header.len() > 6 {
        header[6] = SCORE_HEADER.to_string();
    } else {
        header.resize(6, String::new());
        header.push(SCORE_HEADER.to_string());
    }

    for i in 1..=SCORED_ROWS {
        // Sheet rows are 1-based and row 1 is the header, so data row i
        // lands on sheet row i + 1.
        if let Some(row) = values.get_mut(i) {
            if row.len() < 7 {
                row.resize(7, String::new());
            }
            row[6] = score_formula(i + 1);
        }
    }

    ScoredGrid { values }
}

/// Range of the given-answer column over the scored block (F2:F21).
fn mark_range() -> Value {
    json!({
        "sheetId": 0,
        "startRowIndex": 1,
        "endRowIndex": SCORED_ROWS + 1,
        "startColumnIndex": 5,
        "endColumnIndex": 6
    })
}

/// Builds the structural/formatting batch applied after the values are
/// written. The dropdown validation and the per-mark background rules are
/// generated from the `AnswerMark` table.
pub fn format_requests() -> Vec<Value> {
    let mut requests = vec![
        // Freeze the header row
        json!({
            "updateSheetProperties": {
                "properties": { "sheetId": 0, "gridProperties": { "frozenRowCount": 1 } },
                "fields": "gridProperties.frozenRowCount"
            }
        }),
        // Shade the header background
        json!({
            "repeatCell": {
                "range": { "sheetId": 0, "startRowIndex": 0, "endRowIndex": 1 },
                "cell": { "userEnteredFormat": { "backgroundColor": { "red": 0.85, "green": 0.85, "blue": 0.85 } } },
                "fields": "userEnteredFormat.backgroundColor"
            }
        }),
        // Wrap the three descriptive columns (A–C)
        json!({
            "repeatCell": {
                "range": { "sheetId": 0, "startColumnIndex": 0, "endColumnIndex": 3 },
                "cell": { "userEnteredFormat": { "wrapStrategy": "WRAP" } },
                "fields": "userEnteredFormat.wrapStrategy"
            }
        }),
        // Widen the descriptive columns
        json!({
            "updateDimensionProperties": {
                "range": { "sheetId": 0, "dimension": "COLUMNS", "startIndex": 0, "endIndex": 3 },
                "properties": { "pixelSize": 485 },
                "fields": "pixelSize"
            }
        }),
        // Top/left-align the whole data region (A–G)
        json!({
            "repeatCell": {
                "range": { "sheetId": 0, "startColumnIndex": 0, "endColumnIndex": 7 },
                "cell": { "userEnteredFormat": { "verticalAlignment": "TOP", "horizontalAlignment": "LEFT" } },
                "fields": "userEnteredFormat(verticalAlignment,horizontalAlignment)"
            }
        }),
        // Restrict the given-answer column to the four marks, with a picker
        json!({
            "setDataValidation": {
                "range": mark_range(),
                "rule": {
                    "condition": {
                        "type": "ONE_OF_LIST",
                        "values": AnswerMark::ALL
                            .iter()
                            .map(|mark| json!({ "userEnteredValue": mark.literal() }))
                            .collect::<Vec<_>>()
                    },
                    "strict": true,
                    "showCustomUi": true
                }
            }
        }),
    ];

    // One background rule per mark, over the same range as the dropdown.
    requests.extend(AnswerMark::ALL.iter().enumerate().map(|(index, mark)| {
        json!({
            "addConditionalFormatRule": {
                "rule": {
                    "ranges": [mark_range()],
                    "booleanRule": {
                        "condition": {
                            "type": "TEXT_EQ",
                            "values": [{ "userEnteredValue": mark.literal() }]
                        },
                        "format": { "backgroundColor": mark.background() }
                    }
                },
                "index": index
            }
        })
    }));

    requests
}

/// Summary row appended below the scored block: running total of the score
/// column and of the points column.
pub fn summary_row() -> Vec<String> {
    [
        "",
        "",
        "",
        "",
        "Score Total",
        "=SOMME(G2:G21)",
        "Points Max",
        "=SOMME(E2:E21)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERS: [&str; 7] = [
        "Question",
        "Bonne Réponse",
        "Mauvaise Réponse",
        "Niveau",
        "Point",
        "Réponse Donnée",
        "Note",
    ];

    fn full_grid(data_rows: usize) -> Grid {
        Grid {
            headers: HEADERS.iter().map(|s| s.to_string()).collect(),
            rows: (0..data_rows)
                .map(|i| {
                    vec![
                        format!("Question {}", i + 1),
                        "bonne".to_string(),
                        "mauvaise".to_string(),
                        "Facile".to_string(),
                        "2".to_string(),
                        "OK".to_string(),
                        String::new(),
                    ]
                })
                .collect(),
        }
    }

    #[test]
    fn test_header_column_g_relabeled() {
        let scored = compile(&full_grid(1));
        assert_eq!(scored.values()[0][6], SCORE_HEADER);
        assert_eq!(scored.values()[0][0], "Question");
    }

    #[test]
    fn test_short_header_padded_then_labeled() {
        let grid = Grid {
            headers: vec!["Question".to_string(), "Bonne Réponse".to_string()],
            rows: vec![],
        };
        let scored = compile(&grid);
        let header = &scored.values()[0];
        assert_eq!(header.len(), 7);
        assert_eq!(header[1], "Bonne Réponse");
        assert_eq!(&header[2..6], &["", "", "", ""]);
        assert_eq!(header[6], SCORE_HEADER);
    }

    #[test]
    fn test_formula_injected_with_sheet_row_numbers() {
        let scored = compile(&full_grid(3));
        // Data row 0 is sheet row 2.
        assert_eq!(
            scored.values()[1][6],
            "=SI(F2=\"OK\"; E2*1; SI(F2=\"Part.\"; E2*0,5; 0))"
        );
        assert_eq!(
            scored.values()[3][6],
            "=SI(F4=\"OK\"; E4*1; SI(F4=\"Part.\"; E4*0,5; 0))"
        );
    }

    #[test]
    fn test_short_data_row_padded_to_seven_cells() {
        let grid = Grid {
            headers: HEADERS.iter().map(|s| s.to_string()).collect(),
            rows: vec![vec![
                "Q".to_string(),
                "b".to_string(),
                "m".to_string(),
                "Facile".to_string(),
            ]],
        };
        let scored = compile(&grid);
        let row = &scored.values()[1];
        assert_eq!(row.len(), 7);
        assert_eq!(row[4], "");
        assert_eq!(row[5], "");
        assert!(row[6].starts_with("=SI(F2="));
    }

    #[test]
    fn test_rows_beyond_twenty_left_untouched() {
        let scored = compile(&full_grid(25));
        assert!(scored.values()[20].last().unwrap().starts_with("=SI(F21="));
        // Data row 21 (sheet row 22) keeps its original empty cell.
        assert_eq!(scored.values()[21][6], "");
        assert_eq!(scored.values()[25][6], "");
    }

    #[test]
    fn test_every_scored_row_gets_a_formula() {
        let scored = compile(&full_grid(20));
        for (i, row) in scored.values().iter().enumerate().skip(1) {
            assert!(
                row[6].starts_with(&format!("=SI(F{}=", i + 1)),
                "row {i} missing formula: {:?}",
                row[6]
            );
        }
    }

    #[test]
    fn test_compile_does_not_mutate_input() {
        let grid = full_grid(2);
        let before = grid.clone();
        let _ = compile(&grid);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_format_requests_order_and_shape() {
        let requests = format_requests();
        assert_eq!(requests.len(), 10);
        assert!(requests[0].get("updateSheetProperties").is_some());
        assert!(requests[1].get("repeatCell").is_some());
        assert!(requests[3].get("updateDimensionProperties").is_some());
        assert!(requests[5].get("setDataValidation").is_some());
        for (i, request) in requests.iter().enumerate().skip(6) {
            let rule = request.get("addConditionalFormatRule").unwrap();
            assert_eq!(rule["index"], i - 6);
        }
    }

    #[test]
    fn test_validation_lists_all_four_marks() {
        let requests = format_requests();
        let values = &requests[5]["setDataValidation"]["rule"]["condition"]["values"];
        let literals: Vec<&str> = values
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["userEnteredValue"].as_str().unwrap())
            .collect();
        assert_eq!(literals, vec!["OK", "Part.", "Faux", "---"]);
    }

    #[test]
    fn test_conditional_rules_cover_the_scored_block() {
        let requests = format_requests();
        let range = &requests[6]["addConditionalFormatRule"]["rule"]["ranges"][0];
        assert_eq!(range["startRowIndex"], 1);
        assert_eq!(range["endRowIndex"], 21);
        assert_eq!(range["startColumnIndex"], 5);
        assert_eq!(range["endColumnIndex"], 6);
    }

    #[test]
    fn test_each_mark_has_a_distinct_background() {
        let backgrounds: Vec<String> = AnswerMark::ALL
            .iter()
            .map(|m| m.background().to_string())
            .collect();
        for (i, a) in backgrounds.iter().enumerate() {
            for b in &backgrounds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_summary_row_totals_score_and_points() {
        let row = summary_row();
        assert_eq!(row[4], "Score Total");
        assert_eq!(row[5], "=SOMME(G2:G21)");
        assert_eq!(row[6], "Points Max");
        assert_eq!(row[7], "=SOMME(E2:E21)");
    }
}
