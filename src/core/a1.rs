// src/core/a1.rs
//! A1-notation ranges (`games!A2:Z55`) as used by the Sheets values API.
//!
//! Bounds are 0-based and inclusive; `None` means open-ended, so
//! `gamesPlayed!A:Z` covers every row and `players` the whole sheet.

use crate::error::{OpsError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: String,
    pub first_col: usize,
    pub last_col: Option<usize>,
    pub first_row: usize,
    pub last_row: Option<usize>,
}

/// One side of `A2:Z55`; either part may be missing (`A`, `2`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CellRef {
    col: Option<usize>,
    row: Option<usize>,
}

impl A1Range {
    pub fn parse(text: &str) -> Result<Self> {
        let bad = || OpsError::InvalidRange(text.to_string());
        let text = text.trim();

        let (sheet, cells) = match text.split_once('!') {
            Some((sheet, cells)) => (sheet, Some(cells)),
            None => (text, None),
        };
        let sheet = sheet.trim_matches('\'');
        if sheet.is_empty() {
            return Err(bad());
        }

        let Some(cells) = cells else {
            return Ok(Self { sheet: s!(sheet), first_col: 0, last_col: None, first_row: 0, last_row: None });
        };

        let (start, end) = match cells.split_once(':') {
            Some((a, b)) => (parse_cell(a).ok_or_else(bad)?, parse_cell(b).ok_or_else(bad)?),
            None => {
                let c = parse_cell(cells).ok_or_else(bad)?;
                (c, c)
            }
        };

        let first_col = start.col.unwrap_or(0);
        let first_row = start.row.unwrap_or(0);
        if end.col.is_some_and(|c| c < first_col) || end.row.is_some_and(|r| r < first_row) {
            return Err(bad());
        }

        Ok(Self { sheet: s!(sheet), first_col, last_col: end.col, first_row, last_row: end.row })
    }

    /// Cut the range out of a full sheet, then drop trailing empty cells and
    /// trailing empty rows the way the Sheets API does.
    pub fn clip(&self, sheet_rows: &[Vec<String>]) -> Vec<Vec<String>> {
        let row_end = self.last_row.map(|r| r + 1).unwrap_or(sheet_rows.len()).min(sheet_rows.len());
        if self.first_row >= row_end {
            return Vec::new();
        }

        let mut out: Vec<Vec<String>> = sheet_rows[self.first_row..row_end]
            .iter()
            .map(|row| {
                let col_end = self.last_col.map(|c| c + 1).unwrap_or(row.len()).min(row.len());
                let mut cells: Vec<String> = if self.first_col < col_end {
                    row[self.first_col..col_end].to_vec()
                } else {
                    Vec::new()
                };
                while cells.last().is_some_and(|c| c.is_empty()) {
                    cells.pop();
                }
                cells
            })
            .collect();

        while out.last().is_some_and(|r| r.is_empty()) {
            out.pop();
        }
        out
    }
}

/// "A" → 0, "Z" → 25, "AA" → 26.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let n = letters
        .to_ascii_uppercase()
        .bytes()
        .try_fold(0usize, |acc, b| acc.checked_mul(26)?.checked_add((b - b'A' + 1) as usize))?;
    Some(n - 1)
}

fn parse_cell(text: &str) -> Option<CellRef> {
    let text = text.trim().replace('$', "");
    if text.is_empty() {
        return None;
    }
    let split = text.find(|c: char| c.is_ascii_digit()).unwrap_or(text.len());
    let (letters, digits) = text.split_at(split);

    let col = if letters.is_empty() { None } else { Some(column_index(letters)?) };
    let row = if digits.is_empty() {
        None
    } else {
        let n: usize = digits.parse().ok()?;
        if n == 0 {
            return None;
        }
        Some(n - 1)
    };
    Some(CellRef { col, row })
}
