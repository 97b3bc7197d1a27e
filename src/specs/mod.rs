// src/specs/mod.rs
//! # Column specs
//!
//! Every sheet this crate reads has a fixed positional layout. Instead of
//! renaming columns by index wherever a table is used, each layout is written
//! down once as a [`Schema`] and validated when the table is bound.
//!
//! ## Binding rules
//! - A table narrower than the schema's required fields is a
//!   `SchemaMismatch`; nothing is guessed.
//! - Columns past the required fields bind only if the schema declares them
//!   as trailing optionals; anything further right is ignored.
//! - A leading header row (first two cells equal the first two field names,
//!   any case) is dropped.
//! - Values stay text. Parsing scores, flags and ids is the consumer's job.
//!
//! ## Placeholder rows
//! Before a season is scheduled the sheets are full of `TBD`. A row is a
//! placeholder when its first cell is empty or any cell contains `TBD`;
//! a table whose placeholders outnumber its valid rows is still in planning.
pub mod events;
pub mod games;
pub mod lineups;
pub mod players;
pub mod scoresheet;
pub mod standings;

use crate::core::sanitize::contains_tbd;
use crate::error::{OpsError, Result};
use crate::store::DataSet;

/// Ordered positional layout of one sheet.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    pub table: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl Schema {
    pub const fn width(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    pub fn position(&self, field: &str) -> Option<usize> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .position(|f| *f == field)
    }

    fn field_at(&self, ix: usize) -> Option<&'static str> {
        self.required.iter().chain(self.optional.iter()).nth(ix).copied()
    }

    /// Header heuristic: the first two cells spell the first two field names.
    pub fn is_header(&self, row: &[String]) -> bool {
        let probe = self.width().min(2);
        probe > 0
            && (0..probe).all(|i| match (row.get(i), self.field_at(i)) {
                (Some(cell), Some(name)) => cell.trim().eq_ignore_ascii_case(name),
                _ => false,
            })
    }
}

/// A table whose columns have been given names by a [`Schema`].
#[derive(Clone, Debug)]
pub struct MappedTable {
    schema: &'static Schema,
    bound: usize,
    rows: Vec<Vec<String>>,
}

impl MappedTable {
    pub fn empty(schema: &'static Schema) -> Self {
        Self { schema, bound: 0, rows: Vec::new() }
    }

    pub fn schema(&self) -> &'static Schema { self.schema }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn rows(&self) -> &[Vec<String>] { &self.rows }

    /// Number of schema fields that landed on a real column.
    pub fn bound_width(&self) -> usize { self.bound }

    /// Records in source order; `row` numbers are 1-based.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().enumerate().map(move |(i, cells)| Record {
            schema: self.schema,
            bound: self.bound,
            cells,
            row: i + 1,
        })
    }

    pub fn season_check(&self) -> SeasonCheck {
        SeasonCheck::of(&self.rows)
    }
}

/// Bind `ds` to `schema`, validating the column count.
pub fn bind(ds: &DataSet, schema: &'static Schema) -> Result<MappedTable> {
    let mut rows = ds.rows.clone();
    if rows.first().is_some_and(|r| schema.is_header(r)) {
        rows.remove(0);
    }
    if rows.is_empty() {
        return Ok(MappedTable::empty(schema));
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width < schema.required.len() {
        return Err(OpsError::SchemaMismatch {
            table: schema.table,
            expected: schema.required.len(),
            found: width,
        });
    }

    Ok(MappedTable { schema, bound: width.min(schema.width()), rows })
}

/// Like [`bind`], but a mismatch is logged and yields an empty table.
pub fn bind_or_empty(ds: &DataSet, schema: &'static Schema) -> MappedTable {
    match bind(ds, schema) {
        Ok(t) => t,
        Err(e) => {
            logw!("{e}; continuing without {} data", schema.table);
            MappedTable::empty(schema)
        }
    }
}

/// One row viewed through its schema.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    schema: &'static Schema,
    bound: usize,
    cells: &'a [String],
    pub row: usize,
}

impl<'a> Record<'a> {
    /// Trimmed cell text; `""` for a missing cell or an unbound column.
    pub fn get(&self, field: &str) -> &'a str {
        let pos = self.schema.position(field);
        debug_assert!(pos.is_some(), "{} has no field {field}", self.schema.table);
        match pos {
            Some(ix) if ix < self.bound => self.cells.get(ix).map(|c| c.trim()).unwrap_or(""),
            _ => "",
        }
    }

    /// Whether the column for `field` exists in the source table.
    pub fn has(&self, field: &str) -> bool {
        self.schema.position(field).is_some_and(|ix| ix < self.bound)
    }

    /// Non-empty value or a `RowProcessing` error.
    pub fn require(&self, field: &str) -> Result<&'a str> {
        let v = self.get(field);
        if v.is_empty() {
            return Err(OpsError::RowProcessing {
                table: self.schema.table,
                row: self.row,
                reason: format!("missing {field}"),
            });
        }
        Ok(v)
    }

    /// `None` when the cell is empty.
    pub fn non_empty(&self, field: &str) -> Option<&'a str> {
        Some(self.get(field)).filter(|v| !v.is_empty())
    }

    pub fn is_placeholder(&self) -> bool {
        is_placeholder_row(self.cells)
    }

    pub fn cells(&self) -> &'a [String] {
        self.cells
    }
}

/// Empty/missing first cell, or `TBD` anywhere.
pub fn is_placeholder_row(cells: &[String]) -> bool {
    cells.first().is_none_or(|c| c.trim().is_empty()) || cells.iter().any(|c| contains_tbd(c))
}

/// Placeholder vs. valid row counts for a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeasonCheck {
    pub placeholder: usize,
    pub valid: usize,
}

impl SeasonCheck {
    pub fn of(rows: &[Vec<String>]) -> Self {
        let placeholder = rows.iter().filter(|r| is_placeholder_row(r)).count();
        Self { placeholder, valid: rows.len() - placeholder }
    }

    pub fn mostly_placeholder(&self) -> bool {
        self.placeholder > self.valid
    }

    pub fn into_error(self, table: &'static str) -> OpsError {
        OpsError::PlaceholderData { table, placeholder: self.placeholder, valid: self.valid }
    }
}
