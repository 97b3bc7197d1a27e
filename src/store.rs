// src/store.rs
//! Raw tables as they come out of a source: rows of string cells, possibly
//! ragged (Sheets drops trailing empty cells).

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { headers: None, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Widest row; this is the column count the table is judged by.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl From<Vec<Vec<String>>> for DataSet {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}
