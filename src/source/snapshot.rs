// src/source/snapshot.rs
//! Offline reads from CSV exports of the spreadsheets.
//!
//! Layout: `<dir>/<sheet>.csv` for the league book and
//! `<dir>/game/<sheet>.csv` for a game's scoresheet. Each file is the whole
//! sheet; the requested A1 range is cut out of it.

use std::path::{Path, PathBuf};

use super::{Book, TableSource};
use crate::config::consts::SNAPSHOT_GAME_SUBDIR;
use crate::core::A1Range;
use crate::error::{OpsError, Result};
use crate::store::DataSet;

pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn sheet_path(&self, book: Book, sheet: &str) -> PathBuf {
        let base = match book {
            Book::Player => self.dir.clone(),
            Book::Game => self.dir.join(SNAPSHOT_GAME_SUBDIR),
        };
        base.join(format!("{sheet}.csv"))
    }
}

impl TableSource for SnapshotSource {
    fn fetch(&self, book: Book, range: &str) -> Result<DataSet> {
        let a1 = A1Range::parse(range)?;
        let path = self.sheet_path(book, &a1.sheet);
        if !path.is_file() {
            return Err(OpsError::SourceUnavailable {
                range: s!(range),
                reason: format!("{} not found", path.display()),
            });
        }
        let sheet = read_sheet(&path)?;
        Ok(DataSet::new(a1.clip(&sheet)))
    }
}

fn read_sheet(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(rows)
}
