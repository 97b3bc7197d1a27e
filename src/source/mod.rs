// src/source/mod.rs
//! Where tables come from.
//!
//! Everything above this module sees a [`TableSource`]: hand it a book and an
//! A1 range, get back rows of string cells. Absent data is an empty table,
//! never an error, once it has gone through [`fetch_or_empty`].

pub mod sheets;
pub mod snapshot;

use std::collections::HashMap;

use crate::config::{Credentials, OpsConfig, SourceKind};
use crate::error::{OpsError, Result};
use crate::store::DataSet;

pub use sheets::SheetsSource;
pub use snapshot::SnapshotSource;

/// Which spreadsheet a range lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Book {
    /// The league spreadsheet: games, events, lineups, players, standings.
    Player,
    /// One game's scoresheet.
    Game,
}

pub trait TableSource {
    fn fetch(&self, book: Book, range: &str) -> Result<DataSet>;
}

/// Fetch, turning any source failure into an empty table. Configuration
/// errors still propagate.
pub fn fetch_or_empty(source: &dyn TableSource, book: Book, range: &str) -> Result<DataSet> {
    match source.fetch(book, range) {
        Ok(ds) => {
            logd!("{range}: {} rows, {} columns", ds.len(), ds.width());
            Ok(ds)
        }
        Err(e) if e.is_fatal() => Err(e),
        Err(e) if e.is_source_failure() => {
            logw!("{e}; using an empty table");
            Ok(DataSet::empty())
        }
        Err(e) => {
            loge!("{range}: {e}; using an empty table");
            Ok(DataSet::empty())
        }
    }
}

/// Build the source the configuration asks for.
pub fn open_source(cfg: &OpsConfig) -> Result<Box<dyn TableSource>> {
    match &cfg.source {
        SourceKind::Sheets { credentials } => {
            let creds = Credentials::load(credentials)?;
            let src = SheetsSource::new(creds, cfg.player_sheet.clone(), cfg.game_sheet.clone())?;
            Ok(Box::new(src))
        }
        SourceKind::Snapshot { dir } => {
            if !dir.is_dir() {
                return Err(OpsError::Config(format!(
                    "snapshot directory {} does not exist",
                    dir.display()
                )));
            }
            Ok(Box::new(SnapshotSource::new(dir)))
        }
    }
}

/// Tables held in memory, keyed by book and range.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    tables: HashMap<(Book, String), DataSet>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, book: Book, range: &str, rows: Vec<Vec<String>>) -> Self {
        self.insert(book, range, DataSet::new(rows));
        self
    }

    pub fn insert(&mut self, book: Book, range: &str, ds: DataSet) {
        self.tables.insert((book, s!(range)), ds);
    }
}

impl TableSource for MemorySource {
    fn fetch(&self, book: Book, range: &str) -> Result<DataSet> {
        self.tables
            .get(&(book, s!(range)))
            .cloned()
            .ok_or_else(|| OpsError::SourceUnavailable { range: s!(range), reason: s!("not loaded") })
    }
}
