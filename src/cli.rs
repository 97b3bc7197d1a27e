// src/cli.rs
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use crate::config::{ConfigInputs, OpsConfig};
use crate::error::Result;
use crate::progress::Progress;
use crate::runner::{self, Operation, RunSummary};
use crate::source::open_source;

#[derive(Parser, Debug)]
#[command(name = "uhl_ops", version, about = "UHL league spreadsheet operations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Read CSV exports from this directory instead of the Sheets API
    #[arg(long, global = true, value_name = "DIR")]
    pub snapshot: Option<PathBuf>,

    /// Credential file with an api_key or access_token
    #[arg(long, global = true, value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, global = true, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Log file
    #[arg(long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Players joined with their season lines
    Players(SheetIds),
    /// Team standings
    Standings(SheetIds),
    /// Season games listing with season status
    #[command(alias = "all-games")]
    Games(SheetIds),
    /// Dump the raw game events table
    GameEvents(SheetIds),
    /// Build schedule.json from games, events and lineups
    Schedule(SheetIds),
    /// One game from its scoresheet spreadsheet
    SingleGame(SheetIds),
    /// Goalie statistics from schedule.json
    #[command(alias = "goalies")]
    GoalieStats(SheetIds),
    /// Everything above
    All(SheetIds),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SheetIds {
    /// League (player) spreadsheet id
    pub player_sheet_id: Option<String>,
    /// Game scoresheet spreadsheet id
    pub game_sheet_id: Option<String>,
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Command::Players(_) => Operation::Players,
            Command::Standings(_) => Operation::Standings,
            Command::Games(_) => Operation::Games,
            Command::GameEvents(_) => Operation::GameEvents,
            Command::Schedule(_) => Operation::Schedule,
            Command::SingleGame(_) => Operation::SingleGame,
            Command::GoalieStats(_) => Operation::GoalieStats,
            Command::All(_) => Operation::All,
        }
    }

    fn ids(&self) -> &SheetIds {
        match self {
            Command::Players(ids)
            | Command::Standings(ids)
            | Command::Games(ids)
            | Command::GameEvents(ids)
            | Command::Schedule(ids)
            | Command::SingleGame(ids)
            | Command::GoalieStats(ids)
            | Command::All(ids) => ids,
        }
    }
}

impl Cli {
    pub fn inputs(&self) -> ConfigInputs {
        let ids = self.command.ids();
        ConfigInputs {
            player_sheet: ids.player_sheet_id.clone(),
            game_sheet: ids.game_sheet_id.clone(),
            credentials: self.credentials.clone(),
            snapshot: self.snapshot.clone(),
            out_dir: self.out.clone(),
            log_file: self.log.clone(),
            verbose: self.verbose,
        }
    }

    pub fn config(&self) -> OpsConfig {
        OpsConfig::resolve(self.inputs())
    }
}

pub fn log_level(cfg: &OpsConfig) -> LevelFilter {
    if cfg.verbose { LevelFilter::Debug } else { LevelFilter::Info }
}

/// Prints progress lines to stdout.
#[derive(Default)]
pub struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, op: &str, path: &Path) {
        self.done += 1;
        println!("[{op}] saved {}", path.display());
    }

    fn finish(&mut self) {
        println!("=== {} operation(s), {} file(s) written ===", self.total, self.done);
    }
}

/// Resolve the source the operation needs and run it.
pub fn run(cfg: &OpsConfig, op: Operation) -> Result<RunSummary> {
    runner::preflight(cfg, op)?;
    let mut progress = ConsoleProgress::default();
    if op.needs_source() {
        let source = open_source(cfg)?;
        runner::run(cfg, op, Some(source.as_ref()), &mut progress)
    } else {
        runner::run(cfg, op, None, &mut progress)
    }
}
