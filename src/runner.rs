// src/runner.rs
//! Operation dispatch. Each operation reads what it needs from the table
//! source, writes its artifact (or a status object) into the output
//! directory, and reports through [`Progress`].

use std::path::PathBuf;

use serde::Serialize;

use crate::config::consts::*;
use crate::config::{OpsConfig, SourceKind};
use crate::error::{OpsError, Result};
use crate::file::{read_json, remove_stale, write_json};
use crate::goalies;
use crate::progress::Progress;
use crate::schedule::{self, BuildOutcome, Schedule};
use crate::source::{fetch_or_empty, Book, TableSource};
use crate::specs::{
    self, bind, bind_or_empty,
    events::EVENTS,
    games::{SeasonGame, GAMES, SEASON_GAMES},
    lineups::LINEUPS,
    players::{Player, SeasonLine, PLAYERS, SEASON_STATS},
    scoresheet,
    standings::{Standing, STANDINGS},
};
use crate::status::{Status, StatusReport};
use crate::store::DataSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Players,
    Standings,
    Games,
    GameEvents,
    Schedule,
    SingleGame,
    GoalieStats,
    All,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Players => "players",
            Operation::Standings => "standings",
            Operation::Games => "games",
            Operation::GameEvents => "game-events",
            Operation::Schedule => "schedule",
            Operation::SingleGame => "single-game",
            Operation::GoalieStats => "goalie-stats",
            Operation::All => "all",
        }
    }

    /// Whether the operation reads any spreadsheet at all.
    pub fn needs_source(self) -> bool {
        self != Operation::GoalieStats
    }

    fn reads_player_book(self) -> bool {
        !matches!(self, Operation::SingleGame | Operation::GoalieStats)
    }
}

/// What a run produced.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub statuses: Vec<(&'static str, StatusReport)>,
}

impl RunSummary {
    pub fn status_of(&self, op: Operation) -> Option<&StatusReport> {
        self.statuses.iter().find(|(name, _)| *name == op.name()).map(|(_, s)| s)
    }
}

/// Fail fast on configuration the operation cannot run without.
pub fn preflight(cfg: &OpsConfig, op: Operation) -> Result<()> {
    if let SourceKind::Sheets { .. } = cfg.source {
        if op.reads_player_book() {
            cfg.require_player_sheet()?;
        }
        if op == Operation::SingleGame {
            cfg.require_game_sheet()?;
        }
    }
    Ok(())
}

/// Top-level runner: dispatch on the operation and run it.
/// `source` may be `None` only for operations that read no spreadsheet.
pub fn run(
    cfg: &OpsConfig,
    op: Operation,
    source: Option<&dyn TableSource>,
    progress: &mut dyn Progress,
) -> Result<RunSummary> {
    preflight(cfg, op)?;

    let plan: Vec<Operation> = match op {
        Operation::All => {
            let mut v = vec![
                Operation::Players,
                Operation::Standings,
                Operation::Games,
                Operation::Schedule,
                Operation::GoalieStats,
            ];
            if game_book_available(cfg) {
                v.push(Operation::SingleGame);
            }
            v
        }
        single => vec![single],
    };

    logf!("run {}: {} operation(s)", op.name(), plan.len());
    progress.begin(plan.len());

    let mut ctx = Ctx { cfg, source, progress, summary: RunSummary::default() };
    let result = ctx.run_plan(&plan);
    ctx.progress.finish();

    result.map(|_| ctx.summary)
}

fn game_book_available(cfg: &OpsConfig) -> bool {
    match &cfg.source {
        SourceKind::Sheets { .. } => cfg.game_sheet.is_some(),
        SourceKind::Snapshot { dir } => dir.join(SNAPSHOT_GAME_SUBDIR).is_dir(),
    }
}

struct Ctx<'a> {
    cfg: &'a OpsConfig,
    source: Option<&'a dyn TableSource>,
    progress: &'a mut dyn Progress,
    summary: RunSummary,
}

/// `all_games.json` / `games_status.json` layout.
#[derive(Serialize)]
struct GamesFile<'a> {
    #[serde(flatten)]
    report: &'a StatusReport,
    games: &'a [SeasonGame],
}

impl Ctx<'_> {
    /// Steps run in order. A schedule step that ends in `error` or
    /// `planning` aborts the rest of the batch; the remaining steps are
    /// reported as skipped and an older `goalie_stats.json` is removed.
    fn run_plan(&mut self, plan: &[Operation]) -> Result<()> {
        for (i, step) in plan.iter().enumerate() {
            self.dispatch(*step)?;
            if *step != Operation::Schedule || plan.len() == 1 {
                continue;
            }
            let outcome = self.summary.status_of(Operation::Schedule).map(|s| s.status);
            if let Some(status @ (Status::Error | Status::Planning)) = outcome {
                logw!("schedule ended in {status}; {} remaining step(s) skipped", plan.len() - i - 1);
                for rest in &plan[i + 1..] {
                    if *rest == Operation::GoalieStats {
                        self.drop_stale(GOALIE_STATS_FILE)?;
                    }
                    let report = StatusReport::error(
                        format!("{} skipped", rest.name()),
                        format!("schedule step ended in {status}"),
                    );
                    self.conclude(*rest, report);
                }
                break;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, op: Operation) -> Result<()> {
        logf!("operation {} started", op.name());
        match op {
            Operation::Players => self.players(),
            Operation::Standings => self.standings(),
            Operation::Games => self.games(),
            Operation::GameEvents => self.game_events(),
            Operation::Schedule => self.schedule(),
            Operation::SingleGame => self.single_game(),
            Operation::GoalieStats => self.goalie_stats(),
            Operation::All => Ok(()),
        }
    }

    /* ---------------- players ---------------- */

    fn players(&mut self) -> Result<()> {
        let op = Operation::Players;
        self.say("Processing players data...");
        let ds = self.fetch(Book::Player, PLAYERS_RANGE)?;
        if ds.is_empty() {
            return self.conclude_with_file(op, PLAYERS_STATUS_FILE, StatusReport::no_data("players data"));
        }

        let table = match bind(&ds, &PLAYERS) {
            Ok(t) => t,
            Err(e) => {
                logw!("{e}");
                let report = StatusReport::error("Failed to process players data", &e);
                return self.conclude_with_file(op, PLAYERS_STATUS_FILE, report);
            }
        };

        let check = table.season_check();
        let players: Vec<Player> = if check.mostly_placeholder() {
            logw!("{}", check.into_error(PLAYERS.table));
            Vec::new()
        } else {
            table.records().filter_map(|r| Player::from_record(&r)).collect()
        };
        if players.is_empty() {
            let report = StatusReport::planning("No valid player data found - season may be in planning phase", check);
            return self.conclude_with_file(op, PLAYERS_STATUS_FILE, report);
        }

        let seasons_ds = self.fetch(Book::Player, PLAYERS_SEASON_RANGE)?;
        let seasons_table = bind_or_empty(&seasons_ds, &SEASON_STATS);
        let seasons: Vec<SeasonLine> = if seasons_table.season_check().mostly_placeholder() {
            logw!("season stats are mostly placeholders; players written without seasons");
            Vec::new()
        } else {
            seasons_table.records().filter_map(|r| SeasonLine::from_record(&r)).collect()
        };

        let combined = specs::players::join(players, seasons);
        self.write(op, PLAYERS_FILE, &combined)?;
        self.conclude(op, StatusReport::active(format!("{} players saved", combined.len())));
        Ok(())
    }

    /* ---------------- standings ---------------- */

    fn standings(&mut self) -> Result<()> {
        let op = Operation::Standings;
        self.say("Processing standings data...");
        let ds = self.fetch(Book::Player, STANDINGS_RANGE)?;
        if ds.is_empty() {
            self.conclude(op, StatusReport::no_data("standings data"));
            return Ok(());
        }

        let table = bind_or_empty(&ds, &STANDINGS);
        let check = table.season_check();
        let rows: Vec<Standing> = if check.mostly_placeholder() {
            logw!("{}", check.into_error(STANDINGS.table));
            Vec::new()
        } else {
            table.records().filter_map(|r| Standing::from_record(&r)).collect()
        };

        self.write(op, STANDINGS_FILE, &rows)?;
        let report = if rows.is_empty() {
            StatusReport::no_data("valid standings data")
        } else {
            StatusReport::active(format!("{} teams in standings", rows.len()))
        };
        self.conclude(op, report);
        Ok(())
    }

    /* ---------------- season games ---------------- */

    fn games(&mut self) -> Result<()> {
        let op = Operation::Games;
        self.say("Processing games schedule...");
        let ds = self.fetch(Book::Player, GAMES_RANGE)?;
        if ds.is_empty() {
            return self.games_file(op, GAMES_STATUS_FILE, StatusReport::no_data("games data"), &[]);
        }

        let season = StatusReport::season(specs::SeasonCheck::of(&ds.rows), "games");
        self.say(&format!("Season status: {}", season.message));

        let table = match bind(&ds, &SEASON_GAMES) {
            Ok(t) => t,
            Err(e) => {
                logw!("{e}; likely TBD data");
                let report = StatusReport::pending("Season not yet started - TBD data detected");
                return self.games_file(op, GAMES_STATUS_FILE, report, &[]);
            }
        };

        let games: Vec<SeasonGame> = table.records().filter_map(|r| SeasonGame::from_record(&r)).collect();
        if games.is_empty() {
            let report = StatusReport::planning(
                "No valid games found - season appears to be in planning phase",
                table.season_check(),
            );
            return self.games_file(op, GAMES_STATUS_FILE, report, &[]);
        }

        let report = StatusReport::active(format!("Successfully processed {} games", games.len()));
        self.games_file(op, ALL_GAMES_FILE, report, &games)
    }

    fn games_file(&mut self, op: Operation, file: &str, report: StatusReport, games: &[SeasonGame]) -> Result<()> {
        self.write(op, file, &GamesFile { report: &report, games })?;
        self.conclude(op, report);
        Ok(())
    }

    /* ---------------- raw events ---------------- */

    fn game_events(&mut self) -> Result<()> {
        let op = Operation::GameEvents;
        self.say("Analyzing game events data...");
        let ds = self.fetch(Book::Player, GAME_EVENTS_RANGE)?;
        if ds.is_empty() {
            self.conclude(op, StatusReport::no_data("game events data"));
            return Ok(());
        }

        self.say(&format!("Game events data shape: {} rows x {} columns", ds.len(), ds.width()));
        for (i, row) in ds.rows.iter().take(5).enumerate() {
            let preview: Vec<String> = row.iter().take(10).map(|c| c.chars().take(15).collect()).collect();
            self.say(&format!("Row {i}: {preview:?}"));
        }

        self.write(op, GAME_EVENTS_RAW_FILE, &ds.rows)?;
        self.conclude(op, StatusReport::active(format!("{} event rows saved", ds.len())));
        Ok(())
    }

    /* ---------------- schedule ---------------- */

    fn schedule(&mut self) -> Result<()> {
        let op = Operation::Schedule;
        self.say("Building complete schedule with games, events, and lineups...");

        let games_ds = self.fetch(Book::Player, GAMES_RANGE)?;
        if games_ds.is_empty() {
            let err = OpsError::SourceUnavailable { range: s!(GAMES_RANGE), reason: s!("no rows") };
            let report = StatusReport::error("Games table not found; schedule not written", &err);
            return self.schedule_status(report);
        }
        let games = match bind(&games_ds, &GAMES) {
            Ok(t) => t,
            Err(e) => {
                loge!("{e}");
                let report = StatusReport::error("Games table unusable; schedule not written", &e);
                return self.schedule_status(report);
            }
        };

        let events_ds = self.fetch(Book::Player, GAME_EVENTS_RANGE)?;
        if events_ds.is_empty() {
            self.say("No game events data found - goals and penalties will be empty");
        }
        let lineups_ds = self.fetch(Book::Player, GAMES_PLAYED_RANGE)?;
        if lineups_ds.is_empty() {
            self.say("No gamesPlayed data found - lineups will be empty");
        }
        let events = bind_or_empty(&events_ds, &EVENTS);
        let lineups = bind_or_empty(&lineups_ds, &LINEUPS);

        self.say(&format!("Processing {} games and {} events...", games.len(), events.len()));
        match schedule::build(&games, &events, &lineups) {
            BuildOutcome::Planning(check) => {
                self.schedule_status(StatusReport::season(check, "games"))
            }
            BuildOutcome::Built(built) => {
                self.write(op, SCHEDULE_FILE, &built.games)?;
                self.drop_stale(SCHEDULE_STATUS_FILE)?;
                let r = built.report;
                let message = format!(
                    "Generated complete schedule with {} games ({} placeholder, {} skipped games, {} skipped event/lineup rows, {} unmatched lineup rows)",
                    built.games.len(),
                    r.placeholder_rows,
                    r.skipped_game_rows,
                    r.skipped_detail_rows,
                    r.unmatched_lineup_rows
                );
                self.say(&message);
                self.conclude(op, StatusReport::active(message));
                Ok(())
            }
        }
    }

    /// Status in place of the schedule; an older `schedule.json` goes.
    fn schedule_status(&mut self, report: StatusReport) -> Result<()> {
        self.drop_stale(SCHEDULE_FILE)?;
        self.conclude_with_file(Operation::Schedule, SCHEDULE_STATUS_FILE, report)
    }

    /* ---------------- single game ---------------- */

    fn single_game(&mut self) -> Result<()> {
        let op = Operation::SingleGame;
        self.say("Processing single game data...");

        let info_ds = self.fetch(Book::Game, GAME_INFO_RANGE)?;
        if info_ds.is_empty() {
            self.conclude(op, StatusReport::no_data("game info"));
            return Ok(());
        }
        let info = match bind(&info_ds, &scoresheet::GAME_INFO) {
            Ok(t) => t,
            Err(e) => {
                loge!("{e}");
                self.conclude(op, StatusReport::error("Game info unusable", &e));
                return Ok(());
            }
        };

        let home = bind_or_empty(&self.fetch(Book::Game, HOME_LINEUP_RANGE)?, &scoresheet::LINEUP);
        let away = bind_or_empty(&self.fetch(Book::Game, AWAY_LINEUP_RANGE)?, &scoresheet::LINEUP);
        let goals = bind_or_empty(&self.fetch(Book::Game, GOALS_RANGE)?, &scoresheet::GOALS);
        let penalties = bind_or_empty(&self.fetch(Book::Game, PENALTIES_RANGE)?, &scoresheet::PENALTIES);

        match schedule::build_single(&info, &home, &away, &goals, &penalties) {
            Ok(game) => {
                self.write(op, SINGLE_GAME_FILE, &game)?;
                self.conclude(op, StatusReport::active(format!("Game {} processed", game.id)));
            }
            Err(e) => {
                loge!("{e}");
                self.conclude(op, StatusReport::error("Error processing game", &e));
            }
        }
        Ok(())
    }

    /* ---------------- goalie stats ---------------- */

    fn goalie_stats(&mut self) -> Result<()> {
        let op = Operation::GoalieStats;
        self.say("Calculating goalie statistics from schedule.json...");

        let path = self.cfg.out_path(SCHEDULE_FILE);
        if !path.is_file() {
            self.say("No schedule data found. Please generate schedule first.");
            self.conclude(op, StatusReport::no_data("schedule"));
            return Ok(());
        }
        let schedule: Schedule = match read_json(&path) {
            Ok(s) => s,
            Err(e) => {
                loge!("{}: {e}", path.display());
                self.conclude(op, StatusReport::error("schedule.json unreadable", &e));
                return Ok(());
            }
        };

        let rows = goalies::present(goalies::aggregate(&schedule));
        self.write(op, GOALIE_STATS_FILE, &rows)?;

        self.say(&format!("Calculated statistics for {} goalies:", rows.len()));
        for line in goalies::summary_table(&rows, 10).lines() {
            self.say(line);
        }
        self.conclude(op, StatusReport::active(format!("{} goalies", rows.len())));
        Ok(())
    }

    /* ---------------- helpers ---------------- */

    fn fetch(&self, book: Book, range: &str) -> Result<DataSet> {
        let source = self
            .source
            .ok_or_else(|| OpsError::Config(s!("no table source configured")))?;
        fetch_or_empty(source, book, range)
    }

    fn say(&mut self, msg: &str) {
        logf!("{msg}");
        self.progress.log(msg);
    }

    fn write<T: Serialize + ?Sized>(&mut self, op: Operation, file: &str, value: &T) -> Result<()> {
        let path = self.cfg.out_path(file);
        write_json(&path, value)?;
        logf!("{}: wrote {}", op.name(), path.display());
        self.progress.item_done(op.name(), &path);
        self.summary.files_written.push(path);
        Ok(())
    }

    fn drop_stale(&mut self, file: &str) -> Result<()> {
        let path = self.cfg.out_path(file);
        if remove_stale(&path)? {
            logf!("removed stale {}", path.display());
        }
        Ok(())
    }

    fn conclude(&mut self, op: Operation, report: StatusReport) {
        self.say(&format!("{}: {} - {}", op.name(), report.status, report.message));
        self.summary.statuses.push((op.name(), report));
    }

    fn conclude_with_file(&mut self, op: Operation, file: &str, report: StatusReport) -> Result<()> {
        self.write(op, file, &report)?;
        self.conclude(op, report);
        Ok(())
    }
}
