// src/schedule/builder.rs
//! Joins games, events and lineups into the schedule.
//!
//! - Games keep source order; placeholder rows are dropped and counted.
//! - A game row that cannot be read is skipped and logged. One bad row never
//!   fails the batch.
//! - Events are classified at ingestion and numbered from 1 per game and
//!   per kind.
//! - Lineup rows go to whichever side's team name they match. Rows matching
//!   neither side are dropped, logged and counted.

use std::collections::{HashMap, HashSet};

use super::score::synthesize_score;
use super::{Game, Goal, LineupEntry, Lineups, Penalty, Schedule};
use crate::config::consts::{DEFAULT_PLAYED, GAME_LINK_PREFIX, LINEUP_STAT_ZERO};
use crate::core::sanitize::same_team;
use crate::error::{OpsError, Result};
use crate::specs::events::{self, GameEvent};
use crate::specs::lineups::LineupRow;
use crate::specs::{MappedTable, Record, SeasonCheck};

/// What the build dropped along the way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub placeholder_rows: usize,
    /// Game rows that could not be read.
    pub skipped_game_rows: usize,
    /// Event and lineup rows that could not be read.
    pub skipped_detail_rows: usize,
    pub unmatched_lineup_rows: usize,
    pub unclassified_events: usize,
    pub orphan_events: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuiltSchedule {
    pub games: Schedule,
    pub report: BuildReport,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    Built(BuiltSchedule),
    /// The games table is mostly placeholders; nothing was built.
    Planning(SeasonCheck),
}

pub fn build(games: &MappedTable, events: &MappedTable, lineups: &MappedTable) -> BuildOutcome {
    let check = games.season_check();
    if check.mostly_placeholder() {
        logf!(
            "games table in planning: {} placeholder rows, {} valid",
            check.placeholder, check.valid
        );
        return BuildOutcome::Planning(check);
    }

    let mut report = BuildReport::default();

    let ingested = events::ingest(events);
    report.unclassified_events = ingested.unclassified;
    report.skipped_detail_rows += ingested.skipped;
    let mut events_by_game: HashMap<String, Vec<GameEvent>> = HashMap::new();
    for row in ingested.rows {
        events_by_game.entry(row.game_id).or_default().push(row.event);
    }

    let mut lineups_by_game: HashMap<String, Vec<LineupRow>> = HashMap::new();
    for r in lineups.records() {
        match LineupRow::from_record(&r) {
            Ok(row) => lineups_by_game.entry(row.game_id.clone()).or_default().push(row),
            Err(e) => {
                logd!("{e}; skipped");
                report.skipped_detail_rows += 1;
            }
        }
    }

    let mut out: Schedule = Vec::with_capacity(games.len());
    let mut seen: HashSet<String> = HashSet::new();

    for r in games.records() {
        if r.is_placeholder() {
            report.placeholder_rows += 1;
            continue;
        }
        let mut game = match game_from_record(&r) {
            Ok(g) => g,
            Err(e) => {
                loge!("{e}; game skipped");
                report.skipped_game_rows += 1;
                continue;
            }
        };

        // Events and lineups attach once per id.
        if seen.insert(game.id.clone()) {
            if let Some(evts) = events_by_game.remove(&game.id) {
                let (goals, penalties) = number_events(evts);
                game.goals = goals;
                game.penalties = penalties;
            }
            if let Some(rows) = lineups_by_game.remove(&game.id) {
                game.lineups = split_lineups(&game, rows, &mut report);
            }
        } else {
            logw!("games row {}: duplicate game id {}", r.row, game.id);
        }

        out.push(game);
    }

    report.orphan_events = events_by_game.values().map(Vec::len).sum();
    if report.orphan_events > 0 {
        logw!("{} events reference games not in the schedule", report.orphan_events);
    }
    let orphan_lineups: usize = lineups_by_game.values().map(Vec::len).sum();
    if orphan_lineups > 0 {
        logd!("{orphan_lineups} lineup rows reference games not in the schedule");
    }

    logf!(
        "schedule built: {} games ({} placeholder, {} skipped games, {} skipped event/lineup rows)",
        out.len(),
        report.placeholder_rows,
        report.skipped_game_rows,
        report.skipped_detail_rows
    );
    BuildOutcome::Built(BuiltSchedule { games: out, report })
}

/// One game from a game's own scoresheet spreadsheet.
pub fn build_single(
    info: &MappedTable,
    home_lineup: &MappedTable,
    away_lineup: &MappedTable,
    goals: &MappedTable,
    penalties: &MappedTable,
) -> Result<Game> {
    let Some(r) = info.records().next() else {
        return Err(OpsError::RowProcessing {
            table: info.schema().table,
            row: 1,
            reason: s!("no game row"),
        });
    };
    let mut game = game_from_record(&r)?;

    game.lineups = Lineups {
        home: scoresheet_lineup(home_lineup),
        away: scoresheet_lineup(away_lineup),
    };

    game.goals = goals
        .records()
        .filter_map(|r| {
            Some(Goal {
                id: 0,
                time: s!(r.get("Time")),
                team: s!(r.get("Team")),
                scored_by: s!(r.non_empty("ScoredBy")?),
                asst1: r.non_empty("Asst1").map(String::from),
                asst2: r.non_empty("Asst2").map(String::from),
            })
        })
        .zip(1..)
        .map(|(g, id)| Goal { id, ..g })
        .collect();

    game.penalties = penalties
        .records()
        .filter_map(|r| {
            Some(Penalty {
                id: 0,
                time: s!(r.get("Time")),
                team: s!(r.get("Team")),
                player: s!(r.non_empty("Player")?),
                infraction: s!(r.get("Infraction")),
                minutes: s!(r.get("Minutes")),
            })
        })
        .zip(1..)
        .map(|(p, id)| Penalty { id, ..p })
        .collect();

    Ok(game)
}

/* ---------------- helpers ---------------- */

fn game_from_record(r: &Record<'_>) -> Result<Game> {
    let id = r.require("id")?;
    let home = r.require("Home")?;
    let away = r.require("Away")?;
    let date = r.require("Date")?;

    let game_link = if r.has("GameLink") { s!(r.get("GameLink")) } else { default_game_link(id) };
    let score = match r.non_empty("Score") {
        Some(text) => s!(text),
        None => synthesize_score(home, away, score_cell(r, "HomeScore"), score_cell(r, "AwayScore")),
    };

    Ok(Game {
        id: s!(id),
        date: s!(date),
        home: s!(home),
        away: s!(away),
        time: s!(r.get("Time")),
        ref1: s!(r.get("Ref1")),
        ref2: s!(r.get("Ref2")),
        game_link,
        score,
        played: s!(r.non_empty("Played").unwrap_or(DEFAULT_PLAYED)),
        lineups: Lineups::default(),
        goals: Vec::new(),
        penalties: Vec::new(),
    })
}

/// Summary page links are zero-based: game 1 → `/gameSummary/0`.
fn default_game_link(id: &str) -> String {
    match id.parse::<u64>() {
        Ok(n) if n > 0 => format!("{GAME_LINK_PREFIX}{}", n - 1),
        _ => s!(),
    }
}

fn score_cell(r: &Record<'_>, field: &str) -> Option<u32> {
    if !r.has(field) {
        return None;
    }
    r.get(field).parse().ok()
}

fn number_events(events: Vec<GameEvent>) -> (Vec<Goal>, Vec<Penalty>) {
    let mut goals = Vec::new();
    let mut penalties = Vec::new();
    for event in events {
        match event {
            GameEvent::Goal { time, team, scored_by, asst1, asst2 } => {
                let id = goals.len() as u32 + 1;
                goals.push(Goal { id, time, team, scored_by, asst1, asst2 });
            }
            GameEvent::Penalty { time, team, player, infraction, minutes } => {
                let id = penalties.len() as u32 + 1;
                penalties.push(Penalty { id, time, team, player, infraction, minutes });
            }
        }
    }
    (goals, penalties)
}

fn split_lineups(game: &Game, rows: Vec<LineupRow>, report: &mut BuildReport) -> Lineups {
    let mut lineups = Lineups::default();
    for row in rows {
        let side = if same_team(&row.team, &game.home) {
            &mut lineups.home
        } else if same_team(&row.team, &game.away) {
            &mut lineups.away
        } else {
            logw!(
                "game {}: lineup row for {} ({}) matches neither {} nor {}; dropped",
                game.id, row.name, row.team, game.home, game.away
            );
            report.unmatched_lineup_rows += 1;
            continue;
        };
        let id = side.len() as u32 + 1;
        side.push(LineupEntry {
            id,
            name: row.name,
            pos: row.pos,
            no: row.no,
            status: row.status,
            g: s!(LINEUP_STAT_ZERO),
            a: s!(LINEUP_STAT_ZERO),
            pts: s!(LINEUP_STAT_ZERO),
            pim: s!(LINEUP_STAT_ZERO),
        });
    }
    lineups
}

fn scoresheet_lineup(table: &MappedTable) -> Vec<LineupEntry> {
    table
        .records()
        .filter(|r| !r.get("name").is_empty())
        .zip(1..)
        .map(|(r, id)| LineupEntry {
            id,
            name: s!(r.get("name")),
            pos: s!(r.get("pos")),
            no: s!(r.get("no")),
            status: s!(r.get("status")),
            g: s!(r.get("g")),
            a: s!(r.get("a")),
            pts: s!(r.get("pts")),
            pim: s!(r.get("pim")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::{bind, events::EVENTS, games::GAMES, lineups::LINEUPS, scoresheet};
    use crate::store::DataSet;

    fn t(rows: Vec<Vec<String>>, schema: &'static crate::specs::Schema) -> MappedTable {
        bind(&DataSet::new(rows), schema).unwrap()
    }

    fn built(outcome: BuildOutcome) -> BuiltSchedule {
        match outcome {
            BuildOutcome::Built(b) => b,
            BuildOutcome::Planning(c) => panic!("unexpected planning: {c:?}"),
        }
    }

    #[test]
    fn defaults_fill_unbound_columns() {
        let games = t(vec![cells!["7", "2024-10-01", "Chicago", "Detroit", "19:00"]], &GAMES);
        let b = built(build(&games, &MappedTable::empty(&EVENTS), &MappedTable::empty(&LINEUPS)));
        let g = &b.games[0];
        assert_eq!(g.played, "N");
        assert_eq!(g.game_link, "/gameSummary/6");
        assert_eq!(g.score, "Chicago  -  Detroit");
        assert_eq!(g.ref1, "");
    }

    #[test]
    fn numeric_scores_are_synthesized() {
        let games = t(
            vec![cells!["1", "2024-10-01", "Chicago", "Detroit", "19:00", "", "", "", "", "Y", "2", "1"]],
            &GAMES,
        );
        let b = built(build(&games, &MappedTable::empty(&EVENTS), &MappedTable::empty(&LINEUPS)));
        assert_eq!(b.games[0].score, "Chicago 2 - 1 Detroit");
        assert_eq!(b.games[0].game_link, "");
    }

    #[test]
    fn missing_required_field_skips_only_that_row() {
        let games = t(
            vec![
                cells!["1", "", "Chicago", "Detroit", "19:00"],
                cells!["2", "2024-10-02", "Boston", "New York", "19:00"],
            ],
            &GAMES,
        );
        let b = built(build(&games, &MappedTable::empty(&EVENTS), &MappedTable::empty(&LINEUPS)));
        assert_eq!(b.games.len(), 1);
        assert_eq!(b.games[0].id, "2");
        assert_eq!(b.report.skipped_game_rows, 1);
        assert_eq!(b.report.skipped_detail_rows, 0);
    }

    #[test]
    fn bad_detail_rows_are_counted_apart_from_games() {
        let games = t(vec![cells!["1", "2024-10-01", "Chicago", "Detroit", "19:00"]], &GAMES);
        let evts = t(
            vec![
                cells!["1", "", "01:00", "Chicago", "Kane", "", "", "", "", ""],
                cells!["2", "1", "02:00", "Chicago", "Kane", "", "", "", "", ""],
            ],
            &EVENTS,
        );
        let lineups = t(vec![cells!["10", "1", "", "Nobody", "F", "9", "active"]], &LINEUPS);
        let b = built(build(&games, &evts, &lineups));
        assert_eq!(b.games.len(), 1);
        assert_eq!(b.report.skipped_game_rows, 0);
        assert_eq!(b.report.skipped_detail_rows, 2);
    }

    #[test]
    fn mostly_placeholder_games_short_circuit() {
        let games = t(
            vec![
                cells!["", "TBD", "TBD", "TBD", ""],
                cells!["2", "TBD", "Boston", "New York", ""],
                cells!["3", "2024-10-02", "Boston", "New York", "19:00"],
            ],
            &GAMES,
        );
        match build(&games, &MappedTable::empty(&EVENTS), &MappedTable::empty(&LINEUPS)) {
            BuildOutcome::Planning(c) => assert_eq!((c.placeholder, c.valid), (2, 1)),
            other => panic!("expected planning, got {other:?}"),
        }
    }

    #[test]
    fn lineups_split_by_team_name() {
        let games = t(vec![cells!["4", "2024-10-01", "Chicago", "Detroit", "19:00"]], &GAMES);
        let lineups = t(
            vec![
                cells!["10", "4", "Detroit", "Osgood", "G", "30", "active"],
                cells!["11", "4", "chicago ", "Hasek", "G", "39", "active"],
                cells!["12", "4", "Chicago", "Chelios", "D", "24", "active"],
                cells!["13", "4", "Boston", "Bourque", "D", "77", "active"],
            ],
            &LINEUPS,
        );
        let b = built(build(&games, &MappedTable::empty(&EVENTS), &lineups));
        let g = &b.games[0];
        assert_eq!(g.lineups.home.iter().map(|e| (e.id, e.name.as_str())).collect::<Vec<_>>(), [(1, "Hasek"), (2, "Chelios")]);
        assert_eq!(g.lineups.away[0].id, 1);
        assert_eq!(g.lineups.away[0].pim, "0");
        assert_eq!(b.report.unmatched_lineup_rows, 1);
    }

    #[test]
    fn events_for_unknown_games_are_orphans() {
        let games = t(vec![cells!["1", "2024-10-01", "Chicago", "Detroit", "19:00"]], &GAMES);
        let evts = t(
            vec![
                cells!["1", "1", "01:00", "Chicago", "Kane", "", "", "", "", ""],
                cells!["2", "99", "02:00", "Chicago", "Kane", "", "", "", "", ""],
            ],
            &EVENTS,
        );
        let b = built(build(&games, &evts, &MappedTable::empty(&LINEUPS)));
        assert_eq!(b.games[0].goals.len(), 1);
        assert_eq!(b.report.orphan_events, 1);
    }

    #[test]
    fn single_game_from_scoresheet() {
        let info = t(vec![cells!["12", "2024-11-02", "Boston", "New York", "18:30", "Ref A", "Ref B", "", "Boston 3 - 2 New York", "Y"]], &scoresheet::GAME_INFO);
        let home = t(
            vec![
                cells!["Rask", "G", "40", "active", "0", "0", "0", "0"],
                cells!["", "", "", "", "", "", "", ""],
                cells!["Pastrnak", "F", "88", "active", "2", "1", "3", "0"],
            ],
            &scoresheet::LINEUP,
        );
        let away = MappedTable::empty(&scoresheet::LINEUP);
        let goals = t(
            vec![cells!["05:00", "Boston", "Pastrnak", "Marchand", ""], cells!["", "", "", "", ""]],
            &scoresheet::GOALS,
        );
        let pens = t(vec![cells!["07:00", "New York", "Kreider", "Hooking", "2"]], &scoresheet::PENALTIES);

        let g = build_single(&info, &home, &away, &goals, &pens).unwrap();
        assert_eq!(g.lineups.home.len(), 2);
        assert_eq!(g.lineups.home[1].id, 2);
        assert_eq!(g.lineups.home[1].pts, "3");
        assert_eq!(g.goals.len(), 1);
        assert_eq!(g.goals[0].asst2, None);
        assert_eq!(g.penalties[0].id, 1);
        assert_eq!(g.game_link, "");
    }

    #[test]
    fn single_game_without_info_row_fails() {
        let empty = MappedTable::empty(&scoresheet::GAME_INFO);
        let lineup = MappedTable::empty(&scoresheet::LINEUP);
        let goals = MappedTable::empty(&scoresheet::GOALS);
        let pens = MappedTable::empty(&scoresheet::PENALTIES);
        assert!(build_single(&empty, &lineup, &lineup, &goals, &pens).is_err());
    }
}
