// src/goalies.rs
//! Goalie statistics derived from a built schedule.
//!
//! Only played games count. Every lineup entry at position `G` on a side is
//! credited with that side's full result, so co-starting goalies each get
//! the game. A goalie who dressed for more than one team is keyed per team
//! by [`aggregate`]; [`present`] folds those back into one line under the
//! team they played most for.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::schedule::{parse_score, Game, LineupEntry};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GoalieKey {
    pub name: String,
    /// Set only for goalies seen with more than one team.
    pub team: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum GameResult {
    W,
    L,
    T,
}

impl GameResult {
    fn of(goals_for: u32, goals_against: u32) -> Self {
        match goals_for.cmp(&goals_against) {
            Ordering::Greater => GameResult::W,
            Ordering::Less => GameResult::L,
            Ordering::Equal => GameResult::T,
        }
    }
}

/// Audit line for one credited game.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GoalieGame {
    pub game_id: String,
    pub opponent: String,
    pub ga_in_game: u32,
    pub result: GameResult,
    #[serde(skip)]
    seq: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GoalieStatRecord {
    pub name: String,
    pub team: String,
    pub gp: u32,
    pub w: u32,
    pub l: u32,
    pub t: u32,
    pub so: u32,
    pub ga: u32,
    pub gaa: f64,
    pub games: Vec<GoalieGame>,
    first_seen: usize,
}

impl GoalieStatRecord {
    fn new(name: &str, team: &str, first_seen: usize) -> Self {
        Self {
            name: s!(name),
            team: s!(team),
            gp: 0,
            w: 0,
            l: 0,
            t: 0,
            so: 0,
            ga: 0,
            gaa: 0.0,
            games: Vec::new(),
            first_seen,
        }
    }

    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.w, self.l, self.t)
    }

    fn credit(&mut self, game: GoalieGame) {
        self.gp += 1;
        self.ga += game.ga_in_game;
        match game.result {
            GameResult::W => self.w += 1,
            GameResult::L => self.l += 1,
            GameResult::T => self.t += 1,
        }
        if game.ga_in_game == 0 {
            self.so += 1;
        }
        self.games.push(game);
        self.gaa = gaa(self.ga, self.gp);
    }

    fn absorb(&mut self, other: GoalieStatRecord) {
        self.gp += other.gp;
        self.w += other.w;
        self.l += other.l;
        self.t += other.t;
        self.so += other.so;
        self.ga += other.ga;
        self.games.extend(other.games);
        self.games.sort_by_key(|g| g.seq);
        self.gaa = gaa(self.ga, self.gp);
    }
}

impl Serialize for GoalieStatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("GoalieStatRecord", 11)?;
        st.serialize_field("name", &self.name)?;
        st.serialize_field("team", &self.team)?;
        st.serialize_field("GP", &self.gp)?;
        st.serialize_field("W", &self.w)?;
        st.serialize_field("L", &self.l)?;
        st.serialize_field("T", &self.t)?;
        st.serialize_field("SO", &self.so)?;
        st.serialize_field("GA", &self.ga)?;
        st.serialize_field("GAA", &self.gaa)?;
        st.serialize_field("Record", &self.record())?;
        st.serialize_field("Games", &self.games)?;
        st.end()
    }
}

/// `round(ga / gp, 2)` with halves going to the even neighbour (1/8 → 0.12);
/// `0.0` without games.
pub fn gaa(ga: u32, gp: u32) -> f64 {
    if gp == 0 {
        return 0.0;
    }
    (f64::from(ga) / f64::from(gp) * 100.0).round_ties_even() / 100.0
}

fn is_goalie(entry: &LineupEntry) -> bool {
    entry.pos.trim().eq_ignore_ascii_case("G")
}

/// Per-goalie totals over every played game in `schedule`.
pub fn aggregate(schedule: &[Game]) -> BTreeMap<GoalieKey, GoalieStatRecord> {
    let played: Vec<&Game> = schedule.iter().filter(|g| g.is_played()).collect();

    // Which teams each goalie appeared for, in order of appearance.
    let mut teams_by_name: HashMap<&str, Vec<&str>> = HashMap::new();
    for game in &played {
        for (entry, team) in sides(game) {
            let teams = teams_by_name.entry(entry.name.as_str()).or_default();
            if !teams.contains(&team) {
                teams.push(team);
            }
        }
    }

    let mut out: BTreeMap<GoalieKey, GoalieStatRecord> = BTreeMap::new();
    let mut seq = 0usize;
    for game in &played {
        let (home_score, away_score) = parse_score(&game.score);
        for (entry, team) in sides(game) {
            let (goals_for, goals_against, opponent) = if team == game.home.as_str() {
                (home_score, away_score, &game.away)
            } else {
                (away_score, home_score, &game.home)
            };
            let multi_team = teams_by_name.get(entry.name.as_str()).is_some_and(|t| t.len() > 1);
            let key = GoalieKey { name: entry.name.clone(), team: multi_team.then(|| s!(team)) };

            out.entry(key)
                .or_insert_with(|| GoalieStatRecord::new(&entry.name, team, seq))
                .credit(GoalieGame {
                    game_id: game.id.clone(),
                    opponent: opponent.clone(),
                    ga_in_game: goals_against,
                    result: GameResult::of(goals_for, goals_against),
                    seq,
                });
            seq += 1;
        }
    }
    logd!("goalie aggregation: {} played games, {} goalie keys", played.len(), out.len());
    out
}

/// Goalie entries of both sides, each with the team they played for.
fn sides(game: &Game) -> impl Iterator<Item = (&LineupEntry, &str)> {
    let home = game.lineups.home.iter().filter(|e| is_goalie(e)).map(|e| (e, game.home.as_str()));
    let away = game.lineups.away.iter().filter(|e| is_goalie(e)).map(|e| (e, game.away.as_str()));
    home.chain(away)
}

/// One line per goalie, ordered for display: GAA ascending, then GP
/// descending, then name.
pub fn present(stats: BTreeMap<GoalieKey, GoalieStatRecord>) -> Vec<GoalieStatRecord> {
    let mut by_name: BTreeMap<String, Vec<GoalieStatRecord>> = BTreeMap::new();
    for (key, rec) in stats {
        if rec.gp > 0 {
            by_name.entry(key.name).or_default().push(rec);
        }
    }

    let mut out: Vec<GoalieStatRecord> = by_name
        .into_values()
        .filter_map(|mut recs| {
            // primary team: most GP, earliest appearance on ties
            recs.sort_by(|a, b| b.gp.cmp(&a.gp).then(a.first_seen.cmp(&b.first_seen)));
            let mut iter = recs.into_iter();
            let mut primary = iter.next()?;
            for rest in iter {
                primary.absorb(rest);
            }
            Some(primary)
        })
        .collect();

    out.sort_by(|a, b| {
        a.gaa
            .total_cmp(&b.gaa)
            .then(b.gp.cmp(&a.gp))
            .then_with(|| a.name.cmp(&b.name))
    });
    out
}

/// Fixed-width table for the console, at most `limit` rows.
pub fn summary_table(rows: &[GoalieStatRecord], limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<10} {:<3} {:<3} {:<3} {:<3} {:<3} {:<3} {:<5} {:<8}",
        "Name", "Team", "GP", "W", "L", "T", "SO", "GA", "GAA", "Record"
    );
    let _ = writeln!(out, "{}", "-".repeat(80));
    for r in rows.iter().take(limit) {
        let _ = writeln!(
            out,
            "{:<20} {:<10} {:<3} {:<3} {:<3} {:<3} {:<3} {:<3} {:<5.2} {:<8}",
            r.name, r.team, r.gp, r.w, r.l, r.t, r.so, r.ga, r.gaa, r.record()
        );
    }
    if rows.len() > limit {
        let _ = writeln!(out, "... and {} more goalies", rows.len() - limit);
    }
    out
}
