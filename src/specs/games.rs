// src/specs/games.rs
use serde::{Deserialize, Serialize};

use super::{Record, Schema};
use crate::core::sanitize::contains_tbd;

/// `games!A2:Z55`: one row per scheduled game.
pub static GAMES: Schema = Schema {
    table: "games",
    required: &["id", "Date", "Home", "Away", "Time"],
    optional: &["Ref1", "Ref2", "GameLink", "Score", "Played", "HomeScore", "AwayScore"],
};

/// The season-wide games layout read by the `games` operation.
pub static SEASON_GAMES: Schema = Schema {
    table: "season games",
    required: &[
        "SeasonId", "id", "Date", "Time", "Home", "Away",
        "HomeTeam", "AwayTeam", "HomeScore", "AwayScore", "Ref1", "Ref2",
    ],
    optional: &[],
};

/// One row of the season games listing, passed through as text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonGame {
    #[serde(rename = "SeasonId")]
    pub season_id: String,
    pub id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Home")]
    pub home: String,
    #[serde(rename = "Away")]
    pub away: String,
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
    #[serde(rename = "HomeScore")]
    pub home_score: String,
    #[serde(rename = "AwayScore")]
    pub away_score: String,
    #[serde(rename = "Ref1")]
    pub ref1: String,
    #[serde(rename = "Ref2")]
    pub ref2: String,
}

impl SeasonGame {
    /// `None` for rows that are not a real game yet: blank date or teams,
    /// or a `TBD` date.
    pub fn from_record(r: &Record<'_>) -> Option<Self> {
        let (date, home, away) = (r.get("Date"), r.get("Home"), r.get("Away"));
        if date.is_empty() || home.is_empty() || away.is_empty() || contains_tbd(date) {
            return None;
        }
        Some(Self {
            season_id: s!(r.get("SeasonId")),
            id: s!(r.get("id")),
            date: s!(date),
            time: s!(r.get("Time")),
            home: s!(home),
            away: s!(away),
            home_team: s!(r.get("HomeTeam")),
            away_team: s!(r.get("AwayTeam")),
            home_score: s!(r.get("HomeScore")),
            away_score: s!(r.get("AwayScore")),
            ref1: s!(r.get("Ref1")),
            ref2: s!(r.get("Ref2")),
        })
    }
}
