// src/schedule/mod.rs
//! The `schedule.json` model: one denormalized record per game with its
//! lineups and classified events embedded.
//!
//! Field order here is the field order on disk.

pub mod builder;
pub mod score;

use serde::{Deserialize, Serialize};

pub use builder::{build, build_single, BuildOutcome, BuildReport, BuiltSchedule};
pub use score::{parse_score, synthesize_score, PlayedFlag};

pub type Schedule = Vec<Game>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "Home", default)]
    pub home: String,
    #[serde(rename = "Away", default)]
    pub away: String,
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "Ref1", default)]
    pub ref1: String,
    #[serde(rename = "Ref2", default)]
    pub ref2: String,
    #[serde(rename = "GameLink", default)]
    pub game_link: String,
    #[serde(rename = "Score", default)]
    pub score: String,
    #[serde(rename = "Played", default)]
    pub played: String,
    #[serde(rename = "Lineups", default)]
    pub lineups: Lineups,
    #[serde(rename = "Goals", default)]
    pub goals: Vec<Goal>,
    #[serde(rename = "Penalties", default)]
    pub penalties: Vec<Penalty>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineups {
    #[serde(rename = "Home", default)]
    pub home: Vec<LineupEntry>,
    #[serde(rename = "Away", default)]
    pub away: Vec<LineupEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupEntry {
    pub id: u32,
    pub name: String,
    pub pos: String,
    pub no: String,
    pub status: String,
    pub g: String,
    pub a: String,
    pub pts: String,
    pub pim: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default)]
    pub id: u32,
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "Team", default)]
    pub team: String,
    #[serde(rename = "ScoredBy", default)]
    pub scored_by: String,
    #[serde(rename = "Asst1", default)]
    pub asst1: Option<String>,
    #[serde(rename = "Asst2", default)]
    pub asst2: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penalty {
    #[serde(default)]
    pub id: u32,
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "Team", default)]
    pub team: String,
    #[serde(rename = "Player", default)]
    pub player: String,
    #[serde(rename = "Infraction", default)]
    pub infraction: String,
    #[serde(rename = "Minutes", default)]
    pub minutes: String,
}

impl Game {
    pub fn is_played(&self) -> bool {
        PlayedFlag::parse(&self.played).is_played()
    }
}
