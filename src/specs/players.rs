// src/specs/players.rs
//! Player identities (`players!A2:C53`) and their season lines
//! (`players!D2:O53`), joined by player id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Record, Schema};

pub static PLAYERS: Schema = Schema {
    table: "players",
    required: &["id", "firstName", "lastName"],
    optional: &[],
};

pub static SEASON_STATS: Schema = Schema {
    table: "season stats",
    required: &["Team", "JerseyNumber", "Position", "GP", "G", "A", "PTS", "PIM", "GWG", "id"],
    optional: &[],
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub seasons: Vec<SeasonLine>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonLine {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "JerseyNumber")]
    pub jersey_number: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "GP")]
    pub gp: String,
    #[serde(rename = "G")]
    pub g: String,
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "PTS")]
    pub pts: String,
    #[serde(rename = "PIM")]
    pub pim: String,
    #[serde(rename = "GWG")]
    pub gwg: String,
    pub id: String,
}

impl Player {
    /// Needs both names; the id may be blank.
    pub fn from_record(r: &Record<'_>) -> Option<Self> {
        Some(Self {
            id: s!(r.get("id")),
            first_name: s!(r.non_empty("firstName")?),
            last_name: s!(r.non_empty("lastName")?),
            seasons: Vec::new(),
        })
    }
}

impl SeasonLine {
    /// Needs a team and a position.
    pub fn from_record(r: &Record<'_>) -> Option<Self> {
        Some(Self {
            team: s!(r.non_empty("Team")?),
            jersey_number: s!(r.get("JerseyNumber")),
            position: s!(r.non_empty("Position")?),
            gp: s!(r.get("GP")),
            g: s!(r.get("G")),
            a: s!(r.get("A")),
            pts: s!(r.get("PTS")),
            pim: s!(r.get("PIM")),
            gwg: s!(r.get("GWG")),
            id: s!(r.get("id")),
        })
    }
}

/// Attach each season line to the player with the same id, keeping the
/// players' order and each player's season lines in source order.
pub fn join(players: Vec<Player>, seasons: Vec<SeasonLine>) -> Vec<Player> {
    let mut by_id: HashMap<String, Vec<SeasonLine>> = HashMap::new();
    for line in seasons {
        by_id.entry(line.id.clone()).or_default().push(line);
    }
    players
        .into_iter()
        .map(|mut p| {
            p.seasons = by_id.remove(&p.id).unwrap_or_default();
            p
        })
        .collect()
}
