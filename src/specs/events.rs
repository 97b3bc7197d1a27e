// src/specs/events.rs
//! Game events arrive as one generic row shape. They are classified exactly
//! once, here, into [`GameEvent::Goal`] or [`GameEvent::Penalty`]; nothing
//! downstream looks at the raw columns again.

use super::{MappedTable, Record, Schema};
use crate::error::{OpsError, Result};

/// `gameEvents!A1:P100`
pub static EVENTS: Schema = Schema {
    table: "game events",
    required: &[
        "id", "gameId", "eventTime", "Team", "ScoredBy",
        "Asst1", "Asst2", "PenaltyPlayer", "Infraction", "PIM",
    ],
    optional: &[],
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Goal {
        time: String,
        team: String,
        scored_by: String,
        asst1: Option<String>,
        asst2: Option<String>,
    },
    Penalty {
        time: String,
        team: String,
        player: String,
        infraction: String,
        minutes: String,
    },
}

/// A classified event still tagged with the game it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRow {
    pub game_id: String,
    pub event: GameEvent,
}

/// Everything the events table yielded, plus what it could not place.
#[derive(Clone, Debug, Default)]
pub struct IngestedEvents {
    pub rows: Vec<EventRow>,
    pub unclassified: usize,
    pub skipped: usize,
}

/// Goal when `ScoredBy` is set; penalty when both `PenaltyPlayer` and
/// `Infraction` are set. A row carrying both is a goal.
pub fn classify(r: &Record<'_>) -> Result<Option<EventRow>> {
    let game_id = r.require("gameId")?;
    let time = s!(r.get("eventTime"));
    let team = s!(r.get("Team"));

    let penalty_player = r.non_empty("PenaltyPlayer");
    let infraction = r.non_empty("Infraction");

    let event = if let Some(scorer) = r.non_empty("ScoredBy") {
        if penalty_player.is_some() || infraction.is_some() {
            logw!(
                "game events row {}: both scorer and penalty fields set; recorded as a goal",
                r.row
            );
        }
        GameEvent::Goal {
            time,
            team,
            scored_by: s!(scorer),
            asst1: r.non_empty("Asst1").map(String::from),
            asst2: r.non_empty("Asst2").map(String::from),
        }
    } else if let (Some(player), Some(infraction)) = (penalty_player, infraction) {
        GameEvent::Penalty {
            time,
            team,
            player: s!(player),
            infraction: s!(infraction),
            minutes: s!(r.get("PIM")),
        }
    } else {
        return Ok(None);
    };

    Ok(Some(EventRow { game_id: s!(game_id), event }))
}

/// Classify every row of a bound events table.
pub fn ingest(table: &MappedTable) -> IngestedEvents {
    let mut out = IngestedEvents::default();
    for r in table.records() {
        match classify(&r) {
            Ok(Some(row)) => out.rows.push(row),
            Ok(None) => {
                logd!("game events row {}: neither goal nor penalty", r.row);
                out.unclassified += 1;
            }
            Err(e @ OpsError::RowProcessing { .. }) => {
                logd!("{e}; skipped");
                out.skipped += 1;
            }
            Err(e) => {
                loge!("{e}");
                out.skipped += 1;
            }
        }
    }
    out
}
