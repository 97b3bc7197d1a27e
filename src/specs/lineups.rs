// src/specs/lineups.rs
use super::{Record, Schema};
use crate::error::Result;

/// `gamesPlayed!A1:Z1000`: one row per player per game.
pub static LINEUPS: Schema = Schema {
    table: "lineups",
    required: &["id", "gameId", "Team", "name", "pos", "no", "status"],
    optional: &[],
};

/// A lineup row before it is assigned to a side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineupRow {
    pub game_id: String,
    pub team: String,
    pub name: String,
    pub pos: String,
    pub no: String,
    pub status: String,
}

impl LineupRow {
    pub fn from_record(r: &Record<'_>) -> Result<Self> {
        Ok(Self {
            game_id: s!(r.require("gameId")?),
            team: s!(r.require("Team")?),
            name: s!(r.get("name")),
            pos: s!(r.get("pos")),
            no: s!(r.get("no")),
            status: s!(r.get("status")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::bind;
    use crate::store::DataSet;

    #[test]
    fn team_and_game_are_required() {
        let ds = DataSet::new(vec![
            cells!["id", "gameId", "Team", "name", "pos", "no", "status"],
            cells!["1", "4", "Chicago", "Hasek", "G", "39", "active"],
            cells!["2", "4", "", "Nobody", "D", "2", "active"],
        ]);
        let t = bind(&ds, &LINEUPS).unwrap();
        let rows: Vec<_> = t.records().map(|r| LineupRow::from_record(&r)).collect();
        assert_eq!(rows[0].as_ref().unwrap().pos, "G");
        assert!(rows[1].is_err());
    }
}
