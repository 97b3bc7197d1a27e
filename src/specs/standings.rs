// src/specs/standings.rs
use serde::{Deserialize, Serialize};

use super::{Record, Schema};

/// `standings!A2:L5`
pub static STANDINGS: Schema = Schema {
    table: "standings",
    required: &["id", "Team", "W", "L", "T", "P", "GF", "GA", "PIM", "Home", "Away", "Streak"],
    optional: &[],
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "W")]
    pub w: String,
    #[serde(rename = "L")]
    pub l: String,
    #[serde(rename = "T")]
    pub t: String,
    #[serde(rename = "P")]
    pub p: String,
    #[serde(rename = "GF")]
    pub gf: String,
    #[serde(rename = "GA")]
    pub ga: String,
    #[serde(rename = "PIM")]
    pub pim: String,
    #[serde(rename = "Home")]
    pub home: String,
    #[serde(rename = "Away")]
    pub away: String,
    #[serde(rename = "Streak")]
    pub streak: String,
}

impl Standing {
    /// Rows without a team name are not standings.
    pub fn from_record(r: &Record<'_>) -> Option<Self> {
        let team = r.non_empty("Team")?;
        Some(Self {
            id: s!(r.get("id")),
            team: s!(team),
            w: s!(r.get("W")),
            l: s!(r.get("L")),
            t: s!(r.get("T")),
            p: s!(r.get("P")),
            gf: s!(r.get("GF")),
            ga: s!(r.get("GA")),
            pim: s!(r.get("PIM")),
            home: s!(r.get("Home")),
            away: s!(r.get("Away")),
            streak: s!(r.get("Streak")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::bind;
    use crate::store::DataSet;

    #[test]
    fn twelve_columns_required() {
        let short = DataSet::new(vec![cells!["1", "Chicago", "3", "1"]]);
        assert!(bind(&short, &STANDINGS).is_err());

        let ds = DataSet::new(vec![cells!["1", "Chicago", "3", "1", "0", "6", "12", "5", "20", "2-0-0", "1-1-0", "W2"]]);
        let t = bind(&ds, &STANDINGS).unwrap();
        let row = Standing::from_record(&t.records().next().unwrap()).unwrap();
        assert_eq!(row.team, "Chicago");
        assert_eq!(row.streak, "W2");
    }
}
