// src/specs/scoresheet.rs
//! Layouts of a single game's scoresheet spreadsheet.

use super::Schema;

/// `GameInfo!A2:J2`
pub static GAME_INFO: Schema = Schema {
    table: "game info",
    required: &["id", "Date", "Home", "Away", "Time"],
    optional: &["Ref1", "Ref2", "GameLink", "Score", "Played"],
};

/// `scoresheet!A3:H14` (home) and `scoresheet!K3:R14` (away).
pub static LINEUP: Schema = Schema {
    table: "scoresheet lineup",
    required: &["name", "pos", "no", "status", "g", "a", "pts", "pim"],
    optional: &[],
};

/// `scoresheet!A18:E34`
pub static GOALS: Schema = Schema {
    table: "scoresheet goals",
    required: &["Time", "Team", "ScoredBy", "Asst1", "Asst2"],
    optional: &[],
};

/// `scoresheet!F18:J34`
pub static PENALTIES: Schema = Schema {
    table: "scoresheet penalties",
    required: &["Time", "Team", "Player", "Infraction", "Minutes"],
    optional: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::bind;
    use crate::store::DataSet;

    #[test]
    fn lineup_is_exactly_eight_wide() {
        let seven = DataSet::new(vec![cells!["Hasek", "G", "39", "active", "0", "0", "0"]]);
        assert!(bind(&seven, &LINEUP).is_err());

        let nine = DataSet::new(vec![cells!["Hasek", "G", "39", "active", "0", "0", "0", "0", "extra"]]);
        let t = bind(&nine, &LINEUP).unwrap();
        assert_eq!(t.bound_width(), 8);
    }

    #[test]
    fn game_info_optionals_bind_as_far_as_the_row_goes() {
        let ds = DataSet::new(vec![cells!["12", "2024-11-02", "Boston", "New York", "18:30", "Ref A"]]);
        let t = bind(&ds, &GAME_INFO).unwrap();
        let r = t.records().next().unwrap();
        assert!(r.has("Ref1"));
        assert!(!r.has("Played"));
    }
}
