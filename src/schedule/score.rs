// src/schedule/score.rs
use crate::core::sanitize::{leading_digits, trailing_digits};

const SCORE_SEPARATOR: &str = " - ";

/// `"Chicago 2 - 1 Detroit"` → `(2, 1)`.
///
/// The home score is the trailing digit run of the home part's last token,
/// the away score the leading digit run of the away part's first token.
/// Anything unparseable is `(0, 0)`.
pub fn parse_score(text: &str) -> (u32, u32) {
    let mut parts = text.split(SCORE_SEPARATOR);
    let (Some(home_part), Some(away_part)) = (parts.next(), parts.next()) else {
        return (0, 0);
    };

    let home = home_part
        .split_whitespace()
        .last()
        .and_then(|tok| trailing_digits(tok).parse::<u32>().ok());
    let away = away_part
        .split_whitespace()
        .next()
        .and_then(|tok| leading_digits(tok).parse::<u32>().ok());

    match (home, away) {
        (Some(h), Some(a)) => (h, a),
        _ => (0, 0),
    }
}

/// Score text for a game whose sheet left it blank. Without both scores the
/// numbers are simply omitted, keeping the double spaces.
pub fn synthesize_score(home: &str, away: &str, home_score: Option<u32>, away_score: Option<u32>) -> String {
    match (home_score, away_score) {
        (Some(h), Some(a)) => format!("{home} {h}{SCORE_SEPARATOR}{a} {away}"),
        _ => format!("{home} {SCORE_SEPARATOR} {away}"),
    }
}

/// Canonical reading of the `Played` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayedFlag {
    Played,
    NotPlayed,
}

impl PlayedFlag {
    /// `y`, `yes`, `true` or `1` in any case; everything else is not played.
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => PlayedFlag::Played,
            _ => PlayedFlag::NotPlayed,
        }
    }

    pub fn is_played(self) -> bool {
        self == PlayedFlag::Played
    }
}
