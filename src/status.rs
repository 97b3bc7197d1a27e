// src/status.rs
//! Structured status objects. Degraded runs write one of these instead of a
//! partial artifact, so consumers can tell "season not started" from a real
//! failure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::specs::SeasonCheck;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Active,
    Planning,
    Pending,
    NoData,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Active => "active",
            Status::Planning => "planning",
            Status::Pending => "pending",
            Status::NoData => "no_data",
            Status::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: Status,
    pub message: String,
    pub ready_for_play: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tbd_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusReport {
    fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            ready_for_play: status == Status::Active,
            tbd_count: None,
            valid_count: None,
            error: None,
        }
    }

    pub fn active(message: impl Into<String>) -> Self {
        Self::new(Status::Active, message)
    }

    pub fn pending(message: impl Into<String>) -> Self {
        Self::new(Status::Pending, message)
    }

    pub fn no_data(what: &str) -> Self {
        Self::new(Status::NoData, format!("No {what} found"))
    }

    pub fn error(message: impl Into<String>, err: impl fmt::Display) -> Self {
        Self { error: Some(err.to_string()), ..Self::new(Status::Error, message) }
    }

    /// Planning status carrying the placeholder/valid counts.
    pub fn planning(message: impl Into<String>, check: SeasonCheck) -> Self {
        Self {
            tbd_count: Some(check.placeholder),
            valid_count: Some(check.valid),
            ..Self::new(Status::Planning, message)
        }
    }

    /// Planning when placeholders outnumber valid rows, active otherwise.
    pub fn season(check: SeasonCheck, what: &str) -> Self {
        if check.mostly_placeholder() {
            return Self::planning(
                format!(
                    "Season in planning phase ({} TBD, {} scheduled {what})",
                    check.placeholder, check.valid
                ),
                check,
            );
        }
        Self {
            tbd_count: Some(check.placeholder),
            valid_count: Some(check.valid),
            ..Self::new(Status::Active, format!("Season active ({} {what} scheduled)", check.valid))
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_status_from_counts() {
        let planning = StatusReport::season(SeasonCheck { placeholder: 5, valid: 1 }, "games");
        assert_eq!(planning.status, Status::Planning);
        assert!(!planning.ready_for_play);
        assert_eq!(planning.tbd_count, Some(5));

        let active = StatusReport::season(SeasonCheck { placeholder: 1, valid: 1 }, "games");
        assert!(active.is_active());
        assert!(active.ready_for_play);
    }

    #[test]
    fn statuses_serialize_snake_case_and_skip_empty_fields() {
        let v = serde_json::to_value(StatusReport::no_data("schedule")).unwrap();
        assert_eq!(v["status"], "no_data");
        assert_eq!(v["message"], "No schedule found");
        assert!(v.get("error").is_none());

        let e = serde_json::to_value(StatusReport::error("games table unusable", "boom")).unwrap();
        assert_eq!(e["status"], "error");
        assert_eq!(e["error"], "boom");
    }
}
