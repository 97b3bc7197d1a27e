// src/source/sheets.rs
//! Live reads through the Sheets v4 `values` endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use super::{Book, TableSource};
use crate::config::consts::{HTTP_TIMEOUT_SECS, SHEETS_API_BASE};
use crate::config::Credentials;
use crate::error::{OpsError, Result};
use crate::store::DataSet;

#[derive(Clone, Debug)]
enum Auth {
    ApiKey(String),
    Bearer(String),
}

pub struct SheetsSource {
    client: Client,
    auth: Auth,
    base: String,
    player_sheet: Option<String>,
    game_sheet: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsSource {
    pub fn new(creds: Credentials, player_sheet: Option<String>, game_sheet: Option<String>) -> Result<Self> {
        let auth = match (creds.access_token, creds.api_key) {
            (Some(token), _) => Auth::Bearer(token),
            (None, Some(key)) => Auth::ApiKey(key),
            (None, None) => return Err(OpsError::Config(s!("no api_key or access_token"))),
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, auth, base: s!(SHEETS_API_BASE), player_sheet, game_sheet })
    }

    fn sheet_id(&self, book: Book) -> Result<&str> {
        let (id, what) = match book {
            Book::Player => (&self.player_sheet, "player"),
            Book::Game => (&self.game_sheet, "game"),
        };
        id.as_deref()
            .ok_or_else(|| OpsError::Config(format!("{what} spreadsheet id not provided")))
    }

    fn url(&self, sheet_id: &str, range: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base)
            .map_err(|e| OpsError::Config(format!("bad Sheets API base {}: {e}", self.base)))?;
        url.path_segments_mut()
            .map_err(|_| OpsError::Config(format!("bad Sheets API base {}", self.base)))?
            .extend([sheet_id, "values", range]);
        if let Auth::ApiKey(key) = &self.auth {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }
}

impl TableSource for SheetsSource {
    fn fetch(&self, book: Book, range: &str) -> Result<DataSet> {
        let url = self.url(self.sheet_id(book)?, range)?;

        let mut req = self.client.get(url);
        if let Auth::Bearer(token) = &self.auth {
            req = req.bearer_auth(token);
        }
        let response = req.send().map_err(|e| OpsError::SourceUnavailable {
            range: s!(range),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpsError::SourceUnavailable { range: s!(range), reason: format!("HTTP {status}") });
        }

        let body: ValueRange = response.json()?;
        Ok(DataSet::new(body.values.into_iter().map(stringify_row).collect()))
    }
}

fn stringify_row(row: Vec<Value>) -> Vec<String> {
    row.into_iter()
        .map(|v| match v {
            Value::String(s) => s,
            Value::Null => s!(),
            other => other.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(creds: Credentials) -> SheetsSource {
        SheetsSource::new(creds, Some(s!("PLAYER")), None).unwrap()
    }

    #[test]
    fn api_key_goes_in_the_query() {
        let src = source(Credentials { api_key: Some(s!("k1")), access_token: None });
        let url = src.url("PLAYER", "games!A2:Z55").unwrap();
        assert!(url.as_str().starts_with("https://sheets.googleapis.com/v4/spreadsheets/PLAYER/values/games"));
        assert_eq!(url.query(), Some("key=k1"));
    }

    #[test]
    fn token_auth_leaves_query_empty() {
        let src = source(Credentials { api_key: Some(s!("k1")), access_token: Some(s!("t")) });
        assert_eq!(src.url("PLAYER", "players").unwrap().query(), None);
    }

    #[test]
    fn game_book_without_id_is_a_config_error() {
        let src = source(Credentials { api_key: Some(s!("k1")), access_token: None });
        assert!(src.fetch(Book::Game, "GameInfo!A2:J2").unwrap_err().is_fatal());
    }

    #[test]
    fn cells_become_text() {
        let row = vec![Value::from("Chicago"), Value::from(3), Value::Null, Value::Bool(true)];
        assert_eq!(stringify_row(row), cells!["Chicago", "3", "", "true"]);
    }

    #[test]
    fn missing_values_means_empty() {
        let body: ValueRange = serde_json::from_str(r#"{"range":"games!A2:Z55","majorDimension":"ROWS"}"#).unwrap();
        assert!(body.values.is_empty());
    }
}
