// src/config/consts.rs

// Sheets API
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Player (league) spreadsheet ranges
pub const GAMES_RANGE: &str = "games!A2:Z55";
pub const GAME_EVENTS_RANGE: &str = "gameEvents!A1:P100";
pub const GAMES_PLAYED_RANGE: &str = "gamesPlayed!A1:Z1000";
pub const PLAYERS_RANGE: &str = "players!A2:C53";
pub const PLAYERS_SEASON_RANGE: &str = "players!D2:O53";
pub const STANDINGS_RANGE: &str = "standings!A2:L5";

// Game (scoresheet) spreadsheet ranges
pub const GAME_INFO_RANGE: &str = "GameInfo!A2:J2";
pub const HOME_LINEUP_RANGE: &str = "scoresheet!A3:H14";
pub const AWAY_LINEUP_RANGE: &str = "scoresheet!K3:R14";
pub const GOALS_RANGE: &str = "scoresheet!A18:E34";
pub const PENALTIES_RANGE: &str = "scoresheet!F18:J34";

// Environment keys
pub const ENV_PLAYER_SHEET: &str = "PLAYER_SPREADSHEET_ID";
pub const ENV_GAME_SHEET: &str = "GAME_SPREADSHEET_ID";

// Local files
pub const ENV_FILE: &str = "config/environment.env";
pub const DEFAULT_CREDENTIALS: &str = "config/credentials/sheets-credentials.json";
pub const DEFAULT_OUT_DIR: &str = "output";
pub const DEFAULT_LOG_FILE: &str = "output/ops.log";
pub const SNAPSHOT_GAME_SUBDIR: &str = "game";

// Output artifacts
pub const SCHEDULE_FILE: &str = "schedule.json";
pub const SCHEDULE_STATUS_FILE: &str = "schedule_status.json";
pub const GOALIE_STATS_FILE: &str = "goalie_stats.json";
pub const PLAYERS_FILE: &str = "players.json";
pub const PLAYERS_STATUS_FILE: &str = "players_status.json";
pub const STANDINGS_FILE: &str = "standings.json";
pub const ALL_GAMES_FILE: &str = "all_games.json";
pub const GAMES_STATUS_FILE: &str = "games_status.json";
pub const GAME_EVENTS_RAW_FILE: &str = "game_events_raw.json";
pub const SINGLE_GAME_FILE: &str = "game_output.json";

// Schedule defaults
pub const DEFAULT_PLAYED: &str = "N";
pub const GAME_LINK_PREFIX: &str = "/gameSummary/";
pub const LINEUP_STAT_ZERO: &str = "0";
