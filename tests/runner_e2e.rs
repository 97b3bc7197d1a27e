// tests/runner_e2e.rs
use std::fs;
use std::path::Path;

use uhl_ops::config::{ConfigInputs, OpsConfig};
use uhl_ops::progress::RecordingProgress;
use uhl_ops::runner::{run, Operation};
use uhl_ops::source::SnapshotSource;
use uhl_ops::status::Status;

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

/// A small league exported sheet by sheet.
fn seed_snapshot(dir: &Path) {
    write(
        dir,
        "games.csv",
        "id,Date,Home,Away,Time,Ref1,Ref2,GameLink,Score,Played\n\
         1,2024-10-01,Chicago,Detroit,19:00,Ref A,Ref B,/gameSummary/0,Chicago 2 - 1 Detroit,Y\n\
         2,2024-10-08,Boston,New York,19:00,Ref C,,,,N\n\
         ,TBD,TBD,TBD,,,,,,\n",
    );
    write(
        dir,
        "gameEvents.csv",
        "id,gameId,eventTime,Team,ScoredBy,Asst1,Asst2,PenaltyPlayer,Infraction,PIM\n\
         1,1,05:00,Chicago,Kane,Toews,,,,\n\
         2,1,07:30,Detroit,,,,Larkin,Tripping,2\n\
         3,1,12:10,Chicago,Toews,,,,,\n\
         4,1,15:45,Detroit,Larkin,Zetterberg,Datsyuk,,,\n",
    );
    write(
        dir,
        "gamesPlayed.csv",
        "id,gameId,Team,name,pos,no,status\n\
         1,1,Chicago,Hasek,G,39,active\n\
         2,1,Chicago,Kane,F,88,active\n\
         3,1,Detroit,Osgood,G,30,active\n\
         4,1,Detroit,Larkin,F,71,active\n\
         5,1,Det.,Typo,D,2,active\n\
         6,2,Boston,Rask,G,40,active\n",
    );
    write(
        dir,
        "players.csv",
        "id,firstName,lastName,Team,JerseyNumber,Position,GP,G,A,PTS,PIM,GWG,id\n\
         1,Dominik,Hasek,Chicago,39,G,1,0,0,0,0,0,1\n\
         2,Patrick,Kane,Chicago,88,F,1,1,0,1,0,0,2\n",
    );
    write(
        dir,
        "standings.csv",
        "id,Team,W,L,T,P,GF,GA,PIM,Home,Away,Streak\n\
         1,Chicago,1,0,0,2,2,1,0,1-0-0,0-0-0,W1\n\
         2,Detroit,0,1,0,0,1,2,2,0-0-0,0-1-0,L1\n",
    );
}

fn config(snapshot: &Path, out: &Path) -> OpsConfig {
    OpsConfig::resolve_with(
        ConfigInputs {
            snapshot: Some(snapshot.to_path_buf()),
            out_dir: Some(out.to_path_buf()),
            ..Default::default()
        },
        |_| None,
        Path::new("does/not/exist.env"),
    )
}

#[test]
fn all_operations_from_a_snapshot() {
    let snap = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    seed_snapshot(snap.path());

    let cfg = config(snap.path(), out.path());
    let source = SnapshotSource::new(snap.path());
    let mut progress = RecordingProgress::default();
    let summary = run(&cfg, Operation::All, Some(&source), &mut progress).unwrap();
    assert!(progress.finished);

    // schedule
    let schedule: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.path().join("schedule.json")).unwrap()).unwrap();
    let games = schedule.as_array().unwrap();
    assert_eq!(games.len(), 2);
    let g1 = &games[0];
    assert_eq!(g1["Goals"].as_array().unwrap().len(), 3);
    assert_eq!(g1["Goals"][2]["id"], 3);
    assert_eq!(g1["Goals"][2]["Asst2"], "Datsyuk");
    assert_eq!(g1["Goals"][1]["Asst1"], serde_json::Value::Null);
    assert_eq!(g1["Penalties"][0]["Player"], "Larkin");
    assert_eq!(g1["Lineups"]["Home"][0]["name"], "Hasek");
    assert_eq!(g1["Lineups"]["Away"].as_array().unwrap().len(), 2);
    assert_eq!(games[1]["Score"], "Boston  -  New York");
    assert_eq!(games[1]["Lineups"]["Home"][0]["id"], 1);

    // goalie stats: only the played game counts
    let goalies: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.path().join("goalie_stats.json")).unwrap()).unwrap();
    let rows = goalies.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Hasek");
    assert_eq!(rows[0]["Record"], "1-0-0");
    assert_eq!(rows[0]["GAA"], 1.0);
    assert_eq!(rows[1]["name"], "Osgood");
    assert_eq!(rows[1]["GA"], 2);

    // players joined with season lines
    let players: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.path().join("players.json")).unwrap()).unwrap();
    assert_eq!(players[1]["lastName"], "Kane");
    assert_eq!(players[1]["seasons"][0]["PTS"], "1");

    // standings
    let standings: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.path().join("standings.json")).unwrap()).unwrap();
    assert_eq!(standings.as_array().unwrap().len(), 2);

    // the games sheet is ten columns wide, too narrow for the season listing
    assert_eq!(summary.status_of(Operation::Games).map(|s| s.status), Some(Status::Pending));
    assert!(out.path().join("games_status.json").is_file());
    assert_eq!(summary.status_of(Operation::Schedule).map(|s| s.status), Some(Status::Active));
    // no game/ subdirectory, so no single-game step
    assert!(summary.status_of(Operation::SingleGame).is_none());
}

#[test]
fn rerunning_overwrites_with_identical_bytes() {
    let snap = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    seed_snapshot(snap.path());

    let cfg = config(snap.path(), out.path());
    let source = SnapshotSource::new(snap.path());
    let mut progress = RecordingProgress::default();

    run(&cfg, Operation::Schedule, Some(&source), &mut progress).unwrap();
    run(&cfg, Operation::GoalieStats, None, &mut progress).unwrap();
    let first = (
        fs::read(out.path().join("schedule.json")).unwrap(),
        fs::read(out.path().join("goalie_stats.json")).unwrap(),
    );

    run(&cfg, Operation::Schedule, Some(&source), &mut progress).unwrap();
    run(&cfg, Operation::GoalieStats, None, &mut progress).unwrap();
    let second = (
        fs::read(out.path().join("schedule.json")).unwrap(),
        fs::read(out.path().join("goalie_stats.json")).unwrap(),
    );

    assert_eq!(first, second);
    let text = String::from_utf8(first.0).unwrap();
    assert!(text.starts_with("[\n    {\n        \"id\": \"1\","));
}

#[test]
fn planning_season_writes_status_instead_of_schedule() {
    let snap = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(
        snap.path(),
        "games.csv",
        "id,Date,Home,Away,Time\n1,TBD,TBD,TBD,TBD\n2,TBD,TBD,TBD,TBD\n3,2024-10-01,Chicago,Detroit,19:00\n",
    );

    let cfg = config(snap.path(), out.path());
    let source = SnapshotSource::new(snap.path());
    let summary = run(&cfg, Operation::Schedule, Some(&source), &mut RecordingProgress::default()).unwrap();

    assert!(!out.path().join("schedule.json").exists());
    let status: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.path().join("schedule_status.json")).unwrap()).unwrap();
    assert_eq!(status["status"], "planning");
    assert_eq!(status["tbd_count"], 2);
    assert_eq!(status["valid_count"], 1);
    assert_eq!(summary.files_written.len(), 1);
}

#[test]
fn single_game_from_scoresheet_snapshot() {
    let snap = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let game_dir = snap.path().join("game");
    fs::create_dir_all(&game_dir).unwrap();

    write(&game_dir, "GameInfo.csv", "id,Date,Home,Away,Time,Ref1,Ref2,GameLink,Score,Played\n12,2024-11-02,Boston,New York,18:30,Ref A,Ref B,,Boston 3 - 2 New York,Y\n");
    let mut sheet = String::from("title\nheader\n");
    sheet.push_str("Rask,G,40,active,0,0,0,0,,,Shesterkin,G,31,active,0,0,0,0\n");
    sheet.push_str("Pastrnak,F,88,active,2,1,3,0,,,Kreider,F,20,active,1,0,1,2\n");
    // rows 5-17; the csv reader skips truly empty lines
    for _ in 0..13 {
        sheet.push_str(",\n");
    }
    // row 18: goals in A-E, penalties in F-J
    sheet.push_str("05:00,Boston,Pastrnak,Marchand,,07:00,New York,Kreider,Hooking,2\n");
    write(&game_dir, "scoresheet.csv", &sheet);

    let cfg = config(snap.path(), out.path());
    let source = SnapshotSource::new(snap.path());
    run(&cfg, Operation::SingleGame, Some(&source), &mut RecordingProgress::default()).unwrap();

    let game: serde_json::Value = serde_json::from_str(&fs::read_to_string(out.path().join("game_output.json")).unwrap()).unwrap();
    assert_eq!(game["id"], "12");
    assert_eq!(game["Lineups"]["Home"][1]["pts"], "3");
    assert_eq!(game["Lineups"]["Away"][0]["name"], "Shesterkin");
    assert_eq!(game["Goals"][0]["ScoredBy"], "Pastrnak");
    assert_eq!(game["Penalties"][0]["Infraction"], "Hooking");
}
