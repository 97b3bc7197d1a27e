// benches/schedule.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use uhl_ops::goalies;
use uhl_ops::schedule::{self, BuildOutcome};
use uhl_ops::specs::{bind, events::EVENTS, games::GAMES, lineups::LINEUPS, MappedTable};
use uhl_ops::store::DataSet;

const TEAMS: [&str; 4] = ["Chicago", "Detroit", "Boston", "New York"];

/// A full synthetic season: 54 games, ~20 events and 12 lineup rows each.
fn season() -> (MappedTable, MappedTable, MappedTable) {
    let mut games = Vec::new();
    let mut events = Vec::new();
    let mut lineups = Vec::new();

    for id in 1..=54usize {
        let home = TEAMS[id % 4];
        let away = TEAMS[(id + 1) % 4];
        let (hs, as_) = (id % 5, (id * 3) % 4);
        games.push(vec![
            id.to_string(),
            format!("2024-10-{:02}", id % 28 + 1),
            home.to_string(),
            away.to_string(),
            "19:00".to_string(),
            "Ref A".to_string(),
            "Ref B".to_string(),
            String::new(),
            format!("{home} {hs} - {as_} {away}"),
            if id < 40 { "Y" } else { "N" }.to_string(),
        ]);

        for e in 0..20 {
            let team = if e % 2 == 0 { home } else { away };
            let tail: [String; 6] = if e % 3 == 0 {
                [String::new(), String::new(), String::new(), format!("P{e}"), "Hooking".into(), "2".into()]
            } else {
                [format!("S{e}"), "A1".into(), String::new(), String::new(), String::new(), String::new()]
            };
            let mut cells = vec![events.len().to_string(), id.to_string(), format!("{e:02}:00"), team.to_string()];
            cells.extend(tail);
            events.push(cells);
        }

        for (side, team) in [home, away].into_iter().enumerate() {
            for n in 0..6 {
                let pos = if n == 0 { "G" } else { "F" };
                lineups.push(vec![
                    lineups.len().to_string(),
                    id.to_string(),
                    team.to_string(),
                    format!("{team} {side}{n}"),
                    pos.to_string(),
                    n.to_string(),
                    "active".to_string(),
                ]);
            }
        }
    }

    (
        bind(&DataSet::new(games), &GAMES).unwrap(),
        bind(&DataSet::new(events), &EVENTS).unwrap(),
        bind(&DataSet::new(lineups), &LINEUPS).unwrap(),
    )
}

fn bench_schedule(c: &mut Criterion) {
    let (games, events, lineups) = season();

    c.bench_function("schedule_build", |b| {
        b.iter(|| {
            let out = schedule::build(black_box(&games), black_box(&events), black_box(&lineups));
            black_box(matches!(out, BuildOutcome::Built(_)))
        })
    });

    let BuildOutcome::Built(built) = schedule::build(&games, &events, &lineups) else {
        panic!("synthetic season should build");
    };

    c.bench_function("goalie_aggregate", |b| {
        b.iter(|| black_box(goalies::aggregate(black_box(&built.games)).len()))
    });

    c.bench_function("goalie_present", |b| {
        b.iter(|| black_box(goalies::present(goalies::aggregate(black_box(&built.games))).len()))
    });
}

criterion_group!(benches, bench_schedule);
criterion_main!(benches);
