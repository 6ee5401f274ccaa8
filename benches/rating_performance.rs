//! Performance benchmarks for rating calculations

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use football_elo::matchmaking::RandomTeamSplitter;
use football_elo::rating::{RatingCalculator, SqliteRatingStorage, TeamEloCalculator};
use football_elo::types::{MatchReport, Player};
use football_elo::EloLedger;

fn create_bench_team(prefix: &str, size: usize, base: f64) -> Vec<Player> {
    (0..size)
        .map(|i| Player {
            id: i as i64,
            name: format!("{}{}", prefix, i),
            rating: base + i as f64 * 25.0,
            created_at: Utc::now(),
        })
        .collect()
}

fn create_bench_ledger(players_per_team: usize) -> EloLedger {
    let ledger = EloLedger::new(
        SqliteRatingStorage::open_in_memory().unwrap(),
        TeamEloCalculator::default(),
        1000.0,
    )
    .with_splitter(Box::new(RandomTeamSplitter::with_seed(1)));

    for i in 0..players_per_team {
        ledger.add_player(&format!("y{}", i), None).unwrap();
        ledger.add_player(&format!("w{}", i), None).unwrap();
    }
    ledger
}

fn bench_rating_calculations(c: &mut Criterion) {
    let calculator = TeamEloCalculator::default();

    let yellow = create_bench_team("y", 1, 1000.0);
    let white = create_bench_team("w", 1, 1000.0);
    c.bench_function("rating_1v1", |b| {
        b.iter(|| {
            calculator
                .calculate_rating_changes(black_box(&yellow), black_box(&white), 3, 0)
                .unwrap()
        })
    });

    let yellow = create_bench_team("y", 11, 1100.0);
    let white = create_bench_team("w", 11, 950.0);
    c.bench_function("rating_11v11", |b| {
        b.iter(|| {
            calculator
                .calculate_rating_changes(black_box(&yellow), black_box(&white), 2, 5)
                .unwrap()
        })
    });
}

fn bench_record_match(c: &mut Criterion) {
    let mut ledger = create_bench_ledger(5);
    let yellow: Vec<String> = (0..5).map(|i| format!("y{}", i)).collect();
    let white: Vec<String> = (0..5).map(|i| format!("w{}", i)).collect();

    c.bench_function("record_match_5v5_in_memory", |b| {
        b.iter(|| {
            let report = MatchReport::new(yellow.clone(), white.clone(), 4, 3);
            ledger.record_match(black_box(report)).unwrap()
        })
    });
}

fn bench_auto_match(c: &mut Criterion) {
    let ledger = create_bench_ledger(0);
    let names: Vec<String> = (0..22).map(|i| format!("player{}", i)).collect();

    c.bench_function("auto_match_22_players", |b| {
        b.iter(|| ledger.auto_match(black_box(names.clone())))
    });
}

criterion_group!(
    benches,
    bench_rating_calculations,
    bench_record_match,
    bench_auto_match
);
criterion_main!(benches);
