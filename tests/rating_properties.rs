//! Property-based tests for the team Elo calculator and team splitter

use chrono::Utc;
use football_elo::matchmaking::{RandomTeamSplitter, TeamSplitter};
use football_elo::rating::{RatingCalculator, TeamEloCalculator};
use football_elo::types::{Player, Team};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn build_team(prefix: &str, ratings: &[f64]) -> Vec<Player> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, rating)| Player {
            id: i as i64 + 1,
            name: format!("{}{}", prefix, i),
            rating: *rating,
            created_at: Utc::now(),
        })
        .collect()
}

fn team_ratings() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(500.0f64..2500.0, 1..=6)
}

proptest! {
    #[test]
    fn test_draw_never_moves_ratings(
        yellow in team_ratings(),
        white in team_ratings(),
        score in 0u32..10,
    ) {
        let calculator = TeamEloCalculator::default();
        let result = calculator
            .calculate_rating_changes(&build_team("y", &yellow), &build_team("w", &white), score, score)
            .unwrap();

        prop_assert_eq!(result.multiplier, 0.0);
        for change in &result.changes {
            prop_assert_eq!(change.delta, 0.0);
            prop_assert_eq!(change.new_rating, change.old_rating);
        }
    }

    #[test]
    fn test_team_expectations_sum_to_one(a in -1000.0f64..4000.0, b in -1000.0f64..4000.0) {
        let calculator = TeamEloCalculator::default();
        let (yellow, white) = calculator.team_expectations(a, b);
        prop_assert!((yellow + white - 1.0).abs() < 1e-9);
        prop_assert!(yellow > 0.0 && yellow < 1.0);
    }

    #[test]
    fn test_winners_gain_and_losers_lose(
        yellow in team_ratings(),
        white in team_ratings(),
        winner_score in 1u32..10,
        loser_score in 0u32..10,
    ) {
        prop_assume!(winner_score > loser_score);

        let calculator = TeamEloCalculator::default();
        let result = calculator
            .calculate_rating_changes(
                &build_team("y", &yellow),
                &build_team("w", &white),
                winner_score,
                loser_score,
            )
            .unwrap();

        prop_assert_eq!(result.changes.len(), yellow.len() + white.len());
        for change in &result.changes {
            match change.team {
                Team::Yellow => prop_assert!(change.delta > 0.0),
                Team::White => prop_assert!(change.delta < 0.0),
            }
            prop_assert!((change.new_rating - change.old_rating - change.delta).abs() < 1e-9);
        }
    }

    #[test]
    fn test_multiplier_grows_with_margin(
        a in 500.0f64..2500.0,
        b in 500.0f64..2500.0,
        margin in 1u32..20,
    ) {
        let calculator = TeamEloCalculator::default();
        prop_assert!(
            calculator.margin_multiplier(margin + 1, a, b) > calculator.margin_multiplier(margin, a, b)
        );
    }

    #[test]
    fn test_split_sizes_and_members(count in 0usize..40, seed in any::<u64>()) {
        let names: Vec<String> = (0..count).map(|i| format!("player{}", i)).collect();
        let split = RandomTeamSplitter::new()
            .split_with_rng(names.clone(), &mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(split.yellow.len(), count / 2);
        prop_assert_eq!(split.white.len(), count - count / 2);

        let mut all: Vec<String> = split.yellow.into_iter().chain(split.white).collect();
        all.sort();
        let mut expected = names;
        expected.sort();
        prop_assert_eq!(all, expected);
    }

    #[test]
    fn test_seeded_splitter_is_deterministic(count in 2usize..20, seed in any::<u64>()) {
        let names: Vec<String> = (0..count).map(|i| format!("player{}", i)).collect();
        let splitter = RandomTeamSplitter::with_seed(seed);
        prop_assert_eq!(splitter.split(names.clone()), splitter.split(names));
    }
}
