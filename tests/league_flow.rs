//! Integration tests for the table-league crate
//!
//! These tests exercise the whole pipeline working together: registration
//! with rating bootstrap, match validation, rating updates, standings,
//! recent results, and concurrent submissions.

use std::sync::Arc;
use table_league::config::RatingSettings;
use table_league::league::LeagueManager;
use table_league::types::{Mode, PlayerId};

fn create_league() -> LeagueManager {
    LeagueManager::new(&RatingSettings::default()).unwrap()
}

#[test]
fn test_even_solo_match_swings_symmetrically() {
    let league = create_league();
    let a = league.register_player("a").unwrap();
    let b = league.register_player("b").unwrap();

    league.record_solo_game(a.id, b.id, 10, 3, false).unwrap();

    let winner = league.rating(a.id, Mode::Solo).unwrap();
    let loser = league.rating(b.id, Mode::Solo).unwrap();

    // Exactly one side gains and one loses
    assert!(winner.mu > 25.0);
    assert!(loser.mu < 25.0);
    // Both priors were identical, so the swing is symmetric
    assert!(((winner.mu - 25.0) - (25.0 - loser.mu)).abs() < 1e-9);
    // Both uncertainties strictly decrease
    assert!(winner.sigma < 8.3);
    assert!(loser.sigma < 8.3);
}

#[test]
fn test_shutout_team_game_example() {
    let league = create_league();
    let a = league.register_player("a").unwrap();
    let b = league.register_player("b").unwrap();
    let c = league.register_player("c").unwrap();
    let d = league.register_player("d").unwrap();

    league
        .record_team_game([a.id, b.id], [c.id, d.id], 10, 0, true)
        .unwrap();

    for winner in [a.id, b.id] {
        assert!(league.rating(winner, Mode::Team).unwrap().mu > 25.0);
    }
    for loser in [c.id, d.id] {
        assert!(league.rating(loser, Mode::Team).unwrap().mu < 25.0);
    }

    // Second game pairs b (one game played, sigma already shrunk) with a
    // fresh registrant, so the teammates' uncertainties differ
    let e = league.register_player("e").unwrap();
    let b_team = league.rating(b.id, Mode::Team).unwrap();
    let e_team = league.rating(e.id, Mode::Team).unwrap();
    assert!(b_team.sigma < e_team.sigma);

    let before_b = b_team.mu;
    let before_e = e_team.mu;
    league
        .record_team_game([b.id, e.id], [c.id, d.id], 10, 5, false)
        .unwrap();

    // The fresher player (higher sigma) absorbs the larger share
    let gain_b = league.rating(b.id, Mode::Team).unwrap().mu - before_b;
    let gain_e = league.rating(e.id, Mode::Team).unwrap().mu - before_e;
    assert!(gain_b > 0.0 && gain_e > 0.0);
    assert!(gain_e > gain_b);
}

#[test]
fn test_solo_and_team_tracks_are_independent() {
    let league = create_league();
    let a = league.register_player("a").unwrap();
    let b = league.register_player("b").unwrap();
    let c = league.register_player("c").unwrap();
    let d = league.register_player("d").unwrap();

    league.record_solo_game(a.id, b.id, 10, 1, false).unwrap();
    league
        .record_team_game([a.id, c.id], [b.id, d.id], 2, 10, false)
        .unwrap();

    let solo = league.rating(a.id, Mode::Solo).unwrap();
    let team = league.rating(a.id, Mode::Team).unwrap();

    // a won solo but lost the team game; the tracks diverge
    assert!(solo.mu > 25.0);
    assert!(team.mu < 25.0);
}

#[test]
fn test_replaying_identical_history_is_deterministic() {
    let settings = RatingSettings::default();

    let play = || {
        let league = LeagueManager::new(&settings).unwrap();
        let a = league.register_player("a").unwrap();
        let b = league.register_player("b").unwrap();
        league.record_solo_game(a.id, b.id, 10, 3, false).unwrap();
        league.record_solo_game(b.id, a.id, 10, 8, true).unwrap();
        league.record_solo_game(a.id, b.id, 10, 9, false).unwrap();
        let a = league.rating(a.id, Mode::Solo).unwrap();
        let b = league.rating(b.id, Mode::Solo).unwrap();
        (a, b)
    };

    assert_eq!(play(), play());
}

#[test]
fn test_standings_and_recent_results() {
    let league = create_league();
    let names = ["dana", "alex", "blake", "casey"];
    let ids: Vec<PlayerId> = names
        .iter()
        .map(|n| league.register_player(n).unwrap().id)
        .collect();

    league
        .record_solo_game(ids[0], ids[1], 10, 4, false)
        .unwrap();
    league
        .record_solo_game(ids[0], ids[2], 10, 6, false)
        .unwrap();
    league
        .record_solo_game(ids[3], ids[0], 10, 9, false)
        .unwrap();

    let standings = league.standings(Mode::Solo, 3).unwrap();
    assert_eq!(standings.len(), 3);
    for pair in standings.windows(2) {
        assert!(pair[0].rating.mu >= pair[1].rating.mu);
    }

    let recent = league.recent_solo_games(2).unwrap();
    assert_eq!(recent.len(), 2);
    // Newest first: the last game recorded involved casey beating dana
    assert_eq!(recent[0].blue, "casey");
    assert_eq!(recent[0].red, "dana");
    assert!(recent[0].created_at >= recent[1].created_at);

    // The full player list stays name-ordered
    let players: Vec<String> = league
        .players()
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(players, vec!["alex", "blake", "casey", "dana"]);
}

#[test]
fn test_rejected_submissions_mutate_nothing() {
    let league = create_league();
    let a = league.register_player("a").unwrap();
    let b = league.register_player("b").unwrap();
    let c = league.register_player("c").unwrap();
    let d = league.register_player("d").unwrap();

    assert!(league.record_solo_game(a.id, a.id, 10, 3, false).is_err());
    assert!(league.record_solo_game(a.id, b.id, 7, 7, false).is_err());
    assert!(league
        .record_team_game([a.id, b.id], [a.id, c.id], 10, 3, false)
        .is_err());
    assert!(league
        .record_team_game([a.id, b.id], [c.id, d.id], 5, 5, false)
        .is_err());

    for id in [a.id, b.id, c.id, d.id] {
        assert_eq!(league.rating(id, Mode::Solo).unwrap().mu, 25.0);
        assert_eq!(league.rating(id, Mode::Team).unwrap().mu, 25.0);
    }
    assert!(league.recent_solo_games(10).unwrap().is_empty());
    assert!(league.recent_team_games(10).unwrap().is_empty());
}

#[test]
fn test_concurrent_submissions_sharing_a_player() {
    let league = Arc::new(create_league());
    let champ = league.register_player("champ").unwrap();

    let opponents: Vec<PlayerId> = (0..16)
        .map(|i| league.register_player(&format!("p{i}")).unwrap().id)
        .collect();

    let handles: Vec<_> = opponents
        .iter()
        .map(|&opponent| {
            let league = league.clone();
            let champ = champ.id;
            std::thread::spawn(move || league.record_solo_game(champ, opponent, 10, 3, false))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    // Every game was applied: the champ won 16 games and every opponent
    // lost exactly one
    assert_eq!(league.stats().unwrap().solo_games_recorded, 16);
    assert_eq!(league.recent_solo_games(100).unwrap().len(), 16);

    let champ_rating = league.rating(champ.id, Mode::Solo).unwrap();
    assert!(champ_rating.mu > 25.0);
    assert!(champ_rating.sigma < 8.3);
    for opponent in opponents {
        assert!(league.rating(opponent, Mode::Solo).unwrap().mu < 25.0);
    }
}

#[test]
fn test_concurrent_disjoint_submissions() {
    let league = Arc::new(create_league());
    let pairs: Vec<(PlayerId, PlayerId)> = (0..8)
        .map(|i| {
            (
                league.register_player(&format!("l{i}")).unwrap().id,
                league.register_player(&format!("r{i}")).unwrap().id,
            )
        })
        .collect();

    let handles: Vec<_> = pairs
        .iter()
        .map(|&(left, right)| {
            let league = league.clone();
            std::thread::spawn(move || league.record_solo_game(left, right, 10, 0, true))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(league.stats().unwrap().solo_games_recorded, 8);
    for (left, right) in pairs {
        assert!(league.rating(left, Mode::Solo).unwrap().mu > 25.0);
        assert!(league.rating(right, Mode::Solo).unwrap().mu < 25.0);
    }
}
