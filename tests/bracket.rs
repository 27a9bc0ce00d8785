//! Integration tests for bracket generation and winner advancement.

use tennis_mixer_web::{
    advance_winner, generate_bracket, BracketError, MatchFormat, Player,
};

fn roster(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"), None)).collect()
}

#[test]
fn sizing_byes_and_rounds_across_field_sizes() {
    for n in [2usize, 3, 4, 5, 6, 7, 8, 9, 16, 17] {
        let players = roster(n);
        let b = generate_bracket(&players, MatchFormat::Singles).unwrap();
        let expected_size = (n as u32).next_power_of_two();
        assert_eq!(b.bracket_size, expected_size, "n={n}");
        assert_eq!(b.total_rounds, expected_size.trailing_zeros(), "n={n}");
        assert_eq!(b.total_matches, expected_size - 1, "n={n}");
        assert_eq!(b.matches.len() as u32, b.total_matches, "n={n}");

        let byes = b.matches.iter().filter(|m| m.is_bye).count() as u32;
        assert_eq!(byes, expected_size - n as u32, "n={n}");

        let expected_per_round: Vec<u32> =
            (1..=b.total_rounds).map(|r| expected_size >> r).collect();
        assert_eq!(b.matches_per_round, expected_per_round, "n={n}");
    }
}

#[test]
fn every_feed_points_to_a_unique_existing_match() {
    let players = roster(13);
    let b = generate_bracket(&players, MatchFormat::Singles).unwrap();

    // Match numbers are unique across the structure.
    let mut numbers: Vec<u32> = b.matches.iter().map(|m| m.match_number).collect();
    numbers.sort_unstable();
    numbers.dedup();
    assert_eq!(numbers.len(), b.matches.len());

    let mut finals = 0;
    for m in &b.matches {
        match m.feeds_into {
            Some(target) => {
                let t = b.match_by_number(target).expect("feed target exists");
                assert_eq!(t.round, m.round + 1);
                assert_eq!(t.position, m.position / 2);
            }
            None => finals += 1,
        }
    }
    assert_eq!(finals, 1);
}

#[test]
fn byes_take_no_court_and_real_matches_take_sequential_courts() {
    let players = roster(6); // bracket of 8, 2 byes
    let b = generate_bracket(&players, MatchFormat::Singles).unwrap();

    let round_one: Vec<_> = b.matches.iter().filter(|m| m.round == 1).collect();
    assert_eq!(round_one.len(), 4);

    for m in &round_one {
        if m.is_bye {
            assert_eq!(m.court, None);
            assert!(m.player1.is_some());
            assert_eq!(m.player2, None);
        }
    }
    let mut courts: Vec<u32> = round_one.iter().filter_map(|m| m.court).collect();
    courts.sort_unstable();
    assert_eq!(courts, vec![1, 2]);
}

#[test]
fn five_player_singles_end_to_end_structure() {
    let players = roster(5);
    let b = generate_bracket(&players, MatchFormat::Singles).unwrap();

    assert_eq!(b.bracket_size, 8);
    assert_eq!(b.total_rounds, 3);
    assert_eq!(b.matches_per_round, vec![4, 2, 1]);
    assert_eq!(b.total_matches, 7);

    let byes: Vec<_> = b.matches.iter().filter(|m| m.is_bye).collect();
    assert_eq!(byes.len(), 3);
    assert!(byes.iter().all(|m| m.court.is_none() && m.round == 1));

    // 3 byes leave exactly one playable round-1 match, on court 1.
    let real: Vec<_> = b
        .matches
        .iter()
        .filter(|m| m.round == 1 && !m.is_bye)
        .collect();
    assert_eq!(real.len(), 1);
    assert_eq!(real[0].court, Some(1));
    assert_eq!(real[0].player1, Some(players[2].id));
    assert_eq!(real[0].player2, Some(players[3].id));

    // Rounds 2 and 3 are empty placeholders waiting for winners.
    for m in b.matches.iter().filter(|m| m.round > 1) {
        assert!(!m.is_bye);
        assert_eq!(m.court, None);
        assert!(m.player1.is_none() && m.player2.is_none());
    }
    assert_eq!(b.final_match().map(|m| m.match_number), Some(7));
}

#[test]
fn advancement_parity_singles() {
    let players = roster(4);
    let mut b = generate_bracket(&players, MatchFormat::Singles).unwrap();

    // Position 0 winner lands in the final's top slot.
    let updated = advance_winner(&mut b, 1, &[players[0].id]).unwrap().unwrap();
    assert_eq!(updated.match_number, 3);
    assert_eq!(updated.player1, Some(players[0].id));

    // Position 1 winner lands in the bottom slot.
    let updated = advance_winner(&mut b, 2, &[players[3].id]).unwrap().unwrap();
    assert_eq!(updated.player1, Some(players[0].id));
    assert_eq!(updated.player2, Some(players[3].id));

    let final_match = b.final_match().unwrap();
    assert_eq!(final_match.player1, Some(players[0].id));
    assert_eq!(final_match.player2, Some(players[3].id));
}

#[test]
fn advancement_parity_doubles() {
    let players = roster(8); // 4 teams, bracket of 4
    let mut b = generate_bracket(&players, MatchFormat::Doubles).unwrap();
    assert_eq!(b.total_rounds, 2);

    let updated = advance_winner(&mut b, 1, &[players[0].id, players[1].id])
        .unwrap()
        .unwrap();
    assert_eq!(updated.player1, Some(players[0].id));
    assert_eq!(updated.player2, Some(players[1].id));

    let updated = advance_winner(&mut b, 2, &[players[6].id, players[7].id])
        .unwrap()
        .unwrap();
    assert_eq!(updated.player3, Some(players[6].id));
    assert_eq!(updated.player4, Some(players[7].id));
}

#[test]
fn advancing_the_final_returns_none() {
    let players = roster(2);
    let mut b = generate_bracket(&players, MatchFormat::Singles).unwrap();
    assert_eq!(b.total_matches, 1);
    let result = advance_winner(&mut b, 1, &[players[0].id]).unwrap();
    assert!(result.is_none());
}

#[test]
fn unknown_match_number_is_an_error() {
    let players = roster(4);
    let mut b = generate_bracket(&players, MatchFormat::Singles).unwrap();
    assert!(matches!(
        advance_winner(&mut b, 99, &[players[0].id]),
        Err(BracketError::MissingMatch { match_number: 99 })
    ));
}

#[test]
fn winner_id_count_must_match_format() {
    let players = roster(4);
    let mut b = generate_bracket(&players, MatchFormat::Singles).unwrap();
    assert!(matches!(
        advance_winner(&mut b, 1, &[players[0].id, players[1].id]),
        Err(BracketError::WrongWinnerCount {
            expected: 1,
            got: 2
        })
    ));
}

#[test]
fn odd_doubles_roster_is_rejected() {
    let players = roster(5);
    assert!(matches!(
        generate_bracket(&players, MatchFormat::Doubles),
        Err(BracketError::OddPlayerCount { players: 5 })
    ));
}

#[test]
fn degenerate_rosters_yield_empty_structures() {
    for n in [0usize, 1] {
        let players = roster(n);
        let b = generate_bracket(&players, MatchFormat::Singles).unwrap();
        assert!(b.matches.is_empty(), "n={n}");
        assert_eq!(b.total_rounds, 0, "n={n}");
        assert_eq!(b.total_matches, 0, "n={n}");
    }
    // Two players are one doubles team: nothing to play.
    let b = generate_bracket(&roster(2), MatchFormat::Doubles).unwrap();
    assert!(b.matches.is_empty());
}

#[test]
fn doubles_bye_seats_a_full_team_on_side_one() {
    let players = roster(6); // 3 teams, bracket of 4, 1 bye
    let b = generate_bracket(&players, MatchFormat::Doubles).unwrap();
    let bye = b.matches.iter().find(|m| m.is_bye).unwrap();
    assert_eq!(bye.player1, Some(players[0].id));
    assert_eq!(bye.player2, Some(players[1].id));
    assert_eq!(bye.player3, None);
    assert_eq!(bye.player4, None);
}
