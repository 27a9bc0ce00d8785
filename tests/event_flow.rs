//! Integration tests for the event layer: mixer and knockout lifecycles.

use tennis_mixer_web::{
    complete_event, generate_event_round, report_match_result, set_round_result, start_event,
    submit_round_results, BracketError, Event, EventError, EventKind, EventState, Gender,
    MatchFormat, MatchScore, MixerFormat, Player, Team,
};

fn players(n: usize) -> Vec<Player> {
    (0..n).map(|i| Player::new(format!("P{i}"), None)).collect()
}

fn mixer_event(n: usize, format: MixerFormat, courts: u32) -> Event {
    Event::with_players("Club night", EventKind::Mixer(format), courts, players(n))
}

fn knockout_event(n: usize, format: MatchFormat) -> Event {
    Event::with_players("Club open", EventKind::Elimination(format), 4, players(n))
}

fn score(winner: Team, games_won: u32, games_lost: u32) -> MatchScore {
    MatchScore {
        winner,
        games_won,
        games_lost,
    }
}

#[test]
fn mixer_round_cycle_updates_stats_and_history() {
    let mut e = mixer_event(8, MixerFormat::Doubles, 2);
    start_event(&mut e).unwrap();
    assert_eq!(e.state, EventState::Rounds);

    generate_event_round(&mut e).unwrap();
    assert_eq!(e.round_matches.len(), 2);
    assert!(e.sitting_out.is_empty());

    let winners_1 = e.round_matches[0].side(Team::One);
    let losers_1 = e.round_matches[0].side(Team::Two);
    set_round_result(&mut e, 1, score(Team::One, 6, 3)).unwrap();
    set_round_result(&mut e, 2, score(Team::Two, 6, 4)).unwrap();
    submit_round_results(&mut e).unwrap();

    assert!(e.round_matches.is_empty());
    assert_eq!(e.round_history.len(), 1);
    assert_eq!(e.round_history[0].number, 1);

    for id in &winners_1 {
        let p = e.get_player(*id).unwrap();
        assert_eq!(p.wins, 1);
        assert_eq!(p.games_won, 6);
        assert_eq!(p.games_lost, 3);
    }
    for id in &losers_1 {
        let p = e.get_player(*id).unwrap();
        assert_eq!(p.losses, 1);
        assert_eq!(p.games_won, 3);
        assert_eq!(p.games_lost, 6);
    }

    // Next round draws from the updated standings.
    generate_event_round(&mut e).unwrap();
    assert_eq!(e.round_matches.len(), 2);
}

#[test]
fn submit_requires_a_result_on_every_court() {
    let mut e = mixer_event(8, MixerFormat::Doubles, 2);
    start_event(&mut e).unwrap();
    generate_event_round(&mut e).unwrap();
    set_round_result(&mut e, 1, score(Team::One, 6, 0)).unwrap();
    assert!(matches!(
        submit_round_results(&mut e),
        Err(EventError::IncompleteResults)
    ));
}

#[test]
fn staging_a_result_for_an_unused_court_fails() {
    let mut e = mixer_event(8, MixerFormat::Doubles, 2);
    start_event(&mut e).unwrap();
    generate_event_round(&mut e).unwrap();
    assert!(matches!(
        set_round_result(&mut e, 5, score(Team::One, 6, 0)),
        Err(EventError::CourtNotFound(5))
    ));
}

#[test]
fn leftover_players_sit_out_and_are_counted() {
    let mut e = mixer_event(10, MixerFormat::Doubles, 2);
    start_event(&mut e).unwrap();
    generate_event_round(&mut e).unwrap();
    assert_eq!(e.round_matches.len(), 2);
    assert_eq!(e.sitting_out.len(), 2);
    let benched = e.sitting_out.clone();

    set_round_result(&mut e, 1, score(Team::One, 6, 2)).unwrap();
    set_round_result(&mut e, 2, score(Team::One, 7, 5)).unwrap();
    submit_round_results(&mut e).unwrap();

    for id in benched {
        assert_eq!(e.get_player(id).unwrap().rounds_sat_out, 1);
    }
}

#[test]
fn start_validates_the_roster() {
    let mut e = mixer_event(3, MixerFormat::Doubles, 2);
    assert!(matches!(
        start_event(&mut e),
        Err(EventError::NotEnoughPlayers { required: 4 })
    ));

    let roster = vec![
        Player::new("M0", Some(Gender::Male)),
        Player::new("M1", Some(Gender::Male)),
        Player::new("F0", Some(Gender::Female)),
    ];
    let mut e = Event::with_players(
        "Mixed night",
        EventKind::Mixer(MixerFormat::MixedDoubles),
        2,
        roster,
    );
    assert!(matches!(
        start_event(&mut e),
        Err(EventError::NotEnoughGenders { required: 2 })
    ));
}

#[test]
fn player_names_are_unique_case_insensitive() {
    let mut e = Event::new("Club night", EventKind::default(), 2);
    e.add_player("Anna", None).unwrap();
    assert!(matches!(
        e.add_player("anna", None),
        Err(EventError::DuplicatePlayerName)
    ));
}

#[test]
fn no_roster_changes_during_knockout() {
    let mut e = knockout_event(4, MatchFormat::Singles);
    start_event(&mut e).unwrap();
    assert!(matches!(
        e.add_player("Late", None),
        Err(EventError::InvalidState)
    ));
}

#[test]
fn knockout_five_players_runs_to_a_champion() {
    let mut e = knockout_event(5, MatchFormat::Singles);
    let ids: Vec<_> = e.players.iter().map(|p| p.id).collect();
    start_event(&mut e).unwrap();
    assert_eq!(e.state, EventState::Knockout);

    // Byes advanced at start: P0 and P1 meet in match 5, P4 waits in match 6.
    {
        let b = e.bracket.as_ref().unwrap();
        let m5 = b.match_by_number(5).unwrap();
        assert_eq!(m5.player1, Some(ids[0]));
        assert_eq!(m5.player2, Some(ids[1]));
        let m6 = b.match_by_number(6).unwrap();
        assert_eq!(m6.player1, None);
        assert_eq!(m6.player2, Some(ids[4]));
    }

    // A bye never takes a result, and a half-seated match is not ready.
    assert!(matches!(
        report_match_result(&mut e, 1, score(Team::One, 6, 0)),
        Err(EventError::MatchNotReady(1))
    ));
    assert!(matches!(
        report_match_result(&mut e, 6, score(Team::One, 6, 0)),
        Err(EventError::MatchNotReady(6))
    ));

    // P2 beats P3 in the only real round-1 match.
    report_match_result(&mut e, 3, score(Team::One, 6, 4)).unwrap();
    assert!(matches!(
        report_match_result(&mut e, 3, score(Team::One, 6, 4)),
        Err(EventError::MatchAlreadyReported(3))
    ));

    // Semifinals: P0 beats P1, P4 beats P2.
    report_match_result(&mut e, 5, score(Team::One, 6, 2)).unwrap();
    report_match_result(&mut e, 6, score(Team::Two, 7, 5)).unwrap();

    {
        let b = e.bracket.as_ref().unwrap();
        let final_match = b.final_match().unwrap();
        assert_eq!(final_match.player1, Some(ids[0]));
        assert_eq!(final_match.player2, Some(ids[4]));
    }

    report_match_result(&mut e, 7, score(Team::One, 6, 3)).unwrap();
    assert_eq!(e.state, EventState::Completed);
    assert_eq!(e.champions, Some(vec![ids[0]]));

    let champion = e.get_player(ids[0]).unwrap();
    assert_eq!(champion.wins, 2);
    assert_eq!(champion.losses, 0);
    let runner_up = e.get_player(ids[4]).unwrap();
    assert_eq!(runner_up.wins, 1);
    assert_eq!(runner_up.losses, 1);
}

#[test]
fn knockout_doubles_needs_an_even_roster() {
    let mut e = knockout_event(5, MatchFormat::Doubles);
    assert!(matches!(
        start_event(&mut e),
        Err(EventError::Bracket(BracketError::OddPlayerCount { players: 5 }))
    ));
}

#[test]
fn seeds_order_the_first_round() {
    let mut e = knockout_event(4, MatchFormat::Singles);
    let ids: Vec<_> = e.players.iter().map(|p| p.id).collect();
    // Reverse the insertion order via seeds.
    e.set_player_seed(ids[0], 4).unwrap();
    e.set_player_seed(ids[1], 3).unwrap();
    e.set_player_seed(ids[2], 2).unwrap();
    e.set_player_seed(ids[3], 1).unwrap();
    start_event(&mut e).unwrap();

    let b = e.bracket.as_ref().unwrap();
    let m1 = b.match_by_number(1).unwrap();
    assert_eq!(m1.player1, Some(ids[3]));
    assert_eq!(m1.player2, Some(ids[2]));
    let m2 = b.match_by_number(2).unwrap();
    assert_eq!(m2.player1, Some(ids[1]));
    assert_eq!(m2.player2, Some(ids[0]));
}

#[test]
fn restart_returns_to_setup_with_fresh_stats() {
    let mut e = mixer_event(8, MixerFormat::Doubles, 2);
    start_event(&mut e).unwrap();
    generate_event_round(&mut e).unwrap();
    set_round_result(&mut e, 1, score(Team::One, 6, 1)).unwrap();
    set_round_result(&mut e, 2, score(Team::One, 6, 2)).unwrap();
    submit_round_results(&mut e).unwrap();

    let id = e.id;
    e.restart().unwrap();
    assert_eq!(e.state, EventState::Setup);
    assert_eq!(e.id, id);
    assert_eq!(e.players.len(), 8);
    assert!(e.round_history.is_empty());
    assert!(e.players.iter().all(|p| p.wins == 0 && p.losses == 0));
}

#[test]
fn completing_a_mixer_ends_round_generation() {
    let mut e = mixer_event(8, MixerFormat::Doubles, 2);
    start_event(&mut e).unwrap();
    complete_event(&mut e).unwrap();
    assert_eq!(e.state, EventState::Completed);
    assert!(matches!(
        generate_event_round(&mut e),
        Err(EventError::InvalidState)
    ));
}
