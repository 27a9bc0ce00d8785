//! Single-elimination bracket construction and winner advancement.

use crate::models::{Bracket, BracketError, BracketMatch, MatchFormat, Player, PlayerId};
use std::collections::HashSet;

/// Build a single-elimination bracket from a roster in seed order
/// (strongest first). Doubles formats team up consecutive pairs, so the
/// roster must hold an even player count.
///
/// Round 1 has `bracket_size / 2` positions, where `bracket_size` is the
/// smallest power of two holding every competing unit. Bye positions are
/// spread between the top and bottom of the draw; each bye seats its
/// players on side one only and takes no court. Non-bye matches consume
/// seeds in order and take sequential courts from 1. Later rounds are
/// placeholders that only [`advance_winner`] fills.
///
/// A roster with fewer than two competing units yields an empty structure
/// rather than an error. Deterministic given the same input order.
pub fn generate_bracket(players: &[Player], format: MatchFormat) -> Result<Bracket, BracketError> {
    let per_side = format.players_per_side();
    if format.is_doubles() && players.len() % 2 != 0 {
        return Err(BracketError::OddPlayerCount {
            players: players.len(),
        });
    }

    let num_teams = (players.len() / per_side) as u32;
    if num_teams < 2 {
        return Ok(Bracket {
            format,
            matches: Vec::new(),
            bracket_size: num_teams,
            total_rounds: 0,
            matches_per_round: Vec::new(),
            total_matches: 0,
        });
    }

    let bracket_size = num_teams.next_power_of_two();
    let total_rounds = bracket_size.trailing_zeros();
    let num_byes = bracket_size - num_teams;
    let first_round_slots = bracket_size / 2;
    let byes = bye_positions(first_round_slots, num_byes);

    let matches_per_round: Vec<u32> = (1..=total_rounds).map(|r| bracket_size >> r).collect();
    let total_matches: u32 = matches_per_round.iter().sum();

    let mut matches = Vec::with_capacity(total_matches as usize);
    let mut seeds = players.iter().map(|p| p.id);
    let mut round_start = 1u32;
    let mut court = 0u32;

    for round in 1..=total_rounds {
        let slots = bracket_size >> round;
        let next_round_start = round_start + slots;
        for position in 0..slots {
            let match_number = round_start + position;
            let feeds_into = (round < total_rounds).then(|| next_round_start + position / 2);
            let mut m = BracketMatch::placeholder(match_number, round, position, feeds_into);
            if round == 1 {
                if byes.contains(&position) {
                    m.is_bye = true;
                    m.player1 = seeds.next();
                    if per_side == 2 {
                        m.player2 = seeds.next();
                    }
                } else {
                    court += 1;
                    m.court = Some(court);
                    m.player1 = seeds.next();
                    m.player2 = seeds.next();
                    if per_side == 2 {
                        m.player3 = seeds.next();
                        m.player4 = seeds.next();
                    }
                }
            }
            matches.push(m);
        }
        round_start = next_round_start;
    }

    Ok(Bracket {
        format,
        matches,
        bracket_size,
        total_rounds,
        matches_per_round,
        total_matches,
    })
}

/// Spread `count` byes across `slots` first-round positions, alternating
/// between the top and bottom of the draw so recipients are not clustered.
/// Uses exactly `count` distinct positions.
fn bye_positions(slots: u32, count: u32) -> HashSet<u32> {
    let mut positions = HashSet::new();
    let mut front = 0u32;
    let mut back = slots.saturating_sub(1);
    for i in 0..count {
        if i % 2 == 0 {
            positions.insert(front);
            front += 1;
        } else {
            positions.insert(back);
            back = back.saturating_sub(1);
        }
    }
    positions
}

/// Thread a completed match's winner into the match it feeds.
///
/// Returns `Ok(None)` when the completed match was the final: the
/// tournament is over and there is nothing to update. An even completed
/// position seats the winner in the target's top slots (1, or 1/2 for
/// doubles); an odd position in the bottom slots (2, or 3/4). The write
/// lands in fixed slots, so retrying with the same inputs rewrites the
/// same values.
///
/// This is the core's only mutation; every other operation builds fresh
/// values.
pub fn advance_winner(
    bracket: &mut Bracket,
    completed_match_number: u32,
    winner_ids: &[PlayerId],
) -> Result<Option<BracketMatch>, BracketError> {
    let per_side = bracket.format.players_per_side();
    if winner_ids.len() != per_side {
        return Err(BracketError::WrongWinnerCount {
            expected: per_side,
            got: winner_ids.len(),
        });
    }

    let completed = bracket
        .match_by_number(completed_match_number)
        .ok_or(BracketError::MissingMatch {
            match_number: completed_match_number,
        })?;
    let position = completed.position;
    let Some(target_number) = completed.feeds_into else {
        return Ok(None);
    };

    let target = bracket
        .match_by_number_mut(target_number)
        .ok_or(BracketError::MissingMatch {
            match_number: target_number,
        })?;
    let top = position % 2 == 0;
    match (top, per_side) {
        (true, 1) => target.player1 = Some(winner_ids[0]),
        (false, 1) => target.player2 = Some(winner_ids[0]),
        (true, _) => {
            target.player1 = Some(winner_ids[0]);
            target.player2 = Some(winner_ids[1]);
        }
        (false, _) => {
            target.player3 = Some(winner_ids[0]);
            target.player4 = Some(winner_ids[1]);
        }
    }
    Ok(Some(target.clone()))
}
