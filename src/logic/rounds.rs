//! Mixer rounds: generation, staged results, and submission.

use crate::logic::pairing::generate_round;
use crate::models::{
    Event, EventError, EventState, MatchScore, MixerFormat, PlayerId, RoundMatch, RoundRecord,
    Team,
};
use chrono::Utc;
use std::collections::HashSet;

/// Generate the next round of court assignments from current standings.
/// Replaces a round that was generated but not yet submitted.
pub fn generate_event_round(event: &mut Event) -> Result<(), EventError> {
    if event.state != EventState::Rounds {
        return Err(EventError::InvalidState);
    }
    let format = event.mixer_format().ok_or(EventError::InvalidState)?;

    let history: Vec<RoundMatch> = event
        .round_history
        .iter()
        .flat_map(|r| r.matches.iter().cloned())
        .collect();
    let round_number = event.round_history.len() as u32 + 1;
    let matches = generate_round(
        format,
        &event.players,
        event.num_courts,
        &history,
        round_number,
    );
    if matches.is_empty() {
        return Err(match format {
            MixerFormat::MixedDoubles => EventError::NotEnoughGenders { required: 2 },
            _ => EventError::NotEnoughPlayers {
                required: format.min_players(),
            },
        });
    }

    let seated: HashSet<PlayerId> = matches.iter().flat_map(|m| m.players()).collect();
    event.sitting_out = event
        .players
        .iter()
        .map(|p| p.id)
        .filter(|id| !seated.contains(id))
        .collect();
    event.round_matches = matches;
    event.round_results.clear();
    Ok(())
}

/// Stage the score for one court of the current round.
pub fn set_round_result(event: &mut Event, court: u32, score: MatchScore) -> Result<(), EventError> {
    if event.state != EventState::Rounds {
        return Err(EventError::InvalidState);
    }
    if !event.round_matches.iter().any(|m| m.court == court) {
        return Err(EventError::CourtNotFound(court));
    }
    event.round_results.insert(court, score);
    Ok(())
}

/// Submit the current round: apply wins/losses and games to every seated
/// player, bump sat-out counters, archive the round. Every court must have
/// a staged result.
pub fn submit_round_results(event: &mut Event) -> Result<(), EventError> {
    if event.state != EventState::Rounds || event.round_matches.is_empty() {
        return Err(EventError::InvalidState);
    }
    for m in &event.round_matches {
        if !event.round_results.contains_key(&m.court) {
            return Err(EventError::IncompleteResults);
        }
    }

    // Copy match data out before touching player stats (no references into
    // the event while mutating it).
    let match_data: Vec<(Vec<PlayerId>, Vec<PlayerId>, MatchScore)> = event
        .round_matches
        .iter()
        .map(|m| (m.side(Team::One), m.side(Team::Two), event.round_results[&m.court]))
        .collect();
    for (side_one, side_two, score) in match_data {
        apply_score(event, &side_one, &side_two, score)?;
    }

    let sat_out = std::mem::take(&mut event.sitting_out);
    for id in sat_out {
        if let Some(p) = event.get_player_mut(id) {
            p.record_sat_out();
        }
    }

    let number = event.round_history.len() as u32 + 1;
    let matches = std::mem::take(&mut event.round_matches);
    event.round_history.push(RoundRecord {
        number,
        matches,
        played_at: Utc::now(),
    });
    event.round_results.clear();
    Ok(())
}

/// Close a mixer event (Rounds -> Completed). A generated but unsubmitted
/// round is discarded.
pub fn complete_event(event: &mut Event) -> Result<(), EventError> {
    if event.state != EventState::Rounds {
        return Err(EventError::InvalidState);
    }
    event.round_matches.clear();
    event.round_results.clear();
    event.sitting_out.clear();
    event.state = EventState::Completed;
    Ok(())
}

/// Apply a single match score to player stats.
fn apply_score(
    event: &mut Event,
    side_one: &[PlayerId],
    side_two: &[PlayerId],
    score: MatchScore,
) -> Result<(), EventError> {
    let (winners, losers) = match score.winner {
        Team::One => (side_one, side_two),
        Team::Two => (side_two, side_one),
    };
    for &id in winners {
        event
            .get_player_mut(id)
            .ok_or(EventError::PlayerNotFound(id))?
            .add_win(score.games_won, score.games_lost);
    }
    for &id in losers {
        event
            .get_player_mut(id)
            .ok_or(EventError::PlayerNotFound(id))?
            .add_loss(score.games_lost, score.games_won);
    }
    Ok(())
}
