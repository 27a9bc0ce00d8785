//! Knockout play: reporting completed bracket matches and threading winners.

use crate::logic::bracket::advance_winner;
use crate::models::{Event, EventError, EventState, MatchScore, Team};

/// Record the score of a completed bracket match, update both sides' stats,
/// and advance the winners into the next match. Reporting the final crowns
/// the champions and completes the event.
///
/// Each match takes exactly one report; a second report for the same match
/// number is rejected so a retried request cannot double-count stats.
pub fn report_match_result(
    event: &mut Event,
    match_number: u32,
    score: MatchScore,
) -> Result<(), EventError> {
    if event.state != EventState::Knockout {
        return Err(EventError::InvalidState);
    }
    if event.bracket_results.contains_key(&match_number) {
        return Err(EventError::MatchAlreadyReported(match_number));
    }

    let bracket = event.bracket.as_ref().ok_or(EventError::InvalidState)?;
    let format = bracket.format;
    let m = bracket
        .match_by_number(match_number)
        .ok_or(EventError::MatchNotFound(match_number))?;
    if m.is_bye || !m.is_ready(format) {
        return Err(EventError::MatchNotReady(match_number));
    }
    let side_one = m.side(Team::One, format);
    let side_two = m.side(Team::Two, format);
    let is_final = m.feeds_into.is_none();

    let (winners, losers) = match score.winner {
        Team::One => (side_one, side_two),
        Team::Two => (side_two, side_one),
    };
    for &id in &winners {
        event
            .get_player_mut(id)
            .ok_or(EventError::PlayerNotFound(id))?
            .add_win(score.games_won, score.games_lost);
    }
    for &id in &losers {
        event
            .get_player_mut(id)
            .ok_or(EventError::PlayerNotFound(id))?
            .add_loss(score.games_lost, score.games_won);
    }

    if let Some(bracket) = event.bracket.as_mut() {
        advance_winner(bracket, match_number, &winners)?;
    }
    event.bracket_results.insert(match_number, score);

    if is_final {
        event.champions = Some(winners);
        event.state = EventState::Completed;
    }
    Ok(())
}
