//! Setup phase: start an event (transition from Setup to Rounds or Knockout).

use crate::logic::bracket::{advance_winner, generate_bracket};
use crate::models::{Event, EventError, EventKind, EventState, Gender, MixerFormat, PlayerId, Team};

/// Start the event. Mixers move to Rounds; elimination events build their
/// bracket from the seeded roster, auto-advance every round-1 bye, and move
/// to Knockout. Roster validation happens here, before any scheduling.
pub fn start_event(event: &mut Event) -> Result<(), EventError> {
    if event.state != EventState::Setup {
        return Err(EventError::InvalidState);
    }

    match event.kind {
        EventKind::Mixer(format) => {
            check_mixer_roster(event, format)?;
            event.state = EventState::Rounds;
        }
        EventKind::Elimination(format) => {
            let required = format.players_per_side() * 2;
            if event.players.len() < required {
                return Err(EventError::NotEnoughPlayers { required });
            }
            let seeded = event.seeded_players();
            let mut bracket = generate_bracket(&seeded, format)?;

            // A bye seats only side one; its occupants move up before play starts.
            let byes: Vec<(u32, Vec<PlayerId>)> = bracket
                .matches
                .iter()
                .filter(|m| m.is_bye)
                .map(|m| (m.match_number, m.side(Team::One, format)))
                .collect();
            for (match_number, ids) in byes {
                advance_winner(&mut bracket, match_number, &ids)?;
            }

            event.bracket = Some(bracket);
            event.state = EventState::Knockout;
        }
    }
    Ok(())
}

fn check_mixer_roster(event: &Event, format: MixerFormat) -> Result<(), EventError> {
    if format == MixerFormat::MixedDoubles {
        let men = event
            .players
            .iter()
            .filter(|p| p.gender == Some(Gender::Male))
            .count();
        let women = event
            .players
            .iter()
            .filter(|p| p.gender == Some(Gender::Female))
            .count();
        if men < 2 || women < 2 {
            return Err(EventError::NotEnoughGenders { required: 2 });
        }
        return Ok(());
    }
    let required = format.min_players();
    if event.players.len() < required {
        return Err(EventError::NotEnoughPlayers { required });
    }
    Ok(())
}
