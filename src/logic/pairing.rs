//! Mixer round pairing: one configurable strategy covering all six formats.

use crate::logic::ranking;
use crate::models::{Gender, MixerFormat, Player, PlayerId, RoundMatch};
use std::collections::VecDeque;

/// How the ordered pool is consumed when seating a court.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DrawStyle {
    /// Alternate strongest and weakest remaining, so each doubles team
    /// pairs a strong player with a weak one.
    FrontBack,
    /// Consecutive players from the front of the pool.
    Consecutive,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SortOrder {
    /// Wins, then game differential (descending).
    Standings,
    /// Wins only (descending).
    Wins,
    /// Keep the roster order as given.
    Entry,
}

/// Per-format pairing rules.
#[derive(Clone, Copy, Debug)]
struct PairingRules {
    players_per_court: usize,
    sort: SortOrder,
    draw: DrawStyle,
    /// Seat one man and one woman per team (slots 1/3 male, 2/4 female).
    mixed_gender: bool,
    /// When fewer than four players remain, seat one last singles court.
    singles_fallback: bool,
}

impl MixerFormat {
    fn rules(self) -> PairingRules {
        match self {
            // King of the court and round robin run the doubles draw; round
            // robin's fixed-team rotation comes from the caller's roster order.
            MixerFormat::Doubles | MixerFormat::KingOfCourt | MixerFormat::RoundRobin => {
                PairingRules {
                    players_per_court: 4,
                    sort: SortOrder::Standings,
                    draw: DrawStyle::FrontBack,
                    mixed_gender: false,
                    singles_fallback: false,
                }
            }
            MixerFormat::Singles => PairingRules {
                players_per_court: 2,
                sort: SortOrder::Wins,
                draw: DrawStyle::Consecutive,
                mixed_gender: false,
                singles_fallback: false,
            },
            MixerFormat::MixedDoubles => PairingRules {
                players_per_court: 4,
                sort: SortOrder::Entry,
                draw: DrawStyle::Consecutive,
                mixed_gender: true,
                singles_fallback: false,
            },
            MixerFormat::MaximizeCourts => PairingRules {
                players_per_court: 4,
                sort: SortOrder::Entry,
                draw: DrawStyle::Consecutive,
                mixed_gender: false,
                singles_fallback: true,
            },
        }
    }

    /// Fewest players that can seat one match of this format.
    pub fn min_players(self) -> usize {
        match self {
            MixerFormat::Singles | MixerFormat::MaximizeCourts => 2,
            _ => 4,
        }
    }
}

/// Generate one round of court assignments for `format`.
///
/// Courts number sequentially from 1; the loop stops as soon as the courts
/// run out or too few players remain for another match. Returns an empty
/// list when not even one match can be seated; degenerate rosters are not
/// an error here.
///
/// `previous_matches` and `round_number` are accepted so callers can pass
/// round history, but no format consults them yet: pairings can repeat
/// partners and opponents across rounds.
pub fn generate_round(
    format: MixerFormat,
    roster: &[Player],
    num_courts: u32,
    _previous_matches: &[RoundMatch],
    _round_number: u32,
) -> Vec<RoundMatch> {
    let rules = format.rules();
    if rules.mixed_gender {
        return mixed_doubles_round(roster, num_courts);
    }

    let ordered: Vec<&Player> = match rules.sort {
        SortOrder::Standings => ranking::by_standings(roster),
        SortOrder::Wins => ranking::by_wins(roster),
        SortOrder::Entry => roster.iter().collect(),
    };
    let mut pool: VecDeque<PlayerId> = ordered.iter().map(|p| p.id).collect();

    let mut matches = Vec::new();
    for court in 1..=num_courts {
        if pool.len() >= rules.players_per_court {
            let ids = draw(&mut pool, rules.players_per_court, rules.draw);
            matches.push(seat(court, &ids));
        } else if rules.singles_fallback && pool.len() >= 2 {
            let ids = draw(&mut pool, 2, DrawStyle::Consecutive);
            matches.push(seat(court, &ids));
        } else {
            break;
        }
    }
    matches
}

/// Take `count` players out of the pool in the given draw order.
fn draw(pool: &mut VecDeque<PlayerId>, count: usize, style: DrawStyle) -> Vec<PlayerId> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let next = match style {
            DrawStyle::Consecutive => pool.pop_front(),
            DrawStyle::FrontBack if i % 2 == 0 => pool.pop_front(),
            DrawStyle::FrontBack => pool.pop_back(),
        };
        if let Some(id) = next {
            ids.push(id);
        }
    }
    ids
}

fn seat(court: u32, ids: &[PlayerId]) -> RoundMatch {
    if ids.len() == 4 {
        RoundMatch::doubles(court, [ids[0], ids[1], ids[2], ids[3]])
    } else {
        RoundMatch::singles(court, ids[0], ids[1])
    }
}

/// Mixed doubles: one man and one woman per team, consumed in roster order
/// (no strength sort). Players without a gender tag cannot be seated and
/// stay out of the round.
fn mixed_doubles_round(roster: &[Player], num_courts: u32) -> Vec<RoundMatch> {
    let mut men: VecDeque<PlayerId> = roster
        .iter()
        .filter(|p| p.gender == Some(Gender::Male))
        .map(|p| p.id)
        .collect();
    let mut women: VecDeque<PlayerId> = roster
        .iter()
        .filter(|p| p.gender == Some(Gender::Female))
        .map(|p| p.id)
        .collect();

    let mut matches = Vec::new();
    for court in 1..=num_courts {
        if men.len() < 2 || women.len() < 2 {
            break;
        }
        match (men.pop_front(), women.pop_front(), men.pop_front(), women.pop_front()) {
            (Some(m1), Some(f1), Some(m2), Some(f2)) => {
                matches.push(RoundMatch::doubles(court, [m1, f1, m2, f2]));
            }
            _ => break,
        }
    }
    matches
}
