//! Match types: bracket nodes, mixer court assignments, formats, scores.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of a match (slots 1/2 vs 3/4 for doubles, slot 1 vs 2 for singles).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    One,
    Two,
}

/// Match format for elimination play.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    Singles,
    #[default]
    Doubles,
    MixedDoubles,
}

impl MatchFormat {
    pub fn is_doubles(self) -> bool {
        !matches!(self, MatchFormat::Singles)
    }

    /// Players per side: 1 for singles, 2 for the doubles formats.
    pub fn players_per_side(self) -> usize {
        if self.is_doubles() {
            2
        } else {
            1
        }
    }
}

/// Pairing strategy for a social mixer round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixerFormat {
    #[default]
    Doubles,
    Singles,
    MixedDoubles,
    KingOfCourt,
    RoundRobin,
    MaximizeCourts,
}

/// One court's assignment in a mixer round. Doubles seats four players
/// (slots 1/2 vs 3/4); singles seats two (slot 1 vs 2, slots 3/4 stay empty).
/// No round or bracket linkage: each round stands alone.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundMatch {
    pub court: u32,
    pub player1: Option<PlayerId>,
    pub player2: Option<PlayerId>,
    pub player3: Option<PlayerId>,
    pub player4: Option<PlayerId>,
}

impl RoundMatch {
    pub fn doubles(court: u32, players: [PlayerId; 4]) -> Self {
        Self {
            court,
            player1: Some(players[0]),
            player2: Some(players[1]),
            player3: Some(players[2]),
            player4: Some(players[3]),
        }
    }

    pub fn singles(court: u32, a: PlayerId, b: PlayerId) -> Self {
        Self {
            court,
            player1: Some(a),
            player2: Some(b),
            player3: None,
            player4: None,
        }
    }

    pub fn is_doubles(&self) -> bool {
        self.player3.is_some() || self.player4.is_some()
    }

    /// Seated ids of one side: (1,2) vs (3,4) when four play, 1 vs 2 otherwise.
    pub fn side(&self, team: Team) -> Vec<PlayerId> {
        let slots = if self.is_doubles() {
            match team {
                Team::One => vec![self.player1, self.player2],
                Team::Two => vec![self.player3, self.player4],
            }
        } else {
            match team {
                Team::One => vec![self.player1],
                Team::Two => vec![self.player2],
            }
        };
        slots.into_iter().flatten().collect()
    }

    /// Everyone seated on this court.
    pub fn players(&self) -> Vec<PlayerId> {
        [self.player1, self.player2, self.player3, self.player4]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// One node of a single-elimination bracket.
///
/// `match_number` is 1-based and increases round-major across the whole
/// bracket. A bye seats its players on side one only, takes no court, and
/// feeds like any other match. `feeds_into` is `None` only for the final.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub match_number: u32,
    /// 1 = first round.
    pub round: u32,
    /// 0-indexed position within the round; parity picks the slot pair the
    /// winner lands in one round up.
    pub position: u32,
    pub player1: Option<PlayerId>,
    pub player2: Option<PlayerId>,
    pub player3: Option<PlayerId>,
    pub player4: Option<PlayerId>,
    pub is_bye: bool,
    pub feeds_into: Option<u32>,
    pub court: Option<u32>,
}

impl BracketMatch {
    /// An empty node: no players, no court, not a bye.
    pub fn placeholder(
        match_number: u32,
        round: u32,
        position: u32,
        feeds_into: Option<u32>,
    ) -> Self {
        Self {
            match_number,
            round,
            position,
            player1: None,
            player2: None,
            player3: None,
            player4: None,
            is_bye: false,
            feeds_into,
            court: None,
        }
    }

    /// Seated ids of one side. Format-aware: a doubles bye looks like a
    /// seated singles match, so occupancy alone cannot decide the layout.
    pub fn side(&self, team: Team, format: MatchFormat) -> Vec<PlayerId> {
        let slots = match (format.is_doubles(), team) {
            (false, Team::One) => vec![self.player1],
            (false, Team::Two) => vec![self.player2],
            (true, Team::One) => vec![self.player1, self.player2],
            (true, Team::Two) => vec![self.player3, self.player4],
        };
        slots.into_iter().flatten().collect()
    }

    /// Both sides fully seated.
    pub fn is_ready(&self, format: MatchFormat) -> bool {
        if format.is_doubles() {
            self.player1.is_some()
                && self.player2.is_some()
                && self.player3.is_some()
                && self.player4.is_some()
        } else {
            self.player1.is_some() && self.player2.is_some()
        }
    }
}

/// Result of one match: winning side and games from the winner's perspective.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub winner: Team,
    pub games_won: u32,
    pub games_lost: u32,
}

/// A submitted mixer round: its number, court assignments, and when it was played.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub number: u32,
    pub matches: Vec<RoundMatch>,
    pub played_at: DateTime<Utc>,
}
