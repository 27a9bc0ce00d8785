//! Bracket structure: the full single-elimination match graph.

use crate::models::game::{BracketMatch, MatchFormat};
use serde::{Deserialize, Serialize};

/// Errors from bracket construction and winner advancement.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Doubles draw invoked with an odd player count (two players form one team).
    OddPlayerCount { players: usize },
    /// A match number that is not present in the structure. Brackets are
    /// built with every feed target in place, so this is a defect, not a
    /// runtime condition.
    MissingMatch { match_number: u32 },
    /// Winner id count does not fit the bracket's format (1 per side for
    /// singles, 2 for doubles).
    WrongWinnerCount { expected: usize, got: usize },
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::OddPlayerCount { players } => {
                write!(f, "Doubles requires an even player count (got {})", players)
            }
            BracketError::MissingMatch { match_number } => {
                write!(f, "Match {} is not in the bracket", match_number)
            }
            BracketError::WrongWinnerCount { expected, got } => {
                write!(f, "Expected {} winner id(s), got {}", expected, got)
            }
        }
    }
}

/// A complete single-elimination structure. Built once per tournament;
/// later rounds start as placeholders and are filled only by winner
/// advancement, never regenerated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub format: MatchFormat,
    /// All matches, round-major then position order.
    pub matches: Vec<BracketMatch>,
    /// Smallest power of two holding every competing unit.
    pub bracket_size: u32,
    pub total_rounds: u32,
    /// Match count per round, indexed by round - 1.
    pub matches_per_round: Vec<u32>,
    pub total_matches: u32,
}

impl Bracket {
    pub fn match_by_number(&self, match_number: u32) -> Option<&BracketMatch> {
        self.matches.iter().find(|m| m.match_number == match_number)
    }

    pub fn match_by_number_mut(&mut self, match_number: u32) -> Option<&mut BracketMatch> {
        self.matches.iter_mut().find(|m| m.match_number == match_number)
    }

    /// The match nothing feeds out of (None for a degenerate empty bracket).
    pub fn final_match(&self) -> Option<&BracketMatch> {
        self.matches.iter().find(|m| m.feeds_into.is_none())
    }
}
