//! Data structures for the scheduler: players, matches, brackets, events.

mod bracket;
mod event;
mod game;
mod player;

pub use bracket::{Bracket, BracketError};
pub use event::{Event, EventError, EventId, EventKind, EventState};
pub use game::{BracketMatch, MatchFormat, MatchScore, MixerFormat, RoundMatch, RoundRecord, Team};
pub use player::{Gender, Player, PlayerId, PlayerStats};
