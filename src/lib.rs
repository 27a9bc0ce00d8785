//! Tennis mixer and tournament scheduler: library with models and scheduling logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_winner, by_standings, by_wins, complete_event, generate_bracket,
    generate_event_round, generate_round, report_match_result, set_round_result, start_event,
    submit_round_results,
};
pub use models::{
    Bracket, BracketError, BracketMatch, Event, EventError, EventId, EventKind, EventState,
    Gender, MatchFormat, MatchScore, MixerFormat, Player, PlayerId, PlayerStats, RoundMatch,
    RoundRecord, Team,
};
