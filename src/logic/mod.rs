//! Scheduling logic: bracket building, round pairing, and event flow.

mod bracket;
mod knockout;
mod pairing;
mod ranking;
mod rounds;
mod setup;

pub use bracket::{advance_winner, generate_bracket};
pub use knockout::report_match_result;
pub use pairing::generate_round;
pub use ranking::{by_standings, by_wins};
pub use rounds::{complete_event, generate_event_round, set_round_result, submit_round_results};
pub use setup::start_event;
