//! Roster ordering helpers shared by pairing and standings.

use crate::models::Player;
use std::cmp::Reverse;

/// Wins descending, then game differential descending. Stable: ties keep
/// roster order.
pub fn by_standings(players: &[Player]) -> Vec<&Player> {
    let mut out: Vec<&Player> = players.iter().collect();
    out.sort_by_key(|p| (Reverse(p.wins), Reverse(p.game_diff())));
    out
}

/// Wins descending only (singles ladder order). Stable.
pub fn by_wins(players: &[Player]) -> Vec<&Player> {
    let mut out: Vec<&Player> = players.iter().collect();
    out.sort_by_key(|p| Reverse(p.wins));
    out
}
