//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player, referenced from match slots.
pub type PlayerId = Uuid;

/// Gender tag used by mixed-doubles pairing. Optional on a player.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Serializable stats summary, used by standings rows.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub game_diff: i64,
    pub rounds_sat_out: u32,
}

impl PlayerStats {
    pub fn from_player(p: &Player) -> Self {
        Self {
            wins: p.wins,
            losses: p.losses,
            games_won: p.games_won,
            games_lost: p.games_lost,
            game_diff: p.game_diff(),
            rounds_sat_out: p.rounds_sat_out,
        }
    }
}

/// A player on an event roster, with running stats.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub gender: Option<Gender>,
    /// Seed rank for the draw: lower = stronger. Equal seeds keep insertion order.
    pub seed: u32,
    pub wins: u32,
    pub losses: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub rounds_sat_out: u32,
}

impl Player {
    /// Create a new player with the given name. Stats start at zero.
    pub fn new(name: impl Into<String>, gender: Option<Gender>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            name,
            gender,
            seed: 0,
            wins: 0,
            losses: 0,
            games_won: 0,
            games_lost: 0,
            rounds_sat_out: 0,
        }
    }

    /// Games won minus games lost.
    pub fn game_diff(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }

    /// Snapshot of the running stats.
    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from_player(self)
    }

    /// Record a won match and its game score.
    pub fn add_win(&mut self, games_won: u32, games_lost: u32) {
        self.wins += 1;
        self.games_won += games_won;
        self.games_lost += games_lost;
    }

    /// Record a lost match and its game score.
    pub fn add_loss(&mut self, games_won: u32, games_lost: u32) {
        self.losses += 1;
        self.games_won += games_won;
        self.games_lost += games_lost;
    }

    /// Count one round spent off court.
    pub fn record_sat_out(&mut self) {
        self.rounds_sat_out += 1;
    }

    /// Zero out stats and seed (used when an event restarts).
    pub fn reset_stats(&mut self) {
        self.seed = 0;
        self.wins = 0;
        self.losses = 0;
        self.games_won = 0;
        self.games_lost = 0;
        self.rounds_sat_out = 0;
    }
}
