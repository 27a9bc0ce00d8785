//! Event and EventState: the aggregate a mixer night or tournament lives in.

use crate::models::bracket::{Bracket, BracketError};
use crate::models::game::{MatchFormat, MatchScore, MixerFormat, RoundMatch, RoundRecord};
use crate::models::player::{Gender, Player, PlayerId};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Errors that can occur during event operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EventError {
    /// Event is not in a state that allows this action.
    InvalidState,
    /// Too few players to seat even one match of the chosen format.
    NotEnoughPlayers { required: usize },
    /// Mixed doubles: fewer than `required` players of some gender.
    NotEnoughGenders { required: usize },
    /// Player not found on the roster.
    PlayerNotFound(PlayerId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// No match on this court in the current round.
    CourtNotFound(u32),
    /// No bracket match with this number.
    MatchNotFound(u32),
    /// Bracket match is a bye or not yet fully seated.
    MatchNotReady(u32),
    /// Bracket match already has a reported result.
    MatchAlreadyReported(u32),
    /// Not all courts have a result selected.
    IncompleteResults,
    Bracket(BracketError),
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::InvalidState => write!(f, "Invalid state for this action"),
            EventError::NotEnoughPlayers { required } => {
                write!(f, "Need at least {} players for this format", required)
            }
            EventError::NotEnoughGenders { required } => {
                write!(f, "Mixed doubles needs at least {} men and {} women", required, required)
            }
            EventError::PlayerNotFound(_) => write!(f, "Player not found"),
            EventError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            EventError::CourtNotFound(court) => write!(f, "No match on court {}", court),
            EventError::MatchNotFound(n) => write!(f, "No bracket match numbered {}", n),
            EventError::MatchNotReady(n) => {
                write!(f, "Match {} is not ready for a result", n)
            }
            EventError::MatchAlreadyReported(n) => {
                write!(f, "Match {} already has a result", n)
            }
            EventError::IncompleteResults => write!(f, "Not all courts have a result"),
            EventError::Bracket(e) => write!(f, "{}", e),
        }
    }
}

impl From<BracketError> for EventError {
    fn from(e: BracketError) -> Self {
        EventError::Bracket(e)
    }
}

/// Unique identifier for an event.
pub type EventId = Uuid;

/// What kind of schedule the event runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "format", rename_all = "snake_case")]
pub enum EventKind {
    /// Social mixer: independent rounds generated from current standings.
    Mixer(MixerFormat),
    /// Single-elimination tournament.
    Elimination(MatchFormat),
}

impl Default for EventKind {
    fn default() -> Self {
        EventKind::Mixer(MixerFormat::Doubles)
    }
}

/// Current phase of the event.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventState {
    /// Adding players, picking format and courts; not started.
    #[default]
    Setup,
    /// Mixer play: rounds generated and submitted one at a time.
    Rounds,
    /// Elimination play: bracket built, results reported match by match.
    Knockout,
    /// Event finished.
    Completed,
}

/// Full event state: roster, schedule, staged results, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub kind: EventKind,
    /// Physical courts available for one round.
    pub num_courts: u32,
    pub players: Vec<Player>,
    pub state: EventState,
    /// Current mixer round's court assignments (empty when none generated).
    pub round_matches: Vec<RoundMatch>,
    /// Players without a court in the current round.
    pub sitting_out: Vec<PlayerId>,
    /// Staged results for the current round, by court (before submit).
    pub round_results: HashMap<u32, MatchScore>,
    /// Submitted rounds, oldest first.
    pub round_history: Vec<RoundRecord>,
    /// Elimination bracket (set when a knockout event starts).
    pub bracket: Option<Bracket>,
    /// Reported bracket results by match number.
    pub bracket_results: HashMap<u32, MatchScore>,
    /// Winning side of the final (set when a knockout event completes).
    pub champions: Option<Vec<PlayerId>>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create a new event in Setup state with no players.
    pub fn new(name: impl Into<String>, kind: EventKind, num_courts: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            num_courts,
            players: Vec::new(),
            state: EventState::Setup,
            round_matches: Vec::new(),
            sitting_out: Vec::new(),
            round_results: HashMap::new(),
            round_history: Vec::new(),
            bracket: None,
            bracket_results: HashMap::new(),
            champions: None,
            created_at: Utc::now(),
        }
    }

    /// Create an event with an initial roster. Still in Setup until started.
    pub fn with_players(
        name: impl Into<String>,
        kind: EventKind,
        num_courts: u32,
        players: Vec<Player>,
    ) -> Self {
        Self {
            players,
            ..Self::new(name, kind, num_courts)
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The mixer format, if this is a mixer event.
    pub fn mixer_format(&self) -> Option<MixerFormat> {
        match self.kind {
            EventKind::Mixer(format) => Some(format),
            EventKind::Elimination(_) => None,
        }
    }

    /// Roster in seed order (lower seed first; equal seeds keep insertion order).
    pub fn seeded_players(&self) -> Vec<Player> {
        let mut out = self.players.clone();
        out.sort_by_key(|p| p.seed);
        out
    }

    /// Add a player. Valid in Setup or between mixer rounds (late arrivals
    /// join the next round). Names must be unique (case-insensitive).
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        gender: Option<Gender>,
    ) -> Result<(), EventError> {
        if !matches!(self.state, EventState::Setup | EventState::Rounds) {
            return Err(EventError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(EventError::InvalidState);
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(EventError::DuplicatePlayerName);
        }
        self.players.push(Player::new(name_trimmed, gender));
        Ok(())
    }

    /// Remove a player by id (only valid in Setup).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), EventError> {
        if self.state != EventState::Setup {
            return Err(EventError::InvalidState);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(EventError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Set the number of courts available per round (only valid in Setup).
    pub fn set_courts(&mut self, num_courts: u32) -> Result<(), EventError> {
        if self.state != EventState::Setup || num_courts == 0 {
            return Err(EventError::InvalidState);
        }
        self.num_courts = num_courts;
        Ok(())
    }

    /// Change the event kind (only valid in Setup).
    pub fn set_kind(&mut self, kind: EventKind) -> Result<(), EventError> {
        if self.state != EventState::Setup {
            return Err(EventError::InvalidState);
        }
        self.kind = kind;
        Ok(())
    }

    /// Set a player's seed rank (only valid in Setup).
    pub fn set_player_seed(&mut self, player_id: PlayerId, seed: u32) -> Result<(), EventError> {
        if self.state != EventState::Setup {
            return Err(EventError::InvalidState);
        }
        let p = self
            .get_player_mut(player_id)
            .ok_or(EventError::PlayerNotFound(player_id))?;
        p.seed = seed;
        Ok(())
    }

    /// Deal a random seed order (only valid in Setup). The draw itself stays
    /// deterministic; all randomness lives here, before scheduling.
    pub fn shuffle_seeds(&mut self) -> Result<(), EventError> {
        if self.state != EventState::Setup {
            return Err(EventError::InvalidState);
        }
        self.players.shuffle(&mut rand::thread_rng());
        for (i, p) in self.players.iter_mut().enumerate() {
            p.seed = i as u32 + 1;
        }
        Ok(())
    }

    /// Restart the event: back to Setup with the same roster names and
    /// genders. Stats, seeds, rounds, and bracket are cleared.
    pub fn restart(&mut self) -> Result<(), EventError> {
        if self.state == EventState::Setup {
            return Err(EventError::InvalidState);
        }
        let name = std::mem::take(&mut self.name);
        let kind = self.kind;
        let num_courts = self.num_courts;
        let id = self.id;
        let created_at = self.created_at;
        let mut players = std::mem::take(&mut self.players);
        for p in &mut players {
            p.reset_stats();
        }
        *self = Self::with_players(name, kind, num_courts, players);
        self.id = id;
        self.created_at = created_at;
        Ok(())
    }
}
