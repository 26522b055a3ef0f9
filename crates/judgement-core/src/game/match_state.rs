use crate::error::GameError;
use crate::game::observer::{GameObserver, RoundSummary};
use crate::model::deck::DECK_SIZE;
use crate::model::player::{Player, PlayerId};
use crate::model::round::{RoundState, cards_needed};
use crate::model::score::FinalStandings;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

pub const DEFAULT_PLAYERS: usize = 4;
pub const DEFAULT_ROUNDS: u8 = 5;
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub player_count: usize,
    pub total_rounds: u8,
    /// Advance the opening lead one seat per round instead of always
    /// starting with the first seat.
    pub rotate_opening_lead: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: DEFAULT_PLAYERS,
            total_rounds: DEFAULT_ROUNDS,
            rotate_opening_lead: false,
        }
    }
}

impl GameConfig {
    pub fn new(player_count: usize, total_rounds: u8) -> Self {
        Self {
            player_count,
            total_rounds,
            ..Self::default()
        }
    }

    pub fn with_rotating_lead(mut self, rotate: bool) -> Self {
        self.rotate_opening_lead = rotate;
        self
    }

    /// Cards dealt in the largest (final) round.
    pub fn max_cards_needed(&self) -> usize {
        cards_needed(self.total_rounds, self.player_count)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.player_count < MIN_PLAYERS {
            return Err(GameError::InvalidConfig(format!(
                "at least {MIN_PLAYERS} players are required, got {}",
                self.player_count
            )));
        }
        if self.total_rounds == 0 {
            return Err(GameError::InvalidConfig(
                "a game needs at least one round".to_string(),
            ));
        }
        let needed = self.max_cards_needed();
        if needed > DECK_SIZE {
            return Err(GameError::InsufficientCards {
                needed,
                available: DECK_SIZE,
            });
        }
        Ok(())
    }

    pub fn opening_leader(&self, round: u8) -> PlayerId {
        if self.rotate_opening_lead && self.player_count > 0 {
            PlayerId((usize::from(round).saturating_sub(1)) % self.player_count)
        } else {
            PlayerId(0)
        }
    }
}

/// A full game: rounds `1..=total_rounds`, hand size equal to the round number.
#[derive(Debug)]
pub struct MatchState {
    config: GameConfig,
    players: Vec<Player>,
    rounds_played: u8,
    history: Vec<RoundSummary>,
}

impl MatchState {
    /// Validates the configuration and seats `players` in the given order.
    pub fn new(config: GameConfig, mut players: Vec<Player>) -> Result<Self, GameError> {
        config.validate()?;
        if players.len() != config.player_count {
            return Err(GameError::InvalidConfig(format!(
                "configured for {} players but {} were seated",
                config.player_count,
                players.len()
            )));
        }
        for (index, player) in players.iter_mut().enumerate() {
            player.seat_at(PlayerId(index));
        }
        Ok(Self {
            config,
            players,
            rounds_played: 0,
            history: Vec::with_capacity(usize::from(config.total_rounds)),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn rounds_played(&self) -> u8 {
        self.rounds_played
    }

    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.rounds_played >= self.config.total_rounds
    }

    pub fn standings(&self) -> FinalStandings {
        FinalStandings::from_players(&self.players)
    }

    /// Plays the next round. Returns `None` once every round has been played.
    pub fn play_next_round<R: rand::Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        observer: &mut dyn GameObserver,
    ) -> Result<Option<RoundSummary>, GameError> {
        if self.is_finished() {
            return Ok(None);
        }
        let number = self.rounds_played + 1;
        let leader = self.config.opening_leader(number);
        let summary = RoundState::run(number, &mut self.players, leader, rng, observer)?;
        self.rounds_played = number;
        self.history.push(summary.clone());
        Ok(Some(summary))
    }

    pub fn run<R: rand::Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        observer: &mut dyn GameObserver,
    ) -> Result<FinalStandings, GameError> {
        while self.play_next_round(rng, observer)?.is_some() {}
        let standings = self.standings();
        if let Some(leader) = standings.leader() {
            event!(
                target: "judgement_core::game",
                Level::INFO,
                rounds = self.rounds_played,
                winner = %leader.name,
                score = leader.score,
                "game finished"
            );
        }
        observer.game_finished(&standings);
        Ok(standings)
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}

/// Plays a complete game and returns the final standings.
pub fn start_game<R: rand::Rng + ?Sized>(
    config: GameConfig,
    players: Vec<Player>,
    rng: &mut R,
    observer: &mut dyn GameObserver,
) -> Result<FinalStandings, GameError> {
    let mut state = MatchState::new(config, players)?;
    state.run(rng, observer)
}
