use crate::model::card::Card;
use crate::model::player::PlayerId;
use crate::model::round::RoundPhase;
use crate::model::trick::TrickError;
use thiserror::Error;

/// Failures reported by a decision policy itself (not by its choices).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("input closed before a valid choice was made")]
    InputClosed,
    #[error("input error: {0}")]
    Io(String),
    #[error("no legal card to choose from")]
    NoLegalCards,
}

impl From<std::io::Error> for PolicyError {
    fn from(value: std::io::Error) -> Self {
        PolicyError::Io(value.to_string())
    }
}

/// Errors that abort a game run. Recoverable human input mistakes never
/// surface here; they are handled by the policy that reads the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("deck cannot deal {needed} cards, only {available} available")]
    InsufficientCards { needed: usize, available: usize },
    #[error("{player} bid {bid}, expected a value in 0..={max}")]
    InvalidBid { player: PlayerId, bid: u8, max: u8 },
    #[error("{player} selected {card}, which is not a legal play")]
    IllegalCardSelection { player: PlayerId, card: Card },
    #[error("{card} is not in the hand of {player}")]
    CardNotInHand { player: PlayerId, card: Card },
    #[error("decision policy for {player} failed: {source}")]
    Policy {
        player: PlayerId,
        #[source]
        source: PolicyError,
    },
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
    #[error("round is in the {actual} phase, expected {expected}")]
    PhaseViolation {
        expected: RoundPhase,
        actual: RoundPhase,
    },
    #[error(transparent)]
    Trick(#[from] TrickError),
}
