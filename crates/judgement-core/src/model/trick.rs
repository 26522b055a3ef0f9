use crate::model::card::Card;
use crate::model::player::PlayerId;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub player: PlayerId,
    pub card: Card,
}

impl Play {
    pub const fn new(player: PlayerId, card: Card) -> Self {
        Self { player, card }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("trick incomplete: {played} of {expected} cards played")]
    Incomplete { played: usize, expected: usize },
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerId,
        actual: PlayerId,
    },
    #[error("{0} has already played this trick")]
    AlreadyPlayed(PlayerId),
}

/// Whether `candidate` takes the trick away from `current`.
///
/// Trump beats any non-trump; within trump, or within the lead suit, the
/// higher rank wins. An off-suit non-trump card never wins.
pub fn beats(candidate: Card, current: Card, lead: Suit, trump: Suit) -> bool {
    let candidate_trump = candidate.is_trump(trump);
    let current_trump = current.is_trump(trump);
    if candidate_trump && !current_trump {
        return true;
    }
    if candidate_trump && current_trump {
        return candidate.rank > current.rank;
    }
    if candidate.suit == lead && current.suit == lead {
        return candidate.rank > current.rank;
    }
    false
}

/// The play currently holding the trick, `None` for an empty slice.
pub fn winning_play(plays: &[Play], trump: Suit) -> Option<Play> {
    let (first, rest) = plays.split_first()?;
    let lead = first.card.suit;
    Some(rest.iter().fold(*first, |winner, play| {
        if beats(play.card, winner.card, lead, trump) {
            *play
        } else {
            winner
        }
    }))
}

pub fn resolve_trick(plays: &[Play], trump: Suit) -> Option<PlayerId> {
    winning_play(plays, trump).map(|play| play.player)
}

/// One trick in progress. The winning play is tracked as cards arrive.
#[derive(Debug, Clone)]
pub struct Trick {
    leader: PlayerId,
    player_count: usize,
    trump: Suit,
    plays: Vec<Play>,
    winning: Option<Play>,
}

impl Trick {
    pub fn new(leader: PlayerId, player_count: usize, trump: Suit) -> Self {
        Self {
            leader,
            player_count,
            trump,
            plays: Vec::with_capacity(player_count),
            winning: None,
        }
    }

    pub fn leader(&self) -> PlayerId {
        self.leader
    }

    pub fn trump(&self) -> Suit {
        self.trump
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == self.player_count
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn winning_play(&self) -> Option<Play> {
        self.winning
    }

    pub fn play(&mut self, player: PlayerId, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.player == player) {
            return Err(TrickError::AlreadyPlayed(player));
        }

        let expected = self.expected_player();
        if expected != player {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: player,
            });
        }

        let play = Play::new(player, card);
        self.winning = match (self.winning, self.lead_suit()) {
            (Some(current), Some(lead)) if !beats(card, current.card, lead, self.trump) => {
                Some(current)
            }
            _ => Some(play),
        };
        self.plays.push(play);
        Ok(())
    }

    pub fn winner(&self) -> Option<PlayerId> {
        if !self.is_complete() {
            return None;
        }
        self.winning.map(|play| play.player)
    }

    /// Consumes a complete trick, yielding the winning play and all plays.
    pub fn finish(self) -> Result<(Play, Vec<Play>), TrickError> {
        let complete = self.is_complete();
        match self.winning {
            Some(winning) if complete => Ok((winning, self.plays)),
            _ => Err(TrickError::Incomplete {
                played: self.plays.len(),
                expected: self.player_count,
            }),
        }
    }

    fn expected_player(&self) -> PlayerId {
        PlayerId((self.leader.index() + self.plays.len()) % self.player_count)
    }
}
