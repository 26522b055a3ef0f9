use crate::error::GameError;
use crate::game::observer::PlayerSummary;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::score::round_points;
use crate::model::suit::Suit;
use crate::model::trick::Play;
use crate::policy::{BidContext, DecisionPolicy, PlayContext, PolicyKind, legal_cards};
use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat index in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub usize);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0
    }

    pub const fn next(self, player_count: usize) -> PlayerId {
        PlayerId((self.0 + 1) % player_count)
    }

    /// Every seat once, starting with `self` and moving clockwise.
    pub fn rotation(self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(move |offset| PlayerId((self.0 + offset) % player_count))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

pub struct Player {
    id: PlayerId,
    name: String,
    hand: Hand,
    bid: u8,
    tricks_won: u8,
    score: u32,
    policy: Box<dyn DecisionPolicy>,
}

impl Player {
    pub fn new(name: impl Into<String>, policy: Box<dyn DecisionPolicy>) -> Self {
        Self {
            id: PlayerId(0),
            name: name.into(),
            hand: Hand::new(),
            bid: 0,
            tricks_won: 0,
            score: 0,
            policy,
        }
    }

    pub(crate) fn seat_at(&mut self, id: PlayerId) {
        self.id = id;
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn bid(&self) -> u8 {
        self.bid
    }

    pub fn tricks_won(&self) -> u8 {
        self.tricks_won
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.bid = 0;
        self.tricks_won = 0;
    }

    pub fn receive_card(&mut self, card: Card) {
        self.hand.add(card);
    }

    pub fn remove_card(&mut self, card: Card) -> Result<Card, GameError> {
        if self.hand.remove(card) {
            Ok(card)
        } else {
            Err(GameError::CardNotInHand {
                player: self.id,
                card,
            })
        }
    }

    pub(crate) fn set_bid(&mut self, bid: u8) {
        self.bid = bid;
    }

    pub fn record_trick_win(&mut self) {
        self.tricks_won += 1;
    }

    /// Adds this round's points to the running score and returns them.
    pub fn apply_round_score(&mut self) -> u32 {
        let points = round_points(self.bid, self.tricks_won);
        self.score += points;
        points
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            id: self.id,
            name: self.name.clone(),
            kind: self.policy.kind(),
            bid: self.bid,
            tricks_won: self.tricks_won,
            score: self.score,
        }
    }

    /// Asks the policy for a card and checks it against the legal subset.
    pub(crate) fn choose_card(
        &mut self,
        round: u8,
        lead_suit: Option<Suit>,
        trump: Suit,
        plays: &[Play],
    ) -> Result<Card, GameError> {
        let id = self.id;
        let legal = legal_cards(self.hand.cards(), lead_suit);
        let ctx = PlayContext {
            player: id,
            round,
            hand: self.hand.cards(),
            legal: &legal,
            lead_suit,
            trump,
            plays,
        };
        let card = self
            .policy
            .select_card(&ctx)
            .map_err(|source| GameError::Policy { player: id, source })?;
        if !legal.contains(&card) {
            return Err(GameError::IllegalCardSelection {
                player: id,
                card,
            });
        }
        Ok(card)
    }

    pub(crate) fn choose_bid(
        &mut self,
        round: u8,
        trump_card: Card,
        bids: &[(PlayerId, u8)],
    ) -> Result<u8, GameError> {
        let id = self.id;
        let ctx = BidContext {
            player: id,
            round,
            hand: self.hand.cards(),
            trump_card,
            trump: trump_card.suit,
            bids,
        };
        let bid = self
            .policy
            .choose_bid(&ctx)
            .map_err(|source| GameError::Policy { player: id, source })?;
        if bid > round {
            return Err(GameError::InvalidBid {
                player: id,
                bid,
                max: round,
            });
        }
        Ok(bid)
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.policy.kind())
            .field("hand", &self.hand)
            .field("bid", &self.bid)
            .field("tricks_won", &self.tricks_won)
            .field("score", &self.score)
            .finish()
    }
}
