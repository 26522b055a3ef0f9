use crate::error::GameError;
use crate::game::observer::{
    BidsPlaced, CardPlayed, GameObserver, RoundResult, RoundStarted, RoundSummary, TrickSummary,
};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::player::{Player, PlayerId};
use crate::model::suit::Suit;
use crate::model::trick::Trick;
use core::fmt;
use serde::Serialize;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundPhase {
    Bidding,
    TrickPlay { trick: u8 },
    Scoring,
    Done,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundPhase::Bidding => f.write_str("bidding"),
            RoundPhase::TrickPlay { trick } => write!(f, "trick {trick}"),
            RoundPhase::Scoring => f.write_str("scoring"),
            RoundPhase::Done => f.write_str("done"),
        }
    }
}

/// Cards a round of `number` tricks consumes: every hand plus the trump reveal.
pub const fn cards_needed(number: u8, player_count: usize) -> usize {
    number as usize * player_count + 1
}

/// One round of Judgement, from the deal through scoring.
///
/// Dealing is the constructor: [`RoundState::deal`] returns a round that is
/// already in [`RoundPhase::Bidding`]. Phases then advance strictly in order; calling an operation out of phase is a
/// [`GameError::PhaseViolation`]. Cumulative scores are only touched by
/// [`RoundState::score`], so a round that fails midway leaves them intact.
#[derive(Debug, Clone)]
pub struct RoundState {
    number: u8,
    player_count: usize,
    opening_leader: PlayerId,
    leader: PlayerId,
    trump_card: Card,
    stock: Deck,
    phase: RoundPhase,
    bids: Vec<(PlayerId, u8)>,
    trick_history: Vec<TrickSummary>,
}

impl RoundState {
    /// Shuffles a fresh deck, seats `players[i]` at `PlayerId(i)`, deals
    /// `number` cards to every player in table order and turns up the next
    /// card as trump.
    pub fn deal<R: rand::Rng + ?Sized>(
        number: u8,
        players: &mut [Player],
        opening_leader: PlayerId,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if number == 0 {
            return Err(GameError::InvalidConfig(
                "a round deals at least one card per player".to_string(),
            ));
        }
        let player_count = players.len();
        let mut deck = Deck::shuffled(rng);
        let needed = cards_needed(number, player_count);
        if needed > deck.len() {
            return Err(GameError::InsufficientCards {
                needed,
                available: deck.len(),
            });
        }
        if opening_leader.index() >= player_count {
            return Err(GameError::InvalidConfig(format!(
                "opening leader {opening_leader} is not seated at a {player_count}-player table"
            )));
        }

        let exhausted = || GameError::InsufficientCards {
            needed,
            available: 0,
        };
        for (index, player) in players.iter_mut().enumerate() {
            player.seat_at(PlayerId(index));
            player.reset_for_round();
            for _ in 0..number {
                player.receive_card(deck.draw().ok_or_else(exhausted)?);
            }
        }
        let trump_card = deck.draw().ok_or_else(exhausted)?;

        event!(
            target: "judgement_core::round",
            Level::INFO,
            round = number,
            players = player_count,
            trump = %trump_card,
            leader = %opening_leader,
            "round dealt"
        );

        Ok(Self {
            number,
            player_count,
            opening_leader,
            leader: opening_leader,
            trump_card,
            stock: deck,
            phase: RoundPhase::Bidding,
            bids: Vec::with_capacity(player_count),
            trick_history: Vec::with_capacity(number as usize),
        })
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn trump_card(&self) -> Card {
        self.trump_card
    }

    pub fn trump(&self) -> Suit {
        self.trump_card.suit
    }

    pub fn opening_leader(&self) -> PlayerId {
        self.opening_leader
    }

    pub fn leader(&self) -> PlayerId {
        self.leader
    }

    pub fn bids(&self) -> &[(PlayerId, u8)] {
        &self.bids
    }

    pub fn trick_history(&self) -> &[TrickSummary] {
        &self.trick_history
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    /// Cards left in the stock after the deal and the trump reveal.
    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn started_event(&self, players: &[Player]) -> RoundStarted {
        RoundStarted {
            round: self.number,
            trump_card: self.trump_card,
            trump: self.trump(),
            opening_leader: self.opening_leader,
            players: players.iter().map(Player::summary).collect(),
        }
    }

    /// Collects one bid per player, starting with the opening leader. Bids are
    /// committed only once every player has bid.
    pub fn collect_bids(
        &mut self,
        players: &mut [Player],
        observer: &mut dyn GameObserver,
    ) -> Result<(), GameError> {
        self.expect_phase(RoundPhase::Bidding)?;
        self.check_table(players)?;

        let mut bids: Vec<(PlayerId, u8)> = Vec::with_capacity(self.player_count);
        for seat in self.opening_leader.rotation(self.player_count) {
            let bid = players[seat.index()].choose_bid(self.number, self.trump_card, &bids)?;
            event!(
                target: "judgement_core::round",
                Level::DEBUG,
                round = self.number,
                player = %seat,
                bid,
                "bid placed"
            );
            bids.push((seat, bid));
        }

        for (seat, bid) in &bids {
            players[seat.index()].set_bid(*bid);
        }
        let total = bids.iter().map(|(_, bid)| u32::from(*bid)).sum();
        self.bids = bids;
        self.phase = RoundPhase::TrickPlay { trick: 1 };

        observer.bids_placed(&BidsPlaced {
            round: self.number,
            bids: self.bids.clone(),
            total,
        });
        Ok(())
    }

    /// Plays one full trick starting with the current leader; the winner leads
    /// the next one.
    pub fn play_trick(
        &mut self,
        players: &mut [Player],
        observer: &mut dyn GameObserver,
    ) -> Result<TrickSummary, GameError> {
        let trick_number = match self.phase {
            RoundPhase::TrickPlay { trick } => trick,
            actual => {
                return Err(GameError::PhaseViolation {
                    expected: RoundPhase::TrickPlay {
                        trick: self.tricks_completed() as u8 + 1,
                    },
                    actual,
                });
            }
        };
        self.check_table(players)?;

        let trump = self.trump();
        let mut trick = Trick::new(self.leader, self.player_count, trump);
        for seat in self.leader.rotation(self.player_count) {
            let lead_suit = trick.lead_suit();
            let player = &mut players[seat.index()];
            let card = player.choose_card(self.number, lead_suit, trump, trick.plays())?;
            player.remove_card(card)?;
            trick.play(seat, card)?;

            event!(
                target: "judgement_core::round",
                Level::TRACE,
                round = self.number,
                trick = trick_number,
                player = %seat,
                card = %card,
                "card played"
            );
            observer.card_played(&CardPlayed {
                round: self.number,
                trick: trick_number,
                player: seat,
                card,
                lead_suit: lead_suit.unwrap_or(card.suit),
                leading: lead_suit.is_none(),
            });
        }

        let (winning, plays) = trick.finish()?;
        players[winning.player.index()].record_trick_win();
        self.leader = winning.player;

        event!(
            target: "judgement_core::round",
            Level::DEBUG,
            round = self.number,
            trick = trick_number,
            winner = %winning.player,
            card = %winning.card,
            "trick resolved"
        );

        let summary = TrickSummary {
            round: self.number,
            trick: trick_number,
            winner: winning.player,
            winning_card: winning.card,
            plays,
        };
        self.trick_history.push(summary.clone());
        self.phase = if trick_number >= self.number {
            RoundPhase::Scoring
        } else {
            RoundPhase::TrickPlay {
                trick: trick_number + 1,
            }
        };

        observer.trick_resolved(&summary);
        Ok(summary)
    }

    /// Awards `10 + tricks` to every player who made their bid exactly.
    pub fn score(
        &mut self,
        players: &mut [Player],
        observer: &mut dyn GameObserver,
    ) -> Result<RoundSummary, GameError> {
        self.expect_phase(RoundPhase::Scoring)?;
        self.check_table(players)?;

        debug_assert_eq!(
            players
                .iter()
                .map(|p| usize::from(p.tricks_won()))
                .sum::<usize>(),
            usize::from(self.number),
            "tricks won must add up to the round number"
        );
        debug_assert!(players.iter().all(|p| p.hand().is_empty()));

        let results: Vec<RoundResult> = players
            .iter_mut()
            .map(|player| {
                let points = player.apply_round_score();
                RoundResult {
                    player: player.id(),
                    name: player.name().to_string(),
                    bid: player.bid(),
                    tricks_won: player.tricks_won(),
                    points,
                    total: player.score(),
                }
            })
            .collect();

        for result in &results {
            event!(
                target: "judgement_core::round",
                Level::INFO,
                round = self.number,
                player = %result.player,
                bid = result.bid,
                won = result.tricks_won,
                points = result.points,
                total = result.total,
                "round scored"
            );
        }

        let summary = RoundSummary {
            round: self.number,
            trump: self.trump(),
            results,
        };
        self.phase = RoundPhase::Done;
        observer.round_scored(&summary);
        Ok(summary)
    }

    /// Deals and plays a whole round, notifying `observer` along the way.
    pub fn run<R: rand::Rng + ?Sized>(
        number: u8,
        players: &mut [Player],
        opening_leader: PlayerId,
        rng: &mut R,
        observer: &mut dyn GameObserver,
    ) -> Result<RoundSummary, GameError> {
        let mut round = Self::deal(number, players, opening_leader, rng)?;
        observer.round_started(&round.started_event(players));
        round.collect_bids(players, observer)?;
        while matches!(round.phase(), RoundPhase::TrickPlay { .. }) {
            round.play_trick(players, observer)?;
        }
        round.score(players, observer)
    }

    fn expect_phase(&self, expected: RoundPhase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::PhaseViolation {
                expected,
                actual: self.phase,
            })
        }
    }

    fn check_table(&self, players: &[Player]) -> Result<(), GameError> {
        if players.len() == self.player_count {
            Ok(())
        } else {
            Err(GameError::InvalidConfig(format!(
                "round was dealt to {} players but {} are seated",
                self.player_count,
                players.len()
            )))
        }
    }
}
