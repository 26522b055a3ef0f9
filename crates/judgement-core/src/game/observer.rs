use crate::model::card::Card;
use crate::model::player::PlayerId;
use crate::model::score::FinalStandings;
use crate::model::suit::Suit;
use crate::model::trick::Play;
use crate::policy::PolicyKind;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub kind: PolicyKind,
    pub bid: u8,
    pub tricks_won: u8,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundStarted {
    pub round: u8,
    pub trump_card: Card,
    pub trump: Suit,
    pub opening_leader: PlayerId,
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BidsPlaced {
    pub round: u8,
    pub bids: Vec<(PlayerId, u8)>,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardPlayed {
    pub round: u8,
    pub trick: u8,
    pub player: PlayerId,
    pub card: Card,
    pub lead_suit: Suit,
    pub leading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickSummary {
    pub round: u8,
    pub trick: u8,
    pub winner: PlayerId,
    pub winning_card: Card,
    pub plays: Vec<Play>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    pub player: PlayerId,
    pub name: String,
    pub bid: u8,
    pub tricks_won: u8,
    pub points: u32,
    pub total: u32,
}

impl RoundResult {
    pub fn made_bid(&self) -> bool {
        self.bid == self.tricks_won
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round: u8,
    pub trump: Suit,
    pub results: Vec<RoundResult>,
}

impl RoundSummary {
    pub fn result_for(&self, player: PlayerId) -> Option<&RoundResult> {
        self.results.iter().find(|result| result.player == player)
    }
}

/// Receives snapshots as the game advances. Every hook defaults to a no-op.
pub trait GameObserver {
    fn round_started(&mut self, _event: &RoundStarted) {}
    fn bids_placed(&mut self, _event: &BidsPlaced) {}
    fn card_played(&mut self, _event: &CardPlayed) {}
    fn trick_resolved(&mut self, _event: &TrickSummary) {}
    fn round_scored(&mut self, _event: &RoundSummary) {}
    fn game_finished(&mut self, _standings: &FinalStandings) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// Every observer notification as one serializable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted(RoundStarted),
    BidsPlaced(BidsPlaced),
    CardPlayed(CardPlayed),
    TrickResolved(TrickSummary),
    RoundScored(RoundSummary),
    GameFinished(FinalStandings),
}

impl GameEvent {
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }

    pub fn tricks(&self) -> impl Iterator<Item = &TrickSummary> {
        self.events.iter().filter_map(|event| match event {
            GameEvent::TrickResolved(trick) => Some(trick),
            _ => None,
        })
    }

    pub fn rounds(&self) -> impl Iterator<Item = &RoundSummary> {
        self.events.iter().filter_map(|event| match event {
            GameEvent::RoundScored(round) => Some(round),
            _ => None,
        })
    }
}

impl GameObserver for EventLog {
    fn round_started(&mut self, event: &RoundStarted) {
        self.events.push(GameEvent::RoundStarted(event.clone()));
    }

    fn bids_placed(&mut self, event: &BidsPlaced) {
        self.events.push(GameEvent::BidsPlaced(event.clone()));
    }

    fn card_played(&mut self, event: &CardPlayed) {
        self.events.push(GameEvent::CardPlayed(event.clone()));
    }

    fn trick_resolved(&mut self, event: &TrickSummary) {
        self.events.push(GameEvent::TrickResolved(event.clone()));
    }

    fn round_scored(&mut self, event: &RoundSummary) {
        self.events.push(GameEvent::RoundScored(event.clone()));
    }

    fn game_finished(&mut self, standings: &FinalStandings) {
        self.events.push(GameEvent::GameFinished(standings.clone()));
    }
}
