use judgement_core::GameEvent;
use judgement_core::game::observer::{
    BidsPlaced, CardPlayed, GameObserver, RoundStarted, RoundSummary, TrickSummary,
};
use judgement_core::model::player::PlayerId;
use judgement_core::model::score::FinalStandings;
use std::io::{self, Write};

/// Narrates the game as plain text.
///
/// Observer hooks cannot fail, so the first write error is kept and reported
/// through [`TerminalObserver::take_error`].
pub struct TerminalObserver<W: Write> {
    out: W,
    names: Vec<String>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            names: Vec::new(),
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn name(&self, player: PlayerId) -> String {
        self.names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| player.to_string())
    }

    fn emit(&mut self, text: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.write_fmt(text).and_then(|_| self.out.write_all(b"\n")) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> GameObserver for TerminalObserver<W> {
    fn round_started(&mut self, event: &RoundStarted) {
        self.names = event.players.iter().map(|p| p.name.clone()).collect();
        self.emit(format_args!(""));
        self.emit(format_args!("=== ROUND {} ===", event.round));
        self.emit(format_args!(
            "Trump suit: {} (revealed {})",
            event.trump, event.trump_card
        ));
        let scores = event
            .players
            .iter()
            .map(|p| format!("{}: {}", p.name, p.score))
            .collect::<Vec<_>>()
            .join(" | ");
        self.emit(format_args!("Scores: {scores}"));
        let leader = self.name(event.opening_leader);
        self.emit(format_args!("{leader} leads the first trick"));
    }

    fn bids_placed(&mut self, event: &BidsPlaced) {
        for (player, bid) in &event.bids {
            let name = self.name(*player);
            self.emit(format_args!("{name} predicts {bid}"));
        }
        let verdict = match event.total.cmp(&u32::from(event.round)) {
            std::cmp::Ordering::Greater => "overbid",
            std::cmp::Ordering::Less => "underbid",
            std::cmp::Ordering::Equal => "exact",
        };
        self.emit(format_args!(
            "Total predicted: {} of {} ({verdict})",
            event.total, event.round
        ));
    }

    fn card_played(&mut self, event: &CardPlayed) {
        let name = self.name(event.player);
        let note = if event.leading { " (leading)" } else { "" };
        self.emit(format_args!("{name} plays {}{note}", event.card));
    }

    fn trick_resolved(&mut self, event: &TrickSummary) {
        let name = self.name(event.winner);
        self.emit(format_args!(
            ">> {name} wins trick {} with {}",
            event.trick, event.winning_card
        ));
    }

    fn round_scored(&mut self, event: &RoundSummary) {
        self.emit(format_args!("--- Round {} results ---", event.round));
        for result in &event.results {
            let outcome = if result.made_bid() {
                format!("SUCCESS (+{})", result.points)
            } else {
                "FAIL (0)".to_string()
            };
            self.emit(format_args!(
                "{}: bid {}, won {} -> {outcome}, total {}",
                result.name, result.bid, result.tricks_won, result.total
            ));
        }
    }

    fn game_finished(&mut self, standings: &FinalStandings) {
        self.emit(format_args!(""));
        self.emit(format_args!("=== FINAL SCORES ==="));
        for entry in standings.entries() {
            self.emit(format_args!(
                "{}. {}: {} points",
                entry.place, entry.name, entry.score
            ));
        }
        if let Some(leader) = standings.leader() {
            let name = leader.name.clone();
            self.emit(format_args!("Winner: {name}"));
        }
    }
}

/// Writes every event as one JSON object per line.
pub struct JsonlObserver<W: Write> {
    out: W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> JsonlObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            error: None,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes the writer and returns the first error seen, if any.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn record(&mut self, event: GameEvent) {
        if self.error.is_some() {
            return;
        }
        let result = event
            .to_json_line()
            .map_err(io::Error::from)
            .and_then(|line| writeln!(self.out, "{line}"));
        match result {
            Ok(()) => self.written += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

impl<W: Write> GameObserver for JsonlObserver<W> {
    fn round_started(&mut self, event: &RoundStarted) {
        self.record(GameEvent::RoundStarted(event.clone()));
    }

    fn bids_placed(&mut self, event: &BidsPlaced) {
        self.record(GameEvent::BidsPlaced(event.clone()));
    }

    fn card_played(&mut self, event: &CardPlayed) {
        self.record(GameEvent::CardPlayed(event.clone()));
    }

    fn trick_resolved(&mut self, event: &TrickSummary) {
        self.record(GameEvent::TrickResolved(event.clone()));
    }

    fn round_scored(&mut self, event: &RoundSummary) {
        self.record(GameEvent::RoundScored(event.clone()));
    }

    fn game_finished(&mut self, standings: &FinalStandings) {
        self.record(GameEvent::GameFinished(standings.clone()));
    }
}

/// Forwards every notification to each observer in order.
#[derive(Default)]
pub struct Fanout<'a> {
    observers: Vec<&'a mut dyn GameObserver>,
}

impl<'a> Fanout<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observer: &'a mut dyn GameObserver) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl GameObserver for Fanout<'_> {
    fn round_started(&mut self, event: &RoundStarted) {
        for observer in &mut self.observers {
            observer.round_started(event);
        }
    }

    fn bids_placed(&mut self, event: &BidsPlaced) {
        for observer in &mut self.observers {
            observer.bids_placed(event);
        }
    }

    fn card_played(&mut self, event: &CardPlayed) {
        for observer in &mut self.observers {
            observer.card_played(event);
        }
    }

    fn trick_resolved(&mut self, event: &TrickSummary) {
        for observer in &mut self.observers {
            observer.trick_resolved(event);
        }
    }

    fn round_scored(&mut self, event: &RoundSummary) {
        for observer in &mut self.observers {
            observer.round_scored(event);
        }
    }

    fn game_finished(&mut self, standings: &FinalStandings) {
        for observer in &mut self.observers {
            observer.game_finished(standings);
        }
    }
}
