use crate::bid::heuristic_bid;
use judgement_core::error::PolicyError;
use judgement_core::model::card::Card;
use judgement_core::policy::{BidContext, DecisionPolicy, PlayContext, PolicyKind};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{Level, event};

/// Computer player: uniform random over the legal cards, fixed bid formula.
#[derive(Debug, Clone)]
pub struct AutomatedPolicy {
    rng: StdRng,
}

impl AutomatedPolicy {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl DecisionPolicy for AutomatedPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Automated
    }

    fn select_card(&mut self, ctx: &PlayContext) -> Result<Card, PolicyError> {
        let chosen = ctx
            .legal
            .choose(&mut self.rng)
            .copied()
            .ok_or(PolicyError::NoLegalCards)?;
        log_play_decision(ctx, chosen);
        Ok(chosen)
    }

    fn choose_bid(&mut self, ctx: &BidContext) -> Result<u8, PolicyError> {
        let bid = heuristic_bid(ctx.hand, ctx.trump, ctx.round);
        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "judgement_bot::bid",
                Level::DEBUG,
                player = %ctx.player,
                round = ctx.round,
                trump = %ctx.trump,
                hand_size = ctx.hand.len(),
                bid,
            );
        }
        Ok(bid)
    }
}

fn log_play_decision(ctx: &PlayContext, chosen: Card) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let legal_preview = if ctx.legal.len() <= 6 {
        ctx.legal
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", ctx.legal.len())
    };

    event!(
        target: "judgement_bot::play",
        Level::DEBUG,
        player = %ctx.player,
        round = ctx.round,
        lead = ?ctx.lead_suit,
        trump = %ctx.trump,
        legal_count = ctx.legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        trick_cards = ctx.plays.len(),
    );
}
