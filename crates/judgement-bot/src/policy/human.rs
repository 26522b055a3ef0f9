use judgement_core::error::PolicyError;
use judgement_core::model::card::Card;
use judgement_core::policy::{
    BidContext, DecisionPolicy, InputRejection, PlayContext, PolicyKind, parse_bid,
    parse_card_choice,
};
use std::collections::VecDeque;
use std::io;
use tracing::{Level, event};

/// Line-oriented source of human input.
///
/// `Ok(None)` means the input is closed. Rejected lines are reported back
/// through [`TableInput::rejected`] before the next prompt.
pub trait TableInput: Send {
    fn prompt_bid(&mut self, ctx: &BidContext) -> io::Result<Option<String>>;
    fn prompt_card(&mut self, ctx: &PlayContext) -> io::Result<Option<String>>;
    fn rejected(&mut self, rejection: &InputRejection);
}

/// Asks its [`TableInput`] until a valid answer arrives.
#[derive(Debug)]
pub struct HumanPolicy<I> {
    input: I,
}

impl<I: TableInput> HumanPolicy<I> {
    pub fn new(input: I) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn into_input(self) -> I {
        self.input
    }

    fn reject(&mut self, rejection: InputRejection, player: &impl std::fmt::Display) {
        event!(
            target: "judgement_bot::human",
            Level::DEBUG,
            player = %player,
            reason = %rejection,
            "input rejected"
        );
        self.input.rejected(&rejection);
    }
}

impl<I: TableInput> DecisionPolicy for HumanPolicy<I> {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Human
    }

    fn select_card(&mut self, ctx: &PlayContext) -> Result<Card, PolicyError> {
        loop {
            let line = self
                .input
                .prompt_card(ctx)?
                .ok_or(PolicyError::InputClosed)?;
            match parse_card_choice(&line, ctx.hand, ctx.legal) {
                Ok(card) => return Ok(card),
                Err(rejection) => self.reject(rejection, &ctx.player),
            }
        }
    }

    fn choose_bid(&mut self, ctx: &BidContext) -> Result<u8, PolicyError> {
        loop {
            let line = self
                .input
                .prompt_bid(ctx)?
                .ok_or(PolicyError::InputClosed)?;
            match parse_bid(&line, ctx.round) {
                Ok(bid) => return Ok(bid),
                Err(rejection) => self.reject(rejection, &ctx.player),
            }
        }
    }
}

/// Replays prepared lines; records every rejection it is told about.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    rejections: Vec<InputRejection>,
}

impl ScriptedInput {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            rejections: Vec::new(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    pub fn rejections(&self) -> &[InputRejection] {
        &self.rejections
    }
}

impl TableInput for ScriptedInput {
    fn prompt_bid(&mut self, _ctx: &BidContext) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn prompt_card(&mut self, _ctx: &PlayContext) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn rejected(&mut self, rejection: &InputRejection) {
        self.rejections.push(rejection.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::{HumanPolicy, ScriptedInput};
    use judgement_core::error::PolicyError;
    use judgement_core::model::card::Card;
    use judgement_core::model::player::PlayerId;
    use judgement_core::model::suit::Suit;
    use judgement_core::policy::{
        BidContext, DecisionPolicy, InputRejection, PlayContext, legal_cards,
    };

    fn cards(texts: &[&str]) -> Vec<Card> {
        let mut cards: Vec<Card> = texts.iter().map(|c| c.parse().unwrap()).collect();
        cards.sort();
        cards
    }

    #[test]
    fn reprompts_until_a_legal_card_is_chosen() {
        // sorted hand: 2♠, 9♥, K♥, 4♣
        let hand = cards(&["K♥", "4♣", "2♠", "9♥"]);
        let legal = legal_cards(&hand, Some(Suit::Hearts));
        let ctx = PlayContext {
            player: PlayerId(0),
            round: 4,
            hand: &hand,
            legal: &legal,
            lead_suit: Some(Suit::Hearts),
            trump: Suit::Clubs,
            plays: &[],
        };
        let mut policy = HumanPolicy::new(ScriptedInput::new(["abc", "9", "1", "3"]));
        let card = policy.select_card(&ctx).unwrap();
        assert_eq!(card, "K♥".parse().unwrap());

        let input = policy.into_input();
        assert_eq!(
            input.rejections(),
            &[
                InputRejection::NotANumber("abc".to_string()),
                InputRejection::IndexOutOfRange { index: 9, len: 4 },
                InputRejection::MustFollowSuit(Suit::Hearts),
            ]
        );
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn reprompts_until_bid_is_in_range() {
        let hand = cards(&["K♥", "4♣"]);
        let ctx = BidContext {
            player: PlayerId(0),
            round: 2,
            hand: &hand,
            trump_card: "5♦".parse().unwrap(),
            trump: Suit::Diamonds,
            bids: &[],
        };
        let mut policy = HumanPolicy::new(ScriptedInput::new(["-1", "3", "", "2"]));
        assert_eq!(policy.choose_bid(&ctx), Ok(2));
        assert_eq!(policy.input().rejections().len(), 3);
    }

    #[test]
    fn closed_input_is_an_error() {
        let hand = cards(&["K♥"]);
        let ctx = BidContext {
            player: PlayerId(0),
            round: 1,
            hand: &hand,
            trump_card: "5♦".parse().unwrap(),
            trump: Suit::Diamonds,
            bids: &[],
        };
        let mut policy = HumanPolicy::new(ScriptedInput::new(["7"]));
        assert_eq!(policy.choose_bid(&ctx), Err(PolicyError::InputClosed));
    }
}
