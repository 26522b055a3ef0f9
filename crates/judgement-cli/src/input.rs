use judgement_bot::TableInput;
use judgement_core::model::card::Card;
use judgement_core::policy::{BidContext, InputRejection, PlayContext};
use std::io::{self, BufRead, Write};

/// Reads the human player's answers one line at a time.
pub struct ConsoleInput<R, W> {
    reader: R,
    out: W,
}

impl<R: BufRead + Send, W: Write + Send> ConsoleInput<R, W> {
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.out)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.out.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn numbered(hand: &[Card]) -> String {
    hand.iter()
        .enumerate()
        .map(|(i, card)| format!("({}){card}", i + 1))
        .collect::<Vec<_>>()
        .join(" ")
}

impl<R: BufRead + Send, W: Write + Send> TableInput for ConsoleInput<R, W> {
    fn prompt_bid(&mut self, ctx: &BidContext) -> io::Result<Option<String>> {
        writeln!(
            self.out,
            "Trump is {} ({}). Your hand: {}",
            ctx.trump,
            ctx.trump_card,
            numbered(ctx.hand)
        )?;
        write!(self.out, "Predict your wins (0-{}): ", ctx.round)?;
        self.read_line()
    }

    fn prompt_card(&mut self, ctx: &PlayContext) -> io::Result<Option<String>> {
        if !ctx.plays.is_empty() {
            let table = ctx
                .plays
                .iter()
                .map(|play| format!("{}:{}", play.player, play.card))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.out, "On the table: {table}")?;
        }
        match ctx.lead_suit {
            Some(lead) => writeln!(self.out, "Lead suit: {lead}, trump: {}", ctx.trump)?,
            None => writeln!(self.out, "You lead. Trump: {}", ctx.trump)?,
        }
        writeln!(self.out, "Your hand: {}", numbered(ctx.hand))?;
        write!(self.out, "Select a card (1-{}): ", ctx.hand.len())?;
        self.read_line()
    }

    fn rejected(&mut self, rejection: &InputRejection) {
        // a broken terminal surfaces on the next prompt
        let _ = writeln!(self.out, ">> {rejection}");
    }
}

#[cfg(test)]
mod tests {
    use super::ConsoleInput;
    use judgement_bot::{HumanPolicy, TableInput};
    use judgement_core::PolicyError;
    use judgement_core::model::card::Card;
    use judgement_core::model::player::PlayerId;
    use judgement_core::model::suit::Suit;
    use judgement_core::policy::{DecisionPolicy, PlayContext, legal_cards};
    use std::io::Cursor;

    #[test]
    fn shows_numbered_hand_and_reprompts() {
        let mut hand: Vec<Card> = ["9♥", "2♠", "K♥"].iter().map(|c| c.parse().unwrap()).collect();
        hand.sort();
        let legal = legal_cards(&hand, Some(Suit::Hearts));
        let ctx = PlayContext {
            player: PlayerId(0),
            round: 3,
            hand: &hand,
            legal: &legal,
            lead_suit: Some(Suit::Hearts),
            trump: Suit::Spades,
            plays: &[],
        };
        let input = ConsoleInput::new(Cursor::new("1\n3\n"), Vec::new());
        let mut policy = HumanPolicy::new(input);
        let card = policy.select_card(&ctx).unwrap();
        assert_eq!(card, "K♥".parse().unwrap());

        let (_, out) = policy.into_input().into_parts();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Your hand: (1)2♠ (2)9♥ (3)K♥"));
        assert!(text.contains(">> you must follow suit (♥)"));
    }

    #[test]
    fn end_of_input_closes_the_policy() {
        let hand: Vec<Card> = vec!["9♥".parse().unwrap()];
        let ctx = PlayContext {
            player: PlayerId(0),
            round: 1,
            hand: &hand,
            legal: &hand,
            lead_suit: None,
            trump: Suit::Spades,
            plays: &[],
        };
        let mut input = ConsoleInput::new(Cursor::new(""), Vec::new());
        assert_eq!(input.prompt_card(&ctx).unwrap(), None);
        let mut policy = HumanPolicy::new(input);
        assert_eq!(policy.select_card(&ctx), Err(PolicyError::InputClosed));
    }
}
