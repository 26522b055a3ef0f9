use crate::error::PolicyError;
use crate::model::card::Card;
use crate::model::player::PlayerId;
use crate::model::suit::Suit;
use crate::model::trick::Play;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Human,
    Automated,
}

/// What a player sees when it is their turn to play a card.
#[derive(Debug, Clone, Copy)]
pub struct PlayContext<'a> {
    pub player: PlayerId,
    pub round: u8,
    pub hand: &'a [Card],
    /// Cards the player may play; never empty while the hand is not.
    pub legal: &'a [Card],
    pub lead_suit: Option<Suit>,
    pub trump: Suit,
    pub plays: &'a [Play],
}

/// What a player sees when bidding. Bids range over `0..=round`.
#[derive(Debug, Clone, Copy)]
pub struct BidContext<'a> {
    pub player: PlayerId,
    pub round: u8,
    pub hand: &'a [Card],
    pub trump_card: Card,
    pub trump: Suit,
    pub bids: &'a [(PlayerId, u8)],
}

/// Source of a player's decisions, injected into each player at the table.
pub trait DecisionPolicy: Send {
    fn kind(&self) -> PolicyKind;

    /// Must return a card from `ctx.legal`.
    fn select_card(&mut self, ctx: &PlayContext) -> Result<Card, PolicyError>;

    /// Must return a bid in `0..=ctx.round`.
    fn choose_bid(&mut self, ctx: &BidContext) -> Result<u8, PolicyError>;
}

/// Follow suit when possible, otherwise anything goes.
pub fn legal_cards(hand: &[Card], lead_suit: Option<Suit>) -> Vec<Card> {
    if let Some(lead) = lead_suit {
        let following: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead).collect();
        if !following.is_empty() {
            return following;
        }
    }
    hand.to_vec()
}

/// Recoverable problems with typed input; the reader re-prompts on these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputRejection {
    #[error("please enter a number")]
    NotANumber(String),
    #[error("invalid number, choose 1-{len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("you must follow suit ({0})")]
    MustFollowSuit(Suit),
    #[error("bid must be between 0 and {max}")]
    BidOutOfRange { bid: i64, max: u8 },
}

fn parse_number(input: &str) -> Result<i64, InputRejection> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| InputRejection::NotANumber(trimmed.to_string()))
}

/// Maps a 1-based hand index to a card and accepts it only if it is in
/// `legal`, the subset produced by [`legal_cards`].
pub fn parse_card_choice(
    input: &str,
    hand: &[Card],
    legal: &[Card],
) -> Result<Card, InputRejection> {
    let index = parse_number(input)?;
    let card = usize::try_from(index.saturating_sub(1))
        .ok()
        .and_then(|i| hand.get(i).copied())
        .ok_or(InputRejection::IndexOutOfRange {
            index,
            len: hand.len(),
        })?;
    if legal.contains(&card) {
        return Ok(card);
    }
    // a restricted subset only ever holds the lead suit
    let lead = legal.first().map_or(card.suit, |c| c.suit);
    Err(InputRejection::MustFollowSuit(lead))
}

pub fn parse_bid(input: &str, max: u8) -> Result<u8, InputRejection> {
    let bid = parse_number(input)?;
    u8::try_from(bid)
        .ok()
        .filter(|b| *b <= max)
        .ok_or(InputRejection::BidOutOfRange { bid, max })
}

#[cfg(test)]
mod tests {
    use super::{InputRejection, legal_cards, parse_bid, parse_card_choice};
    use crate::model::card::Card;
    use crate::model::suit::Suit;

    fn hand(cards: &[&str]) -> Vec<Card> {
        let mut cards: Vec<Card> = cards.iter().map(|c| c.parse().unwrap()).collect();
        cards.sort();
        cards
    }

    #[test]
    fn legal_subset_restricts_to_lead_suit() {
        let hand = hand(&["2♠", "9♥", "K♥", "4♣"]);
        let legal = legal_cards(&hand, Some(Suit::Hearts));
        assert_eq!(legal.len(), 2);
        assert!(legal.iter().all(|c| c.suit == Suit::Hearts));
    }

    #[test]
    fn void_in_lead_suit_allows_any_card() {
        let hand = hand(&["2♠", "9♥", "4♣"]);
        assert_eq!(legal_cards(&hand, Some(Suit::Diamonds)), hand);
        assert_eq!(legal_cards(&hand, None), hand);
    }

    #[test]
    fn card_choice_is_one_based() {
        let hand = hand(&["2♠", "9♥", "4♣"]);
        assert_eq!(parse_card_choice(" 2 ", &hand, &hand), Ok(hand[1]));
    }

    #[test]
    fn card_choice_rejections() {
        let hand = hand(&["2♠", "9♥", "4♣"]);
        assert_eq!(
            parse_card_choice("x", &hand, &hand),
            Err(InputRejection::NotANumber("x".to_string()))
        );
        assert_eq!(
            parse_card_choice("0", &hand, &hand),
            Err(InputRejection::IndexOutOfRange { index: 0, len: 3 })
        );
        assert_eq!(
            parse_card_choice("4", &hand, &hand),
            Err(InputRejection::IndexOutOfRange { index: 4, len: 3 })
        );
        let hearts = legal_cards(&hand, Some(Suit::Hearts));
        assert_eq!(
            parse_card_choice("1", &hand, &hearts),
            Err(InputRejection::MustFollowSuit(Suit::Hearts))
        );
        let void = legal_cards(&hand, Some(Suit::Diamonds));
        assert_eq!(parse_card_choice("1", &hand, &void), Ok(hand[0]));
    }

    #[test]
    fn card_choice_checks_membership_in_the_given_subset() {
        // sorted: 2♠, 9♥, K♥, 4♣
        let hand = hand(&["2♠", "9♥", "K♥", "4♣"]);
        let only_king = [hand[2]];
        assert_eq!(parse_card_choice("3", &hand, &only_king), Ok(hand[2]));
        assert_eq!(
            parse_card_choice("2", &hand, &only_king),
            Err(InputRejection::MustFollowSuit(Suit::Hearts))
        );
    }

    #[test]
    fn bids_must_be_within_round() {
        assert_eq!(parse_bid("0", 3), Ok(0));
        assert_eq!(parse_bid("3", 3), Ok(3));
        assert_eq!(
            parse_bid("4", 3),
            Err(InputRejection::BidOutOfRange { bid: 4, max: 3 })
        );
        assert_eq!(
            parse_bid("-1", 3),
            Err(InputRejection::BidOutOfRange { bid: -1, max: 3 })
        );
        assert!(matches!(parse_bid("two", 3), Err(InputRejection::NotANumber(_))));
    }
}
