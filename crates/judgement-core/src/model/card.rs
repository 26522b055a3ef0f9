use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn is_trump(self, trump: Suit) -> bool {
        self.suit == trump
    }
}

/// Display ordering: suit group first, then rank.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.suit.cmp(&other.suit).then(self.rank.cmp(&other.rank))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCardError(pub String);

impl fmt::Display for ParseCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse card '{}'", self.0)
    }
}

impl std::error::Error for ParseCardError {}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Accepts `<rank><suit>` such as `10♦`, `A♣` or `qs`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let err = || ParseCardError(s.to_string());
        let suit_char = text.chars().last().ok_or_else(err)?;
        let suit = Suit::from_char(suit_char).ok_or_else(err)?;
        let rank_text = &text[..text.len() - suit_char.len_utf8()];
        let rank = Rank::from_symbol(rank_text).ok_or_else(err)?;
        Ok(Card::new(rank, suit))
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};

    #[test]
    fn display_joins_rank_and_symbol() {
        assert_eq!(Card::new(Rank::Ten, Suit::Diamonds).to_string(), "10♦");
        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).to_string(), "A♣");
    }

    #[test]
    fn parses_display_form_and_ascii_form() {
        assert_eq!("7♣".parse::<Card>(), Ok(Card::new(Rank::Seven, Suit::Clubs)));
        assert_eq!("10♦".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
        assert_eq!("qs".parse::<Card>(), Ok(Card::new(Rank::Queen, Suit::Spades)));
        assert!("".parse::<Card>().is_err());
        assert!("♠".parse::<Card>().is_err());
        assert!("11H".parse::<Card>().is_err());
    }

    #[test]
    fn ordering_groups_by_suit_then_rank() {
        let two_spades = Card::new(Rank::Two, Suit::Spades);
        let ace_hearts = Card::new(Rank::Ace, Suit::Hearts);
        let king_hearts = Card::new(Rank::King, Suit::Hearts);
        assert!(two_spades < king_hearts);
        assert!(king_hearts < ace_hearts);
    }

    #[test]
    fn trump_membership() {
        let card = Card::new(Rank::Two, Suit::Spades);
        assert!(card.is_trump(Suit::Spades));
        assert!(!card.is_trump(Suit::Hearts));
    }
}
