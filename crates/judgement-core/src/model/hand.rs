use crate::model::card::Card;
use std::vec::Vec;

/// Cards stay sorted by suit group then rank so display indices are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.cards.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        let index = self.cards.partition_point(|held| *held < card);
        self.cards.insert(index, card);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(Rank::Three, Suit::Clubs);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn cards_are_sorted_by_suit_then_rank() {
        let mut hand = Hand::new();
        hand.add(Card::new(Rank::King, Suit::Clubs));
        hand.add(Card::new(Rank::Two, Suit::Spades));
        hand.add(Card::new(Rank::Ace, Suit::Spades));
        let ordered: Vec<_> = hand.iter().copied().collect();
        assert_eq!(ordered[0], Card::new(Rank::Two, Suit::Spades));
        assert_eq!(ordered[1], Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(ordered[2], Card::new(Rank::King, Suit::Clubs));
    }

    #[test]
    fn indexed_access() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Four, Suit::Hearts),
            Card::new(Rank::Nine, Suit::Hearts),
            Card::new(Rank::Jack, Suit::Diamonds),
        ]);
        assert_eq!(hand.get(2), Some(Card::new(Rank::Jack, Suit::Diamonds)));
        assert_eq!(hand.get(3), None);
    }
}
