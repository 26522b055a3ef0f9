use judgement_core::model::card::Card;
use judgement_core::model::suit::Suit;

/// Trumps needed before the hand counts one extra trick.
const TRUMP_LENGTH_BONUS_AT: usize = 2;

/// One trick per queen, king or ace, plus one for holding two or more trumps,
/// never more than the round allows.
pub fn heuristic_bid(hand: &[Card], trump: Suit, round: u8) -> u8 {
    let high_cards = hand.iter().filter(|card| card.rank.is_high()).count();
    let trumps = hand.iter().filter(|card| card.is_trump(trump)).count();
    let bonus = usize::from(trumps >= TRUMP_LENGTH_BONUS_AT);
    let estimate = high_cards + bonus;
    u8::try_from(estimate).unwrap_or(u8::MAX).min(round)
}
