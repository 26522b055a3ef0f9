use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ORDERED: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            _ => None,
        }
    }

    /// Inverse of [`Rank::symbol`], case-insensitive for the face letters.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ORDERED
            .into_iter()
            .find(|rank| rank.symbol().eq_ignore_ascii_case(symbol))
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Queen, King and Ace.
    pub const fn is_high(self) -> bool {
        self.value() > Rank::Jack.value()
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn from_value_maps() {
        assert_eq!(Rank::from_value(11), Some(Rank::Jack));
        assert_eq!(Rank::from_value(1), None);
    }

    #[test]
    fn display_matches_symbols() {
        assert_eq!(Rank::Queen.to_string(), "Q");
        assert_eq!(Rank::Ten.to_string(), "10");
    }

    #[test]
    fn from_symbol_accepts_faces_and_digits() {
        assert_eq!(Rank::from_symbol("10"), Some(Rank::Ten));
        assert_eq!(Rank::from_symbol("k"), Some(Rank::King));
        assert_eq!(Rank::from_symbol("1"), None);
        assert_eq!(Rank::from_symbol("Z"), None);
    }

    #[test]
    fn from_symbol_rejects_numeric_faces_and_odd_digits() {
        for text in ["11", "12", "13", "14", "+5", "010", "05", " 7"] {
            assert_eq!(Rank::from_symbol(text), None, "{text}");
        }
        for rank in Rank::ORDERED {
            assert_eq!(Rank::from_symbol(rank.symbol()), Some(rank));
        }
    }

    #[test]
    fn only_queen_and_above_are_high() {
        assert!(!Rank::Jack.is_high());
        assert!(Rank::Queen.is_high());
        assert!(Rank::Ace.is_high());
        assert_eq!(Rank::ORDERED.iter().filter(|r| r.is_high()).count(), 3);
    }

    #[test]
    fn ordering_is_face_value() {
        assert!(Rank::Two < Rank::Three);
        assert!(Rank::King < Rank::Ace);
        assert!(Rank::Ten < Rank::Jack);
    }
}
