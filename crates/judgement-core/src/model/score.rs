use crate::model::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

pub const EXACT_BID_BONUS: u32 = 10;

/// Points for one round: `10 + tricks` on an exact bid, nothing otherwise.
pub const fn round_points(bid: u8, tricks_won: u8) -> u32 {
    if bid == tricks_won {
        EXACT_BID_BONUS + tricks_won as u32
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub place: usize,
    pub player: PlayerId,
    pub name: String,
    pub score: u32,
}

/// Players ordered by score, highest first. Ties keep table order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinalStandings {
    entries: Vec<Standing>,
}

impl FinalStandings {
    pub fn from_players(players: &[Player]) -> Self {
        let mut ordered: Vec<&Player> = players.iter().collect();
        ordered.sort_by(|a, b| b.score().cmp(&a.score()));
        let entries = ordered
            .into_iter()
            .enumerate()
            .map(|(index, player)| Standing {
                place: index + 1,
                player: player.id(),
                name: player.name().to_string(),
                score: player.score(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[Standing] {
        &self.entries
    }

    pub fn leader(&self) -> Option<&Standing> {
        self.entries.first()
    }

    pub fn score_of(&self, player: PlayerId) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.player == player)
            .map(|entry| entry.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
