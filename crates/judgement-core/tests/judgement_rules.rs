use judgement_core::error::PolicyError;
use judgement_core::game::observer::EventLog;
use judgement_core::model::card::Card;
use judgement_core::model::deck::Deck;
use judgement_core::model::player::{Player, PlayerId};
use judgement_core::model::round::RoundState;
use judgement_core::model::suit::Suit;
use judgement_core::model::trick::{Play, resolve_trick, winning_play};
use judgement_core::policy::{BidContext, DecisionPolicy, PlayContext, PolicyKind};
use judgement_core::{GameConfig, GameError, start_game};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct FixedBid(u8);

impl DecisionPolicy for FixedBid {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Automated
    }

    fn select_card(&mut self, ctx: &PlayContext) -> Result<Card, PolicyError> {
        Ok(ctx.legal[ctx.legal.len() - 1])
    }

    fn choose_bid(&mut self, _ctx: &BidContext) -> Result<u8, PolicyError> {
        Ok(self.0)
    }
}

struct Disconnected;

impl DecisionPolicy for Disconnected {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Human
    }

    fn select_card(&mut self, _ctx: &PlayContext) -> Result<Card, PolicyError> {
        Err(PolicyError::InputClosed)
    }

    fn choose_bid(&mut self, _ctx: &BidContext) -> Result<u8, PolicyError> {
        Ok(0)
    }
}

fn plays(cards: &[&str]) -> Vec<Play> {
    cards
        .iter()
        .enumerate()
        .map(|(i, text)| Play::new(PlayerId(i), text.parse().unwrap()))
        .collect()
}

fn table(bids: &[u8]) -> Vec<Player> {
    bids.iter()
        .enumerate()
        .map(|(i, bid)| Player::new(format!("Seat {i}"), Box::new(FixedBid(*bid))))
        .collect()
}

#[test]
fn only_trump_beats_all_clubs() {
    let plays = plays(&["7♣", "K♣", "2♠", "A♣"]);
    assert_eq!(resolve_trick(&plays, Suit::Spades), Some(PlayerId(2)));
}

#[test]
fn highest_diamond_wins_when_no_trump_is_played() {
    let plays = plays(&["10♦", "J♦", "9♦", "A♣"]);
    assert_eq!(resolve_trick(&plays, Suit::Hearts), Some(PlayerId(1)));
}

#[test]
fn winner_beats_every_other_card_played() {
    let deck = Deck::shuffled_with_seed(2024);
    for (chunk_index, chunk) in deck.cards().chunks(4).enumerate() {
        let trump = Suit::ALL[chunk_index % 4];
        let trick: Vec<Play> = chunk
            .iter()
            .enumerate()
            .map(|(i, card)| Play::new(PlayerId(i), *card))
            .collect();
        let winner = winning_play(&trick, trump).unwrap();
        let lead = trick[0].card.suit;
        for other in trick.iter().filter(|p| p.player != winner.player) {
            let stronger = if winner.card.suit == trump {
                other.card.suit != trump || winner.card.rank > other.card.rank
            } else {
                other.card.suit != trump
                    && (other.card.suit != lead || winner.card.rank > other.card.rank)
            };
            assert!(stronger, "{} should beat {}", winner.card, other.card);
        }
        assert_eq!(resolve_trick(&trick, trump), Some(winner.player));
    }
}

#[test]
fn first_round_scores_exact_bids() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut log = EventLog::new();
        let standings = start_game(
            GameConfig::new(4, 1),
            table(&[1, 0, 0, 0]),
            &mut rng,
            &mut log,
        )
        .unwrap();

        let trick = log.tricks().next().unwrap();
        let winner = trick.winner;
        for seat in 0..4 {
            let player = PlayerId(seat);
            let expected = match (seat, player == winner) {
                (0, true) => 11,
                (0, false) => 0,
                (_, true) => 0,
                (_, false) => 10,
            };
            assert_eq!(standings.score_of(player), Some(expected), "seed {seed}");
        }
    }
}

#[test]
fn policy_failure_aborts_the_game() {
    let mut players = table(&[0, 0, 0]);
    players[2] = Player::new("Gone", Box::new(Disconnected));
    let mut rng = StdRng::seed_from_u64(1);
    let err = start_game(GameConfig::new(3, 2), players, &mut rng, &mut EventLog::new())
        .unwrap_err();
    assert_eq!(
        err,
        GameError::Policy {
            player: PlayerId(2),
            source: PolicyError::InputClosed
        }
    );
}

#[test]
fn oversized_games_fail_before_dealing() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut log = EventLog::new();
    let err = start_game(GameConfig::new(6, 9), table(&[0; 6]), &mut rng, &mut log).unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientCards {
            needed: 55,
            available: 52
        }
    );
    assert!(log.events().is_empty());
}

#[test]
fn standalone_round_seats_players_by_position() {
    let mut players = table(&[0, 1, 0, 1]);
    let mut rng = StdRng::seed_from_u64(8);
    let mut log = EventLog::new();
    let summary = RoundState::run(2, &mut players, PlayerId(0), &mut rng, &mut log).unwrap();

    let ids: Vec<PlayerId> = summary.results.iter().map(|r| r.player).collect();
    assert_eq!(ids, vec![PlayerId(0), PlayerId(1), PlayerId(2), PlayerId(3)]);
    let seated: Vec<PlayerId> = players.iter().map(Player::id).collect();
    assert_eq!(seated, ids);
    for trick in log.tricks() {
        let order: Vec<usize> = trick.plays.iter().map(|p| p.player.index()).collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }
}

#[test]
fn round_zero_is_rejected() {
    let mut players = table(&[0, 0, 0]);
    let mut rng = StdRng::seed_from_u64(1);
    let err = RoundState::run(0, &mut players, PlayerId(0), &mut rng, &mut EventLog::new())
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)));
    assert!(players.iter().all(|p| p.hand().is_empty()));
}
