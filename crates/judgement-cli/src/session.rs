use crate::config::{SeatKind, TableConfig};
use judgement_bot::{AutomatedPolicy, HumanPolicy, TableInput};
use judgement_core::model::player::Player;
use judgement_core::model::score::FinalStandings;
use judgement_core::policy::DecisionPolicy;
use judgement_core::{GameError, GameObserver, start_game};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("seat '{0}' is human but no input source was provided")]
    MissingHumanInput(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Seed for an automated seat with no explicit seed of its own.
pub fn seat_seed(table_seed: u64, seat: usize) -> u64 {
    table_seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(seat as u64 + 1)
}

/// Seats the configured players. The human seat, if any, takes `input`.
pub fn build_players<I: TableInput + 'static>(
    config: &TableConfig,
    table_seed: u64,
    input: Option<I>,
) -> Result<Vec<Player>, SessionError> {
    let mut input = input;
    config
        .players
        .iter()
        .enumerate()
        .map(|(index, seat)| {
            let policy: Box<dyn DecisionPolicy> = match seat.kind {
                SeatKind::Automated => Box::new(AutomatedPolicy::with_seed(
                    seat.seed.unwrap_or_else(|| seat_seed(table_seed, index)),
                )),
                SeatKind::Human => {
                    let source = input
                        .take()
                        .ok_or_else(|| SessionError::MissingHumanInput(seat.name.clone()))?;
                    Box::new(HumanPolicy::new(source))
                }
            };
            Ok(Player::new(seat.name.clone(), policy))
        })
        .collect()
}

/// Plays a full game for `config`, seeded by `table_seed`.
pub fn run_table<I: TableInput + 'static>(
    config: &TableConfig,
    table_seed: u64,
    input: Option<I>,
    observer: &mut dyn GameObserver,
) -> Result<FinalStandings, SessionError> {
    let players = build_players(config, table_seed, input)?;
    info!(
        seed = table_seed,
        players = players.len(),
        rounds = config.rounds,
        "starting game"
    );
    let mut rng = StdRng::seed_from_u64(table_seed);
    let standings = start_game(config.game_config(), players, &mut rng, observer)?;
    Ok(standings)
}
