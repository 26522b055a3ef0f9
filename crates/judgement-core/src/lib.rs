pub mod error;
pub mod game;
pub mod model;
pub mod policy;

pub use error::{GameError, PolicyError};
pub use game::match_state::{GameConfig, MatchState, start_game};
pub use game::observer::{GameEvent, GameObserver, NullObserver};
pub use policy::{BidContext, DecisionPolicy, PlayContext, PolicyKind};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "judgement"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "judgement");
        assert!(!AppInfo::version().is_empty());
    }
}
