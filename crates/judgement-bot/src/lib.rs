pub mod bid;
pub mod policy;

pub use bid::heuristic_bid;
pub use policy::{AutomatedPolicy, HumanPolicy, ScriptedInput, TableInput};
