mod automated;
mod human;

pub use automated::AutomatedPolicy;
pub use human::{HumanPolicy, ScriptedInput, TableInput};
