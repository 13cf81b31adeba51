pub mod rebalance;
pub mod status;

pub use rebalance::{rebalance, rebalance_with, RebalanceOutcome};
pub use status::{classify, classify_plan, Status, Tier};
