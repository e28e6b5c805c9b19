use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkerState {
    #[default]
    Closed,
    /// Issue dialog open at the given 0-based index.
    Reviewing(usize),
    Optimizing,
    DiffReady,
}

