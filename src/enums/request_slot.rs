use serde::{Deserialize, Serialize};

/// A kind of remote call whose responses must not overtake each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestSlot {
    Tree,
    File,
    Detect,
    Optimize,
}

impl RequestSlot {
    /// Slots whose results depend on this one and become stale when it restarts.
    pub fn downstream(&self) -> &'static [RequestSlot] {
        match self {
            Self::Tree => &[Self::File, Self::Detect, Self::Optimize],
            Self::File => &[Self::Detect, Self::Optimize],
            Self::Detect => &[Self::Optimize],
            Self::Optimize => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Tree => "Fetching repository tree",
            Self::File => "Fetching file content",
            Self::Detect => "Detecting issues",
            Self::Optimize => "Optimizing code",
        }
    }
}
