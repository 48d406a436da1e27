/// Item state definitions for tracking a worker's progress
///
/// This module defines the states an item passes through inside a worker.
use std::fmt;

/// Represents the current state of an item in a scrap run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemState {
    // ===== Active States =====
    /// Item was created from a bookmark and waits for its worker
    Pending,

    /// The page body is being downloaded
    Fetching,

    /// The cleaner is running over the downloaded body
    Extracting,

    // ===== Terminal States =====
    /// Body and article are both populated
    Done,

    /// Fetch or extraction failed, or the scope was cancelled
    Failed,
}

impl ItemState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if moving to `next` is a legal transition
    ///
    /// `Pending -> Fetching -> Extracting -> Done`, and both `Fetching` and
    /// `Extracting` may move to `Failed`.
    pub fn can_transition_to(&self, next: ItemState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Fetching, Self::Extracting)
                | (Self::Fetching, Self::Failed)
                | (Self::Extracting, Self::Done)
                | (Self::Extracting, Self::Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
