use serde::{Deserialize, Serialize};

/// Which neighbour in a monitor's switch list to bring forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the start of the list; the incoming window slides in from the left.
    Prev,
    /// Towards the end of the list; the incoming window slides in from the right.
    Next,
}

impl Direction {
    /// Whether this is the forward direction.
    pub fn is_forward(self) -> bool {
        matches!(self, Self::Next)
    }

    /// Index step applied to the cursor.
    pub fn step(self) -> isize {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

/// A user action triggered by a hotkey or an IPC request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Switch to the previous maximized window on the active monitor.
    SwitchPrev,
    /// Switch to the next maximized window on the active monitor.
    SwitchNext,
}

impl Action {
    pub fn direction(self) -> Direction {
        match self {
            Self::SwitchPrev => Direction::Prev,
            Self::SwitchNext => Direction::Next,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Prev => Self::SwitchPrev,
            Direction::Next => Self::SwitchNext,
        }
    }
}
