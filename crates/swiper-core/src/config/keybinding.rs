use serde::{Deserialize, Serialize};

use crate::Action;

/// A user-configured keybinding that maps a key combination to an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keybinding {
    /// The action to trigger.
    pub action: Action,
    /// Key name (e.g. "J", "Left", "F1").
    pub key: String,
    /// Modifier keys (e.g. ["alt", "shift"]).
    pub modifiers: Vec<Modifier>,
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

impl Keybinding {
    /// Human-readable chord, e.g. `Alt+J`.
    pub fn chord(&self) -> String {
        let mut parts: Vec<&str> = self
            .modifiers
            .iter()
            .map(|m| match m {
                Modifier::Alt => "Alt",
                Modifier::Shift => "Shift",
                Modifier::Ctrl => "Ctrl",
                Modifier::Win => "Win",
            })
            .collect();
        parts.push(&self.key);
        parts.join("+")
    }
}

/// Default bindings: Alt+J for the previous window, Alt+K for the next.
pub fn defaults() -> Vec<Keybinding> {
    vec![
        bind(Action::SwitchPrev, "J", &[Modifier::Alt]),
        bind(Action::SwitchNext, "K", &[Modifier::Alt]),
    ]
}

fn bind(action: Action, key: &str, modifiers: &[Modifier]) -> Keybinding {
    Keybinding {
        action,
        key: key.into(),
        modifiers: modifiers.to_vec(),
    }
}
