use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// One of the three timer presets.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Pomodoro, Mode::ShortBreak, Mode::LongBreak];

    /// Key used in the persisted duration mapping and in CSS classes.
    pub fn key(self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro",
            Self::ShortBreak => "short-break",
            Self::LongBreak => "long-break",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pomodoro => "pomodoro",
            Self::ShortBreak => "short break",
            Self::LongBreak => "long break",
        }
    }

    /// Accent colour of the mode's button while it is active.
    pub fn accent(self) -> &'static str {
        match self {
            Self::Pomodoro => "red",
            Self::ShortBreak => "green",
            Self::LongBreak => "blue",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
