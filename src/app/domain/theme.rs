use serde::{Deserialize, Serialize};

/// Preference-store key holding the theme label.
pub const THEME_KEY: &str = "theme";

/// The visual theme applied to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    /// Interpret a stored label. Only the exact string `"dark"` selects the
    /// dark theme; every other value, including unknown ones, reads as light.
    pub fn from_stored(value: &str) -> Self {
        Self::from_dark_flag(value == "dark")
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Label written to the preference store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Class marker placed on the visual root while this theme is active.
    pub fn class_marker(&self) -> &'static str {
        self.as_str()
    }

    /// The marker of the opposite theme, which must be absent from the root.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
