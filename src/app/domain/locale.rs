/// Preference-store key holding the locale code.
pub const LOCALE_KEY: &str = "locale";

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    En,
    Uz,
    Ru,
}

impl Locale {
    /// Locale used when nothing valid is stored or a message is missing.
    pub const FALLBACK: Locale = Locale::En;

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Uz => "uz",
            Self::Ru => "ru",
        }
    }

    /// Exact, case-sensitive match against the supported codes.
    pub fn from_code(code: &str) -> Option<Self> {
        [Self::En, Self::Uz, Self::Ru]
            .into_iter()
            .find(|l| l.code() == code)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_known() {
        assert_eq!(Locale::from_code("en"), Some(Locale::En));
        assert_eq!(Locale::from_code("uz"), Some(Locale::Uz));
        assert_eq!(Locale::from_code("ru"), Some(Locale::Ru));
    }

    #[test]
    fn test_from_code_rejects_variants() {
        assert_eq!(Locale::from_code("EN"), None);
        assert_eq!(Locale::from_code("en-US"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn test_fallback_is_english() {
        assert_eq!(Locale::default(), Locale::En);
        assert_eq!(Locale::FALLBACK.code(), "en");
    }
}
