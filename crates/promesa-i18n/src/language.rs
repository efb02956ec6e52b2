//! The supported language set.

use std::fmt;

/// Languages the page ships catalogs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Es, // Spanish (fallback)
    En, // English
    Fr, // French
}

impl Language {
    /// The language whose catalog is guaranteed to contain every key.
    pub const FALLBACK: Language = Language::Es;

    /// Every supported language, in display order.
    pub const ALL: [Language; 3] = [Language::Es, Language::En, Language::Fr];

    /// Parse from a locale string (e.g., "en", "en-US", "en_US").
    ///
    /// Only the primary subtag is considered; region and script are dropped.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace('-', "_");
        let primary = s.split('_').next()?;

        match primary {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// Parse a bare language code, exactly as persisted in the preference
    /// record. Region-qualified strings are rejected here.
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// Get the language code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Get the native display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Es => "Español",
            Self::En => "English",
            Self::Fr => "Français",
        }
    }

    /// Get the flag emoji shown by the language switcher.
    pub const fn flag(&self) -> &'static str {
        match self {
            Self::Es => "\u{1F1EA}\u{1F1F8}",
            Self::En => "\u{1F1FA}\u{1F1F8}",
            Self::Fr => "\u{1F1EB}\u{1F1F7}",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
