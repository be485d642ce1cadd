use serde::{Deserialize, Serialize};

/// One sentence of the source text together with its Spanish rendering.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SentencePair {
    pub english: String,
    pub spanish: String,
}

impl SentencePair {
    pub fn new(english: impl Into<String>, spanish: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            spanish: spanish.into(),
        }
    }
}

/// What a sentence span currently shows. Every new pair set starts in
/// `Spanish`; `EnglishDimmed` is reachable only through a rightward swipe.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Spanish,
    SpanishHighlighted,
    EnglishHighlighted,
    EnglishDimmed,
}

impl DisplayMode {
    /// The mode a tap moves this span into. Tapping cycles between the
    /// highlighted Spanish and English readings and never dims; a dimmed
    /// span re-enters the cycle at its Spanish reading.
    pub fn tapped(self) -> DisplayMode {
        match self {
            DisplayMode::Spanish => DisplayMode::SpanishHighlighted,
            DisplayMode::SpanishHighlighted => DisplayMode::EnglishHighlighted,
            DisplayMode::EnglishHighlighted => DisplayMode::SpanishHighlighted,
            DisplayMode::EnglishDimmed => DisplayMode::SpanishHighlighted,
        }
    }

    pub fn shows_english(self) -> bool {
        matches!(
            self,
            DisplayMode::EnglishHighlighted | DisplayMode::EnglishDimmed
        )
    }
}
