//! Category module - the fixed dimensions of a voice DNA profile

use std::fmt;

/// A writing-style dimension of a DNA profile
///
/// The set is closed: every profile and every merge row carries a weight
/// for each of these nine categories, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Word choice, jargon, contractions
    Vocabulary,

    /// Sentence length and complexity
    SentenceStructure,

    /// Paragraph length, transitions, organization
    ParagraphStructure,

    /// Formality, warmth, primary/secondary tone
    Tone,

    /// Metaphor, repetition, rhetorical questions
    RhetoricalDevices,

    /// Dashes, semicolons, exclamations, asides
    Punctuation,

    /// Hooks, opening and closing patterns
    OpeningsAndClosings,

    /// Humor frequency, types, placement
    Humor,

    /// Catchphrases, recurring themes, mannerisms
    Signatures,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 9;

    /// All categories in canonical order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Vocabulary,
        Category::SentenceStructure,
        Category::ParagraphStructure,
        Category::Tone,
        Category::RhetoricalDevices,
        Category::Punctuation,
        Category::OpeningsAndClosings,
        Category::Humor,
        Category::Signatures,
    ];

    /// Wire key used in DNA bodies and merge requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vocabulary => "vocabulary",
            Category::SentenceStructure => "sentence_structure",
            Category::ParagraphStructure => "paragraph_structure",
            Category::Tone => "tone",
            Category::RhetoricalDevices => "rhetorical_devices",
            Category::Punctuation => "punctuation",
            Category::OpeningsAndClosings => "openings_and_closings",
            Category::Humor => "humor",
            Category::Signatures => "signatures",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Vocabulary => "Vocabulary",
            Category::SentenceStructure => "Sentence Structure",
            Category::ParagraphStructure => "Paragraph Structure",
            Category::Tone => "Tone",
            Category::RhetoricalDevices => "Rhetorical Devices",
            Category::Punctuation => "Punctuation",
            Category::OpeningsAndClosings => "Openings & Closings",
            Category::Humor => "Humor",
            Category::Signatures => "Signatures",
        }
    }

    /// Position of this category in [`Category::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse a category from its wire key (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}
