use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback topic a keyword list is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Logistics,
    Food,
    Program,
    Venue,
    Timing,
    Community,
    Vibe,
}

impl Category {
    /// All categories in canonical feature order.
    pub const ALL: [Category; 7] = [
        Category::Logistics,
        Category::Food,
        Category::Program,
        Category::Venue,
        Category::Timing,
        Category::Community,
        Category::Vibe,
    ];

    /// Feature name used in vectors and stored model weights.
    pub fn key(self) -> &'static str {
        match self {
            Category::Logistics => "logistics",
            Category::Food => "food",
            Category::Program => "program",
            Category::Venue => "venue",
            Category::Timing => "timing",
            Category::Community => "community",
            Category::Vibe => "vibe",
        }
    }

    /// Capitalized label used in theme strings ("Logistics: smooth").
    pub fn title(self) -> &'static str {
        match self {
            Category::Logistics => "Logistics",
            Category::Food => "Food",
            Category::Program => "Program",
            Category::Venue => "Venue",
            Category::Timing => "Timing",
            Category::Community => "Community",
            Category::Vibe => "Vibe",
        }
    }

    pub fn keywords(self) -> &'static [&'static str; 10] {
        match self {
            Category::Logistics => &[
                "organized",
                "registration",
                "smooth",
                "chaotic",
                "confusing",
                "late",
                "on time",
                "schedule",
                "planning",
                "coordination",
            ],
            Category::Food => &[
                "food",
                "snacks",
                "catering",
                "hungry",
                "delicious",
                "tasty",
                "refreshments",
                "drinks",
                "halal",
                "options",
            ],
            Category::Program => &[
                "content",
                "speakers",
                "presentation",
                "boring",
                "interesting",
                "engaging",
                "informative",
                "learned",
                "activities",
                "workshop",
            ],
            Category::Venue => &[
                "venue",
                "location",
                "space",
                "crowded",
                "comfortable",
                "seating",
                "room",
                "hall",
                "parking",
                "accessible",
            ],
            Category::Timing => &[
                "time",
                "duration",
                "long",
                "short",
                "rushed",
                "dragged",
                "punctual",
                "started",
                "ended",
                "hours",
            ],
            Category::Community => &[
                "welcoming",
                "inclusive",
                "friendly",
                "diverse",
                "belonging",
                "connected",
                "people",
                "networking",
                "social",
                "community",
            ],
            Category::Vibe => &[
                "atmosphere",
                "energy",
                "fun",
                "enjoyable",
                "memorable",
                "amazing",
                "great",
                "loved",
                "fantastic",
                "disappointing",
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub const POSITIVE_WORDS: [&str; 24] = [
    "great",
    "amazing",
    "excellent",
    "wonderful",
    "fantastic",
    "loved",
    "enjoyed",
    "perfect",
    "awesome",
    "best",
    "good",
    "nice",
    "helpful",
    "friendly",
    "welcoming",
    "organized",
    "smooth",
    "delicious",
    "engaging",
    "informative",
    "comfortable",
    "fun",
    "memorable",
    "inclusive",
];

pub const NEGATIVE_WORDS: [&str; 20] = [
    "bad",
    "terrible",
    "awful",
    "disappointing",
    "boring",
    "confusing",
    "chaotic",
    "late",
    "crowded",
    "rushed",
    "long",
    "cold",
    "hot",
    "hungry",
    "uncomfortable",
    "disorganized",
    "poor",
    "worst",
    "waste",
    "lacking",
];

/// Number of distinct substring hits from `words` inside `corpus`.
///
/// Matching is plain substring containment, so "good" also hits "goodbye".
pub fn count_matches(corpus: &str, words: &[&str]) -> usize {
    words.iter().filter(|word| corpus.contains(*word)).count()
}
