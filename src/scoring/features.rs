use serde::{Deserialize, Serialize};

use super::lexicon::{count_matches, Category, NEGATIVE_WORDS, POSITIVE_WORDS};
use super::sentiment::polarity;

/// Canonical feature order. Stored model coefficients are bound to this
/// sequence, so it must never be reordered.
pub const FEATURE_ORDER: [&str; 11] = [
    "logistics",
    "food",
    "program",
    "venue",
    "timing",
    "community",
    "vibe",
    "sentiment",
    "avg_rating",
    "positive_count",
    "negative_count",
];

/// Rating prior used when no entry in the batch carries a rating.
pub const NEUTRAL_RATING: f64 = 0.5;

const LEXICON_SCALE: f64 = 10.0;

/// One attendee's feedback for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Who submitted it. Each respondent may answer once per event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent_id: Option<String>,
}

impl FeedbackEntry {
    pub fn new(text: impl Into<String>, rating: Option<u8>) -> Self {
        Self {
            text: text.into(),
            rating,
            respondent_id: None,
        }
    }

    pub fn with_respondent(mut self, respondent_id: impl Into<String>) -> Self {
        self.respondent_id = Some(respondent_id.into());
        self
    }
}

/// Numeric summary of a feedback batch.
///
/// Fields are declared in [`FEATURE_ORDER`] so the serialized form keeps the
/// same key order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureVector {
    pub logistics: f64,
    pub food: f64,
    pub program: f64,
    pub venue: f64,
    pub timing: f64,
    pub community: f64,
    pub vibe: f64,
    pub sentiment: f64,
    pub avg_rating: f64,
    pub positive_count: f64,
    pub negative_count: f64,
}

impl FeatureVector {
    pub fn category(&self, category: Category) -> f64 {
        match category {
            Category::Logistics => self.logistics,
            Category::Food => self.food,
            Category::Program => self.program,
            Category::Venue => self.venue,
            Category::Timing => self.timing,
            Category::Community => self.community,
            Category::Vibe => self.vibe,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Logistics => &mut self.logistics,
            Category::Food => &mut self.food,
            Category::Program => &mut self.program,
            Category::Venue => &mut self.venue,
            Category::Timing => &mut self.timing,
            Category::Community => &mut self.community,
            Category::Vibe => &mut self.vibe,
        }
    }

    /// Look up a feature by its canonical name.
    pub fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "sentiment" => self.sentiment,
            "avg_rating" => self.avg_rating,
            "positive_count" => self.positive_count,
            "negative_count" => self.negative_count,
            other => {
                let category = Category::ALL.into_iter().find(|c| c.key() == other)?;
                self.category(category)
            }
        };
        Some(value)
    }

    /// Values in canonical order.
    pub fn to_array(&self) -> [f64; 11] {
        [
            self.logistics,
            self.food,
            self.program,
            self.venue,
            self.timing,
            self.community,
            self.vibe,
            self.sentiment,
            self.avg_rating,
            self.positive_count,
            self.negative_count,
        ]
    }

    pub fn category_mean(&self) -> f64 {
        let sum: f64 = Category::ALL.iter().map(|c| self.category(*c)).sum();
        sum / Category::ALL.len() as f64
    }
}

/// Lower-cased concatenation of every entry's text.
pub fn corpus(entries: &[FeedbackEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.text.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mean of the ratings present in the batch, on the 1-5 scale.
pub fn mean_rating(entries: &[FeedbackEntry]) -> Option<f64> {
    let ratings: Vec<f64> = entries
        .iter()
        .filter_map(|entry| entry.rating.map(f64::from))
        .collect();

    if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    }
}

/// Turn a feedback batch into a [`FeatureVector`].
///
/// An empty batch yields an all-zero vector.
pub fn extract_features(entries: &[FeedbackEntry]) -> FeatureVector {
    let mut features = FeatureVector::default();
    if entries.is_empty() {
        return features;
    }

    let text = corpus(entries);

    for category in Category::ALL {
        let keywords = category.keywords();
        let hits = count_matches(&text, keywords);
        *features.category_mut(category) = (hits as f64 / keywords.len() as f64).min(1.0);
    }

    let polarity_sum: f64 = entries.iter().map(|entry| polarity(&entry.text)).sum();
    features.sentiment = polarity_sum / entries.len() as f64;

    features.avg_rating = mean_rating(entries)
        .map(|mean| mean / 5.0)
        .unwrap_or(NEUTRAL_RATING);

    features.positive_count = (count_matches(&text, &POSITIVE_WORDS) as f64 / LEXICON_SCALE).min(1.0);
    features.negative_count = (count_matches(&text, &NEGATIVE_WORDS) as f64 / LEXICON_SCALE).min(1.0);

    features
}
