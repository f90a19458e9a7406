use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::features::{extract_features, FeatureVector, FeedbackEntry};
use super::lexicon::Category;
use super::model::ModelWeights;
use super::revenue::{revenue_score, RevenueExplanation, RevenueSample};
use super::rubric::rubric_score;
use super::themes::summarize_themes;
use crate::error::ScoringError;

/// Feedback entries an event needs before it can be scored.
pub const READY_THRESHOLD: usize = 30;
pub const FEEDBACK_WEIGHT: f64 = 0.5;
pub const REVENUE_WEIGHT: f64 = 0.5;

/// Which scorer produced the feedback score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    Rubric,
    Learned,
}

impl ScoringMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoringMethod::Rubric => "rubric",
            ScoringMethod::Learned => "learned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub feedback: f64,
    pub revenue: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            feedback: FEEDBACK_WEIGHT,
            revenue: REVENUE_WEIGHT,
        }
    }
}

/// Why the feedback score came out the way it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreExplanation {
    pub method: ScoringMethod,
    pub positive_themes: Vec<String>,
    pub negative_themes: Vec<String>,
    /// Category feature values as percentages.
    pub category_breakdown: BTreeMap<Category, f64>,
    pub sentiment_avg: f64,
    /// The `avg_rating` feature back on the 1-5 scale, one decimal. Unrated
    /// batches report the neutral prior (2.5).
    pub rating_avg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventExplanation {
    pub feedback: ScoreExplanation,
    pub revenue: RevenueExplanation,
    pub weights: BlendWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventScore {
    pub revenue_score: f64,
    pub feedback_score: f64,
    pub value_score: f64,
    pub explanation: EventExplanation,
    pub feature_vector: FeatureVector,
}

/// Score features with the learned model when usable, otherwise the rubric.
pub fn feedback_score(
    features: &FeatureVector,
    weights: Option<&ModelWeights>,
) -> (f64, ScoringMethod) {
    if let Some(weights) = weights {
        match weights.predict(features) {
            Ok(score) => return (score, ScoringMethod::Learned),
            Err(err) => debug!(%err, "ignoring unusable model weights"),
        }
    }
    (rubric_score(features), ScoringMethod::Rubric)
}

fn rating_on_five_scale(avg_rating: f64) -> Option<f64> {
    (avg_rating > 0.0).then(|| (avg_rating * 50.0).round() / 10.0)
}

pub fn combine_value(feedback_score: f64, revenue_score: f64) -> f64 {
    FEEDBACK_WEIGHT * feedback_score + REVENUE_WEIGHT * revenue_score
}

/// Compute the full value score for one event.
///
/// `history` should hold every other known event; the event itself must not
/// be in it.
pub fn score_event(
    event: RevenueSample,
    feedback: &[FeedbackEntry],
    history: &[RevenueSample],
    weights: Option<&ModelWeights>,
) -> Result<EventScore, ScoringError> {
    if feedback.len() < READY_THRESHOLD {
        return Err(ScoringError::InsufficientFeedback {
            required: READY_THRESHOLD,
            actual: feedback.len(),
        });
    }

    let features = extract_features(feedback);
    let (feedback_value, method) = feedback_score(&features, weights);
    let themes = summarize_themes(feedback);
    let revenue = revenue_score(event, history);
    let value = combine_value(feedback_value, revenue.score);

    debug!(
        method = method.as_str(),
        feedback = feedback_value,
        revenue = revenue.score,
        value,
        "scored event"
    );

    let category_breakdown = Category::ALL
        .into_iter()
        .map(|category| (category, features.category(category) * 100.0))
        .collect();

    Ok(EventScore {
        revenue_score: revenue.score,
        feedback_score: feedback_value,
        value_score: value,
        explanation: EventExplanation {
            feedback: ScoreExplanation {
                method,
                positive_themes: themes.positive,
                negative_themes: themes.negative,
                category_breakdown,
                sentiment_avg: features.sentiment,
                rating_avg: rating_on_five_scale(features.avg_rating),
            },
            revenue: revenue.explanation,
            weights: BlendWeights::default(),
        },
        feature_vector: features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(n: usize, text: &str, rating: Option<u8>) -> Vec<FeedbackEntry> {
        (0..n).map(|_| FeedbackEntry::new(text, rating)).collect()
    }

    fn event() -> RevenueSample {
        RevenueSample::new(2250.0, 150)
    }

    #[test]
    fn test_insufficient_feedback_is_an_error() {
        let result = score_event(event(), &batch(29, "Good event", Some(4)), &[], None);
        assert_eq!(
            result,
            Err(ScoringError::InsufficientFeedback {
                required: 30,
                actual: 29
            })
        );
    }

    #[test]
    fn test_rubric_path_without_model() {
        let score = score_event(event(), &batch(30, "Good event", Some(4)), &[], None).unwrap();
        assert_eq!(score.explanation.feedback.method, ScoringMethod::Rubric);
        assert_eq!(
            score.feedback_score,
            rubric_score(&score.feature_vector)
        );
    }

    #[test]
    fn test_learned_path_with_valid_model() {
        let weights = ModelWeights::canonical(vec![0.0; 11], 42.0);
        let score =
            score_event(event(), &batch(30, "Good event", Some(4)), &[], Some(&weights)).unwrap();
        assert_eq!(score.explanation.feedback.method, ScoringMethod::Learned);
        assert_eq!(score.feedback_score, 42.0);
    }

    #[test]
    fn test_malformed_model_falls_back_to_rubric() {
        let weights = ModelWeights::canonical(vec![1.0; 4], 42.0);
        let (_, method) = feedback_score(&FeatureVector::default(), Some(&weights));
        assert_eq!(method, ScoringMethod::Rubric);
    }

    #[test]
    fn test_nan_coefficient_falls_back_to_rubric() {
        let mut coefficients = vec![2.0; 11];
        coefficients[0] = f64::NAN;
        let weights = ModelWeights::canonical(coefficients, 42.0);
        let features = FeatureVector {
            sentiment: 0.4,
            avg_rating: 0.8,
            ..FeatureVector::default()
        };
        let (score, method) = feedback_score(&features, Some(&weights));
        assert_eq!(method, ScoringMethod::Rubric);
        assert_eq!(score, rubric_score(&features));
    }

    #[test]
    fn test_value_is_equal_blend() {
        assert_eq!(combine_value(80.0, 40.0), 60.0);
        let score = score_event(event(), &batch(30, "Good event", Some(4)), &[], None).unwrap();
        assert!(
            (score.value_score - 0.5 * (score.feedback_score + score.revenue_score)).abs() < 1e-12
        );
        assert_eq!(score.explanation.weights, BlendWeights::default());
    }

    #[test]
    fn test_rating_avg_reports_neutral_prior_without_ratings() {
        let score = score_event(event(), &batch(30, "Fine event", None), &[], None).unwrap();
        assert_eq!(score.explanation.feedback.rating_avg, Some(2.5));
        assert_eq!(score.feature_vector.avg_rating, 0.5);
    }

    #[test]
    fn test_rating_avg_rounds_to_one_decimal() {
        let mut feedback = batch(20, "Fine event", Some(4));
        feedback.extend(batch(10, "Fine event", Some(5)));
        let score = score_event(event(), &feedback, &[], None).unwrap();
        // mean 4.333...
        assert_eq!(score.explanation.feedback.rating_avg, Some(4.3));
        assert_eq!(rating_on_five_scale(0.0), None);
    }

    #[test]
    fn test_category_breakdown_is_percentage() {
        let score =
            score_event(event(), &batch(30, "Great food and snacks", Some(5)), &[], None).unwrap();
        let breakdown = &score.explanation.feedback.category_breakdown;
        assert_eq!(breakdown.len(), 7);
        assert!((breakdown[&Category::Food] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_recompute_is_identical() {
        let feedback = batch(30, "Loved the workshop but the room was crowded", Some(4));
        let history = vec![
            RevenueSample::new(500.0, 100),
            RevenueSample::new(1500.0, 100),
            RevenueSample::new(2500.0, 100),
        ];
        let first = score_event(event(), &feedback, &history, None).unwrap();
        let second = score_event(event(), &feedback, &history, None).unwrap();
        assert_eq!(first, second);
    }
}
