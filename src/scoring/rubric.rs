use super::features::{FeatureVector, NEUTRAL_RATING};

pub const RUBRIC_BASE: f64 = 50.0;
const SENTIMENT_WEIGHT: f64 = 20.0;
const RATING_WEIGHT: f64 = 30.0;
const POSITIVE_WEIGHT: f64 = 10.0;
const NEGATIVE_WEIGHT: f64 = 15.0;
const CATEGORY_WEIGHT: f64 = 10.0;

/// Hand-authored feedback score in [0, 100], used until a learned model exists.
pub fn rubric_score(features: &FeatureVector) -> f64 {
    let score = RUBRIC_BASE
        + SENTIMENT_WEIGHT * features.sentiment
        + RATING_WEIGHT * (features.avg_rating - NEUTRAL_RATING)
        + POSITIVE_WEIGHT * features.positive_count
        - NEGATIVE_WEIGHT * features.negative_count
        + CATEGORY_WEIGHT * features.category_mean();

    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extreme(sentiment: f64, rating: f64, positive: f64, negative: f64, category: f64) -> FeatureVector {
        FeatureVector {
            logistics: category,
            food: category,
            program: category,
            venue: category,
            timing: category,
            community: category,
            vibe: category,
            sentiment,
            avg_rating: rating,
            positive_count: positive,
            negative_count: negative,
        }
    }

    #[test]
    fn test_neutral_features_score_base() {
        let features = FeatureVector {
            avg_rating: NEUTRAL_RATING,
            ..FeatureVector::default()
        };
        assert_eq!(rubric_score(&features), RUBRIC_BASE);
    }

    #[test]
    fn test_formula() {
        let features = FeatureVector {
            vibe: 0.7,
            sentiment: 0.5,
            avg_rating: 0.8,
            positive_count: 0.4,
            negative_count: 0.2,
            ..FeatureVector::default()
        };
        // 50 + 10 + 9 + 4 - 3 + 1
        assert!((rubric_score(&features) - 71.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_high() {
        let score = rubric_score(&extreme(1.0, 1.0, 1.0, 0.0, 1.0));
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_clamped_low() {
        let score = rubric_score(&extreme(-1.0, 0.0, 0.0, 1.0, 0.0));
        assert_eq!(score, 0.0);
    }
}
