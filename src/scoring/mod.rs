pub mod engine;
pub mod features;
pub mod lexicon;
pub mod model;
pub mod revenue;
pub mod rubric;
pub mod sentiment;
pub mod themes;

pub use engine::{
    combine_value, feedback_score, score_event, BlendWeights, EventExplanation, EventScore,
    ScoreExplanation, ScoringMethod, READY_THRESHOLD,
};
pub use features::{extract_features, FeatureVector, FeedbackEntry, FEATURE_ORDER};
pub use lexicon::Category;
pub use model::{ModelWeights, WeightsError};
pub use revenue::{revenue_score, Normalization, RevenueExplanation, RevenueSample, RevenueScore};
pub use rubric::rubric_score;
pub use themes::{summarize_themes, Themes};
