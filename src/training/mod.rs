pub mod ridge;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::{FeatureVector, ModelWeights};

/// Labels required before a model is fitted.
pub const MIN_TRAINING_SAMPLES: usize = 5;
/// Ridge regularization strength.
pub const RIDGE_ALPHA: f64 = 1.0;

/// An admin's ground-truth value score for an event, paired with the
/// features the event was scored with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSample {
    pub feature_vector: FeatureVector,
    pub admin_label: f64,
}

/// Fit a linear model over the canonical feature order.
///
/// Returns `None` below [`MIN_TRAINING_SAMPLES`]; callers keep using the rubric.
pub fn train_model(samples: &[CalibrationSample]) -> Option<ModelWeights> {
    if samples.len() < MIN_TRAINING_SAMPLES {
        debug!(
            samples = samples.len(),
            required = MIN_TRAINING_SAMPLES,
            "not enough calibration samples to train"
        );
        return None;
    }

    let rows: Vec<Vec<f64>> = samples
        .iter()
        .map(|sample| sample.feature_vector.to_array().to_vec())
        .collect();
    let targets: Vec<f64> = samples.iter().map(|sample| sample.admin_label).collect();

    let fit = ridge::fit(&rows, &targets, RIDGE_ALPHA)?;
    Some(ModelWeights::canonical(fit.coefficients, fit.intercept))
}
