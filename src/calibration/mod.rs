//! Versioned model state and the retrain-on-every-label loop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::scoring::{ModelWeights, ScoringMethod};
use crate::training::{train_model, CalibrationSample, MIN_TRAINING_SAMPLES};

/// The currently trained model, owned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub version: u64,
    pub weights: ModelWeights,
    pub trained_on: usize,
    pub updated_at: DateTime<Utc>,
}

impl ModelState {
    /// Weights the scorer may use. A state trained on fewer samples than the
    /// training threshold is treated as absent.
    pub fn usable_weights(&self) -> Option<&ModelWeights> {
        if self.trained_on >= MIN_TRAINING_SAMPLES {
            Some(&self.weights)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CalibrationOutcome {
    /// A new model was fitted on every sample; replace the stored state.
    Retrained(ModelState),
    /// Not enough labels yet; keep the stored state as it is.
    Pending { total_labels: usize, needs_more: usize },
}

/// Refit against the entire accumulated sample set.
///
/// The new version is one past `current`, or 1 for the first model.
pub fn retrain(
    samples: &[CalibrationSample],
    current: Option<&ModelState>,
    now: DateTime<Utc>,
) -> CalibrationOutcome {
    let Some(weights) = train_model(samples) else {
        return CalibrationOutcome::Pending {
            total_labels: samples.len(),
            needs_more: MIN_TRAINING_SAMPLES.saturating_sub(samples.len()),
        };
    };

    let version = current.map_or(1, |state| state.version + 1);
    info!(version, trained_on = samples.len(), "retrained feedback model");

    CalibrationOutcome::Retrained(ModelState {
        version,
        weights,
        trained_on: samples.len(),
        updated_at: now,
    })
}

/// Summary of which scorer is in effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub method: ScoringMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    pub trained_on: usize,
    pub total_labels: usize,
    pub needs_more: usize,
}

impl ModelStatus {
    pub fn from_state(model: Option<&ModelState>, total_labels: usize) -> Self {
        let needs_more = MIN_TRAINING_SAMPLES.saturating_sub(total_labels);
        match model {
            Some(state) => Self {
                method: if state.usable_weights().is_some() {
                    ScoringMethod::Learned
                } else {
                    ScoringMethod::Rubric
                },
                version: Some(state.version),
                trained_on: state.trained_on,
                total_labels,
                needs_more,
            },
            None => Self {
                method: ScoringMethod::Rubric,
                version: None,
                trained_on: 0,
                total_labels,
                needs_more,
            },
        }
    }
}
