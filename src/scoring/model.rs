use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::features::{FeatureVector, FEATURE_ORDER};

/// Linear model fitted from admin calibration labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights {
    #[serde(default)]
    pub feature_order: Vec<String>,
    #[serde(default)]
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

/// Reasons stored weights cannot be used for prediction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    #[error("model has no coefficients")]
    Empty,
    #[error("{coefficients} coefficients for {features} features")]
    LengthMismatch { features: usize, coefficients: usize },
    #[error("unknown feature '{0}'")]
    UnknownFeature(String),
    #[error("non-finite weight")]
    NonFinite,
}

impl ModelWeights {
    /// Weights over the canonical feature order.
    pub fn canonical(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            feature_order: FEATURE_ORDER.iter().map(|name| name.to_string()).collect(),
            coefficients,
            intercept,
        }
    }

    pub fn validate(&self) -> Result<(), WeightsError> {
        if self.coefficients.is_empty() {
            return Err(WeightsError::Empty);
        }
        if self.coefficients.len() != self.feature_order.len() {
            return Err(WeightsError::LengthMismatch {
                features: self.feature_order.len(),
                coefficients: self.coefficients.len(),
            });
        }
        if let Some(name) = self
            .feature_order
            .iter()
            .find(|name| !FEATURE_ORDER.contains(&name.as_str()))
        {
            return Err(WeightsError::UnknownFeature(name.clone()));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(WeightsError::NonFinite);
        }
        Ok(())
    }

    /// `intercept + sum(coef * feature)`, unclamped.
    pub fn raw_prediction(&self, features: &FeatureVector) -> Result<f64, WeightsError> {
        self.validate()?;
        let mut score = self.intercept;
        for (name, coefficient) in self.feature_order.iter().zip(&self.coefficients) {
            let value = features
                .get(name)
                .ok_or_else(|| WeightsError::UnknownFeature(name.clone()))?;
            score += coefficient * value;
        }
        Ok(score)
    }

    /// Learned feedback score in [0, 100].
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, WeightsError> {
        Ok(self.raw_prediction(features)?.clamp(0.0, 100.0))
    }
}
