//! Closed-form ridge regression with an unpenalized intercept.
//!
//! Columns and targets are centered, then `(XᵀX + αI) w = Xᵀy` is solved with
//! nalgebra. The intercept is recovered as `ȳ - x̄·w`. No randomness is
//! involved, so equal inputs give equal weights.

use nalgebra::{DMatrix, DVector};

#[derive(Debug, Clone, PartialEq)]
pub struct RidgeFit {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Fit ridge regression. Returns `None` for empty or ragged input, or when the
/// normal equations turn out singular (only possible with `alpha <= 0`).
pub fn fit(rows: &[Vec<f64>], targets: &[f64], alpha: f64) -> Option<RidgeFit> {
    let n = rows.len();
    if n == 0 || n != targets.len() {
        return None;
    }
    let width = rows[0].len();
    if rows.iter().any(|row| row.len() != width) {
        return None;
    }

    let x = DMatrix::from_fn(n, width, |i, j| rows[i][j]);
    let y = DVector::from_column_slice(targets);
    let x_mean = DVector::from_fn(width, |j, _| x.column(j).mean());
    let y_mean = y.mean();

    let centered = DMatrix::from_fn(n, width, |i, j| x[(i, j)] - x_mean[j]);
    let y_centered = y.add_scalar(-y_mean);

    let gram = centered.transpose() * &centered + DMatrix::<f64>::identity(width, width) * alpha;
    let moment = centered.transpose() * y_centered;

    // Cholesky covers every alpha > 0; LU reports the singular alpha = 0 cases.
    let weights = match gram.clone().cholesky() {
        Some(cholesky) => cholesky.solve(&moment),
        None => gram.lu().solve(&moment)?,
    };
    if weights.iter().any(|w| !w.is_finite()) {
        return None;
    }

    Some(RidgeFit {
        intercept: y_mean - weights.dot(&x_mean),
        coefficients: weights.iter().copied().collect(),
    })
}
