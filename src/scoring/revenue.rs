use serde::{Deserialize, Serialize};
use tracing::warn;

/// Benchmark window used until enough history exists.
pub const DEFAULT_BENCHMARK: (f64, f64) = (5.0, 50.0);
/// Past events with valid attendance needed before the window rolls.
pub const MIN_ROLLING_EVENTS: usize = 3;
/// Score when the benchmark window has zero width.
pub const FLAT_WINDOW_SCORE: f64 = 50.0;

/// Revenue and attendance of one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueSample {
    pub revenue: f64,
    pub attendance: i64,
}

impl RevenueSample {
    pub fn new(revenue: f64, attendance: i64) -> Self {
        Self {
            revenue,
            attendance,
        }
    }

    /// Revenue per attendee, if attendance is positive.
    pub fn per_attendee(&self) -> Option<f64> {
        if self.attendance > 0 {
            Some(self.revenue / self.attendance as f64)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    Rolling,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RevenueExplanation {
    Benchmarked {
        revenue_per_attendee: f64,
        min_benchmark: f64,
        max_benchmark: f64,
        normalization: Normalization,
    },
    InvalidAttendance {
        attendance: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueScore {
    pub score: f64,
    pub explanation: RevenueExplanation,
}

/// Normalize an event's revenue per attendee against past events.
///
/// Non-positive attendance yields 0 with an `InvalidAttendance` marker.
pub fn revenue_score(event: RevenueSample, history: &[RevenueSample]) -> RevenueScore {
    let Some(rpa) = event.per_attendee() else {
        warn!(
            attendance = event.attendance,
            "revenue scoring received non-positive attendance"
        );
        return RevenueScore {
            score: 0.0,
            explanation: RevenueExplanation::InvalidAttendance {
                attendance: event.attendance,
            },
        };
    };

    let past: Vec<f64> = history.iter().filter_map(RevenueSample::per_attendee).collect();

    let (min, max, normalization) = if past.len() >= MIN_ROLLING_EVENTS {
        let min = past.iter().copied().fold(f64::INFINITY, f64::min);
        let max = past.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min, max, Normalization::Rolling)
    } else {
        (DEFAULT_BENCHMARK.0, DEFAULT_BENCHMARK.1, Normalization::Default)
    };

    let score = if max == min {
        FLAT_WINDOW_SCORE
    } else {
        ((rpa - min) / (max - min) * 100.0).clamp(0.0, 100.0)
    };

    RevenueScore {
        score,
        explanation: RevenueExplanation::Benchmarked {
            revenue_per_attendee: rpa,
            min_benchmark: min,
            max_benchmark: max,
            normalization,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpa_history(values: &[f64]) -> Vec<RevenueSample> {
        values
            .iter()
            .map(|rpa| RevenueSample::new(rpa * 100.0, 100))
            .collect()
    }

    #[test]
    fn test_rolling_window_midpoint() {
        let result = revenue_score(
            RevenueSample::new(2250.0, 150),
            &rpa_history(&[5.0, 15.0, 25.0]),
        );
        assert_eq!(result.score, 50.0);
        assert_eq!(
            result.explanation,
            RevenueExplanation::Benchmarked {
                revenue_per_attendee: 15.0,
                min_benchmark: 5.0,
                max_benchmark: 25.0,
                normalization: Normalization::Rolling,
            }
        );
    }

    #[test]
    fn test_default_window_with_short_history() {
        let result = revenue_score(RevenueSample::new(2750.0, 100), &rpa_history(&[1.0, 2.0]));
        // (27.5 - 5) / 45 * 100
        assert!((result.score - 50.0).abs() < 1e-9);
        assert!(matches!(
            result.explanation,
            RevenueExplanation::Benchmarked {
                normalization: Normalization::Default,
                ..
            }
        ));
    }

    #[test]
    fn test_flat_window_scores_fifty() {
        let result = revenue_score(
            RevenueSample::new(1000.0, 100),
            &rpa_history(&[10.0, 10.0, 10.0]),
        );
        assert_eq!(result.score, 50.0);
    }

    #[test]
    fn test_saturates_outside_window() {
        let history = rpa_history(&[5.0, 15.0, 25.0]);
        assert_eq!(revenue_score(RevenueSample::new(1e6, 10), &history).score, 100.0);
        assert_eq!(revenue_score(RevenueSample::new(0.0, 10), &history).score, 0.0);
    }

    #[test]
    fn test_invalid_attendance_scores_zero() {
        let result = revenue_score(RevenueSample::new(500.0, 0), &[]);
        assert_eq!(result.score, 0.0);
        assert_eq!(
            result.explanation,
            RevenueExplanation::InvalidAttendance { attendance: 0 }
        );
    }

    #[test]
    fn test_history_without_attendance_is_skipped() {
        let mut history = rpa_history(&[5.0, 25.0]);
        history.push(RevenueSample::new(900.0, 0));
        let result = revenue_score(RevenueSample::new(1500.0, 100), &history);
        assert!(matches!(
            result.explanation,
            RevenueExplanation::Benchmarked {
                normalization: Normalization::Default,
                ..
            }
        ));
    }
}
