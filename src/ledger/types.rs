use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calibration::{retrain, CalibrationOutcome, ModelState, ModelStatus};
use crate::scoring::{score_event, EventScore, FeedbackEntry, RevenueSample, READY_THRESHOLD};
use crate::training::CalibrationSample;

pub const LEDGER_VERSION: u32 = 1;
pub const MAX_NAME_LEN: usize = 200;
pub const MIN_FEEDBACK_LEN: usize = 10;

/// Everything the tool remembers between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub version: u32,
    #[serde(default)]
    pub events: BTreeMap<String, EventRecord>,
    #[serde(default)]
    pub model: Option<ModelState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    pub attendance: i64,
    pub revenue: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub feedback: Vec<FeedbackEntry>,
    #[serde(default)]
    pub score: Option<ScoreRecord>,
    #[serde(default)]
    pub admin_label: Option<f64>,
}

impl EventRecord {
    pub fn revenue_sample(&self) -> RevenueSample {
        RevenueSample::new(self.revenue, self.attendance)
    }

    /// Feedback entries still missing before the event can be scored.
    pub fn remaining_feedback(&self) -> usize {
        READY_THRESHOLD.saturating_sub(self.feedback.len())
    }

    pub fn progress(&self) -> FeedbackProgress {
        FeedbackProgress {
            total: self.feedback.len(),
            remaining: self.remaining_feedback(),
        }
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            name: self.name.clone(),
            attendance: self.attendance,
            revenue: self.revenue,
            created_at: self.created_at,
            feedback: self.progress(),
            has_score: self.score.is_some(),
            admin_label: self.admin_label,
        }
    }
}

/// One row of the event listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub name: String,
    pub attendance: i64,
    pub revenue: f64,
    pub created_at: DateTime<Utc>,
    pub feedback: FeedbackProgress,
    pub has_score: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_label: Option<f64>,
}

/// Latest computed score for an event. Recomputing replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(flatten)]
    pub score: EventScore,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedbackProgress {
    pub total: usize,
    pub remaining: usize,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerState {
    pub fn new() -> Self {
        Self {
            version: LEDGER_VERSION,
            events: BTreeMap::new(),
            model: None,
        }
    }

    pub fn event(&self, name: &str) -> Result<&EventRecord> {
        self.events
            .get(name)
            .with_context(|| format!("Event '{}' not found", name))
    }

    fn event_mut(&mut self, name: &str) -> Result<&mut EventRecord> {
        self.events
            .get_mut(name)
            .with_context(|| format!("Event '{}' not found", name))
    }

    /// Register a new event.
    pub fn add_event(
        &mut self,
        name: &str,
        attendance: i64,
        revenue: f64,
        now: DateTime<Utc>,
    ) -> Result<&EventRecord> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            bail!("Event name must be 1-{} characters", MAX_NAME_LEN);
        }
        if attendance <= 0 {
            bail!("Attendance must be positive, got {}", attendance);
        }
        if !(revenue >= 0.0 && revenue.is_finite()) {
            bail!("Revenue must be a non-negative number, got {}", revenue);
        }
        if self.events.contains_key(name) {
            bail!("Event '{}' already exists", name);
        }

        let record = EventRecord {
            name: name.to_string(),
            attendance,
            revenue,
            created_at: now,
            feedback: Vec::new(),
            score: None,
            admin_label: None,
        };
        Ok(&*self.events.entry(name.to_string()).or_insert(record))
    }

    /// Remove an event with its feedback, score and label.
    /// Returns true if the event existed.
    pub fn remove_event(&mut self, name: &str) -> bool {
        self.events.remove(name).is_some()
    }

    pub fn add_feedback(&mut self, name: &str, entry: FeedbackEntry) -> Result<FeedbackProgress> {
        if entry.text.trim().chars().count() < MIN_FEEDBACK_LEN {
            bail!(
                "Feedback text must be at least {} characters",
                MIN_FEEDBACK_LEN
            );
        }
        if let Some(rating) = entry.rating {
            if !(1..=5).contains(&rating) {
                bail!("Rating must be between 1 and 5, got {}", rating);
            }
        }

        let event = self.event_mut(name)?;
        if let Some(respondent) = entry.respondent_id.as_deref() {
            if event
                .feedback
                .iter()
                .any(|existing| existing.respondent_id.as_deref() == Some(respondent))
            {
                bail!(
                    "Feedback already submitted for respondent '{}' on '{}'",
                    respondent,
                    name
                );
            }
        }
        event.feedback.push(entry);
        Ok(event.progress())
    }

    /// Score an event against every other event and the current model, and
    /// store the result in place of any previous score.
    pub fn compute_score(&mut self, name: &str, now: DateTime<Utc>) -> Result<&EventScore> {
        let event = self.event(name)?;
        let history: Vec<RevenueSample> = self
            .events
            .values()
            .filter(|other| other.name != event.name)
            .map(EventRecord::revenue_sample)
            .collect();
        let weights = self.model.as_ref().and_then(ModelState::usable_weights);

        let score = score_event(event.revenue_sample(), &event.feedback, &history, weights)
            .with_context(|| format!("Cannot score event '{}'", name))?;

        info!(
            event = name,
            method = score.explanation.feedback.method.as_str(),
            value = score.value_score,
            "stored event score"
        );

        let event = self.event_mut(name)?;
        let record = event.score.insert(ScoreRecord {
            score,
            computed_at: now,
        });
        Ok(&record.score)
    }

    /// Calibration samples from every event that is both scored and labeled.
    pub fn calibration_samples(&self) -> Vec<CalibrationSample> {
        self.events
            .values()
            .filter_map(|event| {
                let score = event.score.as_ref()?;
                let label = event.admin_label?;
                Some(CalibrationSample {
                    feature_vector: score.score.feature_vector,
                    admin_label: label,
                })
            })
            .collect()
    }

    /// Record an admin label for a scored event and retrain when possible.
    pub fn calibrate(
        &mut self,
        name: &str,
        label: f64,
        now: DateTime<Utc>,
    ) -> Result<CalibrationOutcome> {
        if !(0.0..=100.0).contains(&label) {
            bail!("Calibration label must be between 0 and 100, got {}", label);
        }
        let event = self.event_mut(name)?;
        if event.score.is_none() {
            bail!("Compute a score for '{}' before calibrating", name);
        }
        event.admin_label = Some(label);

        let samples = self.calibration_samples();
        let outcome = retrain(&samples, self.model.as_ref(), now);
        if let CalibrationOutcome::Retrained(state) = &outcome {
            self.model = Some(state.clone());
        }
        Ok(outcome)
    }

    pub fn label_count(&self) -> usize {
        self.events
            .values()
            .filter(|event| event.admin_label.is_some())
            .count()
    }

    pub fn status(&self) -> ModelStatus {
        ModelStatus::from_state(self.model.as_ref(), self.label_count())
    }

    /// Every event, newest first.
    pub fn list_events(&self) -> Vec<EventSummary> {
        let mut events: Vec<&EventRecord> = self.events.values().collect();
        events.sort_by(|a, b| newest_first(a, b));
        events.into_iter().map(EventRecord::summary).collect()
    }

    /// Scored events, newest first.
    pub fn history(&self) -> Vec<&EventRecord> {
        let mut scored: Vec<&EventRecord> = self
            .events
            .values()
            .filter(|event| event.score.is_some())
            .collect();
        scored.sort_by(|a, b| newest_first(a, b));
        scored
    }
}

fn newest_first(a: &EventRecord, b: &EventRecord) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringMethod;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-05-01T18:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn ready_event(state: &mut LedgerState, name: &str, revenue: f64, rating: u8) {
        state.add_event(name, 100, revenue, now()).unwrap();
        for _ in 0..READY_THRESHOLD {
            state
                .add_feedback(name, FeedbackEntry::new("Good event, nice people", Some(rating)))
                .unwrap();
        }
    }

    #[test]
    fn test_new_state_empty() {
        let state = LedgerState::new();
        assert_eq!(state.version, LEDGER_VERSION);
        assert!(state.events.is_empty());
        assert!(state.model.is_none());
    }

    #[test]
    fn test_add_event_validates_input() {
        let mut state = LedgerState::new();
        assert!(state.add_event("", 10, 100.0, now()).is_err());
        assert!(state.add_event("Gala", 0, 100.0, now()).is_err());
        assert!(state.add_event("Gala", 10, -1.0, now()).is_err());
        assert!(state.add_event("Gala", 10, 100.0, now()).is_ok());
        let err = state.add_event("Gala", 10, 100.0, now()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_add_feedback_reports_progress() {
        let mut state = LedgerState::new();
        state.add_event("Gala", 10, 100.0, now()).unwrap();
        let progress = state
            .add_feedback("Gala", FeedbackEntry::new("Lovely evening overall", Some(5)))
            .unwrap();
        assert_eq!(progress, FeedbackProgress { total: 1, remaining: 29 });
    }

    #[test]
    fn test_add_feedback_validates_input() {
        let mut state = LedgerState::new();
        state.add_event("Gala", 10, 100.0, now()).unwrap();
        assert!(state.add_feedback("Gala", FeedbackEntry::new("short", None)).is_err());
        assert!(state
            .add_feedback("Gala", FeedbackEntry::new("Long enough text", Some(6)))
            .is_err());
        assert!(state
            .add_feedback("Nope", FeedbackEntry::new("Long enough text", None))
            .is_err());
    }

    #[test]
    fn test_duplicate_respondent_is_rejected() {
        let mut state = LedgerState::new();
        state.add_event("Gala", 10, 100.0, now()).unwrap();
        state.add_event("Picnic", 10, 100.0, now()).unwrap();
        let entry =
            FeedbackEntry::new("Lovely evening overall", Some(5)).with_respondent("R-7QX2KD");

        state.add_feedback("Gala", entry.clone()).unwrap();
        let err = state.add_feedback("Gala", entry.clone()).unwrap_err();
        assert!(err.to_string().contains("already submitted for respondent 'R-7QX2KD'"));
        assert_eq!(state.event("Gala").unwrap().feedback.len(), 1);

        // Same respondent on another event, and anonymous entries, are fine.
        state.add_feedback("Picnic", entry).unwrap();
        state
            .add_feedback("Gala", FeedbackEntry::new("Lovely evening overall", Some(5)))
            .unwrap();
        state
            .add_feedback("Gala", FeedbackEntry::new("Lovely evening overall", Some(5)))
            .unwrap();
        assert_eq!(state.event("Gala").unwrap().feedback.len(), 3);
    }

    #[test]
    fn test_list_events_newest_first_with_progress() {
        let mut state = LedgerState::new();
        ready_event(&mut state, "Mixer", 1000.0, 4);
        state
            .add_event("Gala", 50, 500.0, now() + Duration::days(2))
            .unwrap();
        state
            .add_event("Bazaar", 80, 400.0, now() + Duration::days(1))
            .unwrap();
        state
            .add_feedback("Bazaar", FeedbackEntry::new("Busy but a lot of fun", Some(4)))
            .unwrap();
        state.compute_score("Mixer", now()).unwrap();

        let events = state.list_events();
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Gala", "Bazaar", "Mixer"]);

        assert_eq!(events[0].feedback, FeedbackProgress { total: 0, remaining: 30 });
        assert!(!events[0].has_score);
        assert_eq!(events[1].feedback, FeedbackProgress { total: 1, remaining: 29 });
        assert_eq!(events[2].feedback, FeedbackProgress { total: 30, remaining: 0 });
        assert!(events[2].has_score);
    }

    #[test]
    fn test_compute_score_requires_ready_feedback() {
        let mut state = LedgerState::new();
        state.add_event("Gala", 10, 100.0, now()).unwrap();
        let err = state.compute_score("Gala", now()).unwrap_err();
        assert!(format!("{:#}", err).contains("need 30 feedback entries"));
    }

    #[test]
    fn test_compute_score_overwrites_previous() {
        let mut state = LedgerState::new();
        ready_event(&mut state, "Gala", 1500.0, 4);
        let first = state.compute_score("Gala", now()).unwrap().clone();
        let later = now() + Duration::hours(1);
        let second = state.compute_score("Gala", later).unwrap().clone();
        assert_eq!(first, second);
        let record = state.event("Gala").unwrap().score.as_ref().unwrap();
        assert_eq!(record.computed_at, later);
    }

    #[test]
    fn test_history_excludes_scored_event_itself() {
        let mut state = LedgerState::new();
        ready_event(&mut state, "A", 500.0, 4);
        ready_event(&mut state, "B", 1500.0, 4);
        ready_event(&mut state, "C", 2500.0, 4);
        ready_event(&mut state, "D", 1500.0, 4);
        let score = state.compute_score("D", now()).unwrap();
        // Window over A, B, C only: [5, 25], D sits at 15.
        assert_eq!(score.revenue_score, 50.0);
    }

    #[test]
    fn test_calibrate_requires_score() {
        let mut state = LedgerState::new();
        ready_event(&mut state, "Gala", 1500.0, 4);
        let err = state.calibrate("Gala", 70.0, now()).unwrap_err();
        assert!(err.to_string().contains("before calibrating"));
        assert!(state.calibrate("Gala", 170.0, now()).is_err());
    }

    #[test]
    fn test_relabel_overwrites() {
        let mut state = LedgerState::new();
        ready_event(&mut state, "Gala", 1500.0, 4);
        state.compute_score("Gala", now()).unwrap();
        state.calibrate("Gala", 70.0, now()).unwrap();
        state.calibrate("Gala", 40.0, now()).unwrap();
        assert_eq!(state.label_count(), 1);
        assert_eq!(state.calibration_samples()[0].admin_label, 40.0);
    }

    #[test]
    fn test_fifth_label_trains_model() {
        let mut state = LedgerState::new();
        for (i, name) in ["A", "B", "C", "D", "E"].iter().enumerate() {
            ready_event(&mut state, name, 500.0 + 400.0 * i as f64, 1 + i as u8);
            state.compute_score(name, now()).unwrap();
        }
        for (i, name) in ["A", "B", "C", "D"].iter().enumerate() {
            let outcome = state.calibrate(name, 30.0 + 10.0 * i as f64, now()).unwrap();
            assert!(matches!(outcome, CalibrationOutcome::Pending { .. }));
        }
        assert_eq!(state.status().method, ScoringMethod::Rubric);

        let outcome = state.calibrate("E", 80.0, now()).unwrap();
        assert!(matches!(outcome, CalibrationOutcome::Retrained(_)));
        let status = state.status();
        assert_eq!(status.method, ScoringMethod::Learned);
        assert_eq!(status.version, Some(1));
        assert_eq!(status.trained_on, 5);

        let rescored = state.compute_score("A", now()).unwrap();
        assert_eq!(rescored.explanation.feedback.method, ScoringMethod::Learned);
    }

    #[test]
    fn test_history_is_newest_first() {
        let mut state = LedgerState::new();
        ready_event(&mut state, "Old", 1000.0, 4);
        state.add_event("New", 100, 1000.0, now() + Duration::days(1)).unwrap();
        for _ in 0..READY_THRESHOLD {
            state
                .add_feedback("New", FeedbackEntry::new("Good event, nice people", Some(4)))
                .unwrap();
        }
        state.add_event("Unscored", 100, 1000.0, now()).unwrap();
        state.compute_score("Old", now()).unwrap();
        state.compute_score("New", now()).unwrap();

        let names: Vec<&str> = state.history().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["New", "Old"]);
    }

    #[test]
    fn test_remove_event() {
        let mut state = LedgerState::new();
        state.add_event("Gala", 10, 100.0, now()).unwrap();
        assert!(state.remove_event("Gala"));
        assert!(!state.remove_event("Gala"));
    }
}
