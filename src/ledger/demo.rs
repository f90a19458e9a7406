use anyhow::Result;
use chrono::{DateTime, Utc};

use super::types::LedgerState;
use crate::scoring::FeedbackEntry;

pub const DEMO_EVENT: &str = "PSA Welcome Week 2024";
const DEMO_ATTENDANCE: i64 = 150;
const DEMO_REVENUE: f64 = 2250.0;

const DEMO_FEEDBACK: [(&str, u8); 30] = [
    ("The event was amazing! Loved the cultural performances and the food was delicious.", 5),
    ("Great organization but the venue was a bit crowded. Still had fun!", 4),
    ("Wonderful atmosphere and welcoming community. Felt right at home.", 5),
    ("Good event overall. The program content was interesting and informative.", 4),
    ("The timing was perfect and everything ran smoothly. Impressed!", 5),
    ("Loved meeting new people. The networking opportunities were fantastic.", 5),
    ("Food options were great and the venue was accessible. Well done!", 4),
    ("The speakers were engaging and the activities were fun. Would attend again.", 5),
    ("Slightly rushed schedule but otherwise a memorable experience.", 4),
    ("Fantastic energy and inclusive vibes. PSA really knows how to throw an event!", 5),
    ("The registration was smooth and organized. Great first impression.", 4),
    ("Enjoyed the cultural showcase. Very informative about Pakistani traditions.", 5),
    ("Parking was a bit difficult but the event itself was worth it.", 4),
    ("Amazing community spirit. Everyone was so friendly and welcoming.", 5),
    ("The snacks were tasty and there were good halal options available.", 4),
    ("Duration was just right. Not too long, not too short.", 4),
    ("Loved the decorations and attention to detail. Very festive!", 5),
    ("Could use more seating but the standing areas had great views.", 4),
    ("The MC was entertaining and kept the energy high throughout.", 5),
    ("Well-coordinated event. You could tell a lot of planning went into it.", 5),
    ("Good variety of activities for different interests.", 4),
    ("The venue location was convenient and easy to find.", 4),
    ("Felt very included as a first-time attendee. Made new friends!", 5),
    ("Professional yet fun atmosphere. Perfect balance.", 5),
    ("The event started on time which I really appreciated.", 4),
    ("Great content about Pakistani culture and UWaterloo community.", 5),
    ("Would definitely recommend to other students.", 5),
    ("The organizers were helpful and answered all my questions.", 4),
    ("Memorable experience overall. Looking forward to future events!", 5),
    ("One of the best campus events I've attended. Well done PSA!", 5),
];

/// Add the demo event with a full feedback batch.
///
/// Returns false without touching the ledger if the demo event already exists.
pub fn seed_demo(state: &mut LedgerState, now: DateTime<Utc>) -> Result<bool> {
    if state.events.contains_key(DEMO_EVENT) {
        return Ok(false);
    }

    state.add_event(DEMO_EVENT, DEMO_ATTENDANCE, DEMO_REVENUE, now)?;
    for (i, (text, rating)) in DEMO_FEEDBACK.into_iter().enumerate() {
        let entry = FeedbackEntry::new(text, Some(rating))
            .with_respondent(format!("R-DEMO{:02}", i + 1));
        state.add_feedback(DEMO_EVENT, entry)?;
    }
    Ok(true)
}
