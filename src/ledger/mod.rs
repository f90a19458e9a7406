pub mod demo;
pub mod storage;
pub mod types;

pub use demo::{seed_demo, DEMO_EVENT};
pub use storage::{get_ledger_path, load_ledger, save_ledger};
pub use types::{EventRecord, EventSummary, FeedbackProgress, LedgerState, ScoreRecord};
