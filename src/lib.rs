pub mod calibration;
pub mod config;
pub mod error;
pub mod ledger;
pub mod output;
pub mod scoring;
pub mod telemetry;
pub mod training;

pub use error::ScoringError;
