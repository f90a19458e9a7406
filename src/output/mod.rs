pub mod formatter;

pub use formatter::{
    format_calibration, format_event_detail, format_event_list, format_event_score,
    format_feedback_list, format_history_table, format_score, format_status, round_score,
    should_use_colors,
};
