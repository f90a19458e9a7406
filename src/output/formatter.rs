use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::calibration::{CalibrationOutcome, ModelStatus};
use crate::config::ColorMode;
use crate::ledger::{EventRecord, EventSummary};
use crate::scoring::FeedbackEntry;
use crate::scoring::{EventScore, Normalization, RevenueExplanation, ScoringMethod};

/// Decide on colors from the configured mode, checking for a TTY in auto mode
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Round to one decimal place for display
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Numeric counterpart of [`format_score`] for JSON output
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

fn method_label(method: ScoringMethod) -> &'static str {
    match method {
        ScoringMethod::Rubric => "rubric",
        ScoringMethod::Learned => "learned model",
    }
}

fn format_themes(label: &str, themes: &[String]) -> String {
    if themes.is_empty() {
        format!("  {}: none", label)
    } else {
        format!("  {}: {}", label, themes.join("; "))
    }
}

/// Format a full score report for one event
pub fn format_event_score(name: &str, score: &EventScore, use_colors: bool) -> String {
    let feedback = &score.explanation.feedback;
    let mut lines = Vec::new();

    let value = format_score(score.value_score);
    if use_colors {
        lines.push(format!("{}  value {}", name.bold(), value.bold().green()));
    } else {
        lines.push(format!("{}  value {}", name, value));
    }

    lines.push(format!(
        "  Feedback: {} ({}, weight {})",
        format_score(score.feedback_score),
        method_label(feedback.method),
        score.explanation.weights.feedback
    ));

    let revenue_detail = match &score.explanation.revenue {
        RevenueExplanation::Benchmarked {
            revenue_per_attendee,
            min_benchmark,
            max_benchmark,
            normalization,
        } => {
            let window = match normalization {
                Normalization::Rolling => "rolling",
                Normalization::Default => "default",
            };
            format!(
                "{:.2}/attendee vs {} window {:.2}-{:.2}",
                revenue_per_attendee, window, min_benchmark, max_benchmark
            )
        }
        RevenueExplanation::InvalidAttendance { attendance } => {
            format!("invalid attendance {}", attendance)
        }
    };
    lines.push(format!(
        "  Revenue:  {} ({}, weight {})",
        format_score(score.revenue_score),
        revenue_detail,
        score.explanation.weights.revenue
    ));

    let rating = match feedback.rating_avg {
        Some(avg) => format!("{:.1}/5", avg),
        None => "unrated".to_string(),
    };
    lines.push(format!(
        "  Sentiment {:.3}, rating {}",
        feedback.sentiment_avg, rating
    ));

    let breakdown = feedback
        .category_breakdown
        .iter()
        .map(|(category, pct)| format!("{} {:.1}%", category, pct))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("  Categories: {}", breakdown));

    if use_colors {
        lines.push(format_themes("Positive", &feedback.positive_themes).green().to_string());
        lines.push(format_themes("Negative", &feedback.negative_themes).red().to_string());
    } else {
        lines.push(format_themes("Positive", &feedback.positive_themes));
        lines.push(format_themes("Negative", &feedback.negative_themes));
    }

    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format scored events as a table: Index, Value, Feedback, Revenue, Name
pub fn format_history_table(events: &[&EventRecord], use_colors: bool) -> String {
    if events.is_empty() {
        return "No scored events yet.".to_string();
    }

    let term_width = get_terminal_width();
    let score_width = 6;
    let separator = "  ";
    let fixed_width = 3 + 1 + (score_width + separator.len()) * 3;

    events
        .iter()
        .enumerate()
        .filter_map(|(idx, event)| {
            let score = &event.score.as_ref()?.score;
            let index_str = format!("{:>2}.", idx + 1);
            let value = format!("{:>width$}", format_score(score.value_score), width = score_width);
            let feedback = format!(
                "{:>width$}",
                format_score(score.feedback_score),
                width = score_width
            );
            let revenue = format!(
                "{:>width$}",
                format_score(score.revenue_score),
                width = score_width
            );

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&event.name, width - fixed_width)
                }
                Some(_) => truncate_name(&event.name, 20),
                None => event.name.clone(),
            };

            Some(if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    value.bold(),
                    separator,
                    feedback,
                    separator,
                    revenue,
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, value, separator, feedback, separator, revenue, separator, name
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn readiness(summary: &EventSummary) -> String {
    match (summary.has_score, summary.feedback.remaining) {
        (true, _) => "scored".to_string(),
        (false, 0) => "ready".to_string(),
        (false, remaining) => format!("{} to go", remaining),
    }
}

/// Format every event with its feedback count and scoring readiness
pub fn format_event_list(events: &[EventSummary], use_colors: bool) -> String {
    if events.is_empty() {
        return "No events yet.".to_string();
    }

    events
        .iter()
        .enumerate()
        .map(|(idx, event)| {
            let index_str = format!("{:>2}.", idx + 1);
            let count = format!("{:>3} feedback", event.feedback.total);
            let status = format!("{:<9}", readiness(event));
            if use_colors {
                let status = if event.has_score {
                    status.green().to_string()
                } else {
                    status.yellow().to_string()
                };
                format!("{} {}  {}  {}", index_str.dimmed(), count, status, event.name)
            } else {
                format!("{} {}  {}  {}", index_str, count, status, event.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the details of a single event
pub fn format_event_detail(summary: &EventSummary) -> String {
    let mut lines = vec![
        summary.name.clone(),
        format!("  Created:    {}", summary.created_at.format("%Y-%m-%d %H:%M UTC")),
        format!("  Attendance: {}", summary.attendance),
        format!("  Revenue:    {:.2}", summary.revenue),
        format!(
            "  Feedback:   {} ({})",
            summary.feedback.total,
            readiness(summary)
        ),
    ];
    if let Some(label) = summary.admin_label {
        lines.push(format!("  Admin label: {}", format_score(label)));
    }
    lines.join("\n")
}

/// Format feedback entries, one per line
pub fn format_feedback_list(entries: &[FeedbackEntry]) -> String {
    if entries.is_empty() {
        return "No feedback yet.".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let rating = entry
                .rating
                .map_or_else(|| "-".to_string(), |r| r.to_string());
            let respondent = entry.respondent_id.as_deref().unwrap_or("anonymous");
            format!("{:>2}. [{}] {}: {}", idx + 1, rating, respondent, entry.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format which scorer is active and how far calibration has come
pub fn format_status(status: &ModelStatus) -> String {
    let mut lines = vec![format!("Scoring method: {}", method_label(status.method))];
    if let Some(version) = status.version {
        lines.push(format!(
            "Model version {} trained on {} labels",
            version, status.trained_on
        ));
    }
    lines.push(format!("Calibration labels: {}", status.total_labels));
    if status.needs_more > 0 {
        lines.push(format!(
            "{} more label(s) needed before training",
            status.needs_more
        ));
    }
    lines.join("\n")
}

pub fn format_calibration(outcome: &CalibrationOutcome) -> String {
    match outcome {
        CalibrationOutcome::Retrained(state) => format!(
            "Calibration saved and model retrained (version {}, {} labels)",
            state.version, state.trained_on
        ),
        CalibrationOutcome::Pending {
            total_labels,
            needs_more,
        } => format!(
            "Calibration saved ({} labels, {} more needed for training)",
            total_labels, needs_more
        ),
    }
}
