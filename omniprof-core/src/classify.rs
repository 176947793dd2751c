//! Best-effort hints derived from an event summary.
//!
//! Consumers may recategorize events after import.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::event::EventKind;

static CLASS_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+[A-Z]").expect("valid class code regex"));

/// Guess the event kind from its summary (case-insensitive).
pub fn classify_kind(summary: &str) -> EventKind {
    let lower = summary.to_lowercase();

    if lower.contains("exam") || lower.contains("évaluation") {
        EventKind::Assessment
    } else if lower.contains("meeting") || lower.contains("réunion") {
        EventKind::Meeting
    } else {
        EventKind::Class
    }
}

/// Find the first class-code-like token ("3A", "12C") in a summary.
pub fn detect_class_code(summary: &str) -> Option<String> {
    CLASS_CODE_RE
        .find(summary)
        .map(|m| m.as_str().to_string())
}
