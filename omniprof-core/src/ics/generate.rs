//! ICS document generation.

use super::text::{escape_text, push_folded_line};
use super::{CalendarMetadata, ICS_DATETIME_FORMAT};
use crate::event::CalendarEvent;

/// Generate one VCALENDAR document holding every event, in input order.
///
/// UIDs are `<event id>@<uid_domain>`, so generating the same events twice
/// yields identical output.
///
/// Dates are written as `YYYYMMDDTHHMMSSZ`, which only holds years 0 to
/// 9999. Events outside that range get a signed year and are skipped when
/// the document is parsed back.
pub fn generate_ics(events: &[CalendarEvent], metadata: &CalendarMetadata) -> String {
    let mut out = String::new();

    push_folded_line(&mut out, "BEGIN:VCALENDAR");
    push_folded_line(&mut out, "VERSION:2.0");
    push_folded_line(&mut out, &format!("PRODID:{}", metadata.prodid()));

    for event in events {
        push_event(&mut out, event, metadata);
    }

    push_folded_line(&mut out, "END:VCALENDAR");

    out
}

fn push_event(out: &mut String, event: &CalendarEvent, metadata: &CalendarMetadata) {
    push_folded_line(out, "BEGIN:VEVENT");
    push_folded_line(
        out,
        &format!("DTSTART:{}", event.start_date.format(ICS_DATETIME_FORMAT)),
    );
    push_folded_line(
        out,
        &format!("DTEND:{}", event.end_date.format(ICS_DATETIME_FORMAT)),
    );
    push_folded_line(out, &format!("SUMMARY:{}", escape_text(&event.title)));

    if !event.description.is_empty() {
        push_folded_line(
            out,
            &format!("DESCRIPTION:{}", escape_text(&event.description)),
        );
    }

    push_folded_line(out, &format!("UID:{}@{}", event.id, metadata.uid_domain));
    push_folded_line(out, "END:VEVENT");
}
