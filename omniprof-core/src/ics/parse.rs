//! ICS parsing into event drafts.
//!
//! Parsing is lenient: every VEVENT that carries a SUMMARY, DTSTART and
//! DTEND becomes a draft, anything else is dropped without error. Each
//! block goes through the icalendar parser on its own, so one malformed
//! event cannot hide the others; blocks it rejects are read line by line.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use icalendar::parser::{Component, ParseString, read_calendar, unfold};
use tracing::debug;

use crate::classify::{classify_kind, detect_class_code};
use crate::event::{EventDraft, OwnerId};

/// The raw lines between `BEGIN:VEVENT` and `END:VEVENT`.
#[derive(Debug, Default)]
struct EventBlock<'a> {
    lines: Vec<&'a str>,
}

impl EventBlock<'_> {
    /// The block as a standalone calendar, with normalized line endings.
    fn to_calendar_source(&self) -> String {
        let mut source = String::from("BEGIN:VCALENDAR\nBEGIN:VEVENT\n");
        for line in &self.lines {
            source.push_str(line);
            source.push('\n');
        }
        source.push_str("END:VEVENT\nEND:VCALENDAR\n");
        source
    }
}

/// A `NAME[;params]:value` line. Parameters are not needed by the importer.
#[derive(Debug, PartialEq)]
struct ContentLine<'a> {
    name: &'a str,
    value: &'a str,
}

/// Properties of one VEVENT, from the icalendar parser or the line scan.
enum EventProperties<'a> {
    Parsed(Component<'a>),
    Scanned(Vec<ContentLine<'a>>),
}

impl EventProperties<'_> {
    /// Raw value of the first top-level property with this name.
    fn value(&self, name: &str) -> Option<&str> {
        match self {
            EventProperties::Parsed(vevent) => vevent.find_prop(name).map(|p| p.val.as_str()),
            EventProperties::Scanned(properties) => properties
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(name))
                .map(|p| p.value),
        }
    }

    /// Unescaped value of a TEXT property.
    fn text(&self, name: &str) -> Option<String> {
        match self {
            // The parser already unescapes SUMMARY and DESCRIPTION
            EventProperties::Parsed(vevent) => vevent.find_prop(name).map(|p| p.val.to_string()),
            EventProperties::Scanned(_) => self
                .value(name)
                .map(|v| ParseString::from(v).unescape_text().to_string()),
        }
    }
}

/// Parse ICS content into drafts owned by `owner_id`, in document order.
pub fn parse_events(content: &str, owner_id: &OwnerId) -> Vec<EventDraft> {
    let unfolded = unfold(content);
    let blocks = split_event_blocks(&unfolded);
    let total = blocks.len();

    let drafts: Vec<EventDraft> = blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let source = block.to_calendar_source();
            let properties = read_properties(index, block, &source);
            to_draft(index, &properties, owner_id)
        })
        .collect();

    debug!(
        blocks = total,
        events = drafts.len(),
        "Parsed ICS content"
    );

    drafts
}

/// Parse an ICS date value: `YYYYMMDDTHHMMSS[Z]` or `YYYYMMDD`, both read as UTC.
pub fn parse_ics_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let bytes = value.as_bytes();

    match bytes.len() {
        8 if bytes.iter().all(u8::is_ascii_digit) => {
            let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
            Some(date.and_hms_opt(0, 0, 0)?.and_utc())
        }
        15 | 16 => {
            let (core, zone) = bytes.split_at(15);
            if !matches!(zone, [] | [b'Z']) {
                return None;
            }
            let well_shaped = core.iter().enumerate().all(|(i, b)| {
                if i == 8 { *b == b'T' } else { b.is_ascii_digit() }
            });
            if !well_shaped {
                return None;
            }
            let naive = NaiveDateTime::parse_from_str(&value[..15], "%Y%m%dT%H%M%S").ok()?;
            Some(naive.and_utc())
        }
        _ => None,
    }
}

/// Collect the VEVENT blocks of an unfolded document.
///
/// A block ends at the first END:VEVENT. Unterminated blocks are dropped.
fn split_event_blocks(unfolded: &str) -> Vec<EventBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<EventBlock> = None;

    for line in unfolded.lines() {
        let marker = line.trim();

        if let Some(block) = current.as_mut() {
            if marker.eq_ignore_ascii_case("END:VEVENT") {
                blocks.extend(current.take());
            } else {
                block.lines.push(line);
            }
        } else if marker.eq_ignore_ascii_case("BEGIN:VEVENT") {
            current = Some(EventBlock::default());
        }
    }

    if current.is_some() {
        debug!("Dropping unterminated VEVENT block");
    }

    blocks
}

/// Read a block with the icalendar parser, falling back to a line scan when
/// it rejects the block or uses non-canonical (lowercase) property names.
fn read_properties<'a>(
    index: usize,
    block: &EventBlock<'a>,
    source: &'a str,
) -> EventProperties<'a> {
    let parsed = read_calendar(source)
        .ok()
        .and_then(|calendar| calendar.components.into_iter().find(|c| c.name == "VEVENT"))
        .filter(|vevent| {
            vevent
                .properties
                .iter()
                .all(|p| !p.name.as_str().chars().any(char::is_lowercase))
        });

    match parsed {
        Some(vevent) => EventProperties::Parsed(vevent),
        None => {
            debug!(block = index, "Reading VEVENT line by line");
            EventProperties::Scanned(scan_properties(&block.lines))
        }
    }
}

/// Top-level properties of a block. Nested components (VALARM and the like)
/// are left out.
fn scan_properties<'a>(lines: &[&'a str]) -> Vec<ContentLine<'a>> {
    let mut properties = Vec::new();
    let mut nested_depth = 0usize;

    for &line in lines {
        let marker = line.trim();

        if starts_with_ignore_case(marker, "BEGIN:") {
            nested_depth += 1;
        } else if starts_with_ignore_case(marker, "END:") {
            nested_depth = nested_depth.saturating_sub(1);
        } else if nested_depth == 0 {
            properties.extend(parse_content_line(line));
        }
    }

    properties
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Split a content line into name and value, skipping any parameter clause.
fn parse_content_line(line: &str) -> Option<ContentLine<'_>> {
    let name_end = line.find([';', ':'])?;
    let name = &line[..name_end];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }

    let rest = &line[name_end..];
    let value_start = if rest.starts_with(':') {
        name_end + 1
    } else {
        // Parameter values may contain ':' when quoted
        let mut in_quotes = false;
        let colon = rest.char_indices().find_map(|(i, c)| match c {
            '"' => {
                in_quotes = !in_quotes;
                None
            }
            ':' if !in_quotes => Some(i),
            _ => None,
        })?;
        name_end + colon + 1
    };

    Some(ContentLine {
        name,
        value: &line[value_start..],
    })
}

fn to_draft(index: usize, properties: &EventProperties, owner_id: &OwnerId) -> Option<EventDraft> {
    let title = properties
        .text("SUMMARY")
        .filter(|s| !s.trim().is_empty());
    let Some(title) = title else {
        debug!(block = index, "Skipping VEVENT without SUMMARY");
        return None;
    };

    let Some(start_date) = properties.value("DTSTART").and_then(parse_ics_datetime) else {
        debug!(block = index, summary = %title, "Skipping VEVENT with missing or invalid DTSTART");
        return None;
    };

    let Some(end_date) = properties.value("DTEND").and_then(parse_ics_datetime) else {
        debug!(block = index, summary = %title, "Skipping VEVENT with missing or invalid DTEND");
        return None;
    };

    let description = properties.text("DESCRIPTION").unwrap_or_default();

    Some(EventDraft {
        kind: classify_kind(&title),
        class_hint: detect_class_code(&title),
        title,
        description,
        start_date,
        end_date,
        class_id: None,
        owner_id: owner_id.clone(),
    })
}
