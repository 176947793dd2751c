//! Import and export of .ics documents through an `EventStore`.

use tracing::info;

use crate::date_range::DateRange;
use crate::error::{OmniprofError, OmniprofResult};
use crate::event::{CalendarEvent, ClassId, OwnerId};
use crate::ics::{self, CalendarMetadata};
use crate::store::EventStore;

/// Outcome of an import.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportSummary {
    /// Events persisted, in document order
    pub events: Vec<CalendarEvent>,
    /// How many of them were linked to a class through their summary
    pub linked_to_class: usize,
}

impl ImportSummary {
    pub fn imported(&self) -> usize {
        self.events.len()
    }
}

/// Parse `content` and persist every well-formed event for `owner_id`.
///
/// Class codes found in summaries are resolved against the owner's classes.
/// Whitespace-only content is rejected; content without events is not.
pub fn import_ics<S: EventStore + ?Sized>(
    store: &mut S,
    content: &str,
    owner_id: &OwnerId,
) -> OmniprofResult<ImportSummary> {
    if content.trim().is_empty() {
        return Err(OmniprofError::EmptyIcs);
    }

    let mut summary = ImportSummary::default();

    for mut draft in ics::parse_events(content, owner_id) {
        if let Some(code) = draft.class_hint.as_deref() {
            draft.class_id = store.find_class_by_code(owner_id, code)?;
        }
        if draft.class_id.is_some() {
            summary.linked_to_class += 1;
        }
        summary.events.push(store.create_event(draft)?);
    }

    info!(
        owner = %owner_id,
        imported = summary.imported(),
        linked = summary.linked_to_class,
        "Imported ICS events"
    );

    Ok(summary)
}

/// Render the owner's events (optionally one class, within `range`) as .ics.
pub fn export_ics<S: EventStore + ?Sized>(
    store: &S,
    owner_id: &OwnerId,
    class_id: Option<ClassId>,
    range: &DateRange,
    metadata: &CalendarMetadata,
) -> OmniprofResult<String> {
    if let Some(class_id) = class_id {
        let known = store
            .list_classes(owner_id)?
            .iter()
            .any(|c| c.id == class_id);
        if !known {
            return Err(OmniprofError::UnknownClass(class_id));
        }
    }

    let events: Vec<CalendarEvent> = store
        .list_events(owner_id, class_id)?
        .into_iter()
        .filter(|e| range.contains(e))
        .collect();

    info!(owner = %owner_id, exported = events.len(), "Exported ICS events");

    Ok(ics::generate_ics(&events, metadata))
}

/// Download filename for an export: `omniprof-<class or owner>.ics`.
pub fn suggested_filename(owner_id: &OwnerId, class_name: Option<&str>) -> String {
    let label = match class_name {
        Some(name) => slug::slugify(name),
        None => slug::slugify(format!("owner {owner_id}")),
    };

    if label.is_empty() {
        "omniprof.ics".to_string()
    } else {
        format!("omniprof-{label}.ics")
    }
}
