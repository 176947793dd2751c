//! Event storage.
//!
//! Import and export never touch storage directly; they go through an
//! `EventStore` handed to them by the caller.

mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::error::OmniprofResult;
use crate::event::{CalendarEvent, ClassId, EventDraft, EventId, OwnerId, SchoolClass};

/// Storage collaborator for calendar events and the classes they link to.
pub trait EventStore {
    /// Persist a draft, assigning it the next event id.
    fn create_event(&mut self, draft: EventDraft) -> OmniprofResult<CalendarEvent>;

    /// Events of an owner, optionally restricted to one class,
    /// ordered by start date then id.
    fn list_events(
        &self,
        owner_id: &OwnerId,
        class_id: Option<ClassId>,
    ) -> OmniprofResult<Vec<CalendarEvent>>;

    fn create_class(&mut self, owner_id: &OwnerId, name: &str) -> OmniprofResult<SchoolClass>;

    fn list_classes(&self, owner_id: &OwnerId) -> OmniprofResult<Vec<SchoolClass>>;

    /// Resolve a class code such as "3A" to one of the owner's classes.
    fn find_class_by_code(&self, owner_id: &OwnerId, code: &str) -> OmniprofResult<Option<ClassId>>;
}

/// Records shared by the store implementations. Serialized as-is by `JsonStore`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    next_event_id: EventId,
    next_class_id: ClassId,
    events: Vec<CalendarEvent>,
    classes: Vec<SchoolClass>,
}

impl Default for StoreData {
    fn default() -> Self {
        StoreData {
            next_event_id: 1,
            next_class_id: 1,
            events: Vec::new(),
            classes: Vec::new(),
        }
    }
}

impl StoreData {
    fn insert_event(&mut self, mut draft: EventDraft) -> CalendarEvent {
        draft.title = normalize_line_breaks(&draft.title);
        draft.description = normalize_line_breaks(&draft.description);

        let event = CalendarEvent::from_draft(self.next_event_id, draft);
        self.next_event_id += 1;
        self.events.push(event.clone());
        event
    }

    fn events_for(&self, owner_id: &OwnerId, class_id: Option<ClassId>) -> Vec<CalendarEvent> {
        let mut events: Vec<CalendarEvent> = self
            .events
            .iter()
            .filter(|e| &e.owner_id == owner_id)
            .filter(|e| class_id.is_none() || e.class_id == class_id)
            .cloned()
            .collect();

        events.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        events
    }

    fn insert_class(&mut self, owner_id: &OwnerId, name: &str) -> SchoolClass {
        let class = SchoolClass {
            id: self.next_class_id,
            owner_id: owner_id.clone(),
            name: name.to_string(),
        };
        self.next_class_id += 1;
        self.classes.push(class.clone());
        class
    }

    fn classes_for(&self, owner_id: &OwnerId) -> Vec<SchoolClass> {
        self.classes
            .iter()
            .filter(|c| &c.owner_id == owner_id)
            .cloned()
            .collect()
    }

    fn class_by_code(&self, owner_id: &OwnerId, code: &str) -> Option<ClassId> {
        self.classes
            .iter()
            .filter(|c| &c.owner_id == owner_id)
            .find(|c| class_name_matches_code(&c.name, code))
            .map(|c| c.id)
    }
}

/// Stored text uses bare LF line breaks; .ics TEXT has no way to carry CR.
fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// "3A", "3 A" and "3A - SVT" all match code "3A"; "13A" and "3AB" do not.
fn class_name_matches_code(name: &str, code: &str) -> bool {
    let compact: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    let code = code.to_uppercase();

    match compact.strip_prefix(code.as_str()) {
        Some(rest) => rest.chars().next().is_none_or(|c| !c.is_alphanumeric()),
        None => false,
    }
}
