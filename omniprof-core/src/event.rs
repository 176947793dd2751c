//! Calendar event types.
//!
//! `EventDraft` is what the .ics parser produces (no id yet), and
//! `CalendarEvent` is what a store hands back once the draft is persisted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type EventId = u64;
pub type ClassId = u64;

/// Identifier of the teacher owning an event. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        OwnerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        OwnerId::new(id)
    }
}

impl From<String> for OwnerId {
    fn from(id: String) -> Self {
        OwnerId(id)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What sort of slot an event is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Class,
    Assessment,
    Meeting,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Class => "class",
            EventKind::Assessment => "assessment",
            EventKind::Meeting => "meeting",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    /// Empty when the source had none
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub class_id: Option<ClassId>,
    pub owner_id: OwnerId,
    pub kind: EventKind,
    /// Class code spotted in the title (e.g. "3A"), left for the store to resolve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_hint: Option<String>,
}

/// A persisted calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub class_id: Option<ClassId>,
    pub owner_id: OwnerId,
    #[serde(default)]
    pub kind: EventKind,
}

impl CalendarEvent {
    /// Attach a store-assigned id to a draft.
    pub fn from_draft(id: EventId, draft: EventDraft) -> Self {
        CalendarEvent {
            id,
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            class_id: draft.class_id,
            owner_id: draft.owner_id,
            kind: draft.kind,
        }
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// A class taught by an owner. Only what is needed to link imported events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: ClassId,
    pub owner_id: OwnerId,
    pub name: String,
}
