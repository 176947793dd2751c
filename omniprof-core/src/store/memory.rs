//! In-process event store.

use super::{EventStore, StoreData};
use crate::error::OmniprofResult;
use crate::event::{CalendarEvent, ClassId, EventDraft, OwnerId, SchoolClass};

/// Keeps everything in memory; ids restart at 1 for every new store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for MemoryStore {
    fn create_event(&mut self, draft: EventDraft) -> OmniprofResult<CalendarEvent> {
        Ok(self.data.insert_event(draft))
    }

    fn list_events(
        &self,
        owner_id: &OwnerId,
        class_id: Option<ClassId>,
    ) -> OmniprofResult<Vec<CalendarEvent>> {
        Ok(self.data.events_for(owner_id, class_id))
    }

    fn create_class(&mut self, owner_id: &OwnerId, name: &str) -> OmniprofResult<SchoolClass> {
        Ok(self.data.insert_class(owner_id, name))
    }

    fn list_classes(&self, owner_id: &OwnerId) -> OmniprofResult<Vec<SchoolClass>> {
        Ok(self.data.classes_for(owner_id))
    }

    fn find_class_by_code(&self, owner_id: &OwnerId, code: &str) -> OmniprofResult<Option<ClassId>> {
        Ok(self.data.class_by_code(owner_id, code))
    }
}
