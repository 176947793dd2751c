//! Event store persisted as a single JSON file.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{EventStore, StoreData};
use crate::error::{OmniprofError, OmniprofResult};
use crate::event::{CalendarEvent, ClassId, EventDraft, OwnerId, SchoolClass};

const STORE_FILE: &str = "events.json";

/// Store backed by `<data_dir>/events.json`, rewritten after every change.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    data: StoreData,
}

impl JsonStore {
    /// Open the store in `data_dir`. A missing file means an empty store.
    pub fn open(data_dir: &Path) -> OmniprofResult<Self> {
        let path = data_dir.join(STORE_FILE);

        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                OmniprofError::Store(format!("Could not read {}: {e}", path.display()))
            })?
        } else {
            StoreData::default()
        };

        Ok(JsonStore { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> OmniprofResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.data)
            .map_err(|e| OmniprofError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, content)?;

        debug!(path = %self.path.display(), "Saved event store");
        Ok(())
    }
}

impl EventStore for JsonStore {
    fn create_event(&mut self, draft: EventDraft) -> OmniprofResult<CalendarEvent> {
        let event = self.data.insert_event(draft);
        self.save()?;
        Ok(event)
    }

    fn list_events(
        &self,
        owner_id: &OwnerId,
        class_id: Option<ClassId>,
    ) -> OmniprofResult<Vec<CalendarEvent>> {
        Ok(self.data.events_for(owner_id, class_id))
    }

    fn create_class(&mut self, owner_id: &OwnerId, name: &str) -> OmniprofResult<SchoolClass> {
        let class = self.data.insert_class(owner_id, name);
        self.save()?;
        Ok(class)
    }

    fn list_classes(&self, owner_id: &OwnerId) -> OmniprofResult<Vec<SchoolClass>> {
        Ok(self.data.classes_for(owner_id))
    }

    fn find_class_by_code(&self, owner_id: &OwnerId, code: &str) -> OmniprofResult<Option<ClassId>> {
        Ok(self.data.class_by_code(owner_id, code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use chrono::{TimeZone, Utc};

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            description: "Salle 12".to_string(),
            start_date: Utc.with_ymd_and_hms(2023, 10, 20, 10, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2023, 10, 20, 12, 0, 0).unwrap(),
            class_id: None,
            owner_id: OwnerId::from("1"),
            kind: EventKind::Assessment,
            class_hint: Some("3A".to_string()),
        }
    }

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();

        assert!(store.list_events(&OwnerId::from("1"), None).unwrap().is_empty());
        assert!(!store.path().exists(), "Opening must not create the file");
    }

    #[test]
    fn test_events_and_ids_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested/data");

        {
            let mut store = JsonStore::open(&data_dir).unwrap();
            store.create_class(&OwnerId::from("1"), "3A").unwrap();
            store.create_event(draft("Évaluation")).unwrap();
        }

        let mut reopened = JsonStore::open(&data_dir).unwrap();
        let events = reopened.list_events(&OwnerId::from("1"), None).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Évaluation");
        assert_eq!(events[0].kind, EventKind::Assessment);
        assert_eq!(events[0].description, "Salle 12");

        let next = reopened.create_event(draft("Suivant")).unwrap();
        assert_eq!(next.id, 2, "Id counter should persist across reopen");
        assert_eq!(
            reopened.find_class_by_code(&OwnerId::from("1"), "3A").unwrap(),
            Some(1)
        );
    }

    #[test]
    fn test_corrupt_file_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STORE_FILE), "{ not json").unwrap();

        let err = JsonStore::open(dir.path()).unwrap_err();
        assert!(matches!(err, OmniprofError::Store(_)));
    }
}
