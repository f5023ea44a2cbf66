use tracing::info;

use shared::ChecklistSnapshot;

use crate::domain::current_timestamp;
use crate::storage::keys::CHECKLIST;
use crate::storage::LocalRecordStore;

pub const CHECKLIST_SAVED_MESSAGE: &str = "Checklist saved ✅";

/// Service for the "actions I take" checklist; only the latest snapshot is kept
#[derive(Clone)]
pub struct ChecklistService {
    store: LocalRecordStore,
}

impl ChecklistService {
    pub fn new(store: LocalRecordStore) -> Self {
        Self { store }
    }

    pub fn save(&self, c1: bool, c2: bool, c3: bool) -> (ChecklistSnapshot, bool) {
        let snapshot = ChecklistSnapshot {
            c1,
            c2,
            c3,
            date: current_timestamp(),
        };
        let saved = self.store.save_value(&CHECKLIST, &snapshot);
        info!(c1, c2, c3, saved, "checklist snapshot saved");
        (snapshot, saved)
    }

    pub fn current(&self) -> Option<ChecklistSnapshot> {
        self.store.load_value(&CHECKLIST)
    }
}
