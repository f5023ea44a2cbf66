//! Named storage keys and the capacity of each record list.

/// Key of a newest-first record list together with its maximum length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordListKey {
    name: &'static str,
    capacity: usize,
}

impl RecordListKey {
    pub const fn new(name: &'static str, capacity: usize) -> Self {
        Self { name, capacity }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Key holding a single JSON value (a map or a snapshot) rather than a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueKey(&'static str);

impl ValueKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

pub const FEEDBACK: RecordListKey = RecordListKey::new("sdg-feedback", 500);
pub const WATER_CHECKS: RecordListKey = RecordListKey::new("sdg-water-checks", 50);
pub const WATER_ESTIMATES: RecordListKey = RecordListKey::new("sdg-water-estimates", 50);

pub const QUIZ_SCORES: ValueKey = ValueKey::new("sdg-scores");
pub const CHECKLIST: ValueKey = ValueKey::new("sdg-checklist");
