use std::collections::HashSet;

use crate::record::Record;

/// The collection filters remove from during a structural pass.
///
/// Borrowed from the base collection; removals are tracked by id so the
/// base order survives untouched.
#[derive(Debug)]
pub struct Working<'a, R> {
    records: &'a [R],
    removed: HashSet<&'a str>,
}

impl<'a, R: Record> Working<'a, R> {
    pub fn new(records: &'a [R]) -> Self {
        Working {
            records,
            removed: HashSet::new(),
        }
    }

    /// Drop every record with `id`. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &'a str) {
        self.removed.insert(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        !self.removed.contains(id) && self.records.iter().any(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !self.removed.contains(r.id()))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Surviving records, in base order.
    pub fn into_records(self) -> Vec<R> {
        self.records
            .iter()
            .filter(|r| !self.removed.contains(r.id()))
            .cloned()
            .collect()
    }
}
