use crate::error::StorageError;
use crate::models::MessageRecord;

/// Key-ordered record store backing the archive.
///
/// `bulk_append` must be atomic: readers see either the whole batch or none of
/// it. Ids are assigned on append and `get_all` returns records in insertion
/// order.
pub trait MessageStore {
    fn count(&self) -> Result<i64, StorageError>;
    fn get_all(&self) -> Result<Vec<MessageRecord>, StorageError>;
    /// Returns the ids assigned to `records`, in order.
    fn bulk_append(&mut self, records: &[MessageRecord]) -> Result<Vec<i64>, StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-process store with no persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<MessageRecord>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageStore for MemoryStore {
    fn count(&self) -> Result<i64, StorageError> {
        Ok(self.records.len() as i64)
    }

    fn get_all(&self) -> Result<Vec<MessageRecord>, StorageError> {
        Ok(self.records.clone())
    }

    fn bulk_append(&mut self, records: &[MessageRecord]) -> Result<Vec<i64>, StorageError> {
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            self.next_id += 1;
            let mut stored = record.clone();
            stored.id = Some(self.next_id);
            ids.push(self.next_id);
            self.records.push(stored);
        }
        Ok(ids)
    }

    // ids are not reused after a clear
    fn clear(&mut self) -> Result<(), StorageError> {
        self.records.clear();
        Ok(())
    }
}
