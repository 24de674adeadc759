use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::domain::StudentRecord;
use super::repository::RosterRepository;
use super::seed::seed_records;
use crate::errors::ServiceError;

/// In-memory roster guarded by a single lock.
///
/// Reads share the lock; every mutation holds the write lock for its whole
/// lookup-then-modify step. Contents are lost when the process exits.
#[derive(Clone, Default)]
pub struct RosterStore {
    inner: Arc<RwLock<Vec<StudentRecord>>>,
}

impl RosterStore {
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self { inner: Arc::new(RwLock::new(records)) }
    }

    /// Store pre-loaded with the ten seed students.
    pub fn seeded() -> Self {
        Self::new(seed_records())
    }
}

fn position(records: &[StudentRecord], name: &str) -> Option<usize> {
    records.iter().position(|r| r.name == name)
}

#[async_trait]
impl RosterRepository for RosterStore {
    async fn list(&self) -> Vec<StudentRecord> {
        self.inner.read().await.clone()
    }

    async fn find(&self, name: &str) -> Option<StudentRecord> {
        let records = self.inner.read().await;
        records.iter().find(|r| r.name == name).cloned()
    }

    async fn insert(&self, record: StudentRecord) -> Result<StudentRecord, ServiceError> {
        let mut records = self.inner.write().await;
        if position(&records, &record.name).is_some() {
            return Err(ServiceError::conflict(&record.name));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn replace(&self, name: &str, record: StudentRecord) -> Result<StudentRecord, ServiceError> {
        let mut records = self.inner.write().await;
        let idx = position(&records, name).ok_or_else(|| ServiceError::not_found(name))?;
        // renaming onto another student's name would break uniqueness
        if record.name != name && position(&records, &record.name).is_some() {
            return Err(ServiceError::conflict(&record.name));
        }
        records[idx] = record.clone();
        Ok(record)
    }

    async fn remove(&self, name: &str) -> Result<StudentRecord, ServiceError> {
        let mut records = self.inner.write().await;
        let idx = position(&records, name).ok_or_else(|| ServiceError::not_found(name))?;
        Ok(records.remove(idx))
    }

    async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
