use async_trait::async_trait;

use super::domain::StudentRecord;
use crate::errors::ServiceError;

/// Storage abstraction for the roster.
///
/// Implementations keep insertion order and must perform each mutation,
/// including its existence/uniqueness check, as one atomic step.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Snapshot of all records in collection order.
    async fn list(&self) -> Vec<StudentRecord>;
    async fn find(&self, name: &str) -> Option<StudentRecord>;
    /// Append; `Conflict` if the name is taken.
    async fn insert(&self, record: StudentRecord) -> Result<StudentRecord, ServiceError>;
    /// Overwrite the slot holding `name` in place.
    async fn replace(&self, name: &str, record: StudentRecord) -> Result<StudentRecord, ServiceError>;
    async fn remove(&self, name: &str) -> Result<StudentRecord, ServiceError>;
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
