use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{DerivedScore, RosterStatistics, StudentInput, StudentRecord};
use super::repository::RosterRepository;
use super::scoring;
use crate::errors::ServiceError;

/// Roster business operations, independent of the web framework.
pub struct RosterService<R: RosterRepository> {
    repo: Arc<R>,
}

impl<R: RosterRepository> RosterService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Every record with its derived total and average, in roster order.
    pub async fn list(&self) -> Vec<DerivedScore> {
        self.repo.list().await.iter().map(scoring::derive).collect()
    }

    pub async fn get(&self, name: &str) -> Result<DerivedScore, ServiceError> {
        self.repo
            .find(name)
            .await
            .map(|r| scoring::derive(&r))
            .ok_or_else(|| ServiceError::not_found(name))
    }

    /// Validate and append a new student.
    ///
    /// # Examples
    /// ```
    /// use service::roster::{RosterService, RosterStore, StudentInput};
    /// use std::sync::Arc;
    /// let svc = RosterService::new(Arc::new(RosterStore::default()));
    /// let input = StudentInput { name: "테스트".into(), korean: 100, english: 100, math: 100, science: 100 };
    /// let created = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(created.total, 400);
    /// assert_eq!(created.average, 100.0);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: StudentInput) -> Result<DerivedScore, ServiceError> {
        let record = input.into_record()?;
        let stored = self.repo.insert(record).await?;
        info!(total = stored.total(), "student_created");
        Ok(scoring::derive(&stored))
    }

    /// Replace the record stored under `name`, which may rename it.
    #[instrument(skip(self, input), fields(new_name = %input.name))]
    pub async fn update(&self, name: &str, input: StudentInput) -> Result<DerivedScore, ServiceError> {
        let record = input.into_record()?;
        let stored = self.repo.replace(name, record).await?;
        if stored.name != name {
            debug!(old = %name, new = %stored.name, "student renamed");
        }
        info!(total = stored.total(), "student_updated");
        Ok(scoring::derive(&stored))
    }

    /// Remove a student and hand back its raw fields.
    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<StudentRecord, ServiceError> {
        let removed = self.repo.remove(name).await?;
        info!("student_deleted");
        Ok(removed)
    }

    pub async fn statistics(&self) -> Result<RosterStatistics, ServiceError> {
        let records = self.repo.list().await;
        scoring::statistics(&records).ok_or(ServiceError::EmptyRoster)
    }

    pub async fn len(&self) -> usize {
        self.repo.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.repo.is_empty().await
    }
}
