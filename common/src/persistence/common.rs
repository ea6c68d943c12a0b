use std::sync::Arc;

use crate::models::GenerateJobModel;

#[async_trait::async_trait]
pub trait IJobPersistence: Send + Sync {
    async fn get(&self, job_id: &str) -> Result<Option<Arc<GenerateJobModel>>, &'static str>;
    /// Stores a new pending job. Fails if the id is already taken.
    async fn insert(&self, job: GenerateJobModel) -> Result<(), &'static str>;
    /// Replaces the record of an existing job as a whole. Terminal records are never replaced.
    async fn put(&self, job: GenerateJobModel) -> Result<(), &'static str>;
    async fn len(&self) -> usize;
    async fn remove_expired(&self) -> usize;
}
