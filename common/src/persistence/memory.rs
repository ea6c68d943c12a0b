use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::info;

use crate::models::GenerateJobModel;

use super::IJobPersistence;

pub struct MemoryJobPersistence {
    jobs: RwLock<HashMap<String, Arc<GenerateJobModel>>>,
    max_age: Duration,
    max_jobs: usize,
}

impl MemoryJobPersistence {
    pub fn new(max_age: Duration, max_jobs: usize) -> Self {
        MemoryJobPersistence {
            jobs: RwLock::new(HashMap::new()),
            max_age,
            max_jobs,
        }
    }

    fn is_expired(&self, job: &GenerateJobModel) -> bool {
        (Utc::now() - job.created).to_std().map(|age| age > self.max_age).unwrap_or(false)
    }

    fn make_room(&self, jobs: &mut HashMap<String, Arc<GenerateJobModel>>) -> Result<(), &'static str> {
        if jobs.len() < self.max_jobs {
            return Ok(());
        }
        jobs.retain(|_, job| !self.is_expired(job));
        if jobs.len() < self.max_jobs {
            return Ok(());
        }
        let oldest_finished = jobs
            .values()
            .filter(|job| job.state.is_terminal())
            .min_by_key(|job| job.created)
            .map(|job| job.id.clone());
        match oldest_finished {
            Some(job_id) => {
                info!("Evicting job {} to make room", &job_id);
                jobs.remove(&job_id);
                Ok(())
            }
            None => Err("job store is full"),
        }
    }
}

#[async_trait::async_trait]
impl IJobPersistence for MemoryJobPersistence {
    async fn get(&self, job_id: &str) -> Result<Option<Arc<GenerateJobModel>>, &'static str> {
        let jobs = self.jobs.read().await;
        Ok(jobs.get(job_id).filter(|job| !self.is_expired(job)).cloned())
    }

    async fn insert(&self, job: GenerateJobModel) -> Result<(), &'static str> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err("job id already exists");
        }
        self.make_room(&mut jobs)?;
        jobs.insert(job.id.clone(), Arc::new(job));
        Ok(())
    }

    async fn put(&self, job: GenerateJobModel) -> Result<(), &'static str> {
        let mut jobs = self.jobs.write().await;
        match jobs.get(&job.id) {
            None => Err("job not found"),
            Some(existing) if existing.state.is_terminal() => Err("job already finished"),
            Some(_) => {
                jobs.insert(job.id.clone(), Arc::new(job));
                Ok(())
            }
        }
    }

    async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    async fn remove_expired(&self) -> usize {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, job| !self.is_expired(job));
        before - jobs.len()
    }
}

pub fn spawn_expiry_sweeper(job_persistence: Arc<dyn IJobPersistence>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let removed = job_persistence.remove_expired().await;
            if removed > 0 {
                info!("Removed {} expired jobs", removed);
            }
        }
    })
}
