use std::{panic::AssertUnwindSafe, sync::Arc, time::Duration};

use futures::FutureExt;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    error::GenerateError,
    images::IImageGenerationService,
    models::{CreateGenerateJobModel, GenerateInput, GenerateJobModel, JobState},
    persistence::IJobPersistence,
    util::{consts::CALLBACK_RETRIES, random::generate_30_alphanumeric},
};

const MISSING_PROMPT: &str = "Missing required fields";
const ID_ATTEMPTS: usize = 3;

pub struct GenerateService {
    pub job_persistence: Arc<dyn IJobPersistence>,
    pub image_service: Arc<dyn IImageGenerationService>,
    pub callback_client: reqwest::Client,
    pub max_prompt_length: usize,
}

impl GenerateService {
    /// Validates the request and stores a pending job. The job is readable once this returns.
    pub async fn create_new_generate_job(&self, create_job: CreateGenerateJobModel) -> Result<GenerateJobModel, GenerateError> {
        let prompt = self.validate_prompt(create_job.image_prompt)?;
        let callback_uri = validate_callback_uri(create_job.callback_uri)?;
        let input = GenerateInput { prompt };

        for _ in 0..ID_ATTEMPTS {
            let job = GenerateJobModel::new(generate_30_alphanumeric(), callback_uri.clone(), input.clone());
            match self.job_persistence.insert(job.clone()).await {
                Ok(()) => return Ok(job),
                Err("job id already exists") => continue,
                Err(err) => return Err(GenerateError::Internal(err.to_string())),
            }
        }
        Err(GenerateError::Internal("could not allocate job id".to_string()))
    }

    pub async fn get_generate_job(&self, job_id: &str) -> Result<Arc<GenerateJobModel>, GenerateError> {
        match self.job_persistence.get(job_id).await {
            Ok(Some(job)) => Ok(job),
            Ok(None) => Err(GenerateError::NotFound),
            Err(err) => Err(GenerateError::Internal(err.to_string())),
        }
    }

    /// Runs the external call and records exactly one terminal state. Never fails.
    #[tracing::instrument(skip(self, job), fields(job_id = %job.id))]
    pub async fn process_generate_job(&self, job: GenerateJobModel) {
        info!("Starting job");
        let outcome = AssertUnwindSafe(self.image_service.generate(&job.input.prompt)).catch_unwind().await;
        let state = match outcome {
            Ok(Ok(result)) => JobState::Completed(result),
            Ok(Err(err)) => JobState::Failed(err.to_string()),
            Err(_) => {
                error!("Image generation panicked");
                JobState::Failed("image generation failed unexpectedly".to_string())
            }
        };
        match &state {
            JobState::Failed(message) => info!("Finished job with error {}", message),
            _ => info!("Finished job"),
        }
        let finished = job.finish(state);
        if let Err(err) = self.job_persistence.put(finished.clone()).await {
            warn!("Could not store result of job: {}", err);
            return;
        }
        self.callback(&finished).await
    }

    fn validate_prompt(&self, image_prompt: Option<Value>) -> Result<String, GenerateError> {
        let prompt = match image_prompt {
            Some(Value::String(prompt)) => prompt,
            Some(Value::Null) | None => return Err(GenerateError::Validation(MISSING_PROMPT.to_string())),
            Some(_) => return Err(GenerateError::Validation("imagePrompt must be a string".to_string())),
        };
        if prompt.trim().is_empty() {
            return Err(GenerateError::Validation(MISSING_PROMPT.to_string()));
        }
        if prompt.chars().count() > self.max_prompt_length {
            return Err(GenerateError::Validation(format!("imagePrompt must not exceed {} characters", self.max_prompt_length)));
        }
        Ok(prompt)
    }

    async fn callback(&self, job: &GenerateJobModel) {
        if let Some(callback_uri) = &job.callback_uri {
            let dto = job.to_dto();
            let mut retries = 0;
            loop {
                let result = self.callback_client.post(callback_uri).json(&dto).send().await;
                match result {
                    Ok(ok) => {
                        info!("Send callback '{}' to '{}', with {}", &job.id, callback_uri, ok.status());
                        break;
                    }
                    Err(err) => {
                        retries += 1;
                        info!("Error sending {} time callback '{}' to '{}', because of {}", retries, &job.id, callback_uri, err);
                        if retries >= CALLBACK_RETRIES {
                            break;
                        }
                        tokio::time::sleep(Duration::from_millis(200 * retries as u64)).await;
                    }
                }
            }
        }
    }
}

fn validate_callback_uri(callback_uri: Option<String>) -> Result<Option<String>, GenerateError> {
    match callback_uri {
        None => Ok(None),
        Some(uri) => match reqwest::Url::parse(&uri) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(Some(uri)),
            _ => Err(GenerateError::Validation("callbackUri must be an http(s) url".to_string())),
        },
    }
}
