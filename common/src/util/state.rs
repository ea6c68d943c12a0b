use std::{sync::Arc, time::Duration};

use crate::{
    generate::GenerateService,
    images::{IImageGenerationService, OpenAiImageService},
    persistence::{IJobPersistence, MemoryJobPersistence},
};

pub struct ImageApiSettings {
    pub api_uri: String,
    pub api_key: String,
    pub model: String,
    pub size: String,
    pub timeout: Duration,
}

pub struct JobStoreSettings {
    pub max_age: Duration,
    pub max_jobs: usize,
}

pub struct GenerateSettings {
    pub image_api: ImageApiSettings,
    pub job_store: JobStoreSettings,
    pub max_prompt_length: usize,
    pub callback_timeout: Duration,
}

pub struct GenerateBaseServiceCollection {
    pub job_persistence: Arc<dyn IJobPersistence>,
    pub generate_service: Arc<GenerateService>,
}

impl GenerateBaseServiceCollection {
    pub fn build(settings: &GenerateSettings) -> Result<Self, &'static str> {
        let image_service = Arc::new(OpenAiImageService::build(&settings.image_api)?);
        Self::build_with_image_service(settings, image_service)
    }

    pub fn build_with_image_service(settings: &GenerateSettings, image_service: Arc<dyn IImageGenerationService>) -> Result<Self, &'static str> {
        let job_persistence: Arc<dyn IJobPersistence> = Arc::new(MemoryJobPersistence::new(settings.job_store.max_age, settings.job_store.max_jobs));
        let callback_client = reqwest::Client::builder().timeout(settings.callback_timeout).build().map_err(|_| "could not build http client")?;
        let generate_service = Arc::new(GenerateService {
            job_persistence: job_persistence.clone(),
            image_service,
            callback_client,
            max_prompt_length: settings.max_prompt_length,
        });
        Ok(GenerateBaseServiceCollection {
            job_persistence,
            generate_service,
        })
    }
}
