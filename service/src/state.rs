use std::sync::Arc;

use common::{
    generate::GenerateService,
    persistence::IJobPersistence,
    util::state::{GenerateBaseServiceCollection, GenerateSettings},
};

pub type Services = Arc<ServiceCollection>;

pub struct ServiceCollection {
    pub job_persistence: Arc<dyn IJobPersistence>,
    pub generate_service: Arc<GenerateService>,
}

impl ServiceCollection {
    pub fn build(settings: &GenerateSettings) -> Result<Arc<Self>, &'static str> {
        let base = GenerateBaseServiceCollection::build(settings)?;
        Ok(Arc::new(ServiceCollection {
            job_persistence: base.job_persistence.clone(),
            generate_service: base.generate_service.clone(),
        }))
    }
}
