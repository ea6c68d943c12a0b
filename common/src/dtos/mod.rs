mod generate;
pub use generate::*;

mod jobs;
pub use jobs::*;

mod root;
pub use root::*;

use crate::models::{JobModel, JobState};

pub trait GetSelfRoute {
    fn get_self_route(&self) -> String;
}

impl<InputType, ResultType> JobModel<InputType, ResultType> where JobModel<InputType, ResultType>: GetSelfRoute, ResultType: Clone {
    pub fn to_dto(&self) -> JobDto<ResultType> {
        let (message, result) = match &self.state {
            JobState::Pending => (None, None),
            JobState::Completed(result) => (None, Some(result.clone())),
            JobState::Failed(message) => (Some(message.clone()), None),
        };
        JobDto {
            id: self.id.clone(),
            status: self.state.status(),
            message,
            result,
            _links: JobLinks {
                _self: self.get_self_route(),
            },
        }
    }
}
