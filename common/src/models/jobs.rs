use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobState<ResultType> {
    Pending,
    Completed(ResultType),
    Failed(String),
}

impl<ResultType> JobState<ResultType> {
    pub fn status(&self) -> JobStatus {
        match self {
            JobState::Pending => JobStatus::Pending,
            JobState::Completed(_) => JobStatus::Completed,
            JobState::Failed(_) => JobStatus::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobState::Pending)
    }
}

#[derive(Debug, Clone)]
pub struct JobModel<InputType, ResultType> {
    pub id: String,
    pub created: DateTime<Utc>,
    pub callback_uri: Option<String>,
    pub input: InputType,
    pub state: JobState<ResultType>,
}

impl<InputType: Clone, ResultType> JobModel<InputType, ResultType> {
    pub fn new(id: String, callback_uri: Option<String>, input: InputType) -> Self {
        JobModel {
            id,
            created: Utc::now(),
            callback_uri,
            input,
            state: JobState::Pending,
        }
    }

    /// Builds the terminal record that replaces this one in the store.
    pub fn finish(&self, state: JobState<ResultType>) -> Self {
        JobModel {
            id: self.id.clone(),
            created: self.created,
            callback_uri: self.callback_uri.clone(),
            input: self.input.clone(),
            state,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.state.status()
    }
}
