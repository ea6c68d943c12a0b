use serde::{Deserialize, Serialize};

use crate::models::{GenerateJobModel, GenerateResult, JobState};
use crate::util::routes::generate_job_route;

use super::{GetSelfRoute, JobDto};

pub type GenerateJobDto = JobDto<GenerateResult>;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreatedDto {
    pub task_id: String,
}

/// Polling view of a job. A failed job carries its error message in `result`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "status", content = "result", rename_all = "lowercase")]
pub enum TaskStatusDto {
    Pending,
    Completed(GenerateResult),
    Failed(String),
}

impl GetSelfRoute for GenerateJobModel {
    fn get_self_route(&self) -> String {
        generate_job_route(&self.id)
    }
}

impl GenerateJobModel {
    pub fn to_status_dto(&self) -> TaskStatusDto {
        match &self.state {
            JobState::Pending => TaskStatusDto::Pending,
            JobState::Completed(result) => TaskStatusDto::Completed(result.clone()),
            JobState::Failed(message) => TaskStatusDto::Failed(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::models::{GenerateInput, GenerateJobModel, JobState};

    fn job() -> GenerateJobModel {
        GenerateJobModel::new("abc".to_string(), None, GenerateInput { prompt: "a red fox".to_string() })
    }

    #[test]
    fn pending_status_has_no_result_field() {
        let value = serde_json::to_value(job().to_status_dto()).unwrap();
        assert_eq!(value, json!({ "status": "pending" }));
    }

    #[test]
    fn completed_status_carries_payload() {
        let payload = json!({ "created": 1, "data": [{ "url": "https://img/1.png" }] });
        let job = job().finish(JobState::Completed(payload.clone()));
        let value = serde_json::to_value(job.to_status_dto()).unwrap();
        assert_eq!(value, json!({ "status": "completed", "result": payload }));
    }

    #[test]
    fn failed_status_carries_message_in_result() {
        let job = job().finish(JobState::Failed("image generation timed out after 10 ms".to_string()));
        let value = serde_json::to_value(job.to_status_dto()).unwrap();
        assert_eq!(value, json!({ "status": "failed", "result": "image generation timed out after 10 ms" }));
    }

    #[test]
    fn job_dto_links_to_itself() {
        let job = job().finish(JobState::Failed("boom".to_string()));
        let value = serde_json::to_value(job.to_dto()).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["status"], "failed");
        assert_eq!(value["message"], "boom");
        assert_eq!(value["result"], serde_json::Value::Null);
        assert_eq!(value["_links"]["self"], "/generate/abc");
    }
}
