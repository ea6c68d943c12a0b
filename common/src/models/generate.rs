use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::JobModel;

pub type GenerateResult = Value;
pub type GenerateJobModel = JobModel<GenerateInput, GenerateResult>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInput {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateGenerateJobModel {
    pub image_prompt: Option<Value>,
    pub callback_uri: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ImageGenerationRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub n: u8,
    pub size: &'a str,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImagesResponse {
    pub created: Option<i64>,
    pub data: Vec<ImageData>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageData {
    pub url: Option<String>,
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
}

impl ImageData {
    pub fn is_retrievable(&self) -> bool {
        self.url.is_some() || self.b64_json.is_some()
    }
}
