use std::time::Duration;

use serde_json::Value;
use tracing::info;

use crate::{
    error::GenerateError,
    models::{GenerateResult, ImageGenerationRequest, ImagesResponse},
    util::state::ImageApiSettings,
};

#[async_trait::async_trait]
pub trait IImageGenerationService: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerateResult, GenerateError>;
}

pub struct OpenAiImageService {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    size: String,
    timeout: Duration,
}

impl OpenAiImageService {
    pub fn build(settings: &ImageApiSettings) -> Result<Self, &'static str> {
        let client = reqwest::Client::builder().build().map_err(|_| "could not build http client")?;
        Ok(OpenAiImageService {
            client,
            endpoint: format!("{}/v1/images/generations", settings.api_uri.trim_end_matches('/')),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            size: settings.size.clone(),
            timeout: settings.timeout,
        })
    }

    async fn request(&self, prompt: &str) -> Result<GenerateResult, GenerateError> {
        let request = ImageGenerationRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: &self.size,
        };
        let response = self.client.post(&self.endpoint).bearer_auth(&self.api_key).json(&request).send().await
            .map_err(|err| GenerateError::ExternalService(format!("could not reach image API: {}", err)))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::ExternalService(format!("image API responded with {}: {}", status, api_error_message(&body))));
        }
        let body: Value = response.json().await.map_err(|_| GenerateError::ExternalService("image API returned an invalid body".to_string()))?;
        validate_images_response(&body)?;
        Ok(body)
    }
}

#[async_trait::async_trait]
impl IImageGenerationService for OpenAiImageService {
    #[tracing::instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> Result<GenerateResult, GenerateError> {
        info!("Requesting image from {}", &self.endpoint);
        // Dropping the request future on expiry closes the connection.
        match tokio::time::timeout(self.timeout, self.request(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerateError::Timeout(self.timeout)),
        }
    }
}

pub fn validate_images_response(body: &Value) -> Result<(), GenerateError> {
    let images: ImagesResponse = serde_json::from_value(body.clone())
        .map_err(|_| GenerateError::ExternalService("image API returned an unexpected body".to_string()))?;
    if images.data.is_empty() {
        return Err(GenerateError::ExternalService("image API returned no images".to_string()));
    }
    if !images.data.iter().all(|image| image.is_retrievable()) {
        return Err(GenerateError::ExternalService("image API returned an image without url".to_string()));
    }
    Ok(())
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{api_error_message, validate_images_response};
    use crate::error::GenerateError;

    #[test]
    fn accepts_response_with_image_urls() {
        let body = json!({ "created": 1700000000, "data": [{ "url": "https://img/1.png", "revised_prompt": "a fox" }] });
        assert_eq!(validate_images_response(&body), Ok(()));
    }

    #[test]
    fn accepts_base64_images() {
        let body = json!({ "data": [{ "b64_json": "aGVsbG8" }] });
        assert_eq!(validate_images_response(&body), Ok(()));
    }

    #[test]
    fn rejects_empty_or_malformed_responses() {
        assert!(matches!(validate_images_response(&json!({ "data": [] })), Err(GenerateError::ExternalService(_))));
        assert!(matches!(validate_images_response(&json!({ "images": [] })), Err(GenerateError::ExternalService(_))));
        assert!(matches!(validate_images_response(&json!({ "data": [{}] })), Err(GenerateError::ExternalService(_))));
        assert!(matches!(validate_images_response(&json!("nope")), Err(GenerateError::ExternalService(_))));
    }

    #[test]
    fn extracts_openai_error_message() {
        let body = r#"{"error":{"message":"Your request was rejected","type":"invalid_request_error"}}"#;
        assert_eq!(api_error_message(body), "Your request was rejected");
        assert_eq!(api_error_message("bad gateway"), "bad gateway");
    }
}
