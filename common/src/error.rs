use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerateError {
    #[error("{0}")]
    Validation(String),
    #[error("Task not found")]
    NotFound,
    #[error("image generation failed: {0}")]
    ExternalService(String),
    #[error("image generation timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
    #[error("{0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::GenerateError;

    #[test]
    fn timeout_message_names_the_deadline() {
        let err = GenerateError::Timeout(Duration::from_millis(8000));
        assert_eq!(err.to_string(), "image generation timed out after 8000 ms");
    }
}
