use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::dtos::{ErrorDto, GenerateJobDto, TaskCreatedDto, TaskStatusDto};
use common::error::GenerateError;
use common::models::CreateGenerateJobModel;
use common::util::consts::TASK_NOT_FOUND;
use tracing::{error, info};

use crate::state::Services;

const INTERNAL_ERROR: &str = "Failed to generate image due to internal server error";

type ErrorResponse = (StatusCode, Json<ErrorDto>);

pub fn create_route(services: Services) -> Router {
    Router::new()
        .route("/generate", get(poll_generate_job).post(create_generate_job))
        .route("/generate/:task_id", get(generate_job))
        .with_state(services)
}

#[tracing::instrument(skip(params, services))]
pub async fn poll_generate_job(State(services): State<Services>, Query(params): Query<HashMap<String, String>>) -> Result<Json<TaskStatusDto>, ErrorResponse> {
    let Some(task_id) = params.get("taskId") else {
        return Err(error_response(GenerateError::Validation("Missing taskId".to_string())));
    };
    match services.generate_service.get_generate_job(task_id).await {
        Ok(job) => Ok(Json(job.to_status_dto())),
        Err(err) => Err(error_response(err)),
    }
}

#[tracing::instrument(skip(services))]
pub async fn generate_job(State(services): State<Services>, Path(task_id): Path<String>) -> Result<Json<GenerateJobDto>, ErrorResponse> {
    match services.generate_service.get_generate_job(&task_id).await {
        Ok(job) => Ok(Json(job.to_dto())),
        Err(err) => Err(error_response(err)),
    }
}

#[tracing::instrument(skip(services, create_job))]
pub async fn create_generate_job(State(services): State<Services>, create_job: Result<Json<CreateGenerateJobModel>, JsonRejection>) -> Result<(StatusCode, Json<TaskCreatedDto>), ErrorResponse> {
    let Json(create_job) = match create_job {
        Ok(create_job) => create_job,
        Err(rejection) => {
            info!("Rejected generate request: {}", rejection);
            return Err(error_response(GenerateError::Validation("Request body must be a json object".to_string())));
        }
    };
    match services.generate_service.create_new_generate_job(create_job).await {
        Ok(job_model) => {
            let task_id = job_model.id.clone();
            let generate_service = services.generate_service.clone();
            tokio::spawn(async move { generate_service.process_generate_job(job_model).await });
            Ok((StatusCode::ACCEPTED, Json(TaskCreatedDto { task_id })))
        }
        Err(err) => Err(error_response(err)),
    }
}

fn error_response(err: GenerateError) -> ErrorResponse {
    match err {
        GenerateError::Validation(message) => (StatusCode::BAD_REQUEST, Json(ErrorDto::new(message))),
        GenerateError::NotFound => (StatusCode::NOT_FOUND, Json(ErrorDto::new(TASK_NOT_FOUND))),
        err => {
            error!("Error generating image: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDto::new(INTERNAL_ERROR)))
        }
    }
}
