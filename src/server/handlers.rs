use super::types::{ErrorResponse, FeedbackRequestBody};
use crate::{
    Error,
    feedback::{FeedbackRequest, FeedbackService, SchemaError, ValidatedFeedback},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const UPSTREAM_FAILURE: &str = "Upstream model request failed";
pub const INTERNAL_FAILURE: &str = "Internal Server Error";

#[derive(Clone)]
pub struct AppState {
    pub feedback: Arc<FeedbackService>,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

pub async fn feedback(
    State(state): State<AppState>,
    body: Result<Json<FeedbackRequestBody>, JsonRejection>,
) -> Result<Json<ValidatedFeedback>, ErrorReply> {
    // Keeps the extractor's status (400 syntax, 415 content type, 422 shape)
    // but answers in the same `{error}` body as every other failure.
    let Json(body) = body.map_err(|rejection| {
        warn!("Rejected malformed feedback request: {}", rejection);
        error_reply(rejection.status(), rejection.body_text())
    })?;

    let request = FeedbackRequest::from(body);
    info!(
        "Received feedback request ({} knowledge components)",
        request.knowledge_components.len()
    );

    match state.feedback.request_feedback(&request).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => Err(error_response(e)),
    }
}

/// Maps a failure to its HTTP status and the message shown to the caller.
pub fn error_response(err: Error) -> ErrorReply {
    match err {
        Error::Validation(msg) => error_reply(StatusCode::BAD_REQUEST, msg),
        Error::Schema(SchemaError::InvalidJson) => {
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, SchemaError::InvalidJson.to_string())
        }
        Error::Schema(schema_error) => {
            error_reply(StatusCode::BAD_REQUEST, schema_error.to_string())
        }
        e if e.is_upstream() => {
            error!("Error calling LLM API: {}", e);
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE)
        }
        e => {
            error!("Failed to produce feedback: {}", e);
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_FAILURE)
        }
    }
}

fn error_reply(status: StatusCode, error: impl Into<String>) -> ErrorReply {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}
