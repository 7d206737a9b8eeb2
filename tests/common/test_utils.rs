use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    response::Response,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tutor_feedback::{
    config::{Config, LlmConfig, LogsConfig, SamplingConfig, ServerConfig},
    feedback::FeedbackService,
    llm::LlmClient,
    server::{self, AppState},
};

/// Feedback the model returns for "2+2=?" answered with "5".
pub const INCORRECT_FEEDBACK: &str = r#"{"evaluation":"incorrect","feedback":{"message":"Not quite.","hint":"Try recounting.","study_tips":[{"topic":"addition","tip":"Practice single-digit sums."}]}}"#;

pub const CORRECT_FEEDBACK: &str = r#"{"evaluation":"correct","feedback":null}"#;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        llm: LlmConfig {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: "test-api-key".to_string(),
            model: "gpt-4o-mini".to_string(),
            sampling: SamplingConfig::default(),
        },
    }
}

pub fn create_test_app(llm_client: Arc<dyn LlmClient>) -> Router {
    let service = FeedbackService::new(llm_client, SamplingConfig::default());
    server::router(AppState {
        feedback: Arc::new(service),
    })
}

pub fn feedback_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(server::FEEDBACK_ROUTE)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn arithmetic_submission() -> Value {
    json!({
        "question_stem": "2+2=?",
        "student_answer": "5",
        "knowledge_components": ["arithmetic"]
    })
}

pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

/// A chat-completions envelope as an OpenAI-compatible provider returns it.
pub fn openai_completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
    })
}
