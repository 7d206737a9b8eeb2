use crate::feedback::FeedbackRequest;
use serde::{Deserialize, Serialize};

/// Inbound body. Required fields are optional here so that a missing field
/// gets the same 400 as an empty one instead of a 422 from the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackRequestBody {
    #[serde(default)]
    pub question_stem: Option<String>,
    #[serde(default)]
    pub student_answer: Option<String>,
    #[serde(default)]
    pub knowledge_components: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<FeedbackRequestBody> for FeedbackRequest {
    fn from(body: FeedbackRequestBody) -> Self {
        Self {
            question_stem: body.question_stem.unwrap_or_default(),
            student_answer: body.student_answer.unwrap_or_default(),
            knowledge_components: body.knowledge_components.unwrap_or_default(),
        }
    }
}
