pub mod prompt;
pub mod schema;
mod service;

pub use prompt::{FeedbackRequest, PromptPayload, build};
pub use schema::{
    Evaluation, Feedback, FeedbackResult, SchemaError, StudyTip, ValidatedFeedback, validate,
};
pub use service::FeedbackService;
