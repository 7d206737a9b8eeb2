use super::{FeedbackRequest, ValidatedFeedback, prompt, schema};
use crate::{
    Error, Result,
    config::SamplingConfig,
    llm::{ChatCompletionRequest, LlmClient},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns one student submission into validated feedback with a single model call.
pub struct FeedbackService {
    llm_client: Arc<dyn LlmClient>,
    sampling: SamplingConfig,
}

impl FeedbackService {
    pub fn new(llm_client: Arc<dyn LlmClient>, sampling: SamplingConfig) -> Self {
        Self {
            llm_client,
            sampling,
        }
    }

    pub async fn request_feedback(&self, request: &FeedbackRequest) -> Result<ValidatedFeedback> {
        // Rejects incomplete submissions before anything leaves the process.
        let prompt = prompt::build(request)?;

        debug!(
            "Built feedback prompt ({} chars) with {} knowledge components",
            prompt.user().len(),
            request.knowledge_components.len()
        );

        let completion = self
            .llm_client
            .create_chat_completion(ChatCompletionRequest {
                messages: prompt.messages(),
                max_tokens: Some(self.sampling.max_tokens),
                temperature: Some(self.sampling.temperature),
                json_response: true,
            })
            .await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Completion {} used {} prompt + {} completion tokens",
                completion.id, usage.prompt_tokens, usage.completion_tokens
            );
        }

        let content = completion
            .first_content()
            .ok_or_else(|| Error::upstream("Completion contained no message content"))?;

        let result = schema::validate(content).inspect_err(|e| {
            warn!("Model output rejected ({}): {}", e, content);
        })?;

        info!("Feedback validated with evaluation {:?}", result.evaluation());
        Ok(result)
    }
}
