//! Plain-text rendering of the feedback pane.
//!
//! The pane shows one of three request states. On success it shows the
//! verdict and, for an incorrect answer, the explanation, hint and study tips.
//! Empty sections are left out.

use crate::feedback::FeedbackResult;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackStatus {
    Loading,
    Error,
    /// Nothing requested yet, or a success without a payload.
    Empty,
    Success(FeedbackResult),
}

impl From<Option<FeedbackResult>> for FeedbackStatus {
    fn from(result: Option<FeedbackResult>) -> Self {
        result.map_or(Self::Empty, Self::Success)
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "⏳ Loading feedback..."),
            Self::Error => write!(f, "❌ Error loading feedback. Please try again."),
            Self::Empty => write!(f, "No feedback available."),
            Self::Success(FeedbackResult::Correct) => write!(f, "✅ Correct"),
            Self::Success(FeedbackResult::Incorrect(feedback)) => {
                write!(f, "❌ Incorrect")?;
                if !feedback.message.is_empty() {
                    write!(f, "\n💡 Explanation: {}", feedback.message)?;
                }
                if !feedback.hint.is_empty() {
                    write!(f, "\n📝 Hint: {}", feedback.hint)?;
                }
                if !feedback.study_tips.is_empty() {
                    write!(f, "\n📚 Study Tips:")?;
                    for tip in &feedback.study_tips {
                        write!(f, "\n  - {}: {}", tip.topic, tip.tip)?;
                    }
                }
                Ok(())
            }
        }
    }
}

pub fn render(status: &FeedbackStatus) -> String {
    status.to_string()
}
