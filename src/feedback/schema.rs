//! The feedback contract returned by the model.
//!
//! [`FeedbackResult`] is a sum type discriminated on `evaluation`. Checking
//! borrows the parsed [`Value`], so [`validate`] can hand back the model's
//! object untouched next to the typed view, and the first violation rejects
//! the whole payload.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudyTip {
    pub topic: String,
    pub tip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Feedback {
    pub message: String,
    pub hint: String,
    pub study_tips: Vec<StudyTip>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum FeedbackResult {
    Correct,
    Incorrect(Feedback),
}

/// A payload that passed validation: the typed view plus the object exactly
/// as the model produced it. Serializes as the latter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct ValidatedFeedback {
    result: FeedbackResult,
    raw: Value,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaError {
    #[error("invalid JSON")]
    InvalidJson,

    #[error("invalid evaluation")]
    InvalidEvaluation,

    #[error("invalid feedback structure")]
    InvalidFeedbackStructure,

    #[error("feedback must be null when correct")]
    FeedbackNotNull,
}

/// Parses raw model output and checks it against the feedback contract.
pub fn validate(raw_text: &str) -> Result<ValidatedFeedback, SchemaError> {
    let value: Value = serde_json::from_str(raw_text).map_err(|_| SchemaError::InvalidJson)?;
    ValidatedFeedback::try_from(value)
}

impl FeedbackResult {
    pub fn evaluation(&self) -> Evaluation {
        match self {
            Self::Correct => Evaluation::Correct,
            Self::Incorrect(_) => Evaluation::Incorrect,
        }
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        match self {
            Self::Correct => None,
            Self::Incorrect(feedback) => Some(feedback),
        }
    }

    fn check(value: &Value) -> Result<Self, SchemaError> {
        let Value::Object(fields) = value else {
            return Err(SchemaError::InvalidEvaluation);
        };

        let evaluation = fields
            .get("evaluation")
            .and_then(|evaluation| Evaluation::deserialize(evaluation).ok())
            .ok_or(SchemaError::InvalidEvaluation)?;

        let feedback = fields.get("feedback").unwrap_or(&Value::Null);

        match evaluation {
            Evaluation::Correct if feedback.is_null() => Ok(Self::Correct),
            Evaluation::Correct => Err(SchemaError::FeedbackNotNull),
            Evaluation::Incorrect => feedback_from_value(feedback).map(Self::Incorrect),
        }
    }
}

impl TryFrom<Value> for FeedbackResult {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::check(&value)
    }
}

impl ValidatedFeedback {
    pub fn result(&self) -> &FeedbackResult {
        &self.result
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn evaluation(&self) -> Evaluation {
        self.result.evaluation()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.result.feedback()
    }

    pub fn into_result(self) -> FeedbackResult {
        self.result
    }
}

impl TryFrom<Value> for ValidatedFeedback {
    type Error = SchemaError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        let result = FeedbackResult::check(&raw)?;
        Ok(Self { result, raw })
    }
}

impl Serialize for ValidatedFeedback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

// serde would also accept positional arrays for structs; records must be objects.
fn feedback_from_value(value: &Value) -> Result<Feedback, SchemaError> {
    let well_shaped = value.as_object().is_some_and(|fields| {
        fields
            .get("study_tips")
            .and_then(Value::as_array)
            .is_some_and(|tips| tips.iter().all(Value::is_object))
    });
    if !well_shaped {
        return Err(SchemaError::InvalidFeedbackStructure);
    }

    Feedback::deserialize(value).map_err(|_| SchemaError::InvalidFeedbackStructure)
}
