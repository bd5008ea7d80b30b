use serde::Deserialize;
use validator::Validate;

/// Blank names are accepted here and ignored by the assistant.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitNameRequest {
    #[validate(length(max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 500))]
    pub option: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(length(max = 8000))]
    pub prompt: String,
}
