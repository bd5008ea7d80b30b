use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::errors::ProviderError;
use crate::models::domain::quiz_question::{QuizQuestion, OPTION_COUNT};

static CODE_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*(.*?)\s*```\s*$")
        .expect("CODE_FENCE_REGEX is a valid regex pattern")
});

/// One question as the model emits it. Field names follow the JSON the
/// generation prompt asks for.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_answer_choices"))]
pub struct GeneratedQuestionDto {
    #[validate(length(min = 1))]
    pub question: String,

    #[validate(length(equal = 4))]
    pub options: Vec<String>,

    #[validate(length(min = 1))]
    pub correct_answer: String,

    pub hint: String,

    pub explanation: String,
}

fn validate_answer_choices(dto: &GeneratedQuestionDto) -> Result<(), ValidationError> {
    let unique: HashSet<&str> = dto.options.iter().map(String::as_str).collect();
    if unique.len() != dto.options.len() {
        let mut err = ValidationError::new("duplicate_options");
        err.message = Some("options must be unique".into());
        return Err(err);
    }

    if !dto.options.iter().any(|option| option == &dto.correct_answer) {
        let mut err = ValidationError::new("correct_answer_not_in_options");
        err.message = Some("correctAnswer must match one of the options".into());
        return Err(err);
    }

    Ok(())
}

impl TryFrom<GeneratedQuestionDto> for QuizQuestion {
    type Error = ProviderError;

    fn try_from(dto: GeneratedQuestionDto) -> Result<Self, Self::Error> {
        dto.validate()?;
        debug_assert_eq!(dto.options.len(), OPTION_COUNT);

        Ok(QuizQuestion {
            prompt: dto.question,
            options: dto.options,
            correct_answer: dto.correct_answer,
            hint: dto.hint,
            explanation: dto.explanation,
        })
    }
}

/// JSON schema of the quiz array, sent as the structured-output contract.
pub fn quiz_response_schema() -> Result<serde_json::Value, ProviderError> {
    let mut schema = serde_json::to_value(schemars::schema_for!(Vec<GeneratedQuestionDto>))?;
    if let Some(root) = schema.as_object_mut() {
        root.remove("$schema");
        root.remove("title");
    }
    Ok(schema)
}

fn strip_code_fence(text: &str) -> &str {
    match CODE_FENCE_REGEX.captures(text).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str(),
        None => text.trim(),
    }
}

/// Parses and validates the model's quiz text. Any broken question rejects the whole quiz.
pub fn parse_generated_quiz(text: &str) -> Result<Vec<QuizQuestion>, ProviderError> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fence(text))?;

    let serde_json::Value::Array(items) = value else {
        return Err(ProviderError::InvalidQuiz(
            "expected a JSON array of questions".to_string(),
        ));
    };
    if items.is_empty() {
        return Err(ProviderError::InvalidQuiz("quiz has no questions".to_string()));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let dto: GeneratedQuestionDto = serde_json::from_value(item)?;
            QuizQuestion::try_from(dto).map_err(|err| match err {
                ProviderError::InvalidQuiz(reason) => {
                    ProviderError::InvalidQuiz(format!("question {}: {}", index + 1, reason))
                }
                other => other,
            })
        })
        .collect()
}
