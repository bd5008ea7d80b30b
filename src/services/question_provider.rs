use async_trait::async_trait;

use crate::{errors::ProviderError, models::domain::QuizQuestion};

/// Source of freshly generated quizzes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Returns at least one validated question, in presentation order.
    async fn generate_quiz(&self) -> Result<Vec<QuizQuestion>, ProviderError>;
}

/// Free-form prompt completion for the Q&A chat.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn ask(&self, prompt: &str) -> Result<String, ProviderError>;
}
