use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    constants::messages,
    models::{domain::MessageLog, dto::response::QaSnapshot},
    services::question_provider::TextCompletion,
};

#[derive(Default)]
struct QaState {
    messages: MessageLog,
    pending: usize,
    last_error: Option<String>,
}

/// Free-form maths chat backed by a text completion model.
pub struct QaService {
    completion: Arc<dyn TextCompletion>,
    state: Mutex<QaState>,
}

impl QaService {
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self {
            completion,
            state: Mutex::new(QaState::default()),
        }
    }

    /// Blank prompts are ignored. Failures become a model message.
    pub async fn ask(&self, prompt: &str) -> QaSnapshot {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return self.snapshot().await;
        }

        {
            let mut state = self.state.lock().await;
            state.messages.user(prompt);
            state.pending += 1;
            state.last_error = None;
        }

        let result = self.completion.ask(prompt).await;

        let mut state = self.state.lock().await;
        state.pending = state.pending.saturating_sub(1);
        match result {
            Ok(answer) => state.messages.model(answer),
            Err(err) => {
                log::warn!("Q&A completion failed: {}", err);
                let reason = err.to_string();
                state.messages.model(messages::qa_failed(&reason));
                state.last_error = Some(messages::qa_error_flag(&reason));
            }
        }

        snapshot_of(&state)
    }

    pub async fn clear(&self) -> QaSnapshot {
        let mut state = self.state.lock().await;
        state.messages.clear();
        state.last_error = None;
        snapshot_of(&state)
    }

    pub async fn snapshot(&self) -> QaSnapshot {
        let state = self.state.lock().await;
        snapshot_of(&state)
    }
}

fn snapshot_of(state: &QaState) -> QaSnapshot {
    QaSnapshot {
        messages: state.messages.messages().to_vec(),
        is_loading: state.pending > 0,
        last_error: state.last_error.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::ProviderError, models::domain::MessageAuthor,
        services::question_provider::MockTextCompletion,
    };

    #[tokio::test]
    async fn test_ask_appends_user_and_model_messages() {
        let mut completion = MockTextCompletion::new();
        completion
            .expect_ask()
            .withf(|prompt| prompt == "What is 7 x 8?")
            .times(1)
            .returning(|_| Ok("7 x 8 = 56".to_string()));
        let service = QaService::new(Arc::new(completion));

        let snapshot = service.ask("  What is 7 x 8?  ").await;

        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[0].author, MessageAuthor::User);
        assert_eq!(snapshot.messages[0].text, "What is 7 x 8?");
        assert_eq!(snapshot.messages[1].author, MessageAuthor::Model);
        assert_eq!(snapshot.messages[1].text, "7 x 8 = 56");
        assert!(!snapshot.is_loading);
        assert!(snapshot.last_error.is_none());
    }

    #[tokio::test]
    async fn test_blank_prompt_is_ignored() {
        let mut completion = MockTextCompletion::new();
        completion.expect_ask().never();
        let service = QaService::new(Arc::new(completion));

        let snapshot = service.ask("   ").await;

        assert!(snapshot.messages.is_empty());
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_failure_becomes_apology_and_sets_error() {
        let mut completion = MockTextCompletion::new();
        completion
            .expect_ask()
            .returning(|_| Err(ProviderError::EmptyResponse));
        let service = QaService::new(Arc::new(completion));

        let snapshot = service.ask("Why is the sky blue?").await;

        assert_eq!(snapshot.messages.len(), 2);
        let reply = &snapshot.messages[1];
        assert_eq!(reply.author, MessageAuthor::Model);
        assert!(reply.text.starts_with("Sorry, I encountered an error. Please try again."));
        assert!(reply.text.contains("empty response"));
        assert_eq!(
            snapshot.last_error.as_deref(),
            Some("Failed to get response from Gemini. Received an empty response from the model")
        );
    }

    #[tokio::test]
    async fn test_successful_ask_clears_previous_error() {
        let mut completion = MockTextCompletion::new();
        let mut calls = 0;
        completion.expect_ask().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(ProviderError::Transport("connection reset".into()))
            } else {
                Ok("Sure!".to_string())
            }
        });
        let service = QaService::new(Arc::new(completion));

        assert!(service.ask("first").await.last_error.is_some());
        let snapshot = service.ask("second").await;

        assert!(snapshot.last_error.is_none());
        assert_eq!(snapshot.messages.len(), 4);
    }

    #[tokio::test]
    async fn test_clear_empties_the_conversation() {
        let mut completion = MockTextCompletion::new();
        completion
            .expect_ask()
            .returning(|_| Ok("42".to_string()));
        let service = QaService::new(Arc::new(completion));
        service.ask("6 x 7?").await;

        let snapshot = service.clear().await;

        assert!(snapshot.messages.is_empty());
        assert!(service.snapshot().await.messages.is_empty());
    }
}
