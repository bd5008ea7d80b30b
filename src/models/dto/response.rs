use serde::Serialize;

use crate::models::domain::{
    assistant::{MathAssistant, Phase, ScoreTier},
    message::Message,
    quiz_session::{QuizSession, Selection},
};

/// Everything a chat UI needs to render the math assistant.
#[derive(Debug, Clone, Serialize)]
pub struct MathAssistantSnapshot {
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    pub messages: Vec<Message>,
    pub is_quiz_loading: bool,
    /// Accepting a name: in the name step and no fetch outstanding.
    pub can_submit_name: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<ScoreTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_label: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    pub question_number: usize,
    pub total_questions: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub selection: Selection,
    pub awaiting_advance: bool,
    pub attempts_on_current: u8,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub score: u32,
    pub time_remaining: u32,
}

impl From<&QuizSession> for QuizView {
    fn from(session: &QuizSession) -> Self {
        QuizView {
            question_number: session.current_index() + 1,
            total_questions: session.total_questions(),
            prompt: session.current_question().prompt.clone(),
            options: session.shuffled_options().to_vec(),
            selection: session.selection().clone(),
            awaiting_advance: session.awaiting_advance(),
            attempts_on_current: session.attempts_on_current(),
            correct_count: session.correct_count(),
            incorrect_count: session.incorrect_count(),
            score: session.score(),
            time_remaining: session.time_remaining(),
        }
    }
}

impl From<&MathAssistant> for MathAssistantSnapshot {
    fn from(assistant: &MathAssistant) -> Self {
        let phase = assistant.phase();
        let quiz = match phase {
            Phase::InQuiz => assistant.session().map(QuizView::from),
            _ => None,
        };

        MathAssistantSnapshot {
            phase,
            player_name: assistant.player_name().map(str::to_string),
            messages: assistant.messages().messages().to_vec(),
            is_quiz_loading: phase == Phase::LoadingQuiz,
            can_submit_name: phase == Phase::CollectingName,
            quiz_error: assistant.quiz_error().map(str::to_string),
            quiz,
            final_score: assistant.final_score(),
            tier: assistant.tier(),
            tier_label: assistant.tier().map(|tier| tier.label()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QaSnapshot {
    pub messages: Vec<Message>,
    pub is_loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::sample_questions;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_snapshot_of_fresh_assistant_has_no_quiz() {
        let assistant = MathAssistant::new(120);

        let snapshot = MathAssistantSnapshot::from(&assistant);

        assert_eq!(snapshot.phase, Phase::Welcome);
        assert_eq!(snapshot.messages.len(), 1);
        assert!(snapshot.quiz.is_none());
        assert!(!snapshot.can_submit_name);
    }

    #[test]
    fn test_snapshot_in_quiz_exposes_question_view() {
        let mut assistant = MathAssistant::new(120);
        let mut rng = StdRng::seed_from_u64(3);
        assistant.start();
        assistant.submit_name("Minh");
        assistant.quiz_loaded(1, Ok(sample_questions(4)), &mut rng);

        let snapshot = MathAssistantSnapshot::from(&assistant);
        let quiz = snapshot.quiz.expect("quiz view should be present");

        assert_eq!(quiz.question_number, 1);
        assert_eq!(quiz.total_questions, 4);
        assert_eq!(quiz.options.len(), 4);
        assert_eq!(quiz.time_remaining, 120);
        assert!(!quiz.awaiting_advance);
    }

    #[test]
    fn test_snapshot_serializes_phase_in_snake_case() {
        let mut assistant = MathAssistant::new(120);
        assistant.start();

        let json = serde_json::to_value(MathAssistantSnapshot::from(&assistant))
            .expect("snapshot should serialize");

        assert_eq!(json["phase"], "collecting_name");
        assert_eq!(json["can_submit_name"], true);
        assert!(json.get("quiz").is_none());
    }
}
