use serde::{Deserialize, Serialize};

/// Number of answer choices every question must carry.
pub const OPTION_COUNT: usize = 4;

/// One multiple-choice math question.
///
/// Only built from a validated provider response, so `correct_answer` is
/// always one of `options` and there are exactly [`OPTION_COUNT`] unique
/// options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub hint: String,
    pub explanation: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }
}
