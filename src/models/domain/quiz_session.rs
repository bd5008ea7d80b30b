use rand::Rng;
use serde::Serialize;

use crate::{errors::ProviderError, models::domain::QuizQuestion, services::shuffle::shuffle_with};

pub const FIRST_TRY_POINTS: u32 = 10;
pub const SECOND_TRY_POINTS: u32 = 5;

/// What the player picked and what was right, for highlighting the options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Input is locked until the next question.
    Ignored,
    Correct { points: u32 },
    /// First wrong answer; one more attempt is allowed.
    Retry,
    /// Second wrong answer.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Paused,
    Running { time_remaining: u32 },
    TimedOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The current question is not settled yet.
    Ignored,
    NextQuestion { index: usize },
    Finished { score: u32 },
}

/// Scoring state of one quiz run.
#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    shuffled_options: Vec<String>,
    attempts_on_current: u8,
    score: u32,
    correct_count: u32,
    incorrect_count: u32,
    selection: Selection,
    awaiting_advance: bool,
    time_remaining: u32,
    time_limit_secs: u32,
}

impl QuizSession {
    pub fn new<R: Rng + ?Sized>(
        questions: Vec<QuizQuestion>,
        time_limit_secs: u32,
        rng: &mut R,
    ) -> Result<Self, ProviderError> {
        let first = questions
            .first()
            .ok_or_else(|| ProviderError::InvalidQuiz("quiz has no questions".to_string()))?;
        let shuffled_options = shuffle_with(&first.options, rng);

        Ok(Self {
            questions,
            current_index: 0,
            shuffled_options,
            attempts_on_current: 0,
            score: 0,
            correct_count: 0,
            incorrect_count: 0,
            selection: Selection::default(),
            awaiting_advance: false,
            time_remaining: time_limit_secs,
            time_limit_secs,
        })
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current_index]
    }

    pub fn submit_answer(&mut self, option: &str) -> AnswerOutcome {
        if self.awaiting_advance {
            return AnswerOutcome::Ignored;
        }

        let question = self.current_question();
        let is_correct = question.is_correct(option);
        let correct_answer = question.correct_answer.clone();
        self.selection = Selection {
            selected_option: Some(option.to_string()),
            correct_option: Some(correct_answer),
        };

        if is_correct {
            let points = if self.attempts_on_current == 0 {
                FIRST_TRY_POINTS
            } else {
                SECOND_TRY_POINTS
            };
            self.score += points;
            self.correct_count += 1;
            self.awaiting_advance = true;
            AnswerOutcome::Correct { points }
        } else if self.attempts_on_current == 0 {
            self.incorrect_count += 1;
            self.attempts_on_current = 1;
            AnswerOutcome::Retry
        } else {
            // already counted on the first miss
            self.awaiting_advance = true;
            AnswerOutcome::Failed
        }
    }

    /// One second of the countdown. Does nothing while locked.
    pub fn tick(&mut self) -> TickOutcome {
        if self.awaiting_advance {
            return TickOutcome::Paused;
        }

        if self.time_remaining <= 1 {
            self.time_remaining = 0;
            self.expire();
            return TickOutcome::TimedOut;
        }

        self.time_remaining -= 1;
        TickOutcome::Running {
            time_remaining: self.time_remaining,
        }
    }

    /// Counts as incorrect regardless of earlier attempts on the question.
    fn expire(&mut self) {
        self.incorrect_count += 1;
        self.selection = Selection {
            selected_option: Some(String::new()),
            correct_option: Some(self.current_question().correct_answer.clone()),
        };
        self.awaiting_advance = true;
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> AdvanceOutcome {
        if !self.awaiting_advance {
            return AdvanceOutcome::Ignored;
        }

        if self.is_last_question() {
            return AdvanceOutcome::Finished { score: self.score };
        }

        self.current_index += 1;
        self.attempts_on_current = 0;
        self.selection = Selection::default();
        self.awaiting_advance = false;
        self.shuffled_options = shuffle_with(&self.questions[self.current_index].options, rng);
        self.time_remaining = self.time_limit_secs;

        AdvanceOutcome::NextQuestion {
            index: self.current_index,
        }
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn max_score(&self) -> u32 {
        self.questions.len() as u32 * FIRST_TRY_POINTS
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn shuffled_options(&self) -> &[String] {
        &self.shuffled_options
    }

    pub fn attempts_on_current(&self) -> u8 {
        self.attempts_on_current
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn awaiting_advance(&self) -> bool {
        self.awaiting_advance
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }
}
