//! Conversation flow of the math assistant.
//!
//! Every transition is synchronous: it updates the state, appends chat
//! messages and returns the [`Effect`]s (fetches and timers) the caller has
//! to run. Async callbacks come back tagged with the epoch and question index
//! they were issued for, and anything that no longer matches is dropped.

use rand::Rng;
use serde::Serialize;

use crate::{
    constants::messages,
    errors::ProviderError,
    models::domain::{
        message::{MessageKind, MessageLog},
        quiz_session::{AdvanceOutcome, AnswerOutcome, QuizSession, TickOutcome},
        QuizQuestion,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Welcome,
    CollectingName,
    LoadingQuiz,
    InQuiz,
    Summary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    MathProdigy,
    HardWorker,
    KeepTrying,
}

impl ScoreTier {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 90 => ScoreTier::MathProdigy,
            s if s >= 60 => ScoreTier::HardWorker,
            _ => ScoreTier::KeepTrying,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::MathProdigy => "Thần đồng Toán học! 🏆",
            ScoreTier::HardWorker => "Chiến binh chăm chỉ! 🏅",
            ScoreTier::KeepTrying => "Cần cố gắng hơn xíu nữa nha 💪",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    FetchQuiz { epoch: u64 },
    StartCountdown { epoch: u64, question_index: usize },
    StopCountdown,
    ScheduleAdvance { epoch: u64, question_index: usize },
    CancelTimers,
}

#[derive(Clone, Debug)]
pub struct MathAssistant {
    phase: Phase,
    player_name: Option<String>,
    messages: MessageLog,
    session: Option<QuizSession>,
    quiz_error: Option<String>,
    final_score: Option<u32>,
    tier: Option<ScoreTier>,
    epoch: u64,
    time_limit_secs: u32,
}

impl MathAssistant {
    pub fn new(time_limit_secs: u32) -> Self {
        let mut transcript = MessageLog::new();
        transcript.assistant(messages::INTRO_GREETING);

        Self {
            phase: Phase::Welcome,
            player_name: None,
            messages: transcript,
            session: None,
            quiz_error: None,
            final_score: None,
            tier: None,
            epoch: 0,
            time_limit_secs,
        }
    }

    pub fn start(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Welcome {
            return vec![];
        }

        self.messages.assistant(messages::ASK_NAME);
        self.phase = Phase::CollectingName;
        vec![]
    }

    pub fn submit_name(&mut self, name: &str) -> Vec<Effect> {
        let name = name.trim();
        if self.phase != Phase::CollectingName || name.is_empty() {
            return vec![];
        }

        self.player_name = Some(name.to_string());
        self.messages.user(name);
        self.messages.assistant(messages::generating_quiz(name));
        self.quiz_error = None;
        self.session = None;
        self.epoch += 1;
        self.phase = Phase::LoadingQuiz;

        vec![Effect::FetchQuiz { epoch: self.epoch }]
    }

    pub fn quiz_loaded<R: Rng + ?Sized>(
        &mut self,
        epoch: u64,
        result: Result<Vec<QuizQuestion>, ProviderError>,
        rng: &mut R,
    ) -> Vec<Effect> {
        if epoch != self.epoch || self.phase != Phase::LoadingQuiz {
            log::warn!(
                "Discarding quiz response for epoch {} (current epoch {}, phase {:?})",
                epoch,
                self.epoch,
                self.phase
            );
            return vec![];
        }

        match result.and_then(|questions| QuizSession::new(questions, self.time_limit_secs, rng)) {
            Ok(session) => {
                log::info!(
                    "Quiz ready with {} questions for epoch {}",
                    session.total_questions(),
                    epoch
                );
                self.session = Some(session);
                self.messages.assistant(messages::QUIZ_READY);
                self.phase = Phase::InQuiz;
                vec![Effect::StartCountdown {
                    epoch,
                    question_index: 0,
                }]
            }
            Err(err) => {
                log::warn!("Quiz generation failed: {}", err);
                let text = messages::quiz_failed(&err.to_string());
                self.messages
                    .assistant_with_kind(text.clone(), MessageKind::Incorrect);
                self.quiz_error = Some(text);
                self.phase = Phase::CollectingName;
                vec![]
            }
        }
    }

    pub fn submit_answer(&mut self, option: &str) -> Vec<Effect> {
        if self.phase != Phase::InQuiz {
            return vec![];
        }
        let epoch = self.epoch;
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };

        let question_index = session.current_index();
        match session.submit_answer(option) {
            AnswerOutcome::Ignored => vec![],
            AnswerOutcome::Correct { points } => {
                self.messages
                    .assistant_with_kind(messages::correct_answer(points), MessageKind::Correct);
                settle(epoch, question_index)
            }
            AnswerOutcome::Retry => {
                let hint = messages::hint(&session.current_question().hint);
                self.messages.assistant_with_kind(hint, MessageKind::Hint);
                vec![]
            }
            AnswerOutcome::Failed => {
                let question = session.current_question();
                let text = messages::incorrect_answer(&question.correct_answer, &question.explanation);
                self.messages.assistant_with_kind(text, MessageKind::Incorrect);
                settle(epoch, question_index)
            }
        }
    }

    /// One countdown second for the question the timer was started for.
    pub fn tick(&mut self, epoch: u64, question_index: usize) -> Vec<Effect> {
        if !self.is_counting_down(epoch, question_index) {
            return vec![];
        }
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };

        match session.tick() {
            TickOutcome::Paused | TickOutcome::Running { .. } => vec![],
            TickOutcome::TimedOut => {
                log::debug!("Question {} timed out", question_index + 1);
                let text = messages::times_up(&session.current_question().correct_answer);
                self.messages.assistant_with_kind(text, MessageKind::Incorrect);
                settle(epoch, question_index)
            }
        }
    }

    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        epoch: u64,
        question_index: usize,
        rng: &mut R,
    ) -> Vec<Effect> {
        if epoch != self.epoch || self.phase != Phase::InQuiz {
            return vec![];
        }
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };
        if session.current_index() != question_index {
            return vec![];
        }

        match session.advance(rng) {
            AdvanceOutcome::Ignored => vec![],
            AdvanceOutcome::NextQuestion { index } => vec![Effect::StartCountdown {
                epoch,
                question_index: index,
            }],
            AdvanceOutcome::Finished { score } => {
                let max_score = session.max_score();
                self.enter_summary(score, max_score);
                vec![Effect::CancelTimers]
            }
        }
    }

    fn enter_summary(&mut self, score: u32, max_score: u32) {
        let tier = ScoreTier::from_score(score);
        log::info!("Quiz finished with score {}/{} ({:?})", score, max_score, tier);

        let name = self.player_name.as_deref().unwrap_or_default();
        self.messages.assistant_with_kind(
            messages::summary(name, score, max_score, tier.label()),
            MessageKind::Summary,
        );
        self.final_score = Some(score);
        self.tier = Some(tier);
        self.phase = Phase::Summary;
    }

    /// Back to the greeting from any phase. Pending fetches and timers become stale.
    pub fn restart(&mut self) -> Vec<Effect> {
        log::info!("Restarting math assistant (epoch {})", self.epoch);

        self.epoch += 1;
        self.phase = Phase::Welcome;
        self.player_name = None;
        self.session = None;
        self.quiz_error = None;
        self.final_score = None;
        self.tier = None;
        self.messages.clear();
        self.messages.assistant(messages::INTRO_GREETING);

        vec![Effect::CancelTimers]
    }

    pub fn is_counting_down(&self, epoch: u64, question_index: usize) -> bool {
        epoch == self.epoch
            && self.phase == Phase::InQuiz
            && self.session.as_ref().is_some_and(|session| {
                session.current_index() == question_index && !session.awaiting_advance()
            })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn quiz_error(&self) -> Option<&str> {
        self.quiz_error.as_deref()
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn tier(&self) -> Option<ScoreTier> {
        self.tier
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

fn settle(epoch: u64, question_index: usize) -> Vec<Effect> {
    vec![
        Effect::StopCountdown,
        Effect::ScheduleAdvance {
            epoch,
            question_index,
        },
    ]
}
