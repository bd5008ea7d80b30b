use std::sync::{Arc, Weak};
use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use tokio::{sync::Mutex, task::JoinHandle, time::Instant};

use crate::{
    config::QuizTiming,
    models::{
        domain::{Effect, MathAssistant},
        dto::response::MathAssistantSnapshot,
    },
    services::question_provider::QuestionProvider,
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// The two scheduled callbacks a quiz can have alive at once.
#[derive(Default)]
struct SessionTimers {
    countdown: Option<JoinHandle<()>>,
    advance: Option<JoinHandle<()>>,
}

impl SessionTimers {
    fn replace_countdown(&mut self, handle: JoinHandle<()>) {
        self.abort_countdown();
        self.countdown = Some(handle);
    }

    fn replace_advance(&mut self, handle: JoinHandle<()>) {
        self.abort_advance();
        self.advance = Some(handle);
    }

    fn abort_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }

    fn abort_advance(&mut self) {
        if let Some(handle) = self.advance.take() {
            handle.abort();
        }
    }

    fn abort_all(&mut self) {
        self.abort_countdown();
        self.abort_advance();
    }
}

impl Drop for SessionTimers {
    fn drop(&mut self) {
        self.abort_all();
    }
}

struct Inner {
    assistant: MathAssistant,
    rng: StdRng,
    timers: SessionTimers,
}

/// Runs [`Effect`]s. Spawned tasks only hold a weak reference to the state,
/// so dropping the service tears everything down.
#[derive(Clone)]
struct EffectRunner {
    inner: Weak<Mutex<Inner>>,
    provider: Arc<dyn QuestionProvider>,
    timing: QuizTiming,
}

impl EffectRunner {
    fn apply(&self, state: &mut Inner, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchQuiz { epoch } => self.spawn_fetch(epoch),
                Effect::StartCountdown {
                    epoch,
                    question_index,
                } => {
                    log::debug!("Starting countdown for question {}", question_index + 1);
                    let handle = self.spawn_countdown(epoch, question_index);
                    state.timers.replace_countdown(handle);
                }
                Effect::StopCountdown => state.timers.abort_countdown(),
                Effect::ScheduleAdvance {
                    epoch,
                    question_index,
                } => {
                    log::debug!(
                        "Advancing past question {} in {:?}",
                        question_index + 1,
                        self.timing.advance_delay
                    );
                    let handle = self.spawn_advance(epoch, question_index);
                    state.timers.replace_advance(handle);
                }
                Effect::CancelTimers => {
                    log::debug!("Cancelling quiz timers");
                    state.timers.abort_all();
                }
            }
        }
    }

    fn spawn_fetch(&self, epoch: u64) {
        let runner = self.clone();
        tokio::spawn(async move {
            let result = runner.provider.generate_quiz().await;

            let Some(shared) = runner.inner.upgrade() else {
                return;
            };
            let mut guard = shared.lock().await;
            let state = &mut *guard;
            let effects = state.assistant.quiz_loaded(epoch, result, &mut state.rng);
            runner.apply(state, effects);
        });
    }

    fn spawn_countdown(&self, epoch: u64, question_index: usize) -> JoinHandle<()> {
        let runner = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
            loop {
                ticker.tick().await;

                let Some(shared) = runner.inner.upgrade() else {
                    break;
                };
                let mut guard = shared.lock().await;
                let state = &mut *guard;
                let effects = state.assistant.tick(epoch, question_index);
                runner.apply(state, effects);

                if !state.assistant.is_counting_down(epoch, question_index) {
                    break;
                }
            }
        })
    }

    fn spawn_advance(&self, epoch: u64, question_index: usize) -> JoinHandle<()> {
        let runner = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(runner.timing.advance_delay).await;

            let Some(shared) = runner.inner.upgrade() else {
                return;
            };
            let mut guard = shared.lock().await;
            let state = &mut *guard;
            let effects = state
                .assistant
                .advance(epoch, question_index, &mut state.rng);
            runner.apply(state, effects);
        })
    }
}

/// Owns the single math-assistant conversation of this process.
#[derive(Clone)]
pub struct MathAssistantService {
    inner: Arc<Mutex<Inner>>,
    runner: EffectRunner,
}

impl MathAssistantService {
    pub fn new(provider: Arc<dyn QuestionProvider>, timing: QuizTiming) -> Self {
        Self::with_rng(provider, timing, StdRng::from_entropy())
    }

    pub fn with_rng(provider: Arc<dyn QuestionProvider>, timing: QuizTiming, rng: StdRng) -> Self {
        let inner = Arc::new(Mutex::new(Inner {
            assistant: MathAssistant::new(timing.question_time_limit_secs),
            rng,
            timers: SessionTimers::default(),
        }));
        let runner = EffectRunner {
            inner: Arc::downgrade(&inner),
            provider,
            timing,
        };

        Self { inner, runner }
    }

    pub async fn snapshot(&self) -> MathAssistantSnapshot {
        let guard = self.inner.lock().await;
        MathAssistantSnapshot::from(&guard.assistant)
    }

    pub async fn start(&self) -> MathAssistantSnapshot {
        self.transition(|state| state.assistant.start()).await
    }

    pub async fn submit_name(&self, name: &str) -> MathAssistantSnapshot {
        self.transition(|state| state.assistant.submit_name(name)).await
    }

    pub async fn submit_answer(&self, option: &str) -> MathAssistantSnapshot {
        self.transition(|state| state.assistant.submit_answer(option))
            .await
    }

    pub async fn restart(&self) -> MathAssistantSnapshot {
        self.transition(|state| state.assistant.restart()).await
    }

    async fn transition<F>(&self, step: F) -> MathAssistantSnapshot
    where
        F: FnOnce(&mut Inner) -> Vec<Effect>,
    {
        let mut guard = self.inner.lock().await;
        let state = &mut *guard;
        let effects = step(state);
        self.runner.apply(state, effects);
        MathAssistantSnapshot::from(&state.assistant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::ProviderError,
        models::domain::{MessageKind, Phase},
        services::question_provider::MockQuestionProvider,
        test_utils::fixtures::{sample_questions, wrong_option},
    };

    const SETTLE: Duration = Duration::from_millis(10);

    fn service_with(provider: MockQuestionProvider) -> MathAssistantService {
        MathAssistantService::with_rng(
            Arc::new(provider),
            QuizTiming::default(),
            StdRng::seed_from_u64(17),
        )
    }

    fn provider_returning(count: usize) -> MockQuestionProvider {
        let mut provider = MockQuestionProvider::new();
        provider
            .expect_generate_quiz()
            .returning(move || Ok(sample_questions(count)));
        provider
    }

    async fn start_quiz(service: &MathAssistantService) {
        service.start().await;
        service.submit_name("Lan").await;
        tokio::time::sleep(SETTLE).await;
        assert_eq!(service.snapshot().await.phase, Phase::InQuiz);
    }

    async fn correct_option(service: &MathAssistantService) -> String {
        let guard = service.inner.lock().await;
        let session = guard.assistant.session().expect("quiz should be running");
        session.current_question().correct_answer.clone()
    }

    async fn wrong_answer(service: &MathAssistantService) -> String {
        let guard = service.inner.lock().await;
        let session = guard.assistant.session().expect("quiz should be running");
        wrong_option(session.current_question())
    }

    #[tokio::test(start_paused = true)]
    async fn test_name_submission_fetches_quiz_and_starts_countdown() {
        let service = service_with(provider_returning(3));

        service.start().await;
        let loading = service.submit_name("Lan").await;
        assert_eq!(loading.phase, Phase::LoadingQuiz);
        assert!(loading.is_quiz_loading);

        tokio::time::sleep(SETTLE).await;
        let ready = service.snapshot().await;
        assert_eq!(ready.phase, Phase::InQuiz);
        assert_eq!(ready.quiz.as_ref().unwrap().time_remaining, 120);

        tokio::time::sleep(Duration::from_secs(3)).await;
        let quiz = service.snapshot().await.quiz.unwrap();
        assert_eq!(quiz.time_remaining, 117);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_name_submission_while_loading_does_not_refetch() {
        let mut provider = MockQuestionProvider::new();
        provider
            .expect_generate_quiz()
            .times(1)
            .returning(|| Ok(sample_questions(2)));
        let service = service_with(provider);

        service.start().await;
        service.submit_name("Lan").await;
        let snapshot = service.submit_name("Lan again").await;

        assert_eq!(snapshot.player_name.as_deref(), Some("Lan"));
        tokio::time::sleep(SETTLE).await;
        assert_eq!(service.snapshot().await.phase, Phase::InQuiz);
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_failure_surfaces_message_and_reenables_name() {
        let mut provider = MockQuestionProvider::new();
        provider.expect_generate_quiz().returning(|| {
            Err(ProviderError::Api {
                status: 503,
                message: "model overloaded".into(),
            })
        });
        let service = service_with(provider);

        service.start().await;
        service.submit_name("Lan").await;
        tokio::time::sleep(SETTLE).await;

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.phase, Phase::CollectingName);
        assert!(snapshot.can_submit_name);
        assert!(snapshot.quiz.is_none());
        assert!(snapshot.quiz_error.unwrap().contains("model overloaded"));
        let last = snapshot.messages.last().unwrap();
        assert!(last.text.contains("model overloaded"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_correct_answer_locks_then_advances_after_delay() {
        let service = service_with(provider_returning(3));
        start_quiz(&service).await;

        let answer = correct_option(&service).await;
        let locked = service.submit_answer(&answer).await;
        let quiz = locked.quiz.unwrap();
        assert!(quiz.awaiting_advance);
        assert_eq!(quiz.score, 10);

        tokio::time::sleep(Duration::from_secs(4)).await;
        let still_locked = service.snapshot().await.quiz.unwrap();
        assert_eq!(still_locked.question_number, 1);
        assert_eq!(still_locked.time_remaining, 120);

        tokio::time::sleep(Duration::from_secs(1) + SETTLE).await;
        let next = service.snapshot().await.quiz.unwrap();
        assert_eq!(next.question_number, 2);
        assert!(!next.awaiting_advance);
        assert_eq!(next.time_remaining, 120);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_incorrect_and_advances() {
        let service = service_with(provider_returning(3));
        start_quiz(&service).await;

        tokio::time::sleep(Duration::from_secs(120)).await;
        let timed_out = service.snapshot().await;
        let quiz = timed_out.quiz.unwrap();
        assert_eq!(quiz.time_remaining, 0);
        assert_eq!(quiz.incorrect_count, 1);
        assert!(quiz.awaiting_advance);
        assert_eq!(quiz.selection.selected_option.as_deref(), Some(""));
        assert_eq!(
            timed_out.messages.last().and_then(|m| m.kind),
            Some(MessageKind::Incorrect)
        );

        tokio::time::sleep(Duration::from_secs(5)).await;
        let next = service.snapshot().await.quiz.unwrap();
        assert_eq!(next.question_number, 2);
        assert_eq!(next.time_remaining, 120);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hint_keeps_countdown_running() {
        let service = service_with(provider_returning(3));
        start_quiz(&service).await;

        let wrong = wrong_answer(&service).await;
        let after_hint = service.submit_answer(&wrong).await;
        assert_eq!(
            after_hint.messages.last().and_then(|m| m.kind),
            Some(MessageKind::Hint)
        );

        tokio::time::sleep(Duration::from_secs(10)).await;
        let quiz = service.snapshot().await.quiz.unwrap();
        assert_eq!(quiz.time_remaining, 110);
        assert!(!quiz.awaiting_advance);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_after_hint_counts_second_incorrect() {
        let service = service_with(provider_returning(3));
        start_quiz(&service).await;

        let wrong = wrong_answer(&service).await;
        let after_hint = service.submit_answer(&wrong).await;
        assert_eq!(after_hint.quiz.unwrap().incorrect_count, 1);

        tokio::time::sleep(Duration::from_secs(120)).await;
        let quiz = service.snapshot().await.quiz.unwrap();
        assert_eq!(quiz.time_remaining, 0);
        assert_eq!(quiz.incorrect_count, 2);
        assert!(quiz.awaiting_advance);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_question_leads_to_summary_and_stops_timers() {
        let service = service_with(provider_returning(1));
        start_quiz(&service).await;

        let answer = correct_option(&service).await;
        service.submit_answer(&answer).await;
        tokio::time::sleep(Duration::from_secs(5) + SETTLE).await;

        let summary = service.snapshot().await;
        assert_eq!(summary.phase, Phase::Summary);
        assert_eq!(summary.final_score, Some(10));
        assert_eq!(
            summary.messages.last().and_then(|m| m.kind),
            Some(MessageKind::Summary)
        );

        let guard = service.inner.lock().await;
        assert!(guard.timers.countdown.is_none());
        assert!(guard.timers.advance.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_cancels_pending_advance() {
        let service = service_with(provider_returning(3));
        start_quiz(&service).await;

        let answer = correct_option(&service).await;
        service.submit_answer(&answer).await;
        let restarted = service.restart().await;
        assert_eq!(restarted.phase, Phase::Welcome);
        assert_eq!(restarted.messages.len(), 1);

        tokio::time::sleep(Duration::from_secs(130)).await;
        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.phase, Phase::Welcome);
        assert_eq!(snapshot.messages.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_arriving_after_restart_is_discarded() {
        let mut provider = MockQuestionProvider::new();
        provider.expect_generate_quiz().returning(|| Ok(sample_questions(2)));
        let service = service_with(provider);

        service.start().await;
        // the spawned fetch cannot run before this task yields
        service.submit_name("Lan").await;
        service.restart().await;
        tokio::time::sleep(SETTLE).await;

        let snapshot = service.snapshot().await;
        assert_eq!(snapshot.phase, Phase::Welcome);
        assert!(snapshot.quiz.is_none());
    }
}
