//! Step progression for a [`WizardFlow`].
//!
//! The engine owns the wizard state, persists the current step index through
//! a [`ProgressStore`] and serializes submissions: while one is in flight,
//! further submissions and navigation are refused.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pathway_domain::FormValues;
use tracing::{debug, error, warn};

use crate::dispatch::{NavigationRequest, WizardFlow};
use crate::notify::{LogNavigator, LogNotifier, Navigator, Notification, Notifier};
use crate::steps::StepDefinition;
use crate::storage::ProgressStore;
use crate::view::StepView;
use crate::WizardError;

const DISPATCH_FAILURE: &str = "Error submitting form. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardPhase {
    #[default]
    Editing,
    /// Final step completed; waiting for the redirect to fire.
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WizardState {
    pub current_step: usize,
    pub data: FormValues,
    pub in_flight: bool,
    pub phase: WizardPhase,
}

/// Result of a successful `submit_step`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced { from: usize, to: usize },
    Completed(NavigationRequest),
}

pub struct WizardEngine<F: WizardFlow> {
    flow: F,
    store: Arc<dyn ProgressStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<WizardState>,
}

impl<F: WizardFlow> WizardEngine<F> {
    /// Builds an engine positioned at the persisted step, or the first one.
    pub fn new(flow: F, store: Arc<dyn ProgressStore>) -> Result<Self, WizardError> {
        let total = flow.steps().len();
        if total == 0 {
            return Err(WizardError::EmptyFlow(flow.name()));
        }

        let current_step = match store.load_step(flow.progress_key()) {
            Ok(Some(index)) if index < total => index,
            Ok(Some(index)) => {
                warn!(flow = flow.name(), index, "persisted step out of range, starting over");
                0
            }
            Ok(None) => 0,
            Err(err) => {
                warn!(flow = flow.name(), error = %err, "could not load progress, starting over");
                0
            }
        };
        debug!(flow = flow.name(), current_step, "wizard opened");

        Ok(Self {
            flow,
            store,
            notifier: Arc::new(LogNotifier),
            navigator: Arc::new(LogNavigator),
            state: Mutex::new(WizardState {
                current_step,
                ..WizardState::default()
            }),
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    pub fn total_steps(&self) -> usize {
        self.flow.steps().len()
    }

    pub fn last_index(&self) -> usize {
        self.total_steps() - 1
    }

    pub fn current_step(&self) -> usize {
        self.lock().current_step
    }

    pub fn current_definition(&self) -> &StepDefinition<F::Step> {
        &self.flow.steps()[self.current_step()]
    }

    pub fn snapshot(&self) -> WizardState {
        self.lock().clone()
    }

    pub fn view(&self) -> StepView {
        let state = self.lock();
        StepView {
            title: self.flow.steps()[state.current_step].title,
            index: state.current_step,
            total: self.total_steps(),
            in_flight: state.in_flight,
            submitted: state.phase == WizardPhase::Submitted,
        }
    }

    /// Moves one step forward; no-op on the last step.
    pub fn advance(&self) -> Result<usize, WizardError> {
        let last = self.last_index();
        self.step_to(|current| (current < last).then(|| current + 1))
    }

    /// Moves one step back; no-op on the first step.
    pub fn retreat(&self) -> Result<usize, WizardError> {
        self.step_to(|current| current.checked_sub(1))
    }

    fn step_to(&self, next: impl FnOnce(usize) -> Option<usize>) -> Result<usize, WizardError> {
        let mut state = self.lock();
        if state.in_flight || state.phase == WizardPhase::Submitted {
            return Ok(state.current_step);
        }
        let Some(target) = next(state.current_step) else {
            return Ok(state.current_step);
        };
        self.store.save_step(self.flow.progress_key(), target)?;
        debug!(flow = self.flow.name(), from = state.current_step, to = target, "step changed");
        state.current_step = target;
        Ok(target)
    }

    /// Validates and dispatches the active step, then advances or completes.
    pub async fn submit_step(&self, values: FormValues) -> Result<StepOutcome, WizardError> {
        let (index, step, data) = {
            let mut state = self.lock();
            if state.in_flight {
                return Err(WizardError::SubmissionInFlight);
            }
            let definition = &self.flow.steps()[state.current_step];
            definition
                .schema
                .validate(&values)
                .map_err(WizardError::Validation)?;
            state.data.merge(values);
            state.in_flight = true;
            (state.current_step, definition.step, state.data.clone())
        };

        let dispatched = self.flow.dispatch(step, &data).await;
        let outcome = match dispatched {
            Ok(()) if index < self.last_index() => self.finish_step(index),
            Ok(()) => self
                .flow
                .complete(&data)
                .await
                .map(StepOutcome::Completed)
                .map_err(WizardError::from),
            Err(err) => Err(WizardError::from(err)),
        };

        match outcome {
            Ok(StepOutcome::Completed(request)) => Ok(self.enter_submitted(request)),
            Ok(advanced) => Ok(advanced),
            Err(err) => {
                if let WizardError::Dispatch(cause) = &err {
                    error!(flow = self.flow.name(), ?step, error = %cause, "step submission failed");
                    self.notifier
                        .notify(Notification::error("Error", DISPATCH_FAILURE));
                }
                self.lock().in_flight = false;
                Err(err)
            }
        }
    }

    fn finish_step(&self, from: usize) -> Result<StepOutcome, WizardError> {
        let to = from + 1;
        self.store.save_step(self.flow.progress_key(), to)?;
        let mut state = self.lock();
        state.current_step = to;
        state.in_flight = false;
        debug!(flow = self.flow.name(), from, to, "step submitted");
        Ok(StepOutcome::Advanced { from, to })
    }

    fn enter_submitted(&self, request: NavigationRequest) -> StepOutcome {
        if let Err(err) = self.store.save_step(self.flow.progress_key(), 0) {
            warn!(flow = self.flow.name(), error = %err, "could not reset persisted progress");
        }
        self.lock().phase = WizardPhase::Submitted;
        debug!(flow = self.flow.name(), route = %request.route, "wizard completed");

        self.notifier
            .notify(Notification::success("Success", self.flow.completion_message()));
        self.navigator.schedule(&request);
        StepOutcome::Completed(request)
    }

    /// Called once the scheduled redirect has fired.
    pub fn finish_navigation(&self) {
        let mut state = self.lock();
        state.phase = WizardPhase::Editing;
        state.current_step = 0;
        state.in_flight = false;
    }

    /// Abandons the wizard: progress goes back to the first step and
    /// collected data is dropped.
    pub fn reset(&self) -> Result<(), WizardError> {
        self.store.save_step(self.flow.progress_key(), 0)?;
        *self.lock() = WizardState::default();
        debug!(flow = self.flow.name(), "wizard reset");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, WizardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldRule, StepSchema};
    use crate::storage::MemoryProgressStore;
    use crate::BackendError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    const KEY: &str = "testPage";

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Stage {
        Name,
        Email,
        Confirm,
    }

    #[derive(Default)]
    struct ScriptedFlow {
        steps: Vec<StepDefinition<Stage>>,
        dispatched: Mutex<Vec<Stage>>,
        completions: AtomicUsize,
        fail_dispatch: AtomicBool,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedFlow {
        fn new() -> Self {
            let name = StepSchema::new(vec![
                FieldRule::text("name", "Name").required("Name is required")
            ]);
            let email = StepSchema::new(vec![FieldRule::text("email", "Email")
                .required("Email is required")
                .email("Invalid email address")]);
            Self {
                steps: vec![
                    StepDefinition::new(Stage::Name, "NAME", name),
                    StepDefinition::new(Stage::Email, "EMAIL", email),
                    StepDefinition::new(Stage::Confirm, "CONFIRM", StepSchema::default()),
                ],
                ..Self::default()
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new()
            }
        }

        fn dispatched(&self) -> Vec<Stage> {
            self.dispatched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WizardFlow for ScriptedFlow {
        type Step = Stage;

        fn name(&self) -> &'static str {
            "scripted"
        }

        fn progress_key(&self) -> &'static str {
            KEY
        }

        fn steps(&self) -> &[StepDefinition<Stage>] {
            &self.steps
        }

        async fn dispatch(&self, step: Stage, _data: &FormValues) -> Result<(), BackendError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.dispatched.lock().unwrap().push(step);
            if self.fail_dispatch.load(Ordering::SeqCst) {
                return Err(BackendError::Transport("connection refused".into()));
            }
            Ok(())
        }

        async fn complete(&self, _data: &FormValues) -> Result<NavigationRequest, BackendError> {
            self.completions.fetch_add(1, Ordering::SeqCst);
            Ok(NavigationRequest::new("/done", Duration::from_millis(3000)))
        }
    }

    #[derive(Default)]
    struct Recorder {
        notifications: Mutex<Vec<Notification>>,
        routes: Mutex<Vec<String>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, notification: Notification) {
            self.notifications.lock().unwrap().push(notification);
        }
    }

    impl Navigator for Recorder {
        fn schedule(&self, request: &NavigationRequest) {
            self.routes.lock().unwrap().push(request.route.clone());
        }
    }

    fn engine_with(
        flow: ScriptedFlow,
        store: Arc<MemoryProgressStore>,
    ) -> (WizardEngine<ScriptedFlow>, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let engine = WizardEngine::new(flow, store)
            .unwrap()
            .with_notifier(recorder.clone())
            .with_navigator(recorder.clone());
        (engine, recorder)
    }

    fn named() -> FormValues {
        FormValues::new().with("name", "Ada")
    }

    fn emailed() -> FormValues {
        FormValues::new().with("email", "ada@example.com")
    }

    #[test]
    fn empty_flow_is_rejected() {
        let flow = ScriptedFlow {
            steps: Vec::new(),
            ..ScriptedFlow::default()
        };
        let err = WizardEngine::new(flow, Arc::new(MemoryProgressStore::new()))
            .err()
            .expect("no steps");
        assert!(matches!(err, WizardError::EmptyFlow("scripted")));
    }

    #[test]
    fn resumes_from_persisted_step() {
        let store = Arc::new(MemoryProgressStore::new().with_step(KEY, 2));
        let (engine, _) = engine_with(ScriptedFlow::new(), store);
        assert_eq!(engine.current_step(), 2);
        assert_eq!(engine.view().title, "CONFIRM");
    }

    #[test]
    fn out_of_range_persisted_step_starts_over() {
        let store = Arc::new(MemoryProgressStore::new().with_step(KEY, 9));
        let (engine, _) = engine_with(ScriptedFlow::new(), store);
        assert_eq!(engine.current_step(), 0);
    }

    #[test]
    fn advance_and_retreat_stay_within_bounds() {
        let store = Arc::new(MemoryProgressStore::new());
        let (engine, _) = engine_with(ScriptedFlow::new(), store.clone());

        assert_eq!(engine.retreat().unwrap(), 0);
        assert_eq!(store.get(KEY), None);

        assert_eq!(engine.advance().unwrap(), 1);
        assert_eq!(engine.advance().unwrap(), 2);
        assert_eq!(engine.advance().unwrap(), 2);
        assert_eq!(store.get(KEY), Some(2));

        assert_eq!(engine.retreat().unwrap(), 1);
        assert_eq!(store.get(KEY), Some(1));
    }

    #[tokio::test]
    async fn valid_first_step_advances_and_persists() {
        let store = Arc::new(MemoryProgressStore::new());
        let (engine, _) = engine_with(ScriptedFlow::new(), store.clone());

        let outcome = engine.submit_step(named()).await.unwrap();

        assert_eq!(outcome, StepOutcome::Advanced { from: 0, to: 1 });
        assert_eq!(engine.current_step(), 1);
        assert_eq!(store.get(KEY), Some(1));
        assert_eq!(engine.snapshot().data.text("name"), "Ada");
        assert!(!engine.snapshot().in_flight);
    }

    #[tokio::test]
    async fn invalid_values_leave_state_untouched() {
        let store = Arc::new(MemoryProgressStore::new());
        let (engine, _) = engine_with(ScriptedFlow::new(), store.clone());
        let before = engine.snapshot();

        let err = engine
            .submit_step(FormValues::new().with("name", "  "))
            .await
            .unwrap_err();

        let errors = err.field_errors().expect("validation error");
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(engine.snapshot(), before);
        assert!(engine.flow().dispatched().is_empty());
        assert_eq!(store.get(KEY), None);
    }

    #[tokio::test]
    async fn dispatch_failure_keeps_index_and_notifies() {
        let flow = ScriptedFlow::new();
        flow.fail_dispatch.store(true, Ordering::SeqCst);
        let store = Arc::new(MemoryProgressStore::new());
        let (engine, recorder) = engine_with(flow, store.clone());

        let err = engine.submit_step(named()).await.unwrap_err();

        assert!(matches!(err, WizardError::Dispatch(BackendError::Transport(_))));
        assert_eq!(engine.current_step(), 0);
        assert!(!engine.snapshot().in_flight);
        assert_eq!(store.get(KEY), None);
        let notes = recorder.notifications.lock().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].description, "Error submitting form. Please try again.");
    }

    #[tokio::test]
    async fn final_step_completes_once_and_blocks_resubmission() {
        let store = Arc::new(MemoryProgressStore::new().with_step(KEY, 1));
        let (engine, recorder) = engine_with(ScriptedFlow::new(), store.clone());

        engine.submit_step(emailed()).await.unwrap();
        let outcome = engine.submit_step(FormValues::new()).await.unwrap();

        assert_eq!(
            outcome,
            StepOutcome::Completed(NavigationRequest::new("/done", Duration::from_millis(3000)))
        );
        assert_eq!(engine.flow().completions.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(KEY), Some(0));
        assert_eq!(*recorder.routes.lock().unwrap(), vec!["/done".to_string()]);

        let view = engine.view();
        assert!(view.submitted);
        assert_eq!(view.submit_label(), "Saving progress...");

        let err = engine.submit_step(FormValues::new()).await.unwrap_err();
        assert!(matches!(err, WizardError::SubmissionInFlight));
        assert_eq!(engine.retreat().unwrap(), 2);
        assert_eq!(engine.flow().completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn finish_navigation_returns_to_first_step() {
        let store = Arc::new(MemoryProgressStore::new().with_step(KEY, 2));
        let (engine, _) = engine_with(ScriptedFlow::new(), store);

        engine.submit_step(FormValues::new()).await.unwrap();
        engine.finish_navigation();

        let state = engine.snapshot();
        assert_eq!(state.current_step, 0);
        assert_eq!(state.phase, WizardPhase::Editing);
        assert!(!state.in_flight);
    }

    #[tokio::test]
    async fn concurrent_submission_is_refused() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(MemoryProgressStore::new());
        let (engine, _) = engine_with(ScriptedFlow::gated(gate.clone()), store);
        let engine = Arc::new(engine);

        let first = tokio::spawn({
            let engine = engine.clone();
            async move { engine.submit_step(named()).await }
        });
        while !engine.snapshot().in_flight {
            tokio::task::yield_now().await;
        }

        let err = engine.submit_step(named()).await.unwrap_err();
        assert!(matches!(err, WizardError::SubmissionInFlight));
        assert_eq!(engine.advance().unwrap(), 0);

        gate.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert_eq!(outcome, StepOutcome::Advanced { from: 0, to: 1 });
        assert_eq!(engine.flow().dispatched(), vec![Stage::Name]);
    }

    #[tokio::test]
    async fn reset_clears_progress_and_data() {
        let store = Arc::new(MemoryProgressStore::new());
        let (engine, _) = engine_with(ScriptedFlow::new(), store.clone());
        engine.submit_step(named()).await.unwrap();

        engine.reset().unwrap();

        assert_eq!(engine.snapshot(), WizardState::default());
        assert_eq!(store.get(KEY), Some(0));
    }
}
