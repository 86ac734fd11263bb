//! Timed boot sequence: a clock-free progress tracker and the coordinator that drives it.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::loading::{
    step_ceiling, step_floor, total_duration, validate_steps, LoadPhase, LoadState, LoadStep,
    FULL_PROGRESS,
};
use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::error::CoreError;

pub const MAX_TICK_INTERVAL: Duration = Duration::from_millis(50);
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(25);

const NO_ACTIVE_RUN: u64 = 0;

/// Progress bookkeeping for one loading run. Holds no timers; callers feed it
/// elapsed time and step expiries.
#[derive(Debug, Clone)]
pub struct LoadTracker {
    steps: Arc<[LoadStep]>,
    state: LoadState,
}

impl LoadTracker {
    pub fn new(steps: &[LoadStep]) -> Result<Self, CoreError> {
        validate_steps(steps).map_err(CoreError::InvalidSchedule)?;
        Ok(Self::from_validated(steps.into()))
    }

    fn from_validated(steps: Arc<[LoadStep]>) -> Self {
        Self {
            steps,
            state: LoadState::default(),
        }
    }

    pub fn steps(&self) -> &[LoadStep] {
        &self.steps
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// The active step, or `None` once every step has completed.
    pub fn current_step(&self) -> Option<&LoadStep> {
        self.steps.get(self.state.step_index)
    }

    pub fn start(&mut self) -> LoadState {
        self.state = LoadState {
            step_index: 0,
            progress: 0.0,
            phase: LoadPhase::Running,
        };
        self.state
    }

    /// Linear progress within the active step. An `elapsed` at or past the
    /// step's duration leaves the state as is; expiry is reported through
    /// [`LoadTracker::complete_step`].
    pub fn sample(&mut self, elapsed_in_step: Duration) -> LoadState {
        if !self.state.is_running() {
            return self.state;
        }
        let Some(step) = self.current_step() else {
            return self.state;
        };
        if elapsed_in_step >= step.duration {
            return self.state;
        }

        let count = self.steps.len();
        let index = self.state.step_index;
        let floor = step_floor(index, count);
        let ceiling = step_ceiling(index, count);
        let fraction = elapsed_in_step.as_secs_f64() / step.duration.as_secs_f64();
        let candidate = (floor + (ceiling - floor) * fraction).min(ceiling);

        self.state.progress = self.state.progress.max(candidate);
        self.state
    }

    pub fn complete_step(&mut self) -> LoadState {
        if !self.state.is_running() {
            return self.state;
        }
        let count = self.steps.len();
        let next = self.state.step_index + 1;
        if next >= count {
            self.state = LoadState {
                step_index: count,
                progress: FULL_PROGRESS,
                phase: LoadPhase::Done,
            };
        } else {
            self.state.step_index = next;
            self.state.progress = self.state.progress.max(step_floor(next, count));
        }
        self.state
    }

    /// Freezes a running tracker. Finished runs keep their `done` state.
    pub fn stop(&mut self) -> LoadState {
        if self.state.is_running() {
            self.state.phase = LoadPhase::Stopped;
        }
        self.state
    }

    pub fn fail(&mut self) -> LoadState {
        if !self.state.is_done() {
            self.state.phase = LoadPhase::Failed;
        }
        self.state
    }
}

/// Shares the latest state with observers. Writes are tagged with a run id so
/// a superseded run can never publish over its successor.
struct StatePublisher {
    tx: watch::Sender<LoadState>,
    active_run: AtomicU64,
}

impl StatePublisher {
    fn new() -> Self {
        let (tx, _) = watch::channel(LoadState::default());
        Self {
            tx,
            active_run: AtomicU64::new(NO_ACTIVE_RUN),
        }
    }

    fn is_active(&self, run_id: u64) -> bool {
        self.active_run.load(Ordering::Acquire) == run_id
    }

    fn activate(&self, run_id: u64, state: LoadState) {
        self.tx.send_modify(|current| {
            self.active_run.store(run_id, Ordering::Release);
            *current = state;
        });
    }

    fn publish(&self, run_id: u64, state: LoadState) {
        self.tx.send_if_modified(|current| {
            if !self.is_active(run_id) || *current == state {
                return false;
            }
            debug_assert!(
                state.progress >= current.progress,
                "progress must never decrease within a run"
            );
            *current = state;
            true
        });
    }

    /// Detaches whichever run is active and lets `apply` settle the final state.
    fn deactivate(&self, apply: impl FnOnce(&mut LoadState)) {
        self.tx.send_modify(|current| {
            self.active_run.store(NO_ACTIVE_RUN, Ordering::Release);
            apply(current);
        });
    }
}

struct ActiveRun {
    id: u64,
    task: JoinHandle<()>,
}

pub struct LoadingCoordinator {
    steps: Arc<[LoadStep]>,
    tick_interval: Duration,
    runtime: Option<Handle>,
    publisher: Arc<StatePublisher>,
    active: Option<ActiveRun>,
    next_run_id: u64,
}

impl LoadingCoordinator {
    pub fn new(steps: &[LoadStep]) -> Result<Self, CoreError> {
        validate_steps(steps).map_err(CoreError::InvalidSchedule)?;
        Ok(Self {
            steps: steps.into(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            runtime: None,
            publisher: Arc::new(StatePublisher::new()),
            active: None,
            next_run_id: NO_ACTIVE_RUN + 1,
        })
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval.clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL);
        self
    }

    /// Runs timers on `handle` instead of whatever runtime is current at `start()`.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn steps(&self) -> &[LoadStep] {
        &self.steps
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn total_duration(&self) -> Duration {
        total_duration(&self.steps)
    }

    pub fn state(&self) -> LoadState {
        *self.publisher.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.publisher.tx.subscribe()
    }

    pub fn current_step(&self) -> Option<&LoadStep> {
        self.steps.get(self.state().step_index)
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Begins a fresh run, aborting any run still in flight.
    pub fn start(&mut self) -> LoadState {
        if let Some(previous) = self.active.take() {
            debug!(run_id = previous.id, "aborting in-flight loading run");
            previous.task.abort();
        }

        let Some(handle) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!("no async runtime available; loading timers cannot be created");
            self.publisher.deactivate(|state| {
                *state = LoadState {
                    step_index: 0,
                    progress: 0.0,
                    phase: LoadPhase::Failed,
                };
            });
            return self.state();
        };

        let run_id = self.next_run_id;
        self.next_run_id += 1;

        let mut tracker = LoadTracker::from_validated(self.steps.clone());
        self.publisher.activate(run_id, tracker.start());

        let task = handle.spawn(drive_run(
            tracker,
            self.tick_interval,
            run_id,
            self.publisher.clone(),
        ));
        self.active = Some(ActiveRun { id: run_id, task });
        info!(
            run_id,
            steps = self.steps.len(),
            total_ms = self.total_duration().as_millis() as u64,
            "loading run started"
        );
        self.state()
    }

    /// Cancels pending timers and freezes the state where it stands.
    pub fn stop(&mut self) -> LoadState {
        if let Some(run) = self.active.take() {
            run.task.abort();
            debug!(run_id = run.id, "loading run stopped");
        }
        self.publisher.deactivate(|state| {
            if state.is_running() {
                state.phase = LoadPhase::Stopped;
            }
        });
        self.state()
    }
}

impl Drop for LoadingCoordinator {
    fn drop(&mut self) {
        if let Some(run) = self.active.take() {
            run.task.abort();
        }
    }
}

async fn drive_run(
    mut tracker: LoadTracker,
    tick_interval: Duration,
    run_id: u64,
    publisher: Arc<StatePublisher>,
) {
    let steps = tracker.steps.clone();
    for (index, step) in steps.iter().enumerate() {
        let step_started = Instant::now();
        let mut ticker = time::interval_at(step_started + tick_interval, tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let expiry = time::sleep_until(step_started + step.duration);
        tokio::pin!(expiry);
        debug!(run_id, step = index, label = step.label, "loading step active");

        loop {
            tokio::select! {
                biased;
                _ = &mut expiry => break,
                _ = ticker.tick() => {
                    let elapsed = step_started.elapsed();
                    if elapsed >= step.duration {
                        break;
                    }
                    publisher.publish(run_id, tracker.sample(elapsed));
                }
            }
            if !publisher.is_active(run_id) {
                return;
            }
        }

        publisher.publish(run_id, tracker.complete_step());
    }
    info!(run_id, "loading run complete");
}

#[cfg(test)]
#[path = "tests/loading_tests.rs"]
mod tests;
