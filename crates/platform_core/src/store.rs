//! Observable application store: view selection, initialization flag, mocked metrics and agents.

use serde::Serialize;
use shared::{
    domain::{seed_agents, Agent, SystemMetrics, ViewId, LATENCY_FLOOR_MS},
    error::DomainError,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const NETWORK_HEALTH_GAIN: f64 = 0.1;
const ETHICAL_COMPLIANCE_GAIN: f64 = 0.05;
const LATENCY_REDUCTION: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreState {
    pub selected_view: ViewId,
    pub is_initialized: bool,
    pub system_metrics: SystemMetrics,
    pub agents: Vec<Agent>,
    /// Number of evolutions since the last initialization.
    pub generation: u32,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            selected_view: ViewId::default(),
            is_initialized: false,
            system_metrics: SystemMetrics::default(),
            agents: Vec::new(),
            generation: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreAction {
    SetView(ViewId),
    InitializeSystem,
    TriggerEvolution,
}

impl StoreAction {
    pub fn name(self) -> &'static str {
        match self {
            Self::SetView(_) => "set_view",
            Self::InitializeSystem => "initialize_system",
            Self::TriggerEvolution => "trigger_evolution",
        }
    }
}

/// One notification per action call, carrying the post-action state.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub action: StoreAction,
    pub snapshot: StoreState,
}

/// Each observer owns an unbounded queue, so a slow reader never loses an
/// event; closed queues are pruned on the next notification.
pub struct Store {
    state: StoreState,
    observers: Vec<mpsc::UnboundedSender<StoreEvent>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            state: StoreState::default(),
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<StoreEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(tx);
        rx
    }

    pub fn observer_count(&self) -> usize {
        self.observers.iter().filter(|tx| !tx.is_closed()).count()
    }

    /// Returns `true` when the selection changed (and observers were notified).
    pub fn set_view(&mut self, view: ViewId) -> bool {
        if self.state.selected_view == view {
            debug!(view = %view, "view already selected");
            return false;
        }
        self.state.selected_view = view;
        self.notify(StoreAction::SetView(view));
        true
    }

    /// Entry point for untrusted callers holding a raw id. Unknown ids leave
    /// the store untouched and notify nobody.
    pub fn select_view(&mut self, raw: &str) -> Result<bool, DomainError> {
        match raw.parse::<ViewId>() {
            Ok(view) => Ok(self.set_view(view)),
            Err(err) => {
                warn!(raw, "rejected unknown view id");
                Err(err)
            }
        }
    }

    pub fn initialize_system(&mut self) {
        self.state.is_initialized = true;
        self.state.system_metrics = SystemMetrics::default();
        self.state.agents = seed_agents();
        self.state.generation = 0;
        info!(agents = self.state.agents.len(), "system initialized");
        self.notify(StoreAction::InitializeSystem);
    }

    pub fn trigger_evolution(&mut self) {
        self.state.system_metrics = evolve(self.state.system_metrics);
        self.state.generation = self.state.generation.saturating_add(1);
        debug_assert!(self.state.system_metrics.is_within_range());
        debug!(
            generation = self.state.generation,
            network_health = self.state.system_metrics.network_health,
            latency_ms = self.state.system_metrics.latency_ms,
            "evolution triggered"
        );
        self.notify(StoreAction::TriggerEvolution);
    }

    fn notify(&mut self, action: StoreAction) {
        let event = StoreEvent {
            action,
            snapshot: self.state.clone(),
        };
        self.observers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

/// Nudges health and compliance toward 1 and latency toward its floor.
pub(crate) fn evolve(metrics: SystemMetrics) -> SystemMetrics {
    let network_health =
        metrics.network_health + (1.0 - metrics.network_health) * NETWORK_HEALTH_GAIN;
    let ethical_compliance =
        metrics.ethical_compliance + (1.0 - metrics.ethical_compliance) * ETHICAL_COMPLIANCE_GAIN;
    let reduction = (f64::from(metrics.latency_ms) * LATENCY_REDUCTION).ceil() as u32;
    let latency_ms = metrics
        .latency_ms
        .saturating_sub(reduction)
        .max(LATENCY_FLOOR_MS);

    SystemMetrics {
        network_health,
        latency_ms,
        ethical_compliance,
    }
    .clamped()
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
