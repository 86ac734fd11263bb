use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const FULL_PROGRESS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStep {
    pub label: &'static str,
    pub duration: Duration,
}

impl LoadStep {
    pub const fn new(label: &'static str, duration_ms: u64) -> Self {
        Self {
            label,
            duration: Duration::from_millis(duration_ms),
        }
    }

    /// First word of the label, used by compact status grids.
    pub fn short_label(&self) -> &'static str {
        self.label.split_whitespace().next().unwrap_or(self.label)
    }
}

/// The platform boot sequence. Durations sum to three seconds.
pub const LOADING_STEPS: [LoadStep; 5] = [
    LoadStep::new("Initializing Daedalus Consciousness", 800),
    LoadStep::new("Activating Neural Substrate Layer", 600),
    LoadStep::new("Calibrating Σ-Matrix Engine", 700),
    LoadStep::new("Synchronizing EchoNode Mesh", 500),
    LoadStep::new("Establishing Cognitive Coherence", 400),
];

pub fn validate_steps(steps: &[LoadStep]) -> Result<(), DomainError> {
    if steps.is_empty() {
        return Err(DomainError::invalid_step(0, "schedule has no steps"));
    }
    for (index, step) in steps.iter().enumerate() {
        if step.duration.is_zero() {
            return Err(DomainError::invalid_step(index, "duration must be positive"));
        }
        if step.label.trim().is_empty() {
            return Err(DomainError::invalid_step(index, "label must not be blank"));
        }
    }
    Ok(())
}

pub fn total_duration(steps: &[LoadStep]) -> Duration {
    steps.iter().map(|step| step.duration).sum()
}

/// Progress value at which step `index` of `step_count` begins.
pub fn step_floor(index: usize, step_count: usize) -> f64 {
    if step_count == 0 {
        return FULL_PROGRESS;
    }
    (index.min(step_count) as f64) * FULL_PROGRESS / step_count as f64
}

/// Progress value step `index` may approach but not reach while active.
pub fn step_ceiling(index: usize, step_count: usize) -> f64 {
    step_floor(index + 1, step_count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    #[default]
    Idle,
    Running,
    Done,
    Stopped,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadState {
    pub step_index: usize,
    pub progress: f64,
    pub phase: LoadPhase,
}

impl LoadState {
    pub fn is_done(&self) -> bool {
        self.phase == LoadPhase::Done
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoadPhase::Running
    }

    /// Done or failed; nothing further will be published for this run.
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, LoadPhase::Done | LoadPhase::Failed)
    }

    pub fn percent_label(&self) -> String {
        format!("{}% Complete", self.progress.round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_sequence_is_valid_and_lasts_three_seconds() {
        validate_steps(&LOADING_STEPS).expect("valid steps");
        assert_eq!(total_duration(&LOADING_STEPS), Duration::from_millis(3000));
    }

    #[test]
    fn rejects_empty_and_zero_length_schedules() {
        assert!(validate_steps(&[]).is_err());
        let steps = [LoadStep::new("ok", 10), LoadStep::new("broken", 0)];
        assert_eq!(
            validate_steps(&steps),
            Err(DomainError::invalid_step(1, "duration must be positive"))
        );
    }

    #[test]
    fn step_bounds_partition_full_progress() {
        assert_eq!(step_floor(0, 5), 0.0);
        assert_eq!(step_ceiling(0, 5), 20.0);
        assert_eq!(step_ceiling(4, 5), 100.0);
        assert_eq!(step_floor(5, 5), 100.0);
    }

    #[test]
    fn short_label_is_first_word() {
        assert_eq!(LOADING_STEPS[2].short_label(), "Calibrating");
    }

    #[test]
    fn percent_label_rounds() {
        let state = LoadState {
            step_index: 2,
            progress: 47.6,
            phase: LoadPhase::Running,
        };
        assert_eq!(state.percent_label(), "48% Complete");
    }
}
