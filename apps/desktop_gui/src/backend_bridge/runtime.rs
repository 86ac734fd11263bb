//! Dedicated async runtime hosting the loading coordinator's timers.

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Handle, Runtime};

const TIMER_THREAD_NAME: &str = "synth3sis-timers";

/// Keeps timer work off the UI thread. Dropping it shuts the runtime down,
/// which also cancels any timers still armed.
pub struct TimerRuntime {
    runtime: Runtime,
}

impl TimerRuntime {
    pub fn launch() -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name(TIMER_THREAD_NAME)
            .enable_time()
            .build()
            .context("failed to build timer runtime")?;
        tracing::debug!(thread = TIMER_THREAD_NAME, "timer runtime started");
        Ok(Self { runtime })
    }

    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }
}
