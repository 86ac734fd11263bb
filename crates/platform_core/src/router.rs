//! Top-level screen flow: landing -> loading -> dashboard.

use shared::{domain::Screen, loading::LoadPhase};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{loading::LoadingCoordinator, store::Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterEvent {
    EnterPlatform,
    LoadingComplete,
    Abort,
}

impl RouterEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::EnterPlatform => "enter_platform",
            Self::LoadingComplete => "loading_complete",
            Self::Abort => "abort",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: Screen, to: Screen },
    Ignored { screen: Screen, event: RouterEvent },
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

pub struct ScreenRouter {
    screen: Screen,
    screen_tx: watch::Sender<Screen>,
    store: Store,
    loader: LoadingCoordinator,
}

impl ScreenRouter {
    pub fn new(store: Store, loader: LoadingCoordinator) -> Self {
        let (screen_tx, _) = watch::channel(Screen::Landing);
        Self {
            screen: Screen::Landing,
            screen_tx,
            store,
            loader,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn subscribe_screen(&self) -> watch::Receiver<Screen> {
        self.screen_tx.subscribe()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn loader(&self) -> &LoadingCoordinator {
        &self.loader
    }

    pub fn handle(&mut self, event: RouterEvent) -> Transition {
        let from = self.screen;
        let to = match (from, event) {
            (Screen::Landing, RouterEvent::EnterPlatform) => {
                self.store.initialize_system();
                self.loader.start();
                Screen::Loading
            }
            (Screen::Loading, RouterEvent::LoadingComplete) => Screen::Dashboard,
            (Screen::Loading, RouterEvent::Abort) => {
                self.loader.stop();
                Screen::Landing
            }
            (screen, event) => {
                debug!(screen = %screen, event = event.name(), "ignored screen event");
                return Transition::Ignored { screen, event };
            }
        };

        self.screen = to;
        self.screen_tx.send_replace(to);
        info!(from = %from, to = %to, event = event.name(), "screen transition");
        Transition::Moved { from, to }
    }

    /// Applies loader completion to the screen flow. Called once per frame by
    /// the UI and after every awaited state change by async drivers.
    pub fn sync(&mut self) -> Option<Transition> {
        if self.screen != Screen::Loading {
            return None;
        }
        match self.loader.state().phase {
            LoadPhase::Done => Some(self.handle(RouterEvent::LoadingComplete)),
            LoadPhase::Failed => {
                warn!("loading run failed; continuing to dashboard");
                Some(self.handle(RouterEvent::LoadingComplete))
            }
            LoadPhase::Idle | LoadPhase::Running | LoadPhase::Stopped => None,
        }
    }

    /// Waits for the active loading run to settle, then syncs the screen.
    pub async fn wait_until_dashboard(&mut self) -> Screen {
        if self.screen == Screen::Loading {
            let mut rx = self.loader.subscribe();
            if rx.wait_for(|state| !state.is_running()).await.is_err() {
                warn!("loading state channel closed before completion");
            }
            self.sync();
        }
        self.screen
    }
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
