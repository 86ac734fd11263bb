//! Applies UI intents to the router, the store behind it, and UI-local nav state.

use platform_core::{RouterEvent, ScreenRouter, Transition};
use shared::domain::Screen;

use crate::controller::events::UiIntent;

/// Compact navigation overlay; never part of the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    pub open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Screen(Transition),
    StoreChanged,
    NavChanged,
    Ignored,
}

pub fn apply_intent(router: &mut ScreenRouter, nav: &mut NavState, intent: UiIntent) -> Outcome {
    match intent {
        UiIntent::EnterPlatform => Outcome::Screen(router.handle(RouterEvent::EnterPlatform)),
        UiIntent::AbortLoading => {
            nav.open = false;
            Outcome::Screen(router.handle(RouterEvent::Abort))
        }
        UiIntent::SelectView(view) => {
            if router.screen() != Screen::Dashboard {
                return Outcome::Ignored;
            }
            let nav_was_open = std::mem::take(&mut nav.open);
            if router.store_mut().set_view(view) {
                Outcome::StoreChanged
            } else if nav_was_open {
                Outcome::NavChanged
            } else {
                Outcome::Ignored
            }
        }
        UiIntent::ToggleNav => {
            if router.screen() != Screen::Dashboard {
                return Outcome::Ignored;
            }
            nav.open = !nav.open;
            Outcome::NavChanged
        }
        UiIntent::CloseNav => {
            if std::mem::take(&mut nav.open) {
                Outcome::NavChanged
            } else {
                Outcome::Ignored
            }
        }
        UiIntent::TriggerEvolution => {
            if router.screen() != Screen::Dashboard {
                return Outcome::Ignored;
            }
            nav.open = false;
            router.store_mut().trigger_evolution();
            Outcome::StoreChanged
        }
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
