use std::time::Duration;

use super::*;
use shared::{
    domain::ViewId,
    loading::{LoadStep, LOADING_STEPS},
};

fn router_with(steps: &[LoadStep]) -> ScreenRouter {
    let loader = LoadingCoordinator::new(steps).expect("coordinator");
    ScreenRouter::new(Store::new(), loader)
}

#[test]
fn boots_on_landing_with_cold_store() {
    let router = router_with(&LOADING_STEPS);
    assert_eq!(router.screen(), Screen::Landing);
    assert!(!router.store().state().is_initialized);
    assert_eq!(router.store().state().selected_view, ViewId::Dashboard);
    assert!(router.store().state().agents.is_empty());
}

#[test]
fn events_invalid_for_current_screen_are_ignored() {
    let mut router = router_with(&LOADING_STEPS);

    for event in [RouterEvent::LoadingComplete, RouterEvent::Abort] {
        assert_eq!(
            router.handle(event),
            Transition::Ignored {
                screen: Screen::Landing,
                event
            }
        );
    }
    assert_eq!(router.screen(), Screen::Landing);
    assert!(!router.store().state().is_initialized);
}

#[tokio::test(start_paused = true)]
async fn enter_platform_initializes_and_starts_loading() {
    let mut router = router_with(&LOADING_STEPS);
    let mut store_rx = router.store_mut().subscribe();

    let transition = router.handle(RouterEvent::EnterPlatform);

    assert_eq!(
        transition,
        Transition::Moved {
            from: Screen::Landing,
            to: Screen::Loading
        }
    );
    assert!(router.store().state().is_initialized);
    assert_eq!(router.store().state().agents.len(), 6);
    assert!(router.loader().is_running());
    assert!(store_rx.try_recv().is_ok());
}

#[tokio::test(start_paused = true)]
async fn enter_platform_twice_does_not_restart_loading() {
    let mut router = router_with(&LOADING_STEPS);
    router.handle(RouterEvent::EnterPlatform);
    tokio::time::sleep(Duration::from_millis(900)).await;
    let before = router.loader().state();

    assert!(!router.handle(RouterEvent::EnterPlatform).moved());
    assert_eq!(router.loader().state().step_index, before.step_index);
}

#[tokio::test(start_paused = true)]
async fn sync_waits_for_loader_completion() {
    let mut router = router_with(&LOADING_STEPS);
    router.handle(RouterEvent::EnterPlatform);

    tokio::time::sleep(Duration::from_millis(2_900)).await;
    assert_eq!(router.sync(), None);
    assert_eq!(router.screen(), Screen::Loading);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(router.sync().is_some_and(|transition| transition.moved()));
    assert_eq!(router.screen(), Screen::Dashboard);
    assert_eq!(router.loader().state().progress, 100.0);
}

#[tokio::test(start_paused = true)]
async fn wait_until_dashboard_follows_the_loader_not_a_fixed_timer() {
    let steps = [LoadStep::new("Long", 4_000), LoadStep::new("Longer", 2_000)];
    let mut router = router_with(&steps);
    let started = tokio::time::Instant::now();
    router.handle(RouterEvent::EnterPlatform);

    assert_eq!(router.wait_until_dashboard().await, Screen::Dashboard);
    assert!(started.elapsed() >= Duration::from_millis(6_000));
}

#[tokio::test(start_paused = true)]
async fn abort_returns_to_landing_and_freezes_loader() {
    let mut router = router_with(&LOADING_STEPS);
    router.handle(RouterEvent::EnterPlatform);
    tokio::time::sleep(Duration::from_millis(500)).await;

    let transition = router.handle(RouterEvent::Abort);
    assert_eq!(
        transition,
        Transition::Moved {
            from: Screen::Loading,
            to: Screen::Landing
        }
    );
    let frozen = router.loader().state();
    assert_eq!(frozen.phase, LoadPhase::Stopped);

    tokio::time::sleep(Duration::from_millis(5_000)).await;
    assert_eq!(router.loader().state(), frozen);
    assert_eq!(router.sync(), None);
    assert_eq!(router.screen(), Screen::Landing);
}

#[tokio::test(start_paused = true)]
async fn dashboard_is_terminal() {
    let mut router = router_with(&LOADING_STEPS);
    router.handle(RouterEvent::EnterPlatform);
    router.wait_until_dashboard().await;

    for event in [
        RouterEvent::EnterPlatform,
        RouterEvent::LoadingComplete,
        RouterEvent::Abort,
    ] {
        assert!(!router.handle(event).moved());
    }
    assert_eq!(router.screen(), Screen::Dashboard);
}

#[test]
fn failed_loader_still_reaches_dashboard() {
    // No runtime: the loader cannot arm its timers.
    let mut router = router_with(&LOADING_STEPS);
    router.handle(RouterEvent::EnterPlatform);
    assert_eq!(router.loader().state().phase, LoadPhase::Failed);

    assert!(router.sync().is_some());
    assert_eq!(router.screen(), Screen::Dashboard);
}

#[tokio::test(start_paused = true)]
async fn screen_watchers_see_each_transition() {
    let mut router = router_with(&LOADING_STEPS);
    let mut screens = router.subscribe_screen();

    router.handle(RouterEvent::EnterPlatform);
    assert!(screens.has_changed().expect("router alive"));
    assert_eq!(*screens.borrow_and_update(), Screen::Loading);

    router.wait_until_dashboard().await;
    assert_eq!(*screens.borrow_and_update(), Screen::Dashboard);
}
