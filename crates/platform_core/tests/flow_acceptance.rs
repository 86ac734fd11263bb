use std::time::Duration;

use platform_core::{boot_sequence, RouterEvent, ScreenRouter, Store, StoreAction};
use shared::{
    domain::{Screen, SystemMetrics, ViewId},
    loading::FULL_PROGRESS,
};
use tokio::{
    sync::mpsc::error::TryRecvError,
    time::{self, Instant},
};

fn fresh_router() -> ScreenRouter {
    ScreenRouter::new(Store::new(), boot_sequence().expect("boot sequence"))
}

#[tokio::test(start_paused = true)]
async fn cold_start_lands_on_landing_screen() {
    let router = fresh_router();
    let state = router.store().state();

    assert_eq!(router.screen(), Screen::Landing);
    assert_eq!(state.selected_view, ViewId::Dashboard);
    assert!(!state.is_initialized);
    assert!(state.agents.is_empty());
}

#[tokio::test(start_paused = true)]
async fn entering_platform_reaches_dashboard_after_boot_sequence() {
    let mut router = fresh_router();
    let started = Instant::now();

    router.handle(RouterEvent::EnterPlatform);
    assert_eq!(router.screen(), Screen::Loading);
    assert!(router.store().state().is_initialized);
    assert_eq!(router.store().state().system_metrics, SystemMetrics::default());

    let tick = router.loader().tick_interval();
    let total = router.loader().total_duration();
    let mut samples = Vec::new();
    while router.screen() == Screen::Loading {
        time::sleep(Duration::from_millis(25)).await;
        samples.push(router.loader().state().progress);
        router.sync();
    }

    let elapsed = started.elapsed();
    assert_eq!(router.screen(), Screen::Dashboard);
    assert!(elapsed + tick >= total && elapsed <= total + tick + Duration::from_millis(25));
    assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(samples.last().copied(), Some(FULL_PROGRESS));
}

#[tokio::test(start_paused = true)]
async fn switching_views_on_dashboard_notifies_per_action() {
    let mut router = fresh_router();
    router.handle(RouterEvent::EnterPlatform);
    router.wait_until_dashboard().await;

    let mut rx = router.store_mut().subscribe();
    router.store_mut().set_view(ViewId::Neural);
    router.store_mut().set_view(ViewId::Sigma);

    let mut actions = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => actions.push(event.action),
            Err(TryRecvError::Empty) => break,
            Err(other) => panic!("unexpected receive error: {other:?}"),
        }
    }
    assert_eq!(
        actions,
        vec![
            StoreAction::SetView(ViewId::Neural),
            StoreAction::SetView(ViewId::Sigma)
        ]
    );
    assert_eq!(router.store().state().selected_view, ViewId::Sigma);
}

#[tokio::test(start_paused = true)]
async fn unknown_view_leaves_selection_and_observers_untouched() {
    let mut router = fresh_router();
    let mut rx = router.store_mut().subscribe();

    assert!(router.store_mut().select_view("xyzzy").is_err());
    assert_eq!(router.store().state().selected_view, ViewId::Dashboard);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test(start_paused = true)]
async fn evolution_stays_in_bounds_after_boot() {
    let mut router = fresh_router();
    router.handle(RouterEvent::EnterPlatform);
    router.wait_until_dashboard().await;

    for _ in 0..1000 {
        router.store_mut().trigger_evolution();
    }

    let metrics = router.store().state().system_metrics;
    assert!(metrics.network_health <= 1.0);
    assert!(metrics.ethical_compliance <= 1.0);
    assert!(metrics.latency_ms >= 1);
}
