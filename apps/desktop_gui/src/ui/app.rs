use std::{sync::Arc, time::Duration};

use crossbeam_channel::{bounded, Receiver, Sender};
use eframe::egui;
use platform_core::ScreenRouter;
use shared::{
    domain::Screen,
    loading::{LoadPhase, LoadStep},
};

use crate::{
    backend_bridge::runtime::TimerRuntime,
    config::Settings,
    controller::{
        events::{UiError, UiErrorContext, UiIntent},
        orchestration::dispatch_intent,
        reducer::{apply_intent, NavState, Outcome},
    },
    ui::{
        landing::show_landing,
        loading_screen::show_loading,
        panels::PanelRegistry,
        shell::{show_dashboard, NavLayout},
        theme::{visuals_for_palette, Palette},
    },
};

const INTENT_QUEUE_CAPACITY: usize = 64;
const IDLE_REPAINT: Duration = Duration::from_millis(100);

pub struct Synth3sisApp {
    router: ScreenRouter,
    registry: PanelRegistry,
    nav: NavState,
    palette: Palette,
    visuals_applied: bool,
    steps: Arc<[LoadStep]>,
    tick_interval: Duration,
    nav_breakpoint: f32,
    intent_tx: Sender<UiIntent>,
    intent_rx: Receiver<UiIntent>,
    status: Option<UiError>,
    // Dropped last so armed timers are cancelled after the router lets go.
    _timers: TimerRuntime,
}

impl Synth3sisApp {
    pub fn new(router: ScreenRouter, settings: &Settings, timers: TimerRuntime) -> Self {
        let (intent_tx, intent_rx) = bounded(INTENT_QUEUE_CAPACITY);
        let steps: Arc<[LoadStep]> = Arc::from(router.loader().steps());
        Self {
            router,
            registry: PanelRegistry::new(),
            nav: NavState::default(),
            palette: Palette::default(),
            visuals_applied: false,
            steps,
            tick_interval: settings.tick_interval,
            nav_breakpoint: settings.nav_breakpoint,
            intent_tx,
            intent_rx,
            status: None,
            _timers: timers,
        }
    }

    fn process_intents(&mut self) {
        while let Ok(intent) = self.intent_rx.try_recv() {
            let outcome = apply_intent(&mut self.router, &mut self.nav, intent);
            if outcome == Outcome::Ignored {
                tracing::debug!(intent = intent.name(), "ui intent had no effect");
            }
        }
    }

    fn sync_loading(&mut self) {
        if self.router.sync().is_some() {
            self.nav = NavState::default();
            if self.router.loader().state().phase == LoadPhase::Failed {
                self.status = Some(UiError::new(
                    UiErrorContext::Loading,
                    "Boot sequence could not run its timers; continuing without it",
                ));
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if !self.visuals_applied {
            ctx.set_visuals(visuals_for_palette(self.palette));
            self.visuals_applied = true;
        }
    }

    fn show_status_banner(&mut self, ctx: &egui::Context) {
        let Some(status) = self.status.as_ref() else {
            return;
        };
        let message = status.message().to_owned();
        let mut dismiss = false;
        egui::TopBottomPanel::top("status_banner")
            .frame(
                egui::Frame::NONE
                    .fill(self.palette.accent.gamma_multiply(0.25))
                    .inner_margin(egui::Margin::symmetric(12, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(message).color(self.palette.text));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        dismiss = ui.small_button("✕").clicked();
                    });
                });
            });
        if dismiss {
            self.status = None;
        }
    }

    fn render_screen(&mut self, ctx: &egui::Context) -> Vec<UiIntent> {
        match self.router.screen() {
            Screen::Landing => show_landing(ctx, self.palette).into_iter().collect(),
            Screen::Loading => {
                let state = self.router.loader().state();
                show_loading(ctx, self.palette, &self.steps, state)
                    .into_iter()
                    .collect()
            }
            Screen::Dashboard => {
                let layout = NavLayout::for_width(ctx.available_rect().width(), self.nav_breakpoint);
                if layout == NavLayout::Sidebar {
                    self.nav = NavState::default();
                }
                show_dashboard(
                    ctx,
                    self.palette,
                    self.router.store().state(),
                    &self.registry,
                    self.nav,
                    layout,
                )
            }
        }
    }
}

impl eframe::App for Synth3sisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_intents();
        self.sync_loading();
        self.apply_theme_if_needed(ctx);

        self.show_status_banner(ctx);
        let intents = self.render_screen(ctx);
        if !intents.is_empty() {
            for intent in intents {
                dispatch_intent(&self.intent_tx, intent, &mut self.status);
            }
            ctx.request_repaint();
        }

        if self.router.screen() == Screen::Loading {
            ctx.request_repaint_after(self.tick_interval);
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }
}
