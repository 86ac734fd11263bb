mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use platform_core::{boot_sequence, ScreenRouter, Store};
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::runtime::TimerRuntime,
    config::{load_settings, Cli},
    ui::Synth3sisApp,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (settings, problems) = load_settings(&cli);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    for problem in &problems {
        tracing::warn!("{problem}");
    }
    tracing::info!(
        tick_ms = settings.tick_interval.as_millis() as u64,
        nav_breakpoint = settings.nav_breakpoint,
        "starting synth3sis"
    );

    let timers = TimerRuntime::launch()?;
    let loader = boot_sequence()
        .context("boot sequence is invalid")?
        .with_tick_interval(settings.tick_interval)
        .with_runtime(timers.handle());
    let router = ScreenRouter::new(Store::new(), loader);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Synth3sis")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([360.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Synth3sis",
        options,
        Box::new(move |_cc| Ok(Box::new(Synth3sisApp::new(router, &settings, timers)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop window failed: {err}"))
}
