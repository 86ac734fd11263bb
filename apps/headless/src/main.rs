use std::{
    io::{self, Write},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use platform_core::{boot_sequence, RouterEvent, ScreenRouter, Store, StoreState};
use serde::Serialize;
use shared::domain::Screen;
use tracing_subscriber::EnvFilter;

/// Walks landing -> loading -> dashboard without a window and prints the result.
#[derive(Parser, Debug, Default)]
#[command(name = "synth3sis-headless", version)]
struct Args {
    /// Loading progress tick in milliseconds (1-50).
    #[arg(long)]
    tick_ms: Option<u64>,
    /// View to select once the dashboard is reached.
    #[arg(long)]
    view: Option<String>,
    /// Number of evolutions to trigger on the dashboard.
    #[arg(long, default_value_t = 0)]
    evolve: u32,
    /// Print the final snapshot as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    screen: Screen,
    state: StoreState,
}

async fn run(args: &Args, out: &mut impl Write) -> Result<Report> {
    let mut loader = boot_sequence().context("boot sequence is invalid")?;
    if let Some(ms) = args.tick_ms {
        loader = loader.with_tick_interval(Duration::from_millis(ms));
    }
    let mut router = ScreenRouter::new(Store::new(), loader);

    router.handle(RouterEvent::EnterPlatform);
    let mut progress = router.loader().subscribe();
    let mut last_step = None;
    loop {
        let state = *progress.borrow_and_update();
        if !args.json && state.is_running() && last_step != Some(state.step_index) {
            last_step = Some(state.step_index);
            if let Some(step) = router.loader().steps().get(state.step_index) {
                writeln!(
                    out,
                    "[{}/{}] {}",
                    state.step_index + 1,
                    router.loader().steps().len(),
                    step.label
                )?;
            }
        }
        if !state.is_running() {
            if !args.json {
                writeln!(out, "{}", state.percent_label())?;
            }
            break;
        }
        if progress.changed().await.is_err() {
            break;
        }
    }

    let screen = router.wait_until_dashboard().await;
    if screen == Screen::Dashboard {
        if let Some(raw) = &args.view {
            if let Err(err) = router.store_mut().select_view(raw) {
                tracing::warn!(%err, "keeping current view");
            }
        }
        for _ in 0..args.evolve {
            router.store_mut().trigger_evolution();
        }
    }

    Ok(Report {
        screen: router.screen(),
        state: router.store().state().clone(),
    })
}

fn print_summary(report: &Report, out: &mut impl Write) -> io::Result<()> {
    let state = &report.state;
    let metrics = state.system_metrics;
    writeln!(out, "screen:             {}", report.screen)?;
    writeln!(out, "view:               {}", state.selected_view.as_str())?;
    writeln!(out, "agents online:      {}", state.agents.len())?;
    writeln!(out, "network health:     {:.1}%", metrics.network_health * 100.0)?;
    writeln!(out, "latency:            {}ms", metrics.latency_ms)?;
    writeln!(out, "ethical compliance: {:.1}%", metrics.ethical_compliance * 100.0)?;
    writeln!(out, "generation:         {}", state.generation)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = run(&args, &mut out).await?;
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        print_summary(&report, &mut out)?;
    }
    Ok(())
}
