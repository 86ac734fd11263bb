//! Startup settings: defaults, then `synth3sis.toml`, then environment, then CLI flags.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use platform_core::loading::{DEFAULT_TICK_INTERVAL, MAX_TICK_INTERVAL, MIN_TICK_INTERVAL};

pub const DEFAULT_CONFIG_FILE: &str = "synth3sis.toml";
pub const DEFAULT_NAV_BREAKPOINT: f32 = 768.0;
const MIN_NAV_BREAKPOINT: f32 = 320.0;
const MAX_NAV_BREAKPOINT: f32 = 2560.0;

#[derive(Parser, Debug, Default)]
#[command(name = "synth3sis", version, about = "Synth3sis cognitive platform demo")]
pub struct Cli {
    /// Loading progress tick in milliseconds (1-50).
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// tracing filter directive, e.g. `info` or `platform_core=debug`.
    #[arg(long)]
    pub log: Option<String>,
    /// Window width below which the compact navigation is used.
    #[arg(long)]
    pub nav_breakpoint: Option<f32>,
    /// Settings file to read instead of `synth3sis.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tick_interval: Duration,
    pub log_filter: String,
    pub nav_breakpoint: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            log_filter: "info".into(),
            nav_breakpoint: DEFAULT_NAV_BREAKPOINT,
        }
    }
}

impl Settings {
    fn set_tick_ms(&mut self, raw: &str) {
        if let Ok(ms) = raw.trim().parse::<u64>() {
            self.tick_interval =
                Duration::from_millis(ms).clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL);
        }
    }

    fn set_log_filter(&mut self, raw: &str) {
        let raw = raw.trim();
        if !raw.is_empty() {
            self.log_filter = raw.to_string();
        }
    }

    fn set_nav_breakpoint(&mut self, raw: &str) {
        if let Ok(width) = raw.trim().parse::<f32>() {
            if width.is_finite() {
                self.nav_breakpoint = width.clamp(MIN_NAV_BREAKPOINT, MAX_NAV_BREAKPOINT);
            }
        }
    }
}

/// Resolves settings and returns them with any problems found on the way;
/// those are logged by the caller once tracing is installed.
pub fn load_settings(cli: &Cli) -> (Settings, Vec<String>) {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut settings = Settings::default();
    let mut problems = Vec::new();
    apply_file_overrides(&mut settings, &path, cli.config.is_some(), &mut problems);
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    apply_cli_overrides(&mut settings, cli);
    (settings, problems)
}

/// A missing default file is normal; a missing file named with `--config`
/// and any other read failure are reported.
fn apply_file_overrides(
    settings: &mut Settings,
    path: &Path,
    explicit: bool,
    problems: &mut Vec<String>,
) {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !explicit => return,
        Err(err) => {
            problems.push(format!("could not read {}: {err}", path.display()));
            return;
        }
    };
    match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.get("tick_ms").and_then(value_text) {
                settings.set_tick_ms(&v);
            }
            if let Some(v) = file_cfg.get("log").and_then(value_text) {
                settings.set_log_filter(&v);
            }
            if let Some(v) = file_cfg.get("nav_breakpoint").and_then(value_text) {
                settings.set_nav_breakpoint(&v);
            }
        }
        Err(err) => problems.push(format!("ignoring malformed {}: {err}", path.display())),
    }
}

fn value_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(text) => Some(text.clone()),
        toml::Value::Integer(number) => Some(number.to_string()),
        toml::Value::Float(number) => Some(number.to_string()),
        _ => None,
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for name in ["SYNTH3SIS_TICK_MS", "APP__TICK_MS"] {
        if let Some(v) = lookup(name) {
            settings.set_tick_ms(&v);
        }
    }
    for name in ["SYNTH3SIS_LOG", "APP__LOG"] {
        if let Some(v) = lookup(name) {
            settings.set_log_filter(&v);
        }
    }
    if let Some(v) = lookup("APP__NAV_BREAKPOINT") {
        settings.set_nav_breakpoint(&v);
    }
}

fn apply_cli_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(ms) = cli.tick_ms {
        settings.set_tick_ms(&ms.to_string());
    }
    if let Some(filter) = &cli.log {
        settings.set_log_filter(filter);
    }
    if let Some(width) = cli.nav_breakpoint {
        settings.set_nav_breakpoint(&width.to_string());
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
