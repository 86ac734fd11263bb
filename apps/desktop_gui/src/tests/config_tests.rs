use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_use_a_tick_within_fifty_milliseconds() {
    let settings = Settings::default();
    assert!(settings.tick_interval <= MAX_TICK_INTERVAL);
    assert_eq!(settings.log_filter, "info");
    assert_eq!(settings.nav_breakpoint, DEFAULT_NAV_BREAKPOINT);
}

#[test]
fn reads_values_from_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("synth3sis.toml");
    fs::write(
        &path,
        "tick_ms = 40\nlog = \"platform_core=debug\"\nnav_breakpoint = \"900\"\n",
    )
    .expect("write settings");

    let mut settings = Settings::default();
    let mut problems = Vec::new();
    apply_file_overrides(&mut settings, &path, false, &mut problems);

    assert!(problems.is_empty());
    assert_eq!(settings.tick_interval, Duration::from_millis(40));
    assert_eq!(settings.log_filter, "platform_core=debug");
    assert_eq!(settings.nav_breakpoint, 900.0);
}

#[test]
fn missing_settings_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = Settings::default();
    let mut problems = Vec::new();
    apply_file_overrides(&mut settings, &dir.path().join("absent.toml"), false, &mut problems);

    assert_eq!(settings, Settings::default());
    assert!(problems.is_empty());
}

#[test]
fn malformed_settings_file_is_reported_and_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("synth3sis.toml");
    fs::write(&path, "tick_ms = [unclosed").expect("write settings");

    let mut settings = Settings::default();
    let mut problems = Vec::new();
    apply_file_overrides(&mut settings, &path, false, &mut problems);

    assert_eq!(settings, Settings::default());
    assert_eq!(problems.len(), 1);
}

#[test]
fn environment_overrides_file_and_clamps_tick() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[("APP__TICK_MS", "500"), ("SYNTH3SIS_LOG", "debug")]),
    );

    assert_eq!(settings.tick_interval, MAX_TICK_INTERVAL);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn invalid_values_are_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("SYNTH3SIS_TICK_MS", "fast"),
            ("SYNTH3SIS_LOG", "   "),
            ("APP__NAV_BREAKPOINT", "NaN"),
        ]),
    );

    assert_eq!(settings, Settings::default());
}

#[test]
fn cli_flags_win_over_everything() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, env_from(&[("APP__TICK_MS", "10")]));

    let cli = Cli::parse_from(["synth3sis", "--tick-ms", "20", "--nav-breakpoint", "100"]);
    apply_cli_overrides(&mut settings, &cli);

    assert_eq!(settings.tick_interval, Duration::from_millis(20));
    assert_eq!(settings.nav_breakpoint, MIN_NAV_BREAKPOINT);
}

#[test]
fn missing_file_named_on_the_command_line_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    let cli = Cli {
        config: Some(path.clone()),
        ..Cli::default()
    };

    let (_, problems) = load_settings(&cli);

    assert_eq!(problems.len(), 1);
    assert!(problems[0].contains(&path.display().to_string()));
}

#[test]
fn unreadable_default_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = Settings::default();
    let mut problems = Vec::new();

    // A directory exists but cannot be read as a file.
    apply_file_overrides(&mut settings, dir.path(), false, &mut problems);

    assert_eq!(settings, Settings::default());
    assert_eq!(problems.len(), 1);
    assert!(problems[0].starts_with("could not read"));
}
