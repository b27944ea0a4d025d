//! Tests for command-line parsing and configuration precedence.

use clap::Parser;
use std::collections::HashMap;
use storybook_core::StorybookSettings;
use storybook_error::StorybookErrorKind;
use storybook_mcp::{Cli, parse_env_flag};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("storybook-mcp").chain(args.iter().copied())).unwrap()
}

#[test]
fn flags_parse() {
    let cli = cli(&["--api-key", "k", "--save-to-desktop", "--debug", "--config", "extra.toml"]);
    assert_eq!(cli.api_key.as_deref(), Some("k"));
    assert!(cli.save_to_desktop);
    assert!(cli.debug);
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("extra.toml")));
}

#[test]
fn cli_key_overrides_env_key() -> anyhow::Result<()> {
    let config = cli(&["--api-key", "from-cli"]).resolve(
        env(&[("GEMINI_API_KEY", "from-env")]),
        StorybookSettings::default(),
        "/work",
    )?;
    assert_eq!(config.api_key(), "from-cli");
    Ok(())
}

#[test]
fn env_supplies_key_and_flags() -> anyhow::Result<()> {
    let config = cli(&[]).resolve(
        env(&[
            ("GEMINI_API_KEY", "from-env"),
            ("SAVE_TO_DESKTOP", "TRUE"),
            ("DEBUG", "True"),
        ]),
        StorybookSettings::default(),
        "/work",
    )?;
    assert_eq!(config.api_key(), "from-env");
    assert!(*config.save_to_desktop());
    assert!(*config.debug());
    assert_eq!(config.working_dir(), std::path::Path::new("/work"));
    Ok(())
}

#[test]
fn flags_default_to_false() -> anyhow::Result<()> {
    let config = cli(&[]).resolve(
        env(&[("GEMINI_API_KEY", "k"), ("SAVE_TO_DESKTOP", "yes please")]),
        StorybookSettings::default(),
        "/work",
    )?;
    assert!(!*config.save_to_desktop());
    assert!(!*config.debug());
    Ok(())
}

#[test]
fn explicit_flag_wins_over_env_false() -> anyhow::Result<()> {
    let config = cli(&["--save-to-desktop"]).resolve(
        env(&[("GEMINI_API_KEY", "k"), ("SAVE_TO_DESKTOP", "false")]),
        StorybookSettings::default(),
        "/work",
    )?;
    assert!(*config.save_to_desktop());
    Ok(())
}

#[test]
fn missing_key_is_config_error() {
    let err = cli(&[])
        .resolve(env(&[]), StorybookSettings::default(), "/work")
        .unwrap_err();
    assert!(matches!(err.kind(), StorybookErrorKind::Config(_)));

    let err = cli(&[])
        .resolve(env(&[("GEMINI_API_KEY", "  ")]), StorybookSettings::default(), "/work")
        .unwrap_err();
    assert!(matches!(err.kind(), StorybookErrorKind::Config(_)));
}

#[test]
fn help_and_version_need_no_key() {
    for flag in ["--help", "--version"] {
        let err = Cli::try_parse_from(["storybook-mcp", flag]).unwrap_err();
        assert!(matches!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
        ));
    }
}

#[test]
fn env_flags_are_case_insensitive_booleans() {
    assert_eq!(parse_env_flag("true"), Some(true));
    assert_eq!(parse_env_flag("FALSE"), Some(false));
    assert_eq!(parse_env_flag(" True "), Some(true));
    assert_eq!(parse_env_flag("1"), None);
}
