// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use std::process::{Command, Output};
use tweetscope_testkit::FixtureDir;

fn tweetscope(fixture: &FixtureDir, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_tweetscope"))
        .args(args)
        .env("TWEETSCOPE_CONFIG_PATH", fixture.file("absent-config.toml"))
        .env("TWEETSCOPE_DATA_DIR", fixture.path())
        .env_remove("RUST_LOG")
        .output()?;
    Ok(output)
}

#[test]
fn check_reports_dataset_and_missing_artifact() -> Result<()> {
    let fixture = FixtureDir::standard(9)?;
    fixture.remove("stemmed_tweets.csv")?;

    let output = tweetscope(&fixture, &["--check"])?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("(9 rows, 7 columns)"), "stdout: {stdout}");
    assert!(stdout.contains("cleaned tweets: ok"));
    assert!(
        stdout.contains("stemmed tweets: stemmed tweets artifact is unavailable"),
        "stdout: {stdout}"
    );
    Ok(())
}

#[test]
fn check_fails_without_dataset() -> Result<()> {
    let fixture = FixtureDir::new()?;
    let output = tweetscope(&fixture, &["--check"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("labeled_data.csv"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn dump_json_serializes_active_tab_only() -> Result<()> {
    let fixture = FixtureDir::standard(6)?;
    let output = tweetscope(&fixture, &["--dump", "distribution/pie", "--json"])?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let view: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(view["descriptor"]["view"], "distribution");
    assert_eq!(view["descriptor"]["layout"]["active"], 1);
    let sections = view["sections"].as_array().map(Vec::len);
    assert_eq!(sections, Some(1));
    assert_eq!(view["sections"][0]["body"]["type"], "chart");
    assert_eq!(view["sections"][0]["body"]["value"]["kind"], "pie");
    Ok(())
}

#[test]
fn dump_text_of_home_prints_introduction() -> Result<()> {
    let fixture = FixtureDir::standard(3)?;
    let output = tweetscope(&fixture, &["--dump", "home"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("Introduction\n\n---"));
    assert!(stdout.contains("Davidson"));
    Ok(())
}

#[test]
fn print_example_config_is_versioned() -> Result<()> {
    let fixture = FixtureDir::new()?;
    let output = tweetscope(&fixture, &["--print-example-config"])?;
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("version = 1"));
    Ok(())
}
