// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use logging::LogTarget;
use runtime::DatasetRuntime;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use tweetscope_app::{AppState, MenuDefinition, RenderedView, ViewRouter};
use tweetscope_data::DataSource;
use tweetscope_tui::UiOptions;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `tweetscope --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let data_dir = match &options.data_dir {
        Some(dir) => {
            config::validate_data_dir(&dir.to_string_lossy())?;
            dir.clone()
        }
        None => config.data_dir()?,
    };

    let log_target = if options.check_only || options.dump.is_some() {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_file()?)
    };
    logging::init(&config.log_level(), &log_target)?;
    tracing::info!(
        config = %options.config_path.display(),
        data_dir = %data_dir.display(),
        "starting"
    );

    let source = DataSource::new(&data_dir, config.data_files());
    let menu = MenuDefinition::dashboard()?;
    let router = match config.default_view() {
        Some(view) => ViewRouter::with_default(menu, view)?,
        None => ViewRouter::new(menu),
    };

    if options.check_only {
        return run_check(&options, &source);
    }

    let mut runtime = DatasetRuntime::new(source, config.preview_rows());
    if let Some(target) = &options.dump {
        let view = render_dump(router, &mut runtime, target)?;
        if options.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&view).context("serialize view")?
            );
        } else {
            println!("{}", tweetscope_tui::render_view_text(&view));
        }
        return Ok(());
    }

    let mut state = AppState::new(router);
    tweetscope_tui::run_app(
        &mut state,
        &mut runtime,
        UiOptions {
            show_icons: config.show_icons(),
        },
    )
}

#[derive(Debug, Serialize)]
struct CheckReport {
    config: String,
    data_dir: String,
    dataset: String,
    rows: usize,
    columns: usize,
    sha256: String,
    artifacts: Vec<ArtifactStatus>,
}

#[derive(Debug, Serialize)]
struct ArtifactStatus {
    artifact: &'static str,
    path: String,
    error: Option<String>,
}

/// The primary dataset must load; missing artifacts are reported but only
/// affect their own tab, so they do not fail the check.
fn run_check(options: &CliOptions, source: &DataSource) -> Result<()> {
    let report = source.check().with_context(|| {
        format!(
            "load dataset {}; set [data].dir, {} or --data-dir",
            source.dataset_path().display(),
            config::DATA_DIR_ENV
        )
    })?;

    let artifacts = report
        .artifacts
        .iter()
        .map(|(kind, result)| ArtifactStatus {
            artifact: kind.label(),
            path: source.artifact_path(*kind).display().to_string(),
            error: result.as_ref().err().map(ToString::to_string),
        })
        .collect::<Vec<_>>();
    for error in report.missing_artifacts() {
        tracing::warn!(%error, "artifact unavailable");
    }

    let summary = CheckReport {
        config: options.config_path.display().to_string(),
        data_dir: source.dir().display().to_string(),
        dataset: source.dataset_path().display().to_string(),
        rows: report.rows,
        columns: report.columns,
        sha256: report.sha256,
        artifacts,
    };
    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serialize check report")?
        );
    } else {
        print!("{}", render_check_text(&summary));
    }
    Ok(())
}

fn render_check_text(report: &CheckReport) -> String {
    let mut out = format!(
        "config: {}\ndata: {}\ndataset: {} ({} rows, {} columns)\nsha256: {}\n",
        report.config, report.data_dir, report.dataset, report.rows, report.columns, report.sha256
    );
    for artifact in &report.artifacts {
        match &artifact.error {
            None => out.push_str(&format!("{}: ok ({})\n", artifact.artifact, artifact.path)),
            Some(error) => out.push_str(&format!("{}: {error}\n", artifact.artifact)),
        }
    }
    out
}

/// Renders one view, optionally on a given tab, the way the UI would show it.
fn render_dump(
    mut router: ViewRouter,
    runtime: &mut DatasetRuntime,
    target: &str,
) -> Result<RenderedView> {
    let (view, tab) = parse_dump_target(target)?;
    let mut descriptor = router.select(view)?;
    if let Some(tab) = tab {
        descriptor = router.activate_tab(tab)?;
    }
    Ok(descriptor.render(runtime))
}

fn parse_dump_target(target: &str) -> Result<(&str, Option<&str>)> {
    let (view, tab) = match target.split_once('/') {
        Some((view, tab)) => (view, Some(tab)),
        None => (target, None),
    };
    if view.is_empty() || tab.is_some_and(str::is_empty) {
        anyhow::bail!("--dump expects <view> or <view>/<tab>, got {target:?}");
    }
    Ok((view, tab))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    data_dir: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    dump: Option<String>,
    json: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        data_dir: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        dump: None,
        json: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--data-dir" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--data-dir requires a directory path"))?;
                options.data_dir = Some(PathBuf::from(value.as_ref()));
            }
            "--dump" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow::anyhow!("--dump requires a view key, for example --dump distribution/pie")
                })?;
                options.dump = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--json" => {
                options.json = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.json && !options.check_only && options.dump.is_none() {
        anyhow::bail!("--json only applies to --check or --dump");
    }
    Ok(options)
}

fn print_help() {
    println!("tweetscope: hate speech dataset dashboard");
    println!("  --config <path>          Use a specific config path");
    println!("  --data-dir <path>        Read the dataset and preprocessing outputs from <path>");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config, menu and dataset, then exit");
    println!("  --dump <view>[/<tab>]    Render one view to stdout and exit");
    println!("  --json                   Emit --check or --dump output as JSON");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args, parse_dump_target, render_dump};
    use crate::runtime::DatasetRuntime;
    use anyhow::Result;
    use std::path::PathBuf;
    use tweetscope_app::{MenuDefinition, NoticeKind, SectionBody, ViewRouter};
    use tweetscope_data::{DataFiles, DataSource};
    use tweetscope_testkit::FixtureDir;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/tweetscope-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                data_dir: None,
                print_config_path: false,
                print_example: false,
                check_only: false,
                dump: None,
                json: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_and_data_dir_overrides() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml", "--data-dir", "/srv/tweets"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        assert_eq!(options.data_dir, Some(PathBuf::from("/srv/tweets")));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        for (flag, expected) in [
            ("--config", "--config requires a file path"),
            ("--data-dir", "--data-dir requires a directory path"),
            ("--dump", "--dump requires a view key"),
        ] {
            let error = parse_cli_args(vec![flag], default_options_path())
                .expect_err("missing value should fail");
            assert!(error.to_string().contains(expected), "{flag}: {error}");
        }
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_dump_and_json() -> Result<()> {
        let options = parse_cli_args(
            vec!["--dump", "distribution/pie", "--json"],
            default_options_path(),
        )?;
        assert_eq!(options.dump.as_deref(), Some("distribution/pie"));
        assert!(options.json);
        assert!(!options.check_only);
        Ok(())
    }

    #[test]
    fn json_without_check_or_dump_is_rejected() {
        let error = parse_cli_args(vec!["--json"], default_options_path())
            .expect_err("bare --json should fail");
        assert!(error.to_string().contains("--check or --dump"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn dump_target_splits_view_and_tab() -> Result<()> {
        assert_eq!(parse_dump_target("home")?, ("home", None));
        assert_eq!(
            parse_dump_target("preview/missing")?,
            ("preview", Some("missing"))
        );
        assert!(parse_dump_target("/pie").is_err());
        assert!(parse_dump_target("distribution/").is_err());
        Ok(())
    }

    #[test]
    fn dump_renders_requested_tab() -> Result<()> {
        let fixture = FixtureDir::standard(8)?;
        let mut runtime =
            DatasetRuntime::new(DataSource::new(fixture.path(), DataFiles::default()), 3);
        let router = ViewRouter::new(MenuDefinition::dashboard()?);

        let view = render_dump(router, &mut runtime, "preview/missing")?;
        assert_eq!(view.descriptor.active_tab_index(), Some(3));
        assert!(matches!(view.sections[0].body, SectionBody::Table(_)));
        Ok(())
    }

    #[test]
    fn dump_of_unknown_view_fails() -> Result<()> {
        let fixture = FixtureDir::standard(2)?;
        let mut runtime =
            DatasetRuntime::new(DataSource::new(fixture.path(), DataFiles::default()), 3);
        let router = ViewRouter::new(MenuDefinition::dashboard()?);

        let error = render_dump(router, &mut runtime, "charts").expect_err("unknown view");
        assert!(error.to_string().contains("unknown view key \"charts\""));
        Ok(())
    }

    #[test]
    fn dump_of_missing_artifact_is_an_inline_notice() -> Result<()> {
        let fixture = FixtureDir::standard(4)?;
        fixture.remove("tokenized_tweets.csv")?;
        let mut runtime =
            DatasetRuntime::new(DataSource::new(fixture.path(), DataFiles::default()), 3);
        let router = ViewRouter::new(MenuDefinition::dashboard()?);

        let view = render_dump(router, &mut runtime, "preprocessing/tokenized")?;
        assert_eq!(
            view.sections[0].body.notice_kind(),
            Some(NoticeKind::MissingArtifact)
        );
        Ok(())
    }
}
