// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines go. The interactive UI owns the terminal, so it logs to a
/// file; one-shot commands log to stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// `RUST_LOG` wins over the configured level.
pub fn filter_for(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level {level:?}"))
}

pub fn init(level: &str, target: &LogTarget) -> Result<()> {
    let filter = filter_for(level)?;
    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File(path) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(open_log_file(path)?))
            .with_ansi(false)
            .try_init(),
    };
    installed.map_err(|error| anyhow!("install log subscriber: {error}"))
}

pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}; set [log].file to a writable path", path.display()))
}
