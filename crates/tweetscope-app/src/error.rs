// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

use crate::{TabKey, ViewKey};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("unknown view key {0:?}")]
    UnknownViewKey(String),
    #[error("view \"{view}\" has no tab {tab:?}")]
    UnknownTabKey { view: ViewKey, tab: String },
    #[error("view \"{0}\" has no tabs")]
    NoTabs(ViewKey),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("menu definition needs at least one entry")]
    Empty,
    #[error("duplicate view key \"{0}\" in menu definition")]
    DuplicateViewKey(ViewKey),
    #[error("duplicate tab key \"{tab}\" in view \"{view}\"")]
    DuplicateTabKey { view: ViewKey, tab: TabKey },
}

/// Failures raised while producing section content from the data source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("{artifact} artifact is unavailable at {path}")]
    MissingArtifact { artifact: String, path: String },
    #[error("dataset has no rows")]
    EmptyDataset,
    #[error("dataset {path} has no {column:?} column")]
    MissingColumn { path: String, column: String },
    #[error("{artifact} artifact has {actual} rows; expected {expected} to match the dataset")]
    ArtifactSizeMismatch {
        artifact: String,
        expected: usize,
        actual: usize,
    },
    #[error("read {path}: {message}")]
    Io { path: String, message: String },
    #[error("parse {path}: {message}")]
    Parse { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::{ContentError, RouterError};
    use crate::ViewKey;

    #[test]
    fn router_errors_name_the_offending_key() {
        let unknown = RouterError::UnknownViewKey("missing".to_owned());
        assert_eq!(unknown.to_string(), "unknown view key \"missing\"");

        let no_tabs = RouterError::NoTabs(ViewKey::from("home"));
        assert_eq!(no_tabs.to_string(), "view \"home\" has no tabs");
    }

    #[test]
    fn size_mismatch_reports_both_counts() {
        let error = ContentError::ArtifactSizeMismatch {
            artifact: "stemmed tweets".to_owned(),
            expected: 12,
            actual: 11,
        };
        let message = error.to_string();
        assert!(message.contains("11 rows"));
        assert!(message.contains("expected 12"));
    }
}
