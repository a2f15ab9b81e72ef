// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod summary;

pub use summary::*;

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tweetscope_app::{ClassCounts, ContentError, DatasetRef, TableData};

pub const APP_NAME: &str = "tweetscope";
pub const DATASET_FILE: &str = "labeled_data.csv";
pub const CLASS_COLUMN: &str = "class";
pub const TWEET_COLUMN: &str = "tweet";
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Outputs of the external preprocessing job. Each file is a table with one
/// row per dataset row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Cleaned,
    Stemmed,
    Tokenized,
}

impl ArtifactKind {
    pub const ALL: [Self; 3] = [Self::Cleaned, Self::Stemmed, Self::Tokenized];

    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Cleaned => "cleaned_tweets.csv",
            Self::Stemmed => "stemmed_tweets.csv",
            Self::Tokenized => "tokenized_tweets.csv",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cleaned => "cleaned tweets",
            Self::Stemmed => "stemmed tweets",
            Self::Tokenized => "tokenized tweets",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub dataset: String,
    pub cleaned: String,
    pub stemmed: String,
    pub tokenized: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            dataset: DATASET_FILE.to_owned(),
            cleaned: ArtifactKind::Cleaned.default_file_name().to_owned(),
            stemmed: ArtifactKind::Stemmed.default_file_name().to_owned(),
            tokenized: ArtifactKind::Tokenized.default_file_name().to_owned(),
        }
    }
}

impl DataFiles {
    pub fn artifact(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Cleaned => &self.cleaned,
            ArtifactKind::Stemmed => &self.stemmed,
            ArtifactKind::Tokenized => &self.tokenized,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub sha256: String,
    pub size_bytes: u64,
    pub loaded_at: OffsetDateTime,
}

impl Fingerprint {
    fn of(bytes: &[u8]) -> Self {
        Self {
            sha256: checksum_sha256(bytes),
            size_bytes: bytes.len() as u64,
            loaded_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn short_hash(&self) -> &str {
        &self.sha256[..self.sha256.len().min(12)]
    }

    pub fn loaded_at_label(&self) -> String {
        self.loaded_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.loaded_at.unix_timestamp().to_string())
    }
}

/// A CSV file held in memory. Empty cells are missing values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    path: PathBuf,
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    fingerprint: Fingerprint,
}

impl Dataset {
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self, ContentError> {
        let printable = path.display().to_string();
        let parse_error = |error: csv::Error| ContentError::Parse {
            path: printable.clone(),
            message: error.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);

        let columns = reader
            .headers()
            .map_err(parse_error)?
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let name = name.trim();
                if name.is_empty() {
                    format!("Unnamed: {index}")
                } else {
                    name.to_owned()
                }
            })
            .collect::<Vec<String>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(parse_error)?;
            rows.push(
                record
                    .iter()
                    .map(|cell| (!cell.is_empty()).then(|| cell.to_owned()))
                    .collect(),
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            columns,
            rows,
            fingerprint: Fingerprint::of(bytes),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, ContentError> {
        self.column_index(name)
            .ok_or_else(|| ContentError::MissingColumn {
                path: self.path.display().to_string(),
                column: name.to_owned(),
            })
    }

    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|cell| cell.as_deref()))
    }

    pub fn class_counts(&self) -> Result<ClassCounts, ContentError> {
        let index = self.require_column(CLASS_COLUMN)?;
        Ok(ClassCounts::from_labels(self.column_values(index)))
    }

    /// First `limit` rows with a leading positional index column.
    pub fn head(&self, limit: usize) -> TableData {
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(String::new());
        columns.extend(self.columns.iter().cloned());

        let rows = self
            .rows
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, row)| {
                let mut cells = Vec::with_capacity(row.len() + 1);
                cells.push(index.to_string());
                cells.extend(row.iter().map(display_cell));
                cells
            })
            .collect();
        TableData::new(columns, rows)
    }

    /// Reference to the whole file with a preview of its first rows.
    pub fn preview(&self, limit: usize) -> DatasetRef {
        DatasetRef {
            path: self.path.display().to_string(),
            total_rows: self.row_count(),
            preview: self.head(limit),
        }
    }

    /// Reference to a single column, as shown for the tweet text.
    pub fn column_preview(&self, name: &str, limit: usize) -> Result<DatasetRef, ContentError> {
        let index = self.require_column(name)?;
        let rows = self
            .column_values(index)
            .take(limit)
            .enumerate()
            .map(|(row, value)| vec![row.to_string(), value.unwrap_or_default().to_owned()])
            .collect();
        Ok(DatasetRef {
            path: self.path.display().to_string(),
            total_rows: self.row_count(),
            preview: TableData::new(vec![String::new(), name.to_owned()], rows),
        })
    }
}

pub fn load_dataset(path: &Path) -> Result<Dataset, ContentError> {
    let bytes = fs::read(path).map_err(|error| ContentError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    })?;
    let dataset = Dataset::parse(path, &bytes)?;
    tracing::debug!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        sha256 = dataset.fingerprint().short_hash(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Resolves the labeled dataset and its preprocessing artifacts inside one
/// directory. Every call re-reads the files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    dir: PathBuf,
    files: DataFiles,
}

impl DataSource {
    pub fn new(dir: impl Into<PathBuf>, files: DataFiles) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &DataFiles {
        &self.files
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.dir.join(&self.files.dataset)
    }

    pub fn artifact_path(&self, kind: ArtifactKind) -> PathBuf {
        self.dir.join(self.files.artifact(kind))
    }

    /// Loads the labeled dataset and checks the `class` and `tweet` columns.
    pub fn load_primary(&self) -> Result<Dataset, ContentError> {
        let dataset = load_dataset(&self.dataset_path())?;
        dataset.require_column(CLASS_COLUMN)?;
        dataset.require_column(TWEET_COLUMN)?;
        Ok(dataset)
    }

    pub fn load_artifact(&self, kind: ArtifactKind) -> Result<Dataset, ContentError> {
        let path = self.artifact_path(kind);
        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => load_dataset(&path),
            Ok(_) => Err(missing_artifact(kind, &path)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                Err(missing_artifact(kind, &path))
            }
            Err(error) => Err(ContentError::Io {
                path: path.display().to_string(),
                message: error.to_string(),
            }),
        }
    }

    /// Loads an artifact and checks it lines up row-for-row with `primary`.
    pub fn load_artifact_for(
        &self,
        kind: ArtifactKind,
        primary: &Dataset,
    ) -> Result<Dataset, ContentError> {
        let artifact = self.load_artifact(kind)?;
        if artifact.row_count() != primary.row_count() {
            return Err(ContentError::ArtifactSizeMismatch {
                artifact: kind.label().to_owned(),
                expected: primary.row_count(),
                actual: artifact.row_count(),
            });
        }
        Ok(artifact)
    }

    /// Startup probe: the primary dataset must load; artifacts are reported
    /// individually since each only affects its own section.
    pub fn check(&self) -> Result<DataReport, ContentError> {
        let primary = self.load_primary()?;
        let artifacts = ArtifactKind::ALL
            .into_iter()
            .map(|kind| (kind, self.load_artifact_for(kind, &primary).map(|_| ())))
            .collect();
        Ok(DataReport {
            rows: primary.row_count(),
            columns: primary.column_count(),
            sha256: primary.fingerprint().sha256.clone(),
            artifacts,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataReport {
    pub rows: usize,
    pub columns: usize,
    pub sha256: String,
    pub artifacts: Vec<(ArtifactKind, Result<(), ContentError>)>,
}

impl DataReport {
    pub fn missing_artifacts(&self) -> impl Iterator<Item = &ContentError> {
        self.artifacts
            .iter()
            .filter_map(|(_, result)| result.as_ref().err())
    }
}

fn missing_artifact(kind: ArtifactKind, path: &Path) -> ContentError {
    ContentError::MissingArtifact {
        artifact: kind.label().to_owned(),
        path: path.display().to_string(),
    }
}

fn display_cell(cell: &Option<String>) -> String {
    cell.clone().unwrap_or_else(|| "NaN".to_owned())
}

fn checksum_sha256(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut output = String::with_capacity(64);
    for byte in digest {
        use std::fmt::Write as _;
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}
