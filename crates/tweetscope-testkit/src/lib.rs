// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DATASET_HEADER: [&str; 7] = [
    "",
    "count",
    "hate_speech",
    "offensive_language",
    "neither",
    "class",
    "tweet",
];

const TWEETS: [&str; 12] = [
    "!!! RT @mayasolovely: As a woman you shouldn't complain about cleaning up your house. &amp; as a man you should always take the trash out...",
    "!!!!! RT @mleew17: boy dats cold...tyga dwn bad for cuffin dat hoe in the 1st place!!",
    "\" momma said no pussy cats inside my doghouse\"",
    "RT @JimLeyland: Just had a great day at the ballpark, rain delay and all",
    "Watching the game tonight, anyone got a spare ticket?\nDM me",
    "@user why are you so trash at this game lol",
    "Birds are chirping, coffee is hot, good morning everyone",
    "these trolls again, block and move on #annoyed",
    "Nothing beats a Sunday drive with the windows down",
    "RT @news: Local bakery wins state award for best sourdough",
    "stop posting that garbage, \"experts\" my foot",
    "Finished reading a great book on birds of the Pacific Northwest",
];

// Weighted toward offensive language, as in the labeled dataset.
const CLASS_PATTERN: [i64; 12] = [2, 1, 1, 2, 1, 1, 2, 0, 1, 2, 1, 1];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRow {
    pub count: i64,
    pub hate_speech: i64,
    pub offensive_language: i64,
    pub neither: i64,
    pub class: i64,
    pub tweet: String,
}

impl FixtureRow {
    fn votes_for(class: i64, count: i64) -> (i64, i64, i64) {
        match class {
            0 => (count - 1, 1, 0),
            1 => (0, count - 1, 1),
            _ => (0, 0, count),
        }
    }
}

/// Deterministic rows cycling through sample tweets and class labels.
pub fn sample_rows(len: usize) -> Vec<FixtureRow> {
    (0..len)
        .map(|index| {
            let class = CLASS_PATTERN[index % CLASS_PATTERN.len()];
            let count = 3 + (index % 4) as i64 * 3;
            let (hate_speech, offensive_language, neither) = FixtureRow::votes_for(class, count);
            FixtureRow {
                count,
                hate_speech,
                offensive_language,
                neither,
                class,
                tweet: TWEETS[index % TWEETS.len()].to_owned(),
            }
        })
        .collect()
}

/// Rows with the given class labels, for tests that need exact counts.
pub fn rows_with_classes(classes: &[i64]) -> Vec<FixtureRow> {
    classes
        .iter()
        .enumerate()
        .map(|(index, class)| {
            let (hate_speech, offensive_language, neither) = FixtureRow::votes_for(*class, 3);
            FixtureRow {
                count: 3,
                hate_speech,
                offensive_language,
                neither,
                class: *class,
                tweet: TWEETS[index % TWEETS.len()].to_owned(),
            }
        })
        .collect()
}

/// A temporary data directory holding a labeled dataset and, optionally,
/// preprocessing artifacts.
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create fixture directory")?;
        Ok(Self { dir })
    }

    /// Dataset plus cleaned, stemmed and tokenized artifacts of matching size.
    pub fn standard(len: usize) -> Result<Self> {
        let fixture = Self::new()?;
        let rows = sample_rows(len);
        fixture.write_dataset(&rows)?;
        fixture.write_standard_artifacts(&rows)?;
        Ok(fixture)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_dataset(&self, rows: &[FixtureRow]) -> Result<PathBuf> {
        let path = self.file("labeled_data.csv");
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("create {}", path.display()))?;
        writer.write_record(DATASET_HEADER)?;
        for (index, row) in rows.iter().enumerate() {
            writer.write_record([
                index.to_string(),
                row.count.to_string(),
                row.hate_speech.to_string(),
                row.offensive_language.to_string(),
                row.neither.to_string(),
                row.class.to_string(),
                row.tweet.clone(),
            ])?;
        }
        writer.flush()?;
        Ok(path)
    }

    /// Single-column artifact file with a leading unnamed index column.
    pub fn write_artifact(&self, file_name: &str, column: &str, values: &[String]) -> Result<PathBuf> {
        let path = self.file(file_name);
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("create {}", path.display()))?;
        writer.write_record(["", column])?;
        for (index, value) in values.iter().enumerate() {
            writer.write_record([index.to_string(), value.clone()])?;
        }
        writer.flush()?;
        Ok(path)
    }

    pub fn write_standard_artifacts(&self, rows: &[FixtureRow]) -> Result<()> {
        let cleaned = rows.iter().map(|row| clean(&row.tweet)).collect::<Vec<_>>();
        let stemmed = cleaned.iter().map(|tweet| stem(tweet)).collect::<Vec<_>>();
        let tokenized = stemmed
            .iter()
            .map(|tweet| tokenize(tweet))
            .collect::<Vec<_>>();

        self.write_artifact("cleaned_tweets.csv", "tweet", &cleaned)?;
        self.write_artifact("stemmed_tweets.csv", "tweet", &stemmed)?;
        self.write_artifact("tokenized_tweets.csv", "tweet", &tokenized)?;
        Ok(())
    }

    pub fn write_raw(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.file(file_name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn remove(&self, file_name: &str) -> Result<()> {
        let path = self.file(file_name);
        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))
    }
}

// Fixture stand-ins for the external preprocessing job's outputs; only the
// shape of the files matters to the dashboard.
fn clean(tweet: &str) -> String {
    tweet
        .split_whitespace()
        .filter(|word| !word.starts_with('@') && *word != "RT" && !word.starts_with("http"))
        .map(|word| {
            word.chars()
                .filter(|ch| ch.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn stem(tweet: &str) -> String {
    tweet
        .split_whitespace()
        .map(|word| {
            ["ing", "ed", "s"]
                .iter()
                .find_map(|suffix| {
                    word.strip_suffix(suffix)
                        .filter(|stem| stem.len() >= 3)
                })
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokenize(tweet: &str) -> String {
    let tokens = tweet
        .split_whitespace()
        .map(|word| format!("'{word}'"))
        .collect::<Vec<_>>();
    format!("[{}]", tokens.join(", "))
}
