// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ContentError;

pub const CLASS_LABELS: [&str; 3] = ["Hate Speech", "Offensive Language", "Neither"];
pub const DISTRIBUTION_TITLE: &str = "Distribution of Classes";
const PIE_EXPLODE: f64 = 0.1;

/// Majority label assigned by the CrowdFlower coders. The numeric codes are
/// fixed by the dataset and drive every chart's label binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweetClass {
    HateSpeech,
    OffensiveLanguage,
    Neither,
}

impl TweetClass {
    pub const ALL: [Self; 3] = [Self::HateSpeech, Self::OffensiveLanguage, Self::Neither];

    pub const fn code(self) -> u8 {
        match self {
            Self::HateSpeech => 0,
            Self::OffensiveLanguage => 1,
            Self::Neither => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        CLASS_LABELS[self.code() as usize]
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::HateSpeech),
            1 => Some(Self::OffensiveLanguage),
            2 => Some(Self::Neither),
            _ => None,
        }
    }

    /// Accepts the raw cell text of a `class` column (`"1"`, `" 2 "`, `"0.0"`).
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code);
        }
        let float = trimmed.parse::<f64>().ok()?;
        if float.fract() != 0.0 {
            return None;
        }
        Self::from_code(float as i64)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    counts: [u64; 3],
    unrecognized: u64,
}

impl ClassCounts {
    /// Builds counts from `(code, count)` pairs in whatever order the data
    /// source produced them.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, u64)>,
    {
        let mut counts = Self::default();
        for (code, count) in pairs {
            match TweetClass::from_code(code) {
                Some(class) => counts.counts[class.code() as usize] += count,
                None => counts.unrecognized += count,
            }
        }
        counts
    }

    /// Tallies a `class` column. Missing or unparseable cells are counted as
    /// unrecognized rather than dropped silently.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut counts = Self::default();
        for label in labels {
            match label.and_then(TweetClass::parse) {
                Some(class) => counts.record(class),
                None => counts.unrecognized += 1,
            }
        }
        counts
    }

    pub fn record(&mut self, class: TweetClass) {
        self.counts[class.code() as usize] += 1;
    }

    pub fn get(&self, class: TweetClass) -> u64 {
        self.counts[class.code() as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn unrecognized(&self) -> u64 {
        self.unrecognized
    }

    pub fn proportion(&self, class: TweetClass) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.get(class) as f64 / total as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDatum {
    pub class: TweetClass,
    pub label: &'static str,
    pub value: u64,
    pub proportion: f64,
    pub explode: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub data: Vec<ChartDatum>,
    pub unrecognized: u64,
}

impl ChartSpec {
    pub fn bar(counts: &ClassCounts) -> Result<Self, ContentError> {
        Ok(Self {
            kind: ChartKind::Bar,
            title: DISTRIBUTION_TITLE.to_owned(),
            x_label: Some("Class".to_owned()),
            y_label: Some("Frequency".to_owned()),
            data: chart_data(counts, |_| 0.0)?,
            unrecognized: counts.unrecognized(),
        })
    }

    pub fn pie(counts: &ClassCounts) -> Result<Self, ContentError> {
        Ok(Self {
            kind: ChartKind::Pie,
            title: DISTRIBUTION_TITLE.to_owned(),
            x_label: None,
            y_label: None,
            data: chart_data(counts, |class| {
                if class == TweetClass::OffensiveLanguage {
                    PIE_EXPLODE
                } else {
                    0.0
                }
            })?,
            unrecognized: counts.unrecognized(),
        })
    }

    pub fn value_for(&self, class: TweetClass) -> Option<u64> {
        self.data
            .iter()
            .find(|datum| datum.class == class)
            .map(|datum| datum.value)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.data.iter().map(|datum| datum.label).collect()
    }

    pub fn max_value(&self) -> u64 {
        self.data.iter().map(|datum| datum.value).max().unwrap_or(0)
    }
}

fn chart_data(
    counts: &ClassCounts,
    explode: impl Fn(TweetClass) -> f64,
) -> Result<Vec<ChartDatum>, ContentError> {
    if counts.total() == 0 {
        return Err(ContentError::EmptyDataset);
    }

    Ok(TweetClass::ALL
        .into_iter()
        .map(|class| ChartDatum {
            class,
            label: class.label(),
            value: counts.get(class),
            proportion: counts.proportion(class).unwrap_or(0.0),
            explode: explode(class),
        })
        .collect())
}

/// One decimal place, matching the pie chart's slice annotations.
pub fn format_percent(proportion: f64) -> String {
    format!("{:.1}%", proportion * 100.0)
}
