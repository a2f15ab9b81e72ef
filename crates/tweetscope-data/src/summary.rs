// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use std::collections::HashMap;
use tweetscope_app::TableData;

use crate::Dataset;

const DESCRIBE_STATISTICS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dtype {
    Int64,
    Float64,
    Object,
}

impl Dtype {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Object => "object",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }
}

/// Infers a column type from its non-missing cells. A column with no values
/// at all is treated as float, the way NaN-only columns are.
pub fn infer_dtype<'a, I>(values: I) -> Dtype
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut dtype = Dtype::Float64;
    let mut saw_value = false;
    for value in values.into_iter().flatten() {
        let trimmed = value.trim();
        if trimmed.parse::<i64>().is_ok() {
            if !saw_value {
                dtype = Dtype::Int64;
            }
        } else if trimmed.parse::<f64>().is_ok() {
            dtype = Dtype::Float64;
        } else {
            return Dtype::Object;
        }
        saw_value = true;
    }
    dtype
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub dtype: Dtype,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    pub path: String,
    pub sha256: String,
    pub size_bytes: u64,
    pub loaded_at: String,
}

impl DatasetInfo {
    pub fn of(dataset: &Dataset) -> Self {
        let columns = dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(index, name)| ColumnInfo {
                name: name.clone(),
                non_null: dataset.column_values(index).flatten().count(),
                dtype: infer_dtype(dataset.column_values(index)),
            })
            .collect();

        let fingerprint = dataset.fingerprint();
        Self {
            rows: dataset.row_count(),
            columns,
            path: dataset.path().display().to_string(),
            sha256: fingerprint.sha256.clone(),
            size_bytes: fingerprint.size_bytes,
            loaded_at: fingerprint.loaded_at_label(),
        }
    }

    /// Plain-text summary laid out like a DataFrame info dump.
    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();
        if self.rows == 0 {
            lines.push("RangeIndex: 0 entries".to_owned());
        } else {
            lines.push(format!(
                "RangeIndex: {} entries, 0 to {}",
                self.rows,
                self.rows - 1
            ));
        }
        lines.push(format!(
            "Data columns (total {} columns):",
            self.columns.len()
        ));

        let name_width = self
            .columns
            .iter()
            .map(|column| column.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Column".len());
        lines.push(format!(
            " {:<3} {:<name_width$}  {:<14}  Dtype",
            "#", "Column", "Non-Null Count"
        ));
        lines.push(format!(
            " {:<3} {:<name_width$}  {:<14}  -----",
            "---", "------", "--------------"
        ));
        for (index, column) in self.columns.iter().enumerate() {
            lines.push(format!(
                " {:<3} {:<name_width$}  {:<14}  {}",
                index,
                column.name,
                format!("{} non-null", column.non_null),
                column.dtype.as_str()
            ));
        }

        lines.push(format!("dtypes: {}", self.dtype_tally()));
        lines.push(format!("file: {} ({} bytes)", self.path, self.size_bytes));
        lines.push(format!("sha256: {}", self.sha256));
        lines.push(format!("loaded: {}", self.loaded_at));
        lines.join("\n")
    }

    fn dtype_tally(&self) -> String {
        [Dtype::Float64, Dtype::Int64, Dtype::Object]
            .into_iter()
            .filter_map(|dtype| {
                let count = self
                    .columns
                    .iter()
                    .filter(|column| column.dtype == dtype)
                    .count();
                (count > 0).then(|| format!("{}({count})", dtype.as_str()))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Per-column summary statistics. Numeric columns get count, mean, std and
/// quantiles; text columns get count, unique, top and freq.
pub fn describe(dataset: &Dataset) -> TableData {
    let mut columns = vec![String::new()];
    columns.extend(dataset.columns().iter().cloned());

    let stats = (0..dataset.column_count())
        .map(|index| describe_column(dataset, index))
        .collect::<Vec<_>>();

    let rows = DESCRIBE_STATISTICS
        .iter()
        .enumerate()
        .map(|(stat_index, stat)| {
            let mut row = vec![(*stat).to_owned()];
            row.extend(stats.iter().map(|column| column[stat_index].clone()));
            row
        })
        .collect();
    TableData::new(columns, rows)
}

fn describe_column(dataset: &Dataset, index: usize) -> [String; 11] {
    let values = dataset.column_values(index).flatten().collect::<Vec<_>>();
    let count = values.len();
    let mut stats: [String; 11] = Default::default();
    stats[0] = count.to_string();

    if infer_dtype(values.iter().copied().map(Some)).is_numeric() {
        let mut numbers = values
            .iter()
            .filter_map(|value| value.trim().parse::<f64>().ok())
            .collect::<Vec<f64>>();
        numbers.sort_by(f64::total_cmp);
        if let Some(mean) = mean(&numbers) {
            stats[4] = format_stat(mean);
            stats[5] = sample_std(&numbers, mean).map(format_stat).unwrap_or_default();
            stats[6] = format_stat(numbers[0]);
            stats[7] = format_stat(quantile(&numbers, 0.25));
            stats[8] = format_stat(quantile(&numbers, 0.5));
            stats[9] = format_stat(quantile(&numbers, 0.75));
            stats[10] = format_stat(numbers[numbers.len() - 1]);
        }
    } else if count > 0 {
        let (unique, top, freq) = frequency_summary(&values);
        stats[1] = unique.to_string();
        stats[2] = top.to_owned();
        stats[3] = freq.to_string();
    }
    stats
}

/// Distinct count, then the most frequent value (earliest wins ties) and its
/// frequency.
fn frequency_summary<'a>(values: &[&'a str]) -> (usize, &'a str, usize) {
    let mut counts: HashMap<&'a str, (usize, usize)> = HashMap::new();
    for (position, value) in values.iter().enumerate() {
        counts.entry(*value).or_insert((0, position)).0 += 1;
    }

    let mut top = ("", 0usize, usize::MAX);
    for (value, (count, first_seen)) in &counts {
        if *count > top.1 || (*count == top.1 && *first_seen < top.2) {
            top = (*value, *count, *first_seen);
        }
    }
    (counts.len(), top.0, top.1)
}

fn mean(numbers: &[f64]) -> Option<f64> {
    if numbers.is_empty() {
        return None;
    }
    Some(numbers.iter().sum::<f64>() / numbers.len() as f64)
}

fn sample_std(numbers: &[f64], mean: f64) -> Option<f64> {
    if numbers.len() < 2 {
        return None;
    }
    let variance = numbers
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (numbers.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

pub fn format_stat(value: f64) -> String {
    let formatted = format!("{value:.6}");
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_owned()
    }
}

/// Null count per column, in column order.
pub fn missing_values(dataset: &Dataset) -> TableData {
    let rows = dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let missing = dataset
                .column_values(index)
                .filter(|value| value.is_none())
                .count();
            vec![name.clone(), missing.to_string()]
        })
        .collect();
    TableData::new(vec!["column".to_owned(), "missing".to_owned()], rows)
}

#[cfg(test)]
mod tests {
    use super::{
        DatasetInfo, Dtype, describe, format_stat, frequency_summary, infer_dtype,
        missing_values, quantile,
    };
    use crate::Dataset;
    use anyhow::Result;
    use std::path::Path;

    fn sample() -> Result<Dataset> {
        Ok(Dataset::parse(
            Path::new("sample.csv"),
            b"count,score,class,tweet\n3,0.5,1,a\n6,1.5,1,b\n3,,2,a\n9,2.0,0,\n",
        )?)
    }

    #[test]
    fn dtype_inference_promotes_ints_to_floats() {
        assert_eq!(infer_dtype([Some("1"), Some("2")]), Dtype::Int64);
        assert_eq!(infer_dtype([Some("1"), Some("2.5")]), Dtype::Float64);
        assert_eq!(infer_dtype([Some("2.5"), Some("1")]), Dtype::Float64);
        assert_eq!(infer_dtype([Some("1"), Some("rt @user")]), Dtype::Object);
        assert_eq!(infer_dtype([None, None]), Dtype::Float64);
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert_eq!(quantile(&[7.0], 0.75), 7.0);
    }

    #[test]
    fn stats_format_without_trailing_noise() {
        assert_eq!(format_stat(3.0), "3.0");
        assert_eq!(format_stat(2.5), "2.5");
        assert_eq!(format_stat(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn top_value_prefers_first_seen_on_ties() {
        assert_eq!(frequency_summary(&["b", "a", "a", "b", "c"]), (3, "b", 2));
    }

    #[test]
    fn describe_splits_numeric_and_text_statistics() -> Result<()> {
        let table = describe(&sample()?);
        assert_eq!(table.columns, vec!["", "count", "score", "class", "tweet"]);

        let row = |stat: &str| {
            table
                .rows
                .iter()
                .find(|row| row[0] == stat)
                .cloned()
                .unwrap_or_default()
        };
        assert_eq!(row("count"), vec!["count", "4", "3", "4", "3"]);
        assert_eq!(row("mean")[1], "5.25");
        assert_eq!(row("min")[2], "0.5");
        assert_eq!(row("max")[1], "9.0");
        assert_eq!(row("unique")[4], "2");
        assert_eq!(row("top")[4], "a");
        assert_eq!(row("freq")[4], "2");
        assert_eq!(row("mean")[4], "");
        Ok(())
    }

    #[test]
    fn missing_values_counts_empty_cells() -> Result<()> {
        let table = missing_values(&sample()?);
        assert_eq!(
            table.rows,
            vec![
                vec!["count", "0"],
                vec!["score", "1"],
                vec!["class", "0"],
                vec!["tweet", "1"],
            ]
        );
        Ok(())
    }

    #[test]
    fn info_lists_columns_with_non_null_counts() -> Result<()> {
        let info = DatasetInfo::of(&sample()?);
        let text = info.render_text();
        assert!(text.starts_with("RangeIndex: 4 entries, 0 to 3"));
        assert!(text.contains("Data columns (total 4 columns):"));
        assert!(text.contains("3 non-null"));
        assert!(text.contains("dtypes: float64(1), int64(2), object(1)"));
        assert!(text.contains(&format!("sha256: {}", info.sha256)));
        Ok(())
    }
}
