// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tweetscope_app::{
    ChartKind, ChartSpec, ContentDescriptor, DatasetRef, RenderedView, Section, SectionBody,
    TableData, format_percent,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_CELL_WIDTH: usize = 60;
const CHART_WIDTH: usize = 40;

/// Plain-text rendering of a whole view, as printed by `--dump`.
pub fn render_view_text(view: &RenderedView) -> String {
    let mut blocks = vec![view.descriptor.title.clone()];
    if view.descriptor.separator {
        blocks.push("---".to_owned());
    }
    if let Some(strip) = tab_strip_text(&view.descriptor) {
        blocks.push(strip);
    }
    for section in &view.sections {
        blocks.push(format!("## {}\n{}", section.title, render_section_text(section)));
    }
    blocks.join("\n\n")
}

/// Tab labels with the active one bracketed; `None` for untabbed views.
pub fn tab_strip_text(descriptor: &ContentDescriptor) -> Option<String> {
    let active = descriptor.active_tab_index()?;
    Some(
        descriptor
            .tabs()
            .iter()
            .enumerate()
            .map(|(index, tab)| {
                if index == active {
                    format!("[{}]", tab.label)
                } else {
                    tab.label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" | "),
    )
}

pub fn render_section_text(section: &Section) -> String {
    match &section.body {
        SectionBody::Text(text) => text.clone(),
        SectionBody::Table(table) => format_table(table),
        SectionBody::Dataset(dataset) => format_dataset(dataset),
        SectionBody::Chart(chart) => format_chart(chart, CHART_WIDTH),
        SectionBody::Notice(notice) => format!("! {}", notice.message),
    }
}

pub fn dataset_caption(dataset: &DatasetRef) -> String {
    format!(
        "{} ({} rows, showing {})",
        dataset.path,
        dataset.total_rows,
        dataset.preview.row_count()
    )
}

fn format_dataset(dataset: &DatasetRef) -> String {
    format!("{}\n{}", dataset_caption(dataset), format_table(&dataset.preview))
}

/// Column-aligned table. Cells are flattened to one line and truncated.
pub fn format_table(table: &TableData) -> String {
    let header = table
        .columns
        .iter()
        .map(|column| display_cell(column))
        .collect::<Vec<_>>();
    let rows = table
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| display_cell(cell)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = header
        .iter()
        .map(|cell| cell.width())
        .collect::<Vec<_>>();
    for row in &rows {
        for (index, cell) in row.iter().enumerate() {
            let width = cell.width();
            match widths.get_mut(index) {
                Some(current) => *current = (*current).max(width),
                None => widths.push(width),
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_padded(&header, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat((*width).max(1)))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        lines.push(join_padded(row, &widths));
    }
    lines.join("\n")
}

/// Horizontal bars scaled to `width`. Pie charts show each slice's share;
/// the exploded slice is marked.
pub fn format_chart(chart: &ChartSpec, width: usize) -> String {
    let label_width = chart
        .data
        .iter()
        .map(|datum| datum.label.width())
        .max()
        .unwrap_or(0);
    let max_value = chart.max_value().max(1);

    let mut lines = vec![chart.title.clone()];
    if let (Some(x), Some(y)) = (&chart.x_label, &chart.y_label) {
        lines.push(format!("x: {x}, y: {y}"));
    }
    for datum in &chart.data {
        let line = match chart.kind {
            ChartKind::Bar => {
                let filled = scaled(datum.value as f64 / max_value as f64, width);
                format!(
                    "{}  {:<width$}  {}",
                    pad(&datum.label, label_width),
                    "#".repeat(filled),
                    datum.value
                )
            }
            ChartKind::Pie => {
                let filled = scaled(datum.proportion, width);
                let marker = if datum.explode > 0.0 { " *" } else { "" };
                format!(
                    "{}  {:<width$}  {}{marker}",
                    pad(&datum.label, label_width),
                    "#".repeat(filled),
                    format_percent(datum.proportion)
                )
            }
        };
        lines.push(line.trim_end().to_owned());
    }
    if chart.unrecognized > 0 {
        lines.push(format!(
            "{} rows with unrecognized class labels not shown",
            chart.unrecognized
        ));
    }
    lines.join("\n")
}

fn scaled(fraction: f64, width: usize) -> usize {
    (fraction.clamp(0.0, 1.0) * width as f64).round() as usize
}

pub(crate) fn display_cell(value: &str) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    if flat.width() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut truncated = String::new();
    let mut used = 0;
    for ch in flat.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > MAX_CELL_WIDTH - 1 {
            break;
        }
        used += width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Pads to a terminal column width; wide glyphs count as two columns.
fn pad(value: &str, width: usize) -> String {
    let fill = width.saturating_sub(value.width());
    format!("{value}{}", " ".repeat(fill))
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}
