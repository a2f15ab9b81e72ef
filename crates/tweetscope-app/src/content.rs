// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

use crate::{ChartSpec, ContentError, ContentRef, TabKey, ViewKey};

/// Produces section bodies on demand. Implementations read from the data
/// source on every call; nothing is cached across selections.
pub trait ContentProvider {
    fn produce(&mut self, content: ContentRef) -> Result<SectionBody, ContentError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A window onto a dataset file rather than a derived table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRef {
    pub path: String,
    pub total_rows: usize,
    pub preview: TableData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    EmptyDataset,
    MissingArtifact,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn from_error(error: &ContentError) -> Self {
        let kind = match error {
            ContentError::EmptyDataset => NoticeKind::EmptyDataset,
            ContentError::MissingArtifact { .. } => NoticeKind::MissingArtifact,
            _ => NoticeKind::Failure,
        };
        Self {
            kind,
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SectionBody {
    Text(String),
    Table(TableData),
    Chart(ChartSpec),
    Dataset(DatasetRef),
    Notice(Notice),
}

impl SectionBody {
    pub fn notice_kind(&self) -> Option<NoticeKind> {
        match self {
            Self::Notice(notice) => Some(notice.kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub body: SectionBody,
}

impl Section {
    /// Failures stay local to the section so sibling sections still render.
    pub fn from_result(title: impl Into<String>, result: Result<SectionBody, ContentError>) -> Self {
        let title = title.into();
        let body = match result {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(section = %title, %error, "section content unavailable");
                SectionBody::Notice(Notice::from_error(&error))
            }
        };
        Self { title, body }
    }

    pub fn is_notice(&self) -> bool {
        matches!(self.body, SectionBody::Notice(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingSection {
    pub content: ContentRef,
}

impl PendingSection {
    pub fn render<P: ContentProvider + ?Sized>(&self, provider: &mut P) -> Section {
        Section::from_result(
            self.content.default_title(),
            provider.produce(self.content),
        )
    }
}

/// A tab's label paired with a content reference that is only evaluated when
/// the tab is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabRenderDescriptor {
    pub key: TabKey,
    pub label: String,
    pub content: ContentRef,
}

impl TabRenderDescriptor {
    pub fn render<P: ContentProvider + ?Sized>(&self, provider: &mut P) -> Section {
        Section::from_result(
            self.content.default_title(),
            provider.produce(self.content),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentLayout {
    Sections {
        sections: Vec<PendingSection>,
    },
    Tabs {
        tabs: Vec<TabRenderDescriptor>,
        active: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDescriptor {
    pub view: ViewKey,
    pub title: String,
    pub layout: ContentLayout,
    pub separator: bool,
}

impl ContentDescriptor {
    pub fn tabs(&self) -> &[TabRenderDescriptor] {
        match &self.layout {
            ContentLayout::Tabs { tabs, .. } => tabs,
            ContentLayout::Sections { .. } => &[],
        }
    }

    pub fn active_tab_index(&self) -> Option<usize> {
        match &self.layout {
            ContentLayout::Tabs { active, .. } => Some(*active),
            ContentLayout::Sections { .. } => None,
        }
    }

    pub fn active_tab(&self) -> Option<&TabRenderDescriptor> {
        match &self.layout {
            ContentLayout::Tabs { tabs, active } => tabs.get(*active),
            ContentLayout::Sections { .. } => None,
        }
    }

    /// Content the renderer should show right now: every section of a
    /// section layout, or only the active tab of a tab layout.
    pub fn active_content(&self) -> Vec<ContentRef> {
        match &self.layout {
            ContentLayout::Sections { sections } => {
                sections.iter().map(|section| section.content).collect()
            }
            ContentLayout::Tabs { tabs, active } => tabs
                .get(*active)
                .map(|tab| vec![tab.content])
                .unwrap_or_default(),
        }
    }

    pub fn render<P: ContentProvider + ?Sized>(&self, provider: &mut P) -> RenderedView {
        let sections = match &self.layout {
            ContentLayout::Sections { sections } => sections
                .iter()
                .map(|section| section.render(provider))
                .collect(),
            ContentLayout::Tabs { tabs, active } => tabs
                .get(*active)
                .map(|tab| vec![tab.render(provider)])
                .unwrap_or_default(),
        };
        RenderedView {
            descriptor: self.clone(),
            sections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedView {
    pub descriptor: ContentDescriptor,
    pub sections: Vec<Section>,
}

impl RenderedView {
    pub fn has_empty_dataset(&self) -> bool {
        self.sections
            .iter()
            .any(|section| section.body.notice_kind() == Some(NoticeKind::EmptyDataset))
    }

    pub fn failed_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|section| section.is_notice())
    }
}
