// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{MenuError, TabKey, ViewKey};

pub const DASHBOARD_TITLE: &str = "Hate Speech and Offensive Language Analysis";
pub const DASHBOARD_ICON: &str = "cast";

/// Stable handler identity for a piece of content. Display labels can change
/// freely; these cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentRef {
    Introduction,
    DatasetInfo,
    DatasetDescription,
    DatasetOverview,
    MissingValues,
    ClassBarChart,
    ClassPieChart,
    RawTweets,
    CleanedTweets,
    StemmedTweets,
    TokenizedTweets,
    About,
    Contact,
}

impl ContentRef {
    pub const ALL: [Self; 13] = [
        Self::Introduction,
        Self::DatasetInfo,
        Self::DatasetDescription,
        Self::DatasetOverview,
        Self::MissingValues,
        Self::ClassBarChart,
        Self::ClassPieChart,
        Self::RawTweets,
        Self::CleanedTweets,
        Self::StemmedTweets,
        Self::TokenizedTweets,
        Self::About,
        Self::Contact,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::DatasetInfo => "dataset_info",
            Self::DatasetDescription => "dataset_description",
            Self::DatasetOverview => "dataset_overview",
            Self::MissingValues => "missing_values",
            Self::ClassBarChart => "class_bar_chart",
            Self::ClassPieChart => "class_pie_chart",
            Self::RawTweets => "raw_tweets",
            Self::CleanedTweets => "cleaned_tweets",
            Self::StemmedTweets => "stemmed_tweets",
            Self::TokenizedTweets => "tokenized_tweets",
            Self::About => "about",
            Self::Contact => "contact",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|content| content.as_str() == value)
    }

    /// Section heading used when the content is rendered.
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Introduction => "Introduction",
            Self::DatasetInfo => "Dataset Information",
            Self::DatasetDescription => "Dataset Columns Description",
            Self::DatasetOverview => "Dataset Overview (Before Preprocessing)",
            Self::MissingValues => "Missing values in each column",
            Self::ClassBarChart => "Distribution of Classes (Bar Chart)",
            Self::ClassPieChart => "Proportion of Classes (Pie Chart)",
            Self::RawTweets => "Tweets Before Preprocessing",
            Self::CleanedTweets => "Tweets After Cleaning",
            Self::StemmedTweets => "Tweets After Stemming",
            Self::TokenizedTweets => "Tweets After Tokenization",
            Self::About => "About",
            Self::Contact => "Contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub key: TabKey,
    pub label: String,
    pub content: ContentRef,
}

impl TabEntry {
    pub fn new(key: impl Into<TabKey>, label: impl Into<String>, content: ContentRef) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: ViewKey,
    pub label: String,
    pub icon: Option<String>,
    pub title: String,
    pub tabs: Vec<TabEntry>,
    pub body: Vec<ContentRef>,
    pub separator: bool,
}

impl MenuEntry {
    pub fn new(key: impl Into<ViewKey>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            key: key.into(),
            title: label.clone(),
            label,
            icon: None,
            tabs: Vec::new(),
            body: Vec::new(),
            separator: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tab(mut self, tab: TabEntry) -> Self {
        self.tabs.push(tab);
        self
    }

    pub fn with_section(mut self, content: ContentRef) -> Self {
        self.body.push(content);
        self
    }

    pub fn with_separator(mut self) -> Self {
        self.separator = true;
        self
    }

    pub fn has_tabs(&self) -> bool {
        !self.tabs.is_empty()
    }

    pub fn tab_position(&self, key: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.key.as_str() == key)
    }
}

/// Ordered, immutable menu configuration. Construction rejects empty menus
/// and duplicate keys, so the first entry always exists.
#[derive(Debug, Clone)]
pub struct MenuDefinition {
    title: String,
    icon: Option<String>,
    entries: Vec<MenuEntry>,
    index: HashMap<ViewKey, usize>,
}

impl MenuDefinition {
    pub fn new(
        title: impl Into<String>,
        icon: Option<String>,
        entries: Vec<MenuEntry>,
    ) -> Result<Self, MenuError> {
        if entries.is_empty() {
            return Err(MenuError::Empty);
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.key.clone(), position).is_some() {
                return Err(MenuError::DuplicateViewKey(entry.key.clone()));
            }

            let mut seen = HashSet::with_capacity(entry.tabs.len());
            for tab in &entry.tabs {
                if !seen.insert(tab.key.as_str()) {
                    return Err(MenuError::DuplicateTabKey {
                        view: entry.key.clone(),
                        tab: tab.key.clone(),
                    });
                }
            }
        }

        Ok(Self {
            title: title.into(),
            icon,
            entries,
            index,
        })
    }

    /// The hate speech dataset dashboard: home, dataset preview, class
    /// distribution, preprocessing artifacts, about and contact pages.
    pub fn dashboard() -> Result<Self, MenuError> {
        let entries = vec![
            MenuEntry::new("home", "Home")
                .with_icon("house")
                .with_title("Introduction")
                .with_section(ContentRef::Introduction)
                .with_separator(),
            MenuEntry::new("preview", "Previewing the Dataset")
                .with_icon("table")
                .with_title("Loading and Previewing the Dataset")
                .with_tab(TabEntry::new(
                    "info",
                    "Dataset Information",
                    ContentRef::DatasetInfo,
                ))
                .with_tab(TabEntry::new(
                    "describe",
                    "Dataset Description",
                    ContentRef::DatasetDescription,
                ))
                .with_tab(TabEntry::new(
                    "overview",
                    "Dataset Overview",
                    ContentRef::DatasetOverview,
                ))
                .with_tab(TabEntry::new(
                    "missing",
                    "Missing values",
                    ContentRef::MissingValues,
                ))
                .with_separator(),
            MenuEntry::new("distribution", "Class Distribution")
                .with_icon("bar-chart")
                .with_title("Understanding Class Distribution")
                .with_tab(TabEntry::new("bar", "Bar Chart", ContentRef::ClassBarChart))
                .with_tab(TabEntry::new("pie", "Pie Chart", ContentRef::ClassPieChart))
                .with_separator(),
            MenuEntry::new("preprocessing", "Preprocessing")
                .with_icon("funnel")
                .with_title("Dataset Preprocessing")
                .with_tab(TabEntry::new(
                    "raw",
                    "Tweets Before Preprocessing",
                    ContentRef::RawTweets,
                ))
                .with_tab(TabEntry::new(
                    "cleaned",
                    "Cleaned Tweets",
                    ContentRef::CleanedTweets,
                ))
                .with_tab(TabEntry::new(
                    "stemmed",
                    "Stemmed Tweets",
                    ContentRef::StemmedTweets,
                ))
                .with_tab(TabEntry::new(
                    "tokenized",
                    "Tokenized Tweets",
                    ContentRef::TokenizedTweets,
                ))
                .with_separator(),
            MenuEntry::new("about", "About")
                .with_icon("info")
                .with_section(ContentRef::About),
            MenuEntry::new("contact", "Contact")
                .with_icon("envelope")
                .with_section(ContentRef::Contact),
        ];

        Self::new(DASHBOARD_TITLE, Some(DASHBOARD_ICON.to_owned()), entries)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> &MenuEntry {
        &self.entries[0]
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn entry(&self, key: &str) -> Option<&MenuEntry> {
        self.position(key).map(|position| &self.entries[position])
    }

    pub fn keys(&self) -> impl Iterator<Item = &ViewKey> {
        self.entries.iter().map(|entry| &entry.key)
    }
}
