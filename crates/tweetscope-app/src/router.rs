// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    ContentDescriptor, ContentLayout, MenuDefinition, MenuEntry, PendingSection, RouterError,
    TabKey, TabRenderDescriptor, ViewKey,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    Selected(ViewKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    state: RouterState,
    active_tab: usize,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            state: RouterState::Idle,
            active_tab: 0,
        }
    }
}

impl SelectionState {
    pub fn state(&self) -> &RouterState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == RouterState::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterCommand {
    Select(ViewKey),
    NextView,
    PrevView,
    ActivateTab(TabKey),
    NextTab,
    PrevTab,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    ViewChanged(ViewKey),
    TabChanged { view: ViewKey, tab: TabKey },
    Refreshed(ViewKey),
}

/// Maps stable view keys to content descriptors. Each router owns its menu
/// and selection, so independent routers never share state.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    menu: MenuDefinition,
    selection: SelectionState,
}

impl ViewRouter {
    pub fn new(menu: MenuDefinition) -> Self {
        Self {
            menu,
            selection: SelectionState::default(),
        }
    }

    /// Starts already selected on `key`, for configured default views.
    pub fn with_default(menu: MenuDefinition, key: &str) -> Result<Self, RouterError> {
        let mut router = Self::new(menu);
        router.select(key)?;
        Ok(router)
    }

    pub fn menu(&self) -> &MenuDefinition {
        &self.menu
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn current_key(&self) -> &ViewKey {
        match &self.selection.state {
            RouterState::Idle => &self.menu.first().key,
            RouterState::Selected(key) => key,
        }
    }

    pub fn current_entry(&self) -> &MenuEntry {
        self.menu
            .entry(self.current_key().as_str())
            .unwrap_or_else(|| self.menu.first())
    }

    pub fn current_position(&self) -> usize {
        self.menu.position(self.current_key().as_str()).unwrap_or(0)
    }

    pub fn active_tab_index(&self) -> Option<usize> {
        self.current_entry()
            .has_tabs()
            .then_some(self.selection.active_tab)
    }

    pub fn select(&mut self, key: &str) -> Result<ContentDescriptor, RouterError> {
        let Some(entry) = self.menu.entry(key) else {
            tracing::warn!(key, "rejected selection of unknown view");
            return Err(RouterError::UnknownViewKey(key.to_owned()));
        };

        let descriptor = describe(entry, 0);
        self.selection = SelectionState {
            state: RouterState::Selected(entry.key.clone()),
            active_tab: 0,
        };
        tracing::debug!(view = %descriptor.view, "view selected");
        Ok(descriptor)
    }

    pub fn activate_tab(&mut self, tab: &str) -> Result<ContentDescriptor, RouterError> {
        let entry = self.current_entry();
        if !entry.has_tabs() {
            return Err(RouterError::NoTabs(entry.key.clone()));
        }
        let Some(position) = entry.tab_position(tab) else {
            return Err(RouterError::UnknownTabKey {
                view: entry.key.clone(),
                tab: tab.to_owned(),
            });
        };

        let descriptor = describe(entry, position);
        self.commit_tab(position);
        Ok(descriptor)
    }

    /// Rebuilds the descriptor for the current selection.
    pub fn current(&self) -> ContentDescriptor {
        describe(self.current_entry(), self.selection.active_tab)
    }

    pub fn dispatch(&mut self, command: RouterCommand) -> Result<Vec<RouterEvent>, RouterError> {
        match command {
            RouterCommand::Select(key) => {
                let descriptor = self.select(key.as_str())?;
                Ok(vec![RouterEvent::ViewChanged(descriptor.view)])
            }
            RouterCommand::NextView => self.rotate_view(1),
            RouterCommand::PrevView => self.rotate_view(-1),
            RouterCommand::ActivateTab(tab) => {
                self.activate_tab(tab.as_str())?;
                Ok(vec![self.tab_changed_event()])
            }
            RouterCommand::NextTab => Ok(self.rotate_tab(1)),
            RouterCommand::PrevTab => Ok(self.rotate_tab(-1)),
            RouterCommand::Refresh => {
                tracing::debug!(view = %self.current_key(), "view refreshed");
                Ok(vec![RouterEvent::Refreshed(self.current_key().clone())])
            }
        }
    }

    fn rotate_view(&mut self, delta: isize) -> Result<Vec<RouterEvent>, RouterError> {
        let len = self.menu.len() as isize;
        let next = (self.current_position() as isize + delta).rem_euclid(len) as usize;
        let key = self.menu.entries()[next].key.clone();
        self.dispatch(RouterCommand::Select(key))
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<RouterEvent> {
        let len = self.current_entry().tabs.len() as isize;
        if len == 0 {
            return Vec::new();
        }
        let next = (self.selection.active_tab as isize + delta).rem_euclid(len) as usize;
        self.commit_tab(next);
        vec![self.tab_changed_event()]
    }

    fn commit_tab(&mut self, position: usize) {
        if self.selection.is_idle() {
            self.selection.state = RouterState::Selected(self.menu.first().key.clone());
        }
        self.selection.active_tab = position;
    }

    fn tab_changed_event(&self) -> RouterEvent {
        let entry = self.current_entry();
        RouterEvent::TabChanged {
            view: entry.key.clone(),
            tab: entry.tabs[self.selection.active_tab].key.clone(),
        }
    }
}

/// Tabs of `entry` in configured order, each holding an unevaluated content
/// reference.
pub fn resolve_tabs(entry: &MenuEntry) -> Vec<TabRenderDescriptor> {
    entry
        .tabs
        .iter()
        .map(|tab| TabRenderDescriptor {
            key: tab.key.clone(),
            label: tab.label.clone(),
            content: tab.content,
        })
        .collect()
}

fn describe(entry: &MenuEntry, active_tab: usize) -> ContentDescriptor {
    let layout = if entry.has_tabs() {
        ContentLayout::Tabs {
            tabs: resolve_tabs(entry),
            active: active_tab.min(entry.tabs.len() - 1),
        }
    } else {
        ContentLayout::Sections {
            sections: entry
                .body
                .iter()
                .map(|content| PendingSection { content: *content })
                .collect(),
        }
    };

    ContentDescriptor {
        view: entry.key.clone(),
        title: entry.title.clone(),
        layout,
        separator: entry.separator,
    }
}
