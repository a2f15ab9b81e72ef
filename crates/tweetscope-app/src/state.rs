// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{RouterCommand, RouterEvent, ViewRouter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub router: ViewRouter,
    pub focus: Focus,
    pub help_visible: bool,
    pub status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Route(RouterCommand),
    ToggleFocus,
    ToggleHelp,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Routed(RouterEvent),
    FocusChanged(Focus),
    HelpToggled(bool),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(router: ViewRouter) -> Self {
        Self {
            router,
            focus: Focus::Sidebar,
            help_visible: false,
            status_line: None,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::Route(command) => match self.router.dispatch(command) {
                Ok(events) => events.into_iter().map(AppEvent::Routed).collect(),
                Err(error) => vec![self.set_status(&error.to_string())],
            },
            AppCommand::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Content,
                    Focus::Content => Focus::Sidebar,
                };
                vec![AppEvent::FocusChanged(self.focus)]
            }
            AppCommand::ToggleHelp => {
                self.help_visible = !self.help_visible;
                vec![AppEvent::HelpToggled(self.help_visible)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
