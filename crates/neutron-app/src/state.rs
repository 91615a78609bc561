// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    LoadPath,
    SavePath,
}

impl PromptKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::LoadPath => "load route",
            Self::SavePath => "save route",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Nav,
    Edit,
    Prompt(PromptKind),
    ConfirmLoad,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub help_visible: bool,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            help_visible: false,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    EnterEditMode,
    OpenPrompt(PromptKind),
    AskConfirmLoad,
    ExitToNav,
    ToggleHelp,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    HelpVisibilityChanged(bool),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::EnterEditMode => self.set_mode(AppMode::Edit),
            AppCommand::OpenPrompt(kind) => self.set_mode(AppMode::Prompt(kind)),
            AppCommand::AskConfirmLoad => self.set_mode(AppMode::ConfirmLoad),
            AppCommand::ExitToNav => self.set_mode(AppMode::Nav),
            AppCommand::ToggleHelp => {
                self.help_visible = !self.help_visible;
                vec![AppEvent::HelpVisibilityChanged(self.help_visible)]
            }
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_mode(&mut self, mode: AppMode) -> Vec<AppEvent> {
        if self.mode == mode {
            return Vec::new();
        }
        self.mode = mode;
        vec![AppEvent::ModeChanged(mode)]
    }
}
