// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use neutron_app::{
    AppCommand, AppMode, AppState, EditorCommand, EditorEvent, PromptKind, RouteColumn,
    RouteEditor, RouteTable, TableChange, insert_position_below, jumps_header_label,
};
use neutron_csv::RouteFileError;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell as TableCell, Clear, Paragraph, Row, Table, TableState};
use std::cell::Cell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, error};

const CURSOR_MARK: &str = "▏";

/// File access for the editor. Implemented over the real filesystem by the binary.
pub trait AppRuntime {
    fn load_route(&mut self, path: &Path) -> Result<RouteTable, RouteFileError>;
    fn save_route(&mut self, table: &RouteTable, path: &Path) -> Result<(), RouteFileError>;
    fn suggested_save_path(&self, table: &RouteTable) -> PathBuf;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuiOptions {
    pub confirm_load: bool,
    pub status_clear_after: Duration,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            confirm_load: true,
            status_clear_after: Duration::from_secs(4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

/// What the grid needs to know after a table change; written by the editor observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct GridSync {
    rows: usize,
    total_jumps: u64,
    focus: Option<usize>,
}

impl GridSync {
    fn after(change: &TableChange, table: &RouteTable) -> Self {
        let rows = table.len();
        let focus = match change {
            TableChange::Appended { position }
            | TableChange::Inserted { position }
            | TableChange::CellEdited { position, .. } => *position,
            TableChange::Deleted { position } => (*position).min(rows.saturating_sub(1)),
            TableChange::Cleared | TableChange::Replaced { .. } => 0,
        };
        Self {
            rows,
            total_jumps: table.total_jumps(),
            focus: Some(focus),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct TableUiState {
    selected_row: usize,
    selected_col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableCommand {
    MoveRow(isize),
    MoveColumn(isize),
    JumpFirstRow,
    JumpLastRow,
    JumpFirstColumn,
    JumpLastColumn,
    AddRowBelow,
    AppendRow,
    DeleteRow,
    ClearTable,
    EditCell,
    Load,
    Save,
    ToggleHelp,
}

#[derive(Debug)]
struct ViewData {
    options: TuiOptions,
    grid: Rc<Cell<GridSync>>,
    table_state: TableUiState,
    cell_input: String,
    prompt_input: String,
    last_path: Option<PathBuf>,
    status_token: u64,
}

impl ViewData {
    fn new(editor: &mut RouteEditor, options: TuiOptions) -> Self {
        let grid = Rc::new(Cell::new(GridSync {
            rows: editor.table().len(),
            total_jumps: editor.total_jumps(),
            focus: None,
        }));
        let sink = Rc::clone(&grid);
        editor.subscribe(move |change: &TableChange, table: &RouteTable| {
            sink.set(GridSync::after(change, table));
        });

        Self {
            options,
            grid,
            table_state: TableUiState::default(),
            cell_input: String::new(),
            prompt_input: String::new(),
            last_path: None,
            status_token: 0,
        }
    }

    fn rows(&self) -> usize {
        self.grid.get().rows
    }

    fn total_jumps(&self) -> u64 {
        self.grid.get().total_jumps
    }

    /// Moves the cursor to the row the last change touched and keeps it in range.
    fn sync_selection(&mut self) {
        let mut grid = self.grid.get();
        if let Some(focus) = grid.focus.take() {
            self.table_state.selected_row = focus;
            self.grid.set(grid);
        }
        self.table_state.selected_row = self
            .table_state
            .selected_row
            .min(grid.rows.saturating_sub(1));
    }

    fn selected_column(&self) -> RouteColumn {
        RouteColumn::from_index(self.table_state.selected_col).unwrap_or(RouteColumn::SystemName)
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    editor: &mut RouteEditor,
    runtime: &mut R,
    options: TuiOptions,
) -> Result<()> {
    install_panic_hook();
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(editor, options);
    let (internal_tx, internal_rx) = mpsc::channel();
    if state.status_line.is_some() {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(
            &internal_tx,
            view_data.status_token,
            view_data.options.status_clear_after,
        );
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, editor, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(false) => continue,
            Ok(true) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if handle_key_event(state, editor, runtime, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Restores the terminal and records the panic before the default hook prints it.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen);
        error!(%info, "unexpected error; the editor has to close");
        previous(info);
    }));
}

fn process_internal_events(state: &mut AppState, view_data: &ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64, after: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(after);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(
        internal_tx,
        view_data.status_token,
        view_data.options.status_clear_after,
    );
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    editor: &mut RouteEditor,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            state.dispatch(AppCommand::ToggleHelp);
        }
        return false;
    }

    match state.mode {
        AppMode::Nav => handle_nav_key(state, editor, runtime, view_data, internal_tx, key),
        AppMode::Edit => handle_cell_edit_key(state, editor, view_data, internal_tx, key),
        AppMode::Prompt(kind) => {
            handle_prompt_key(state, editor, runtime, view_data, internal_tx, kind, key);
        }
        AppMode::ConfirmLoad => handle_confirm_load_key(state, view_data, internal_tx, key),
    }
    false
}

fn table_command_for_key(key: KeyEvent) -> Option<TableCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(TableCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(TableCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(TableCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(TableCommand::MoveColumn(1)),
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Some(TableCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(TableCommand::JumpLastRow),
        (KeyCode::Char('^'), _) => Some(TableCommand::JumpFirstColumn),
        (KeyCode::Char('$'), _) => Some(TableCommand::JumpLastColumn),
        (KeyCode::Char('a'), KeyModifiers::NONE) => Some(TableCommand::AddRowBelow),
        (KeyCode::Char('A'), _) => Some(TableCommand::AppendRow),
        (KeyCode::Char('d'), KeyModifiers::NONE) => Some(TableCommand::DeleteRow),
        (KeyCode::Char('X'), _) => Some(TableCommand::ClearTable),
        (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
            Some(TableCommand::EditCell)
        }
        (KeyCode::Char('o'), KeyModifiers::NONE) => Some(TableCommand::Load),
        (KeyCode::Char('w'), KeyModifiers::NONE) => Some(TableCommand::Save),
        (KeyCode::Char('?'), _) => Some(TableCommand::ToggleHelp),
        _ => None,
    }
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    editor: &mut RouteEditor,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(command) = table_command_for_key(key) else {
        return;
    };
    debug!(?command, "table command");

    match command {
        TableCommand::MoveRow(delta) => move_row(view_data, delta),
        TableCommand::MoveColumn(delta) => move_col(view_data, delta),
        TableCommand::JumpFirstRow => view_data.table_state.selected_row = 0,
        TableCommand::JumpLastRow => {
            view_data.table_state.selected_row = view_data.rows().saturating_sub(1);
        }
        TableCommand::JumpFirstColumn => view_data.table_state.selected_col = 0,
        TableCommand::JumpLastColumn => {
            view_data.table_state.selected_col = RouteColumn::ALL.len() - 1;
        }
        TableCommand::AddRowBelow => {
            let selected = (view_data.rows() > 0).then_some(view_data.table_state.selected_row);
            let position = insert_position_below(selected, view_data.rows());
            apply_editor_command(editor, view_data, EditorCommand::InsertRow(position));
            emit_status(state, view_data, internal_tx, "row added");
        }
        TableCommand::AppendRow => {
            apply_editor_command(editor, view_data, EditorCommand::AppendRow);
            emit_status(state, view_data, internal_tx, "row appended");
        }
        TableCommand::DeleteRow => {
            let position = view_data.table_state.selected_row;
            let events = apply_editor_command(editor, view_data, EditorCommand::DeleteRow(position));
            let status = if events.contains(&EditorEvent::Unchanged) {
                "nothing to delete"
            } else {
                "row deleted"
            };
            emit_status(state, view_data, internal_tx, status);
        }
        TableCommand::ClearTable => {
            apply_editor_command(editor, view_data, EditorCommand::Clear);
            emit_status(state, view_data, internal_tx, "table cleared");
        }
        TableCommand::EditCell => {
            let column = view_data.selected_column();
            let Some(leg) = editor.table().get(view_data.table_state.selected_row) else {
                emit_status(state, view_data, internal_tx, "add a row first (a)");
                return;
            };
            view_data.cell_input = leg.cell_text(column);
            state.dispatch(AppCommand::EnterEditMode);
        }
        TableCommand::Load => {
            if view_data.options.confirm_load && !editor.table().is_empty() {
                state.dispatch(AppCommand::AskConfirmLoad);
            } else {
                open_load_prompt(state, view_data);
            }
        }
        TableCommand::Save => {
            view_data.prompt_input = runtime
                .suggested_save_path(editor.table())
                .display()
                .to_string();
            state.dispatch(AppCommand::OpenPrompt(PromptKind::SavePath));
        }
        TableCommand::ToggleHelp => {
            state.dispatch(AppCommand::ToggleHelp);
        }
    }
}

fn apply_editor_command(
    editor: &mut RouteEditor,
    view_data: &mut ViewData,
    command: EditorCommand,
) -> Vec<EditorEvent> {
    let events = editor.dispatch(command);
    view_data.sync_selection();
    events
}

fn open_load_prompt(state: &mut AppState, view_data: &mut ViewData) {
    view_data.prompt_input = view_data
        .last_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    state.dispatch(AppCommand::OpenPrompt(PromptKind::LoadPath));
}

fn handle_confirm_load_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            open_load_prompt(state, view_data);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.dispatch(AppCommand::ExitToNav);
            emit_status(state, view_data, internal_tx, "load canceled");
        }
        _ => {}
    }
}

fn handle_cell_edit_key(
    state: &mut AppState,
    editor: &mut RouteEditor,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            view_data.cell_input.clear();
            state.dispatch(AppCommand::ExitToNav);
            emit_status(state, view_data, internal_tx, "edit canceled");
        }
        KeyCode::Enter => {
            let column = view_data.selected_column();
            let command = EditorCommand::EditCell {
                row: view_data.table_state.selected_row,
                column,
                input: view_data.cell_input.clone(),
            };
            let events = apply_editor_command(editor, view_data, command);
            if let Some(EditorEvent::EditRejected { error, .. }) = events
                .iter()
                .find(|event| matches!(event, EditorEvent::EditRejected { .. }))
            {
                let message = format!("invalid {}: {error}", column.label().to_lowercase());
                emit_status(state, view_data, internal_tx, message);
                return;
            }
            view_data.cell_input.clear();
            state.dispatch(AppCommand::ExitToNav);
            let message = format!("{} updated", column.label().to_lowercase());
            emit_status(state, view_data, internal_tx, message);
        }
        _ => edit_text(&mut view_data.cell_input, key),
    }
}

fn handle_prompt_key<R: AppRuntime>(
    state: &mut AppState,
    editor: &mut RouteEditor,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    kind: PromptKind,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            state.dispatch(AppCommand::ExitToNav);
            let message = match kind {
                PromptKind::LoadPath => "load canceled",
                PromptKind::SavePath => "save canceled",
            };
            emit_status(state, view_data, internal_tx, message);
        }
        KeyCode::Enter => {
            let raw = view_data.prompt_input.trim();
            if raw.is_empty() {
                emit_status(state, view_data, internal_tx, "enter a file path");
                return;
            }
            let path = PathBuf::from(raw);
            state.dispatch(AppCommand::ExitToNav);
            let message = match kind {
                PromptKind::LoadPath => submit_load(editor, runtime, view_data, path),
                PromptKind::SavePath => submit_save(editor, runtime, view_data, path),
            };
            emit_status(state, view_data, internal_tx, message);
        }
        _ => edit_text(&mut view_data.prompt_input, key),
    }
}

/// The table is only replaced when the whole file parsed.
fn submit_load<R: AppRuntime>(
    editor: &mut RouteEditor,
    runtime: &mut R,
    view_data: &mut ViewData,
    path: PathBuf,
) -> String {
    match runtime.load_route(&path) {
        Ok(table) => {
            let rows = table.len();
            apply_editor_command(editor, view_data, EditorCommand::Replace(table));
            let message = format!("loaded {rows} rows from {}", path.display());
            view_data.last_path = Some(path);
            message
        }
        Err(error) => load_error_message(&path, &error),
    }
}

fn submit_save<R: AppRuntime>(
    editor: &RouteEditor,
    runtime: &mut R,
    view_data: &mut ViewData,
    path: PathBuf,
) -> String {
    match runtime.save_route(editor.table(), &path) {
        Ok(()) => {
            let message = format!("saved {} rows to {}", editor.table().len(), path.display());
            view_data.last_path = Some(path);
            message
        }
        Err(error) => format!("cannot write {}: {error}", path.display()),
    }
}

fn load_error_message(path: &Path, error: &RouteFileError) -> String {
    match error {
        RouteFileError::InvalidCsvFormat { .. } => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            format!("invalid file: {name} is not a valid route CSV; {error}")
        }
        RouteFileError::Io(source) => format!("cannot read {}: {source}", path.display()),
    }
}

fn edit_text(buffer: &mut String, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Backspace, _) => {
            buffer.pop();
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.clear();
        }
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(ch);
        }
        _ => {}
    }
}

fn move_row(view_data: &mut ViewData, delta: isize) {
    let row_count = view_data.rows();
    if row_count == 0 {
        view_data.table_state.selected_row = 0;
        return;
    }

    let current = view_data.table_state.selected_row;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.table_state.selected_row = next.min(row_count - 1);
}

fn move_col(view_data: &mut ViewData, delta: isize) {
    let last = RouteColumn::ALL.len() - 1;
    let current = view_data.table_state.selected_col;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.table_state.selected_col = next.min(last);
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, editor: &RouteEditor, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let summary = Paragraph::new(summary_text(editor.table(), view_data))
        .block(Block::default().title("neutron").borders(Borders::ALL));
    frame.render_widget(summary, layout[0]);

    render_table(frame, layout[1], state, editor, view_data);

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    match state.mode {
        AppMode::Prompt(kind) => {
            let area = centered_rect(70, 20, frame.area());
            frame.render_widget(Clear, area);
            let prompt = Paragraph::new(render_prompt_text(&view_data.prompt_input))
                .block(Block::default().title(kind.title()).borders(Borders::ALL));
            frame.render_widget(prompt, area);
        }
        AppMode::ConfirmLoad => {
            let area = centered_rect(50, 20, frame.area());
            frame.render_widget(Clear, area);
            let confirm = Paragraph::new(
                "Current data will be cleared, continue?\n\ny yes | n no",
            )
            .block(Block::default().title("load route").borders(Borders::ALL));
            frame.render_widget(confirm, area);
        }
        AppMode::Nav | AppMode::Edit => {}
    }

    if state.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    editor: &RouteEditor,
    view_data: &ViewData,
) {
    let header = Row::new(header_labels(view_data.total_jumps()).into_iter().map(|label| {
        TableCell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let selected = view_data.table_state;
    let rows = editor.table().iter().enumerate().map(|(row_index, leg)| {
        let selected_row = row_index == selected.selected_row;
        let cells = RouteColumn::ALL
            .iter()
            .map(|column| {
                let selected_cell = selected_row && column.index() == selected.selected_col;
                let text = if selected_cell && state.mode == AppMode::Edit {
                    format!("{}{CURSOR_MARK}", view_data.cell_input)
                } else {
                    leg.cell_text(*column)
                };
                let style = if selected_cell {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else if selected_row {
                    Style::default().bg(Color::DarkGray)
                } else {
                    Style::default()
                };
                TableCell::from(text).style(style)
            })
            .collect::<Vec<_>>();
        Row::new(cells)
    });

    let widths = [
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::default().title("route").borders(Borders::ALL));

    let mut table_state = TableState::default();
    if !editor.table().is_empty() {
        table_state.select(Some(selected.selected_row));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn header_labels(total_jumps: u64) -> Vec<String> {
    RouteColumn::ALL
        .iter()
        .map(|column| match column {
            RouteColumn::Jumps => jumps_header_label(total_jumps),
            other => other.label().to_owned(),
        })
        .collect()
}

fn summary_text(table: &RouteTable, view_data: &ViewData) -> String {
    let file = view_data
        .last_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "unsaved".to_owned());
    format!(
        "{} legs | {} jumps | {file}",
        table.len(),
        view_data.total_jumps()
    )
}

fn render_prompt_text(input: &str) -> String {
    format!("path: {input}{CURSOR_MARK}\n\nenter confirm | esc cancel | ctrl+u clear")
}

fn status_text(state: &AppState) -> String {
    let (mode, hints) = match state.mode {
        AppMode::Nav => (
            "NAV",
            "j/k/h/l g/G | a/A add | d del | X clear | e edit | o load | w save | ? help | ctrl+q",
        ),
        AppMode::Edit => ("EDIT", "enter save | esc cancel | ctrl+u clear"),
        AppMode::Prompt(_) => ("FILE", "enter confirm | esc cancel"),
        AppMode::ConfirmLoad => ("LOAD", "y continue | n cancel"),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: j/k/h/l or arrows move | g/G first/last row | ^/$ first/last column\n\
rows: a add below | A append | d delete | X clear table\n\
cells: e or enter edit | enter save | esc cancel | ctrl+u clear input\n\
files: o load csv | w save csv (prefilled with first-last system name)\n\
distances keep two decimals; jumps are whole numbers"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
