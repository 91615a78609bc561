// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;
use tracing::debug;

use crate::model::{RouteColumn, RouteTable, TableChange};
use crate::validation::ValidationError;

/// Receives every change applied through a [`RouteEditor`].
pub trait RouteObserver {
    fn table_changed(&mut self, change: &TableChange, table: &RouteTable);
}

impl<F> RouteObserver for F
where
    F: FnMut(&TableChange, &RouteTable),
{
    fn table_changed(&mut self, change: &TableChange, table: &RouteTable) {
        self(change, table);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    AppendRow,
    InsertRow(usize),
    DeleteRow(usize),
    Clear,
    EditCell {
        row: usize,
        column: RouteColumn,
        input: String,
    },
    Replace(RouteTable),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    TableChanged(TableChange),
    TotalJumpsChanged(u64),
    EditRejected {
        row: usize,
        column: RouteColumn,
        error: ValidationError,
    },
    Unchanged,
}

/// Owns the route table for the presentation layer and keeps the derived
/// jump total in step with it.
#[derive(Default)]
pub struct RouteEditor {
    table: RouteTable,
    total_jumps: u64,
    observers: Vec<Box<dyn RouteObserver>>,
}

impl fmt::Debug for RouteEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEditor")
            .field("table", &self.table)
            .field("total_jumps", &self.total_jumps)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl RouteEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: RouteTable) -> Self {
        let total_jumps = table.total_jumps();
        Self {
            table,
            total_jumps,
            observers: Vec::new(),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn total_jumps(&self) -> u64 {
        self.total_jumps
    }

    pub fn subscribe(&mut self, observer: impl RouteObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn dispatch(&mut self, command: EditorCommand) -> Vec<EditorEvent> {
        debug!(?command, rows = self.table.len(), "editor command");
        let change = match command {
            EditorCommand::AppendRow => Some(self.table.append_default()),
            EditorCommand::InsertRow(position) => Some(self.table.insert_default(position)),
            EditorCommand::DeleteRow(position) => self.table.delete(position),
            EditorCommand::Clear => Some(self.table.clear()),
            EditorCommand::EditCell { row, column, input } => {
                match self.table.set_cell(row, column, &input) {
                    Ok(change) => change,
                    Err(error) => {
                        return vec![EditorEvent::EditRejected { row, column, error }];
                    }
                }
            }
            EditorCommand::Replace(table) => {
                let rows = table.len();
                self.table = table;
                Some(TableChange::Replaced { rows })
            }
        };

        let Some(change) = change else {
            return vec![EditorEvent::Unchanged];
        };
        self.apply_change(change)
    }

    fn apply_change(&mut self, change: TableChange) -> Vec<EditorEvent> {
        for observer in &mut self.observers {
            observer.table_changed(&change, &self.table);
        }

        let mut events = vec![EditorEvent::TableChanged(change)];
        let total = self.table.total_jumps();
        if total != self.total_jumps {
            self.total_jumps = total;
            events.push(EditorEvent::TotalJumpsChanged(total));
        }
        events
    }
}

/// Jumps header text: the running total is shown only when it is non-zero.
pub fn jumps_header_label(total_jumps: u64) -> String {
    if total_jumps == 0 {
        RouteColumn::Jumps.label().to_owned()
    } else {
        format!("{} {total_jumps}", RouteColumn::Jumps.label())
    }
}

/// Position for a new row placed under `selected`, or at the end without a selection.
pub fn insert_position_below(selected: Option<usize>, len: usize) -> usize {
    match selected {
        Some(row) if row < len => row + 1,
        _ => len,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        EditorCommand, EditorEvent, RouteEditor, insert_position_below, jumps_header_label,
    };
    use crate::model::{RouteColumn, RouteLeg, RouteTable, TableChange};
    use crate::validation::{Distance, ValidationError};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_table() -> RouteTable {
        RouteTable::from_legs(vec![
            RouteLeg::new("Sol", Distance::ZERO, Distance::from_hundredths(12_050), 3),
            RouteLeg::new(
                "Alpha Centauri",
                Distance::from_hundredths(530),
                Distance::from_hundredths(11_520),
                1,
            ),
        ])
    }

    #[test]
    fn with_table_computes_initial_total() {
        let editor = RouteEditor::with_table(sample_table());
        assert_eq!(editor.total_jumps(), 4);
        assert_eq!(editor.table().len(), 2);
    }

    #[test]
    fn edit_jumps_reports_new_total() {
        let mut editor = RouteEditor::with_table(sample_table());

        let events = editor.dispatch(EditorCommand::EditCell {
            row: 1,
            column: RouteColumn::Jumps,
            input: "5".to_owned(),
        });
        assert_eq!(
            events,
            vec![
                EditorEvent::TableChanged(TableChange::CellEdited {
                    position: 1,
                    column: RouteColumn::Jumps,
                }),
                EditorEvent::TotalJumpsChanged(8),
            ]
        );
        assert_eq!(editor.total_jumps(), 8);
    }

    #[test]
    fn append_row_keeps_total_and_skips_total_event() {
        let mut editor = RouteEditor::with_table(sample_table());
        let events = editor.dispatch(EditorCommand::AppendRow);
        assert_eq!(
            events,
            vec![EditorEvent::TableChanged(TableChange::Appended { position: 2 })]
        );
    }

    #[test]
    fn rejected_edit_leaves_table_untouched() {
        let mut editor = RouteEditor::with_table(sample_table());
        let before = editor.table().clone();

        let events = editor.dispatch(EditorCommand::EditCell {
            row: 0,
            column: RouteColumn::DistanceRemaining,
            input: "far".to_owned(),
        });
        assert_eq!(
            events,
            vec![EditorEvent::EditRejected {
                row: 0,
                column: RouteColumn::DistanceRemaining,
                error: ValidationError::InvalidDecimal,
            }]
        );
        assert_eq!(editor.table(), &before);
    }

    #[test]
    fn delete_on_empty_editor_is_unchanged() {
        let mut editor = RouteEditor::new();
        let events = editor.dispatch(EditorCommand::DeleteRow(0));
        assert_eq!(events, vec![EditorEvent::Unchanged]);
        assert_eq!(editor.total_jumps(), 0);
    }

    #[test]
    fn replace_and_clear_update_total() {
        let mut editor = RouteEditor::new();

        let events = editor.dispatch(EditorCommand::Replace(sample_table()));
        assert_eq!(
            events,
            vec![
                EditorEvent::TableChanged(TableChange::Replaced { rows: 2 }),
                EditorEvent::TotalJumpsChanged(4),
            ]
        );

        let events = editor.dispatch(EditorCommand::Clear);
        assert_eq!(
            events,
            vec![
                EditorEvent::TableChanged(TableChange::Cleared),
                EditorEvent::TotalJumpsChanged(0),
            ]
        );
    }

    #[test]
    fn observers_see_every_change_with_current_table() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut editor = RouteEditor::new();
        editor.subscribe(move |change: &TableChange, table: &RouteTable| {
            sink.borrow_mut()
                .push((change.clone(), table.total_jumps()));
        });

        editor.dispatch(EditorCommand::Replace(sample_table()));
        editor.dispatch(EditorCommand::InsertRow(0));
        editor.dispatch(EditorCommand::DeleteRow(10));
        editor.dispatch(EditorCommand::DeleteRow(1));

        assert_eq!(
            *seen.borrow(),
            vec![
                (TableChange::Replaced { rows: 2 }, 4),
                (TableChange::Inserted { position: 0 }, 4),
                (TableChange::Deleted { position: 1 }, 1),
            ]
        );
    }

    #[test]
    fn jumps_header_shows_total_only_when_non_zero() {
        assert_eq!(jumps_header_label(0), "Jumps");
        assert_eq!(jumps_header_label(4), "Jumps 4");
    }

    #[test]
    fn insert_position_below_selection_or_at_end() {
        assert_eq!(insert_position_below(None, 0), 0);
        assert_eq!(insert_position_below(None, 3), 3);
        assert_eq!(insert_position_below(Some(0), 3), 1);
        assert_eq!(insert_position_below(Some(2), 3), 3);
        assert_eq!(insert_position_below(Some(7), 3), 3);
    }
}
