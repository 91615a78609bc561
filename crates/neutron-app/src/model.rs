// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::validation::{Distance, ValidationResult, parse_cell_distance, parse_cell_jumps};

pub const DEFAULT_SYSTEM_NAME: &str = "System";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteColumn {
    SystemName,
    DistanceToArrival,
    DistanceRemaining,
    Jumps,
}

impl RouteColumn {
    pub const ALL: [Self; 4] = [
        Self::SystemName,
        Self::DistanceToArrival,
        Self::DistanceRemaining,
        Self::Jumps,
    ];

    /// Header text used in CSV files.
    pub const fn header(self) -> &'static str {
        match self {
            Self::SystemName => "System Name",
            Self::DistanceToArrival => "Distance To Arrival",
            Self::DistanceRemaining => "Distance Remaining",
            Self::Jumps => "Jumps",
        }
    }

    /// Short label used in the grid.
    pub const fn label(self) -> &'static str {
        match self {
            Self::SystemName => "System Name",
            Self::DistanceToArrival => "Distance",
            Self::DistanceRemaining => "Remaining",
            Self::Jumps => "Jumps",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Self::SystemName => 0,
            Self::DistanceToArrival => 1,
            Self::DistanceRemaining => 2,
            Self::Jumps => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLeg {
    pub system_name: String,
    pub distance_to_arrival: Distance,
    pub distance_remaining: Distance,
    pub jumps: u32,
}

impl Default for RouteLeg {
    fn default() -> Self {
        Self {
            system_name: DEFAULT_SYSTEM_NAME.to_owned(),
            distance_to_arrival: Distance::ZERO,
            distance_remaining: Distance::ZERO,
            jumps: 0,
        }
    }
}

impl RouteLeg {
    pub fn new(
        system_name: impl Into<String>,
        distance_to_arrival: Distance,
        distance_remaining: Distance,
        jumps: u32,
    ) -> Self {
        Self {
            system_name: system_name.into(),
            distance_to_arrival,
            distance_remaining,
            jumps,
        }
    }

    /// Display text for one cell; decimals always carry two fractional digits.
    pub fn cell_text(&self, column: RouteColumn) -> String {
        match column {
            RouteColumn::SystemName => self.system_name.clone(),
            RouteColumn::DistanceToArrival => self.distance_to_arrival.to_string(),
            RouteColumn::DistanceRemaining => self.distance_remaining.to_string(),
            RouteColumn::Jumps => self.jumps.to_string(),
        }
    }

    /// Validates `input` for `column` and stores it. The leg is left untouched on error.
    /// Cell edits are capped at [`crate::MAX_CELL_DISTANCE`] and [`crate::MAX_CELL_JUMPS`].
    pub fn set_cell(&mut self, column: RouteColumn, input: &str) -> ValidationResult<()> {
        match column {
            RouteColumn::SystemName => self.system_name = input.to_owned(),
            RouteColumn::DistanceToArrival => {
                self.distance_to_arrival = parse_cell_distance(input)?;
            }
            RouteColumn::DistanceRemaining => {
                self.distance_remaining = parse_cell_distance(input)?;
            }
            RouteColumn::Jumps => self.jumps = parse_cell_jumps(input)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableChange {
    Appended { position: usize },
    Inserted { position: usize },
    Deleted { position: usize },
    CellEdited { position: usize, column: RouteColumn },
    Cleared,
    Replaced { rows: usize },
}

/// Ordered route legs; index 0 is the start of the route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    legs: Vec<RouteLeg>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_legs(legs: Vec<RouteLeg>) -> Self {
        Self { legs }
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteLeg> {
        self.legs.iter()
    }

    pub fn get(&self, position: usize) -> Option<&RouteLeg> {
        self.legs.get(position)
    }

    pub fn first(&self) -> Option<&RouteLeg> {
        self.legs.first()
    }

    pub fn last(&self) -> Option<&RouteLeg> {
        self.legs.last()
    }

    pub fn push(&mut self, leg: RouteLeg) -> TableChange {
        self.legs.push(leg);
        TableChange::Appended {
            position: self.legs.len() - 1,
        }
    }

    pub fn append_default(&mut self) -> TableChange {
        self.push(RouteLeg::default())
    }

    /// Inserts a default leg, clamping `position` to `[0, len]`.
    pub fn insert_default(&mut self, position: usize) -> TableChange {
        let position = position.min(self.legs.len());
        if position == self.legs.len() {
            return self.append_default();
        }
        self.legs.insert(position, RouteLeg::default());
        TableChange::Inserted { position }
    }

    /// Out-of-range positions are ignored.
    pub fn delete(&mut self, position: usize) -> Option<TableChange> {
        if position >= self.legs.len() {
            return None;
        }
        self.legs.remove(position);
        Some(TableChange::Deleted { position })
    }

    pub fn clear(&mut self) -> TableChange {
        self.legs.clear();
        TableChange::Cleared
    }

    /// `Ok(None)` when `position` is out of range.
    pub fn set_cell(
        &mut self,
        position: usize,
        column: RouteColumn,
        input: &str,
    ) -> ValidationResult<Option<TableChange>> {
        let Some(leg) = self.legs.get_mut(position) else {
            return Ok(None);
        };
        leg.set_cell(column, input)?;
        Ok(Some(TableChange::CellEdited { position, column }))
    }

    pub fn total_jumps(&self) -> u64 {
        self.legs.iter().map(|leg| u64::from(leg.jumps)).sum()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteLeg;
    type IntoIter = std::slice::Iter<'a, RouteLeg>;

    fn into_iter(self) -> Self::IntoIter {
        self.legs.iter()
    }
}
