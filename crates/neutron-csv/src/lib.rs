// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Route tables to and from CSV.
//!
//! Files carry a header row with the four route columns. On read the columns
//! are looked up by header name, so their order does not matter and extra
//! columns are ignored. On write the header order is fixed. Loading is
//! all-or-nothing: the first bad row rejects the whole file.

use neutron_app::{RouteColumn, RouteLeg, RouteTable, parse_distance, parse_jumps};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const APP_NAME: &str = "neutron";
pub const DEFAULT_FILE_NAME: &str = "built_route.csv";

pub const HEADERS: [&str; 4] = [
    RouteColumn::SystemName.header(),
    RouteColumn::DistanceToArrival.header(),
    RouteColumn::DistanceRemaining.header(),
    RouteColumn::Jumps.header(),
];

#[derive(Debug, thiserror::Error)]
pub enum RouteFileError {
    #[error("invalid route CSV{}: {reason}", row_suffix(.row))]
    InvalidCsvFormat { row: Option<usize>, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RouteFileError {
    fn invalid(row: Option<usize>, reason: impl Into<String>) -> Self {
        Self::InvalidCsvFormat {
            row,
            reason: reason.into(),
        }
    }

    fn from_csv(error: csv::Error, row: Option<usize>) -> Self {
        if error.is_io_error() {
            if let csv::ErrorKind::Io(source) = error.into_kind() {
                return Self::Io(source);
            }
            return Self::invalid(row, "unreadable input");
        }
        Self::invalid(row, error.to_string())
    }

    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidCsvFormat { .. })
    }
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map_or_else(String::new, |row| format!(" (row {row})"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    fn terminator(self) -> csv::Terminator {
        match self {
            Self::Lf => csv::Terminator::Any(b'\n'),
            Self::Crlf => csv::Terminator::CRLF,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex([usize; 4]);

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, RouteFileError> {
        let mut positions = [0usize; 4];
        for column in RouteColumn::ALL {
            positions[column.index()] = headers
                .iter()
                .position(|header| header == column.header())
                .ok_or_else(|| {
                    RouteFileError::invalid(None, format!("missing column `{}`", column.header()))
                })?;
        }
        Ok(Self(positions))
    }

    fn field<'r>(
        &self,
        record: &'r csv::StringRecord,
        column: RouteColumn,
        row: usize,
    ) -> Result<&'r str, RouteFileError> {
        record.get(self.0[column.index()]).ok_or_else(|| {
            RouteFileError::invalid(Some(row), format!("no value for `{}`", column.header()))
        })
    }

    fn parse_leg(
        &self,
        record: &csv::StringRecord,
        row: usize,
    ) -> Result<RouteLeg, RouteFileError> {
        let bad_value = |column: RouteColumn, error: neutron_app::ValidationError| {
            RouteFileError::invalid(Some(row), format!("`{}`: {error}", column.header()))
        };

        let system_name = self.field(record, RouteColumn::SystemName, row)?;
        let distance_to_arrival =
            parse_distance(self.field(record, RouteColumn::DistanceToArrival, row)?)
                .map_err(|error| bad_value(RouteColumn::DistanceToArrival, error))?;
        let distance_remaining =
            parse_distance(self.field(record, RouteColumn::DistanceRemaining, row)?)
                .map_err(|error| bad_value(RouteColumn::DistanceRemaining, error))?;
        let jumps = parse_jumps(self.field(record, RouteColumn::Jumps, row)?)
            .map_err(|error| bad_value(RouteColumn::Jumps, error))?;

        Ok(RouteLeg::new(
            system_name,
            distance_to_arrival,
            distance_remaining,
            jumps,
        ))
    }
}

/// Reads a whole route table. Any bad row discards everything parsed so far.
pub fn load<R: io::Read>(source: R) -> Result<RouteTable, RouteFileError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|error| RouteFileError::from_csv(error, None))?
        .clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut legs = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|error| RouteFileError::from_csv(error, Some(row)))?;
        legs.push(columns.parse_leg(&record, row)?);
    }

    debug!(rows = legs.len(), "parsed route csv");
    Ok(RouteTable::from_legs(legs))
}

pub fn save<W: io::Write>(table: &RouteTable, destination: W) -> Result<(), RouteFileError> {
    save_with(table, destination, LineEnding::default())
}

pub fn save_with<W: io::Write>(
    table: &RouteTable,
    destination: W,
    line_ending: LineEnding,
) -> Result<(), RouteFileError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(line_ending.terminator())
        .from_writer(destination);

    writer
        .write_record(HEADERS)
        .map_err(|error| RouteFileError::from_csv(error, None))?;
    for (index, leg) in table.iter().enumerate() {
        let fields = RouteColumn::ALL.map(|column| leg.cell_text(column));
        writer
            .write_record(&fields)
            .map_err(|error| RouteFileError::from_csv(error, Some(index + 1)))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_path(path: &Path) -> Result<RouteTable, RouteFileError> {
    let file = File::open(path)?;
    match load(BufReader::new(file)) {
        Ok(table) => {
            info!(path = %path.display(), rows = table.len(), "loaded route");
            Ok(table)
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "route load rejected");
            Err(error)
        }
    }
}

/// Writes next to `path` first and renames over it, so a failed save keeps the old file.
pub fn save_path(
    table: &RouteTable,
    path: &Path,
    line_ending: LineEnding,
) -> Result<(), RouteFileError> {
    let staging = staging_path(path);
    let result = write_staged(table, &staging, line_ending).and_then(|()| {
        fs::rename(&staging, path)?;
        Ok(())
    });

    match result {
        Ok(()) => {
            info!(path = %path.display(), rows = table.len(), "saved route");
            Ok(())
        }
        Err(error) => {
            let _ = fs::remove_file(&staging);
            warn!(path = %path.display(), %error, "route save failed");
            Err(error)
        }
    }
}

fn write_staged(
    table: &RouteTable,
    staging: &Path,
    line_ending: LineEnding,
) -> Result<(), RouteFileError> {
    let file = File::create(staging)?;
    let mut writer = BufWriter::new(file);
    save_with(table, &mut writer, line_ending)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_owned());
    path.with_file_name(format!(".{name}.tmp"))
}

/// `"{first}-{last}.csv"` without `*`, or [`DEFAULT_FILE_NAME`] for an empty table.
pub fn suggested_file_name(table: &RouteTable) -> String {
    match (table.first(), table.last()) {
        (Some(first), Some(last)) => {
            format!("{}-{}.csv", first.system_name, last.system_name).replace('*', "")
        }
        _ => DEFAULT_FILE_NAME.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_FILE_NAME, LineEnding, RouteFileError, load, save_with, staging_path,
        suggested_file_name,
    };
    use neutron_app::{Distance, RouteLeg, RouteTable};
    use std::path::Path;

    fn leg(name: &str) -> RouteLeg {
        RouteLeg::new(name, Distance::ZERO, Distance::ZERO, 0)
    }

    #[test]
    fn suggested_file_name_uses_first_and_last_system() {
        let table = RouteTable::from_legs(vec![leg("Sol"), leg("Wolf 359"), leg("Colonia*")]);
        assert_eq!(suggested_file_name(&table), "Sol-Colonia.csv");
    }

    #[test]
    fn suggested_file_name_single_row_repeats_the_name() {
        let table = RouteTable::from_legs(vec![leg("Sol")]);
        assert_eq!(suggested_file_name(&table), "Sol-Sol.csv");
    }

    #[test]
    fn suggested_file_name_falls_back_for_empty_table() {
        assert_eq!(suggested_file_name(&RouteTable::new()), DEFAULT_FILE_NAME);
    }

    #[test]
    fn crlf_line_endings_are_applied() {
        let table = RouteTable::from_legs(vec![leg("Sol")]);
        let mut out = Vec::new();
        save_with(&table, &mut out, LineEnding::Crlf).expect("save into memory");
        let text = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(
            text,
            "System Name,Distance To Arrival,Distance Remaining,Jumps\r\nSol,0.00,0.00,0\r\n"
        );
    }

    #[test]
    fn invalid_format_display_includes_row() {
        let input = "System Name,Distance To Arrival,Distance Remaining,Jumps\nSol,x,1,1\n";
        let error = load(input.as_bytes()).expect_err("bad decimal should fail");
        assert!(error.is_invalid_format());
        let message = error.to_string();
        assert!(message.contains("(row 1)"), "unexpected message: {message}");
        assert!(
            message.contains("Distance To Arrival"),
            "unexpected message: {message}"
        );
    }

    #[test]
    fn io_errors_are_not_format_errors() {
        let error = RouteFileError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(!error.is_invalid_format());
    }

    #[test]
    fn staging_path_is_a_hidden_sibling() {
        assert_eq!(
            staging_path(Path::new("/routes/Sol-Colonia.csv")),
            Path::new("/routes/.Sol-Colonia.csv.tmp")
        );
    }
}
