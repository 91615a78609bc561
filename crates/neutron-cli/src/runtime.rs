// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use neutron_app::RouteTable;
use neutron_csv::{LineEnding, RouteFileError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRuntime {
    default_dir: Option<PathBuf>,
    line_ending: LineEnding,
}

impl FileRuntime {
    pub fn new(default_dir: Option<PathBuf>, line_ending: LineEnding) -> Self {
        Self {
            default_dir,
            line_ending,
        }
    }
}

impl neutron_tui::AppRuntime for FileRuntime {
    fn load_route(&mut self, path: &Path) -> Result<RouteTable, RouteFileError> {
        neutron_csv::load_path(path)
    }

    fn save_route(&mut self, table: &RouteTable, path: &Path) -> Result<(), RouteFileError> {
        neutron_csv::save_path(table, path, self.line_ending)
    }

    fn suggested_save_path(&self, table: &RouteTable) -> PathBuf {
        let name = neutron_csv::suggested_file_name(table);
        match &self.default_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FileRuntime;
    use anyhow::Result;
    use neutron_app::RouteTable;
    use neutron_csv::{LineEnding, RouteFileError};
    use neutron_testkit::{SAMPLE_ROUTE_CSV, sample_route, temp_csv_path, write_csv};
    use neutron_tui::AppRuntime;
    use std::path::PathBuf;

    #[test]
    fn suggested_save_path_uses_default_dir() {
        let runtime = FileRuntime::new(Some(PathBuf::from("/routes")), LineEnding::Lf);
        assert_eq!(
            runtime.suggested_save_path(&sample_route()),
            PathBuf::from("/routes/Sol-Alpha Centauri.csv")
        );

        let bare = FileRuntime::new(None, LineEnding::Lf);
        assert_eq!(
            bare.suggested_save_path(&RouteTable::new()),
            PathBuf::from("built_route.csv")
        );
    }

    #[test]
    fn save_then_load_through_runtime() -> Result<()> {
        let (_dir, path) = temp_csv_path("route.csv")?;
        let mut runtime = FileRuntime::new(None, LineEnding::Lf);

        runtime.save_route(&sample_route(), &path)?;
        assert_eq!(std::fs::read_to_string(&path)?, SAMPLE_ROUTE_CSV);
        assert_eq!(runtime.load_route(&path)?, sample_route());
        Ok(())
    }

    #[test]
    fn crlf_runtime_writes_crlf() -> Result<()> {
        let (_dir, path) = temp_csv_path("route.csv")?;
        let mut runtime = FileRuntime::new(None, LineEnding::Crlf);
        runtime.save_route(&sample_route(), &path)?;

        let written = std::fs::read_to_string(&path)?;
        assert_eq!(written, SAMPLE_ROUTE_CSV.replace('\n', "\r\n"));
        assert_eq!(runtime.load_route(&path)?, sample_route());
        Ok(())
    }

    #[test]
    fn invalid_file_is_classified() -> Result<()> {
        let (dir, _) = temp_csv_path("unused.csv")?;
        let path = write_csv(dir.path(), "notes.csv", "name,comment\nSol,home\n")?;
        let mut runtime = FileRuntime::new(None, LineEnding::Lf);

        let error = runtime.load_route(&path).expect_err("wrong headers should fail");
        assert!(matches!(error, RouteFileError::InvalidCsvFormat { .. }));
        Ok(())
    }
}
