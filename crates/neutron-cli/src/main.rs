// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use neutron_app::{AppCommand, AppState, RouteEditor, RouteTable};
use neutron_tui::TuiOptions;
use runtime::FileRuntime;
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `neutron --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let headless = options.check_only || options.summary_path.is_some();
    logging::init(config.log_level(), &config.log_dir()?, headless);

    if let Some(path) = &options.summary_path {
        let table = load_route(path)?;
        print!("{}", route_summary(&table));
        return Ok(());
    }

    let table = match &options.route_path {
        Some(path) => load_route(path)?,
        None => RouteTable::new(),
    };
    if options.check_only {
        info!(config = %options.config_path.display(), rows = table.len(), "check passed");
        return Ok(());
    }

    let mut state = AppState::default();
    if let Some(path) = &options.route_path {
        state.dispatch(AppCommand::SetStatus(format!(
            "loaded {} rows from {}",
            table.len(),
            path.display()
        )));
    }

    let mut editor = RouteEditor::with_table(table);
    let mut runtime = FileRuntime::new(config.default_dir(), config.line_ending());
    let tui_options = TuiOptions {
        confirm_load: config.confirm_load(),
        status_clear_after: config.status_clear_after(),
    };
    neutron_tui::run_app(&mut state, &mut editor, &mut runtime, tui_options)
}

fn load_route(path: &Path) -> Result<RouteTable> {
    neutron_csv::load_path(path).with_context(|| {
        format!(
            "load route {}; expected a CSV with columns {}",
            path.display(),
            neutron_csv::HEADERS.join(", ")
        )
    })
}

fn route_summary(table: &RouteTable) -> String {
    format!(
        "rows: {}\ntotal jumps: {}\nsuggested file: {}\n",
        table.len(),
        table.total_jumps(),
        neutron_csv::suggested_file_name(table)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    route_path: Option<PathBuf>,
    summary_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        route_path: None,
        summary_path: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--summary" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--summary requires a route CSV path"))?;
                options.summary_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown if unknown.starts_with('-') => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
            path => {
                if let Some(existing) = &options.route_path {
                    return Err(anyhow!(
                        "unexpected extra file {path:?}; already opening {}",
                        existing.display()
                    ));
                }
                options.route_path = Some(PathBuf::from(path));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("neutron [FILE]");
    println!("  FILE                     Route CSV to open in the editor");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --summary <file>         Print row count, total jumps and suggested file name");
    println!("  --check                  Validate config (and FILE when given) then exit");
    println!("  --help                   Show this help");
}
