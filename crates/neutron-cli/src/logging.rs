// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Tracing setup. Logs go to a daily rolling file so the terminal UI is never
//! written over; headless commands also print warnings to stderr.

use std::fs;
use std::io;
use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "neutron.log";

/// `RUST_LOG` wins over the configured level.
fn file_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

pub fn init(level: &str, dir: &Path, stderr: bool) {
    let file_layer = match fs::create_dir_all(dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(file_filter(level)),
            )
        }
        Err(error) => {
            eprintln!(
                "warning: could not initialize file logging in {}: {error}",
                dir.display()
            );
            None
        }
    };

    let stderr_layer = stderr.then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_filter(EnvFilter::new("warn"))
    });

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}
