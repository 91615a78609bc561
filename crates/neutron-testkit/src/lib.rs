// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use neutron_app::{Distance, RouteLeg, RouteTable};
use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE_ROUTE_CSV: &str = "System Name,Distance To Arrival,Distance Remaining,Jumps\n\
Sol,0.00,120.50,3\n\
Alpha Centauri,5.30,115.20,1\n";

const SYSTEM_PREFIXES: [&str; 14] = [
    "Col 285 Sector",
    "Synuefe",
    "Praea Euq",
    "Hypoe Flyi",
    "Eol Prou",
    "Blu Thua",
    "Swoilz",
    "Skaudai",
    "Pru Aescs",
    "Boewnst",
    "Dryau Aowsy",
    "Plaa Aescs",
    "Oevasy",
    "Stuemeae",
];

const SECTOR_CODES: [&str; 10] = [
    "AA-A h0", "KS-T d3", "XO-A d1", "EL-Y d0", "ZE-A g1", "FG-Y e3", "OD-T c3", "CQ-Y d2",
    "LC-M d7", "RY-H b1",
];

const NAMED_SYSTEMS: [&str; 8] = [
    "Sol",
    "Alpha Centauri",
    "Sagittarius A*",
    "Colonia",
    "Beagle Point",
    "Jackson's Lighthouse",
    "Shinrarta Dezhra",
    "Wolf 359",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: u64) -> u64 {
        if n <= 1 {
            return 0;
        }
        self.next_u64() % n
    }
}

/// Builds plausible routes: each leg is closer to the destination than the last.
#[derive(Debug, Clone)]
pub struct RouteFaker {
    rng: DeterministicRng,
}

impl RouteFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn system_name(&mut self) -> String {
        if self.rng.int_n(4) == 0 {
            let index = self.rng.int_n(NAMED_SYSTEMS.len() as u64) as usize;
            return NAMED_SYSTEMS[index].to_owned();
        }
        let prefix = SYSTEM_PREFIXES[self.rng.int_n(SYSTEM_PREFIXES.len() as u64) as usize];
        let code = SECTOR_CODES[self.rng.int_n(SECTOR_CODES.len() as u64) as usize];
        format!("{prefix} {code}-{}", self.rng.int_n(200))
    }

    /// `legs` rows, remaining distance strictly decreasing to zero on the last row.
    pub fn route(&mut self, legs: usize) -> RouteTable {
        let mut hops = (0..legs)
            .map(|_| 1_000 + self.rng.int_n(49_000))
            .collect::<Vec<u64>>();
        if let Some(last) = hops.last_mut() {
            *last = 0;
        }

        let mut remaining: u64 = hops.iter().sum();
        let mut rows = Vec::with_capacity(legs);
        for hop in hops {
            rows.push(RouteLeg::new(
                self.system_name(),
                Distance::from_hundredths(self.rng.int_n(500_000)),
                Distance::from_hundredths(remaining),
                1 + self.rng.int_n(4) as u32,
            ));
            remaining -= hop;
        }
        RouteTable::from_legs(rows)
    }
}

pub fn sample_route() -> RouteTable {
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

pub fn temp_csv_path(name: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join(name);
    Ok((dir, path))
}

pub fn write_csv(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("write fixture {}", path.display()))?;
    Ok(path)
}
