// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod editor;
pub mod model;
pub mod state;
pub mod validation;

pub use editor::*;
pub use model::*;
pub use state::*;
pub use validation::*;
