// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod chart;
pub mod content;
pub mod copy;
pub mod error;
pub mod keys;
pub mod menu;
pub mod router;
pub mod state;

pub use chart::*;
pub use content::*;
pub use error::*;
pub use keys::*;
pub use menu::*;
pub use router::*;
pub use state::*;
