// Copyright (c) 2024 Mike Tsao

//! System utilities.

/// Commonly used imports.
pub mod prelude {
    pub use super::{CoreSettings, MidiUtils};
}

pub use midi::MidiUtils;
pub use settings::{CoreSettings, NamedCode};

mod midi;
mod settings;
