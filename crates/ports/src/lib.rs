// Copyright (c) 2024 Mike Tsao

//! Adapters that move mifi data in and out of files.

#![deny(missing_docs)]

/// The most commonly used imports.
pub mod prelude {
    pub use super::{ImportError, MidiFilePort, MifFilePort, SettingsPort};
}

pub use midi::MidiFilePort;
pub use mif::{ImportError, MifFilePort};
pub use settings::SettingsPort;

mod midi;
mod mif;
mod settings;
