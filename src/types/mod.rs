// Copyright (c) 2024 Mike Tsao

//! Common data types used throughout the system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{Degree, GeneralSystem, MidiChannel, MidiEvent, SystemCatalog};
}

pub use {
    midi::{u4, u7, MidiChannel, MidiEvent, MidiMessage},
    system::{Degree, GeneralSystem, SystemCatalog},
};

mod midi;
mod system;
