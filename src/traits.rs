// Copyright (c) 2024 Mike Tsao

//! The traits that define shared characteristics of parts of the system.

/// Quick import of all important traits.
pub mod prelude {
    pub use super::{HasBitStructure, HasSettings, Qualifier};
}

// We re-export here so that consumers of traits don't have to worry as much
// about exactly where they are in the code, but those working on the code can
// still organize them.
pub use crate::{structure::HasBitStructure, variety::Qualifier};

/// Each app should have a Settings struct that is composed of subsystems having
/// their own settings. Implementing [HasSettings] helps the composed struct
/// manage its parts.
pub trait HasSettings {
    /// Whether the current state of this struct has been saved to disk.
    fn has_been_saved(&self) -> bool;
    /// Call this whenever the struct changes.
    fn needs_save(&mut self);
    /// Call this after a load() or a save().
    fn mark_clean(&mut self);
}
