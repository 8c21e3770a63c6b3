// Copyright (c) 2024 Mike Tsao

use super::{
    class::{class_code, Behavior, ClassNumber, Occurrence},
    BitStructure,
};

/// The display and analysis metadata computed when a structure is built.
/// Harmonic and rhythmic structures differ only in how the shortcut and
/// behavior are derived.
#[derive(Clone, Debug, PartialEq)]
pub struct StructureMeta {
    shortcut: String,
    class_number: ClassNumber,
    class_code: String,
    behavior: Behavior,
    occurrence: Occurrence,
}
impl StructureMeta {
    pub(super) fn new(bits: &BitStructure, shortcut: String, behavior: Behavior) -> Self {
        Self {
            shortcut,
            class_number: ClassNumber::of(bits),
            class_code: class_code(bits),
            behavior,
            occurrence: Occurrence::default(),
        }
    }

    pub(super) fn with_occurrence(mut self, occurrence: usize) -> Self {
        self.occurrence = Occurrence(occurrence);
        self
    }

    // Class number, class code, and behavior are rotation-invariant.
    pub(super) fn with_shortcut(&self, shortcut: String) -> Self {
        Self {
            shortcut,
            ..self.clone()
        }
    }

    #[allow(missing_docs)]
    pub fn shortcut(&self) -> &str {
        &self.shortcut
    }

    #[allow(missing_docs)]
    pub fn class_number(&self) -> ClassNumber {
        self.class_number
    }

    /// The structural code of the class representative.
    pub fn class_code(&self) -> &str {
        &self.class_code
    }

    #[allow(missing_docs)]
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// How often the structure appears in the material it came from. Zero
    /// when unknown.
    pub fn occurrence(&self) -> Occurrence {
        self.occurrence
    }
}
