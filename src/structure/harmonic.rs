// Copyright (c) 2024 Mike Tsao

use super::{
    class::{interval_vector, Behavior, ClassNumber, Occurrence},
    BitStructure, HasBitStructure, StructureMeta,
};
use crate::{
    error::StructureError,
    types::{Degree, GeneralSystem},
};
use delegate::delegate;

const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A set of pitch classes: a [BitStructure] on a [Degree::Harmonic] system
/// plus the metadata that material panels display.
#[derive(Clone, Debug, PartialEq)]
pub struct HarmonicStructure {
    bits: BitStructure,
    meta: StructureMeta,
}
impl HasBitStructure for HarmonicStructure {
    fn bit_structure(&self) -> &BitStructure {
        &self.bits
    }
}
impl TryFrom<BitStructure> for HarmonicStructure {
    type Error = StructureError;

    fn try_from(bits: BitStructure) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}
impl HarmonicStructure {
    /// Wraps `bits`, which must belong to a harmonic system.
    pub fn new(bits: BitStructure) -> Result<Self, StructureError> {
        if !bits.system().is_harmonic() {
            return Err(StructureError::DegreeMismatch {
                expected: Degree::Harmonic.into(),
                actual: bits.system().degree(),
            });
        }
        Ok(Self {
            meta: StructureMeta::new(&bits, Self::shortcut_for(&bits), Behavior::harmonic(&bits)),
            bits,
        })
    }

    /// Note names for chromatic systems (`C E G`), positions otherwise.
    fn shortcut_for(bits: &BitStructure) -> String {
        let positions = bits.on_positions();
        if bits.order() == GeneralSystem::CHROMATIC_ORDER {
            positions
                .iter()
                .map(|p| PITCH_NAMES[*p])
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            positions
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }
    }

    /// Returns a copy carrying the given occurrence count.
    pub fn with_occurrence(mut self, occurrence: usize) -> Self {
        self.meta = self.meta.with_occurrence(occurrence);
        self
    }

    /// The structure moved up `steps` positions.
    pub fn transposed(&self, steps: usize) -> Self {
        let bits = self.bits.rotated(steps);
        Self {
            meta: self.meta.with_shortcut(Self::shortcut_for(&bits)),
            bits,
        }
    }

    /// See [interval_vector()].
    pub fn interval_vector(&self) -> Vec<usize> {
        interval_vector(&self.bits)
    }

    #[allow(missing_docs)]
    pub fn meta(&self) -> &StructureMeta {
        &self.meta
    }

    delegate! {
        to self.meta {
            /// Note names for chromatic systems (`C E G`), positions otherwise.
            pub fn shortcut(&self) -> &str;
            #[allow(missing_docs)]
            pub fn class_number(&self) -> ClassNumber;
            #[allow(missing_docs)]
            pub fn class_code(&self) -> &str;
            #[allow(missing_docs)]
            pub fn behavior(&self) -> &Behavior;
            #[allow(missing_docs)]
            pub fn occurrence(&self) -> Occurrence;
        }
    }
}
