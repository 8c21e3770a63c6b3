// Copyright (c) 2024 Mike Tsao

use super::{
    class::{Behavior, ClassNumber, Occurrence},
    BitStructure, HasBitStructure, StructureMeta,
};
use crate::error::StructureError;
use delegate::delegate;

/// Which ticks of a bar are struck: a [BitStructure] on a rhythmic system.
#[derive(Clone, Debug, PartialEq)]
pub struct RhythmicStructure {
    bits: BitStructure,
    meta: StructureMeta,
}
impl HasBitStructure for RhythmicStructure {
    fn bit_structure(&self) -> &BitStructure {
        &self.bits
    }
}
impl TryFrom<BitStructure> for RhythmicStructure {
    type Error = StructureError;

    fn try_from(bits: BitStructure) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}
impl RhythmicStructure {
    /// Wraps `bits`, which must belong to a rhythmic system.
    pub fn new(bits: BitStructure) -> Result<Self, StructureError> {
        if !bits.system().is_rhythmic() {
            return Err(StructureError::DegreeMismatch {
                expected: "Rhythmic",
                actual: bits.system().degree(),
            });
        }
        let shortcut = bits.bits().iter().map(|b| if b { 'x' } else { '.' }).collect();
        Ok(Self {
            meta: StructureMeta::new(&bits, shortcut, Behavior::rhythmic(&bits)),
            bits,
        })
    }

    /// Returns a copy carrying the given occurrence count.
    pub fn with_occurrence(mut self, occurrence: usize) -> Self {
        self.meta = self.meta.with_occurrence(occurrence);
        self
    }

    /// The struck ticks in ascending order.
    pub fn onsets(&self) -> Vec<usize> {
        self.bits.on_positions()
    }

    /// The distance from each onset to the next, wrapping from the last onset
    /// back around to the first. A single onset spans the whole order.
    pub fn figure_lengths(&self) -> Vec<usize> {
        let onsets = self.onsets();
        let order = self.order();
        onsets
            .iter()
            .enumerate()
            .map(|(i, start)| match onsets.get(i + 1) {
                Some(next) => next - start,
                None => order - start + onsets[0],
            })
            .collect()
    }

    #[allow(missing_docs)]
    pub fn meta(&self) -> &StructureMeta {
        &self.meta
    }

    delegate! {
        to self.meta {
            /// `x` for each onset, `.` for each rest.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Degree, GeneralSystem};
    use std::sync::Arc;

    fn rhythm(code: &str) -> RhythmicStructure {
        let system = Arc::new(GeneralSystem::new(Degree::RhythmicStructure, 8).unwrap());
        RhythmicStructure::new(BitStructure::parse_code(system, code).unwrap()).unwrap()
    }

    #[test]
    fn tresillo() {
        let r = rhythm("1,0,0,1,0,0,1,0");
        assert_eq!(r.shortcut(), "x..x..x.");
        assert_eq!(r.onsets(), vec![0, 3, 6]);
        assert_eq!(r.figure_lengths(), vec![3, 3, 2]);
        assert_eq!(r.level(), 3);
    }

    #[test]
    fn figure_lengths_wrap() {
        assert_eq!(rhythm("0,0,1,5*0").figure_lengths(), vec![8]);
        assert_eq!(rhythm("0,1,5*0,1").figure_lengths(), vec![6, 2]);
        assert!(rhythm("8*0").figure_lengths().is_empty());
    }

    #[test]
    fn rejects_harmonic_system() {
        let system = Arc::new(GeneralSystem::new(Degree::Harmonic, 8).unwrap());
        let bits = BitStructure::from_decimal(system, 5).unwrap();
        assert!(matches!(
            RhythmicStructure::new(bits),
            Err(StructureError::DegreeMismatch {
                actual: Degree::Harmonic,
                ..
            })
        ));

        let shape = Arc::new(GeneralSystem::new(Degree::RhythmicShape, 8).unwrap());
        assert!(RhythmicStructure::new(BitStructure::from_decimal(shape, 5).unwrap()).is_ok());
    }
}
