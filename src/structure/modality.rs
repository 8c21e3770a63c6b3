// Copyright (c) 2024 Mike Tsao

use super::{class::class_code, BitStructure, HasBitStructure};
use crate::{error::StructureError, types::GeneralSystem};
use std::sync::Arc;

/// Whether `modality` covers `structure`: no position is on in the structure
/// but off in the modality. Stops at the first violation. Fails if the two
/// have different orders.
pub fn covers(modality: &BitStructure, structure: &BitStructure) -> Result<bool, StructureError> {
    modality.check_same_order(structure)?;
    Ok(!structure
        .bits()
        .iter()
        .zip(modality.bits().iter())
        .any(|(s, m)| s && !m))
}

/// A [Modality] is a [BitStructure] used as a coverage mask. Material panels
/// hold one current modality and replace it wholesale when the filter
/// changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Modality {
    bits: BitStructure,
    name: String,
    class_code: String,
}
impl HasBitStructure for Modality {
    fn bit_structure(&self) -> &BitStructure {
        &self.bits
    }
}
impl Modality {
    #[allow(missing_docs)]
    pub fn new(bits: BitStructure, name: impl Into<String>) -> Self {
        Self {
            class_code: class_code(&bits),
            name: name.into(),
            bits,
        }
    }

    /// Builds a modality from a structural code.
    pub fn parse_code(
        system: Arc<GeneralSystem>,
        code: &str,
        name: impl Into<String>,
    ) -> Result<Self, StructureError> {
        Ok(Self::new(BitStructure::parse_code(system, code)?, name))
    }

    #[allow(missing_docs)]
    pub fn from_decimal(
        system: Arc<GeneralSystem>,
        number: u128,
        name: impl Into<String>,
    ) -> Result<Self, StructureError> {
        Ok(Self::new(BitStructure::from_decimal(system, number)?, name))
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The structural code of the modality's rotation class.
    pub fn class_code(&self) -> &str {
        &self.class_code
    }

    /// See [covers()].
    pub fn covers(&self, structure: &impl HasBitStructure) -> Result<bool, StructureError> {
        covers(&self.bits, structure.bit_structure())
    }

    /// Keeps only the covered candidates, preserving their relative order.
    /// Fails on the first candidate whose order differs.
    pub fn filter<T: HasBitStructure + Clone>(
        &self,
        candidates: &[T],
    ) -> Result<Vec<T>, StructureError> {
        let mut covered = Vec::default();
        for candidate in candidates {
            if self.covers(candidate)? {
                covered.push(candidate.clone());
            }
        }
        Ok(covered)
    }

    /// How many structures this modality covers (2^level).
    pub fn substructure_count(&self) -> u128 {
        1u128.checked_shl(self.bits.level() as u32).unwrap_or(u128::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{structure::HarmonicStructure, types::Degree};

    fn chromatic() -> Arc<GeneralSystem> {
        Arc::new(GeneralSystem::new(Degree::Harmonic, 12).unwrap())
    }

    fn structure(positions: &[usize]) -> HarmonicStructure {
        HarmonicStructure::new(BitStructure::from_positions(chromatic(), positions).unwrap())
            .unwrap()
    }

    #[test]
    fn diatonic_coverage() {
        let diatonic = Modality::new(
            BitStructure::from_positions(chromatic(), &[0, 2, 4, 5, 7, 9, 11]).unwrap(),
            "Ionian",
        );
        assert_eq!(diatonic.name(), "Ionian");
        assert!(diatonic.covers(&structure(&[0, 4, 7])).unwrap());
        assert!(!diatonic.covers(&structure(&[1, 4, 7])).unwrap());
        assert_eq!(diatonic.substructure_count(), 128);
    }

    #[test]
    fn extreme_modalities() {
        let all = Modality::from_decimal(chromatic(), 0xfff, "All").unwrap();
        let none = Modality::from_decimal(chromatic(), 0, "None").unwrap();
        for number in 0..4096 {
            let s = BitStructure::from_decimal(chromatic(), number).unwrap();
            assert!(all.covers(&s).unwrap());
            assert_eq!(none.covers(&s).unwrap(), number == 0);
        }
    }

    #[test]
    fn coverage_matches_and_not() {
        let system = Arc::new(GeneralSystem::new(Degree::Harmonic, 6).unwrap());
        for m in 0..64u128 {
            let modality = BitStructure::from_decimal(Arc::clone(&system), m).unwrap();
            for s in 0..64u128 {
                let structure = BitStructure::from_decimal(Arc::clone(&system), s).unwrap();
                assert_eq!(covers(&modality, &structure).unwrap(), s & !m == 0);
            }
        }
    }

    #[test]
    fn order_mismatch_is_an_error() {
        let modality = Modality::from_decimal(chromatic(), 0xfff, "All").unwrap();
        let seven = Arc::new(GeneralSystem::new(Degree::Harmonic, 7).unwrap());
        let s = BitStructure::from_decimal(seven, 1).unwrap();
        assert_eq!(
            modality.covers(&s),
            Err(StructureError::OrderMismatch { left: 12, right: 7 })
        );
    }

    #[test]
    fn filter_preserves_order() {
        let pentatonic = Modality::parse_code(chromatic(), "1,0,1,0,1,0,0,1,0,1,0,0", "Pentatonic")
            .unwrap();
        let candidates = vec![
            structure(&[9]),
            structure(&[1]),
            structure(&[0, 4, 7]),
            structure(&[0, 4, 8]),
            structure(&[2, 7]),
        ];
        let kept = pentatonic.filter(&candidates).unwrap();
        let numbers: Vec<_> = kept.iter().map(|s| s.decimal_number()).collect();
        assert_eq!(
            numbers,
            vec![
                candidates[0].decimal_number(),
                candidates[2].decimal_number(),
                candidates[4].decimal_number()
            ]
        );
    }
}
