// Copyright (c) 2024 Mike Tsao

//! Bit structures over a fixed-order system, their harmonic and rhythmic
//! specializations, and modality coverage.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        BitStructure, HarmonicStructure, HasBitStructure, Modality, RhythmicStructure, Structure,
    };
}

pub use {
    bits::BitStructure,
    class::{class_code, class_representative, interval_vector, Behavior, ClassNumber, Occurrence},
    code::{
        parse_structural_code, to_structural_code, to_structural_code_with_threshold,
        DEFAULT_RLE_THRESHOLD,
    },
    harmonic::HarmonicStructure,
    meta::StructureMeta,
    modality::{covers, Modality},
    rhythmic::RhythmicStructure,
    traits::HasBitStructure,
};

mod bits;
mod class;
mod code;
mod harmonic;
mod meta;
mod modality;
mod rhythmic;
mod traits;

use crate::{error::StructureError, types::Degree};
use delegate::delegate;

/// Either kind of structure. The variant follows the degree of the system it
/// was built on.
#[derive(Clone, Debug, PartialEq)]
pub enum Structure {
    #[allow(missing_docs)]
    Harmonic(HarmonicStructure),
    #[allow(missing_docs)]
    Rhythmic(RhythmicStructure),
}
impl HasBitStructure for Structure {
    fn bit_structure(&self) -> &BitStructure {
        match self {
            Structure::Harmonic(s) => s.bit_structure(),
            Structure::Rhythmic(s) => s.bit_structure(),
        }
    }
}
impl From<HarmonicStructure> for Structure {
    fn from(value: HarmonicStructure) -> Self {
        Self::Harmonic(value)
    }
}
impl From<RhythmicStructure> for Structure {
    fn from(value: RhythmicStructure) -> Self {
        Self::Rhythmic(value)
    }
}
impl Structure {
    /// Wraps `bits` in the specialization matching its system's degree.
    pub fn from_bit_structure(bits: BitStructure) -> Result<Self, StructureError> {
        if bits.system().degree() == Degree::Harmonic {
            Ok(Self::Harmonic(HarmonicStructure::new(bits)?))
        } else {
            Ok(Self::Rhythmic(RhythmicStructure::new(bits)?))
        }
    }

    /// The metadata shared by both kinds.
    pub fn meta(&self) -> &StructureMeta {
        match self {
            Structure::Harmonic(s) => s.meta(),
            Structure::Rhythmic(s) => s.meta(),
        }
    }

    delegate! {
        to self.meta() {
            #[allow(missing_docs)]
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

    /// Returns a copy carrying the given occurrence count.
    pub fn with_occurrence(self, occurrence: usize) -> Self {
        match self {
            Structure::Harmonic(s) => s.with_occurrence(occurrence).into(),
            Structure::Rhythmic(s) => s.with_occurrence(occurrence).into(),
        }
    }

    #[allow(missing_docs)]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Structure::Harmonic(_) => "Harmonic",
            Structure::Rhythmic(_) => "Rhythmic",
        }
    }

    #[allow(missing_docs)]
    pub fn as_harmonic(&self) -> Option<&HarmonicStructure> {
        match self {
            Structure::Harmonic(s) => Some(s),
            Structure::Rhythmic(_) => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_rhythmic(&self) -> Option<&RhythmicStructure> {
        match self {
            Structure::Harmonic(_) => None,
            Structure::Rhythmic(s) => Some(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SystemCatalog;

    #[test]
    fn variant_follows_degree() {
        let mut catalog = SystemCatalog::default();
        let harmonic = BitStructure::from_decimal(catalog.harmonic(), 145).unwrap();
        let s = Structure::from_bit_structure(harmonic).unwrap();
        assert_eq!(s.kind_name(), "Harmonic");
        assert_eq!(s.shortcut(), "C E G");
        assert!(s.as_harmonic().is_some());

        let system = catalog.system(Degree::RhythmicShape, 4).unwrap();
        let rhythmic = BitStructure::from_decimal(system, 0b0101).unwrap();
        let s = Structure::from_bit_structure(rhythmic).unwrap();
        assert_eq!(s.kind_name(), "Rhythmic");
        assert_eq!(s.shortcut(), "x.x.");
        assert_eq!(s.level(), 2);
        assert!(s.as_rhythmic().is_some());
    }
}
