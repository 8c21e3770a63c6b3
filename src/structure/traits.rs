// Copyright (c) 2024 Mike Tsao

use super::BitStructure;
use crate::{error::StructureError, types::GeneralSystem};
use std::sync::Arc;

/// Anything built around a [BitStructure]. Implementors supply
/// [bit_structure()](HasBitStructure::bit_structure) and get the rest.
pub trait HasBitStructure {
    /// The underlying bits.
    fn bit_structure(&self) -> &BitStructure;

    #[allow(missing_docs)]
    fn system(&self) -> &Arc<GeneralSystem> {
        self.bit_structure().system()
    }

    #[allow(missing_docs)]
    fn order(&self) -> usize {
        self.bit_structure().order()
    }

    #[allow(missing_docs)]
    fn decimal_number(&self) -> u128 {
        self.bit_structure().decimal_number()
    }

    /// The popcount.
    fn level(&self) -> usize {
        self.bit_structure().level()
    }

    #[allow(missing_docs)]
    fn is_on(&self, position: usize) -> Result<bool, StructureError> {
        self.bit_structure().is_on(position)
    }

    #[allow(missing_docs)]
    fn is_off(&self, position: usize) -> Result<bool, StructureError> {
        self.bit_structure().is_off(position)
    }

    #[allow(missing_docs)]
    fn structural_code(&self) -> String {
        self.bit_structure().structural_code()
    }
}

impl HasBitStructure for BitStructure {
    fn bit_structure(&self) -> &BitStructure {
        self
    }
}
