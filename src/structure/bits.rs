// Copyright (c) 2024 Mike Tsao

use super::code::{parse_structural_code, to_structural_code, to_structural_code_with_threshold};
use crate::{error::StructureError, types::GeneralSystem};
use bit_vec::BitVec;
use std::sync::Arc;

/// A [BitStructure] is an immutable bit-vector over the order of its
/// [GeneralSystem]. Bit `i` is on iff bit `i` of the decimal number is set,
/// so the decimal number and the bit-vector determine each other. The level
/// (popcount) is computed once at construction.
#[derive(Clone, Debug)]
pub struct BitStructure {
    system: Arc<GeneralSystem>,
    bits: BitVec,
    number: u128,
    level: usize,
}
impl PartialEq for BitStructure {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && *self.system == *other.system
    }
}
impl Eq for BitStructure {}

impl BitStructure {
    /// Builds the structure whose decimal number is `number`. Fails if
    /// `number` is outside `[0, 2^order)`.
    pub fn from_decimal(system: Arc<GeneralSystem>, number: u128) -> Result<Self, StructureError> {
        if !system.contains_number(number) {
            return Err(StructureError::NumberOutOfRange {
                number,
                order: system.order(),
            });
        }
        let bits = BitVec::from_fn(system.order(), |i| (number >> i) & 1 == 1);
        Ok(Self::new_unchecked(system, bits, number))
    }

    /// Builds a structure from an explicit bit-vector, which must be exactly
    /// `order` bits long.
    pub fn from_bits(system: Arc<GeneralSystem>, bits: &BitVec) -> Result<Self, StructureError> {
        if bits.len() != system.order() {
            return Err(StructureError::LengthMismatch {
                expected: system.order(),
                actual: bits.len(),
            });
        }
        let number = Self::to_decimal(bits);
        Ok(Self::new_unchecked(system, bits.clone(), number))
    }

    /// Builds a structure with exactly the given positions on. Duplicates are
    /// harmless.
    pub fn from_positions(
        system: Arc<GeneralSystem>,
        positions: &[usize],
    ) -> Result<Self, StructureError> {
        let mut bits = BitVec::from_elem(system.order(), false);
        for &position in positions {
            if position >= system.order() {
                return Err(StructureError::PositionOutOfRange {
                    position,
                    order: system.order(),
                });
            }
            bits.set(position, true);
        }
        Self::from_bits(system, &bits)
    }

    /// Parses a structural code such as `1,3*0,1,7*0`.
    pub fn parse_code(system: Arc<GeneralSystem>, code: &str) -> Result<Self, StructureError> {
        let bits = parse_structural_code(code, system.order())?;
        Self::from_bits(system, &bits)
    }

    fn new_unchecked(system: Arc<GeneralSystem>, bits: BitVec, number: u128) -> Self {
        let level = bits.iter().filter(|b| *b).count();
        Self {
            system,
            bits,
            number,
            level,
        }
    }

    /// Sum of 2^i over the set bits. The caller guarantees there are at most
    /// [GeneralSystem::MAX_ORDER] bits.
    pub fn to_decimal(bits: &BitVec) -> u128 {
        bits.iter()
            .enumerate()
            .filter(|(_, b)| *b)
            .fold(0u128, |acc, (i, _)| acc | (1u128 << i))
    }

    #[allow(missing_docs)]
    pub fn system(&self) -> &Arc<GeneralSystem> {
        &self.system
    }

    #[allow(missing_docs)]
    pub fn order(&self) -> usize {
        self.bits.len()
    }

    /// The structure's unique integer encoding.
    pub fn decimal_number(&self) -> u128 {
        self.number
    }

    #[allow(missing_docs)]
    pub fn bits(&self) -> &BitVec {
        &self.bits
    }

    /// The number of on bits.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Whether `position` is on. Fails if `position >= order`.
    pub fn is_on(&self, position: usize) -> Result<bool, StructureError> {
        self.bits
            .get(position)
            .ok_or(StructureError::PositionOutOfRange {
                position,
                order: self.order(),
            })
    }

    /// Whether `position` is off. Fails if `position >= order`.
    pub fn is_off(&self, position: usize) -> Result<bool, StructureError> {
        self.is_on(position).map(|on| !on)
    }

    /// The on positions in ascending order.
    pub fn on_positions(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.then_some(i))
            .collect()
    }

    /// The canonical persisted form.
    pub fn structural_code(&self) -> String {
        to_structural_code(&self.bits)
    }

    #[allow(missing_docs)]
    pub fn structural_code_with_threshold(&self, threshold: usize) -> String {
        to_structural_code_with_threshold(&self.bits, threshold)
    }

    /// The structure shifted `steps` positions upward, wrapping around the
    /// order. Position `p` moves to `(p + steps) % order`.
    pub fn rotated(&self, steps: usize) -> Self {
        let order = self.order();
        let steps = steps % order;
        let bits = BitVec::from_fn(order, |i| self.bits[(i + order - steps) % order]);
        let number = Self::to_decimal(&bits);
        Self::new_unchecked(Arc::clone(&self.system), bits, number)
    }

    /// Whether every on bit here is also on in `other`. Fails if the orders
    /// differ.
    pub fn is_subset_of(&self, other: &BitStructure) -> Result<bool, StructureError> {
        self.check_same_order(other)?;
        Ok(self
            .bits
            .iter()
            .zip(other.bits.iter())
            .all(|(mine, theirs)| !mine || theirs))
    }

    pub(crate) fn check_same_order(&self, other: &BitStructure) -> Result<(), StructureError> {
        if self.order() != other.order() {
            return Err(StructureError::OrderMismatch {
                left: self.order(),
                right: other.order(),
            });
        }
        Ok(())
    }
}
