// Copyright (c) 2024 Mike Tsao

//! Counting systems shared by every structure of a kind.

use crate::error::StructureError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Distinguishes the kinds of system a structure can be built against.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
    Serialize,
    Deserialize,
)]
pub enum Degree {
    /// Pitch-class structures, usually over the 12-tone chromatic order.
    #[default]
    Harmonic,
    /// The onset shape of a rhythm.
    RhythmicShape,
    /// A rhythmic structure proper: which ticks of a bar are struck.
    RhythmicStructure,
}
impl Degree {
    /// Whether this degree describes rhythm rather than harmony.
    pub fn is_rhythmic(&self) -> bool {
        matches!(self, Degree::RhythmicShape | Degree::RhythmicStructure)
    }
}

/// A [GeneralSystem] fixes the number of bit positions (the order) that every
/// structure of a given [Degree] has. Two systems are equal iff their degree
/// and order match.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneralSystem {
    degree: Degree,
    order: usize,
}
impl GeneralSystem {
    /// The widest order whose decimal numbers still fit in a u128.
    pub const MAX_ORDER: usize = 128;

    /// The standard chromatic order.
    pub const CHROMATIC_ORDER: usize = 12;

    #[allow(missing_docs)]
    pub fn new(degree: Degree, order: usize) -> Result<Self, StructureError> {
        if order == 0 || order > Self::MAX_ORDER {
            return Err(StructureError::InvalidOrder {
                order,
                max: Self::MAX_ORDER,
            });
        }
        Ok(Self { degree, order })
    }

    #[allow(missing_docs)]
    pub fn degree(&self) -> Degree {
        self.degree
    }

    /// The number of bit positions in every structure of this system.
    pub fn order(&self) -> usize {
        self.order
    }

    #[allow(missing_docs)]
    pub fn is_harmonic(&self) -> bool {
        self.degree == Degree::Harmonic
    }

    #[allow(missing_docs)]
    pub fn is_rhythmic(&self) -> bool {
        self.degree.is_rhythmic()
    }

    /// The decimal number with every bit on. All valid numbers are
    /// `0..=max_number()`.
    pub fn max_number(&self) -> u128 {
        if self.order == Self::MAX_ORDER {
            u128::MAX
        } else {
            (1u128 << self.order) - 1
        }
    }

    /// 2^order, saturating at u128::MAX for the widest order.
    pub fn instance_count(&self) -> u128 {
        self.max_number().saturating_add(1)
    }

    /// Whether `number` encodes a structure of this system.
    pub fn contains_number(&self, number: u128) -> bool {
        number <= self.max_number()
    }
}

/// Hands out one shared [GeneralSystem] per (degree, order) pair. The
/// application owns a single catalog and passes it to whatever needs to
/// resolve systems, such as the MIF reader.
#[derive(Debug, Default)]
pub struct SystemCatalog {
    systems: FxHashMap<(Degree, usize), Arc<GeneralSystem>>,
}
impl SystemCatalog {
    /// Returns the memoized system, creating it on first request.
    pub fn system(
        &mut self,
        degree: Degree,
        order: usize,
    ) -> Result<Arc<GeneralSystem>, StructureError> {
        if let Some(system) = self.systems.get(&(degree, order)) {
            return Ok(Arc::clone(system));
        }
        let system = Arc::new(GeneralSystem::new(degree, order)?);
        self.systems.insert((degree, order), Arc::clone(&system));
        Ok(system)
    }

    /// The 12-tone harmonic system.
    pub fn harmonic(&mut self) -> Arc<GeneralSystem> {
        let key = (Degree::Harmonic, GeneralSystem::CHROMATIC_ORDER);
        Arc::clone(self.systems.entry(key).or_insert_with(|| {
            Arc::new(GeneralSystem {
                degree: key.0,
                order: key.1,
            })
        }))
    }

    /// The number of distinct systems created so far.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn system_bounds() {
        assert!(GeneralSystem::new(Degree::Harmonic, 0).is_err());
        assert!(GeneralSystem::new(Degree::Harmonic, 129).is_err());

        let s = GeneralSystem::new(Degree::Harmonic, 8).unwrap();
        assert_eq!(s.max_number(), 255);
        assert_eq!(s.instance_count(), 256);
        assert!(s.contains_number(255));
        assert!(!s.contains_number(256));

        let wide = GeneralSystem::new(Degree::RhythmicStructure, 128).unwrap();
        assert_eq!(wide.max_number(), u128::MAX);
        assert_eq!(wide.instance_count(), u128::MAX);
    }

    #[test]
    fn system_equality() {
        let a = GeneralSystem::new(Degree::RhythmicShape, 16).unwrap();
        let b = GeneralSystem::new(Degree::RhythmicShape, 16).unwrap();
        let c = GeneralSystem::new(Degree::RhythmicStructure, 16).unwrap();
        let d = GeneralSystem::new(Degree::RhythmicShape, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c, "Degree should participate in equality");
        assert_ne!(a, d, "Order should participate in equality");
    }

    #[test]
    fn catalog_memoizes() {
        let mut catalog = SystemCatalog::default();
        assert!(catalog.is_empty());

        let a = catalog.system(Degree::Harmonic, 12).unwrap();
        let b = catalog.harmonic();
        assert!(Arc::ptr_eq(&a, &b), "Same pair should yield same Arc");

        let _ = catalog.system(Degree::RhythmicStructure, 12).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.system(Degree::Harmonic, 0).is_err());
        assert_eq!(catalog.len(), 2, "Failed requests shouldn't be cached");
    }

    #[test]
    fn degree_names() {
        assert_eq!(Degree::RhythmicShape.to_string(), "RhythmicShape");
        assert_eq!(
            "RhythmicStructure".parse::<Degree>().unwrap(),
            Degree::RhythmicStructure
        );
        assert!("Melodic".parse::<Degree>().is_err());
        assert!(!Degree::Harmonic.is_rhythmic());

        for degree in Degree::iter() {
            let name: &'static str = degree.into();
            assert_eq!(name.parse::<Degree>().unwrap(), degree);
        }
        assert_eq!(Degree::iter().filter(Degree::is_rhythmic).count(), 2);
    }
}
