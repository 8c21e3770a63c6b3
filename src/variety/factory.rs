// Copyright (c) 2024 Mike Tsao

use super::Qualifier;
use crate::{
    error::{StructureError, VarietyError},
    structure::{class_representative, BitStructure, HasBitStructure, Modality, Structure},
    types::GeneralSystem,
    util::CoreSettings,
};
use delegate::delegate;
use derive_builder::Builder;
use std::{ops::Range, sync::Arc};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Selects how a [StructuralVariety] produces its candidates.
#[derive(Clone, Copy, Debug, Default, Display, EnumIter, EnumString, IntoStaticStr, PartialEq, Eq)]
pub enum VarietyType {
    /// Every decimal number of the system, or of a subrange.
    #[default]
    Instances,
    /// One structure per rotation class: its canonical representative.
    ClassRepresentatives,
    /// Every structure the modality covers.
    BinarySubstructuresOfModality,
    /// Covered structures that the qualifier also accepts. The qualifier
    /// carries the figural rule.
    FiguralSubstructuresOfModality,
}

/// The order of the resulting [StructList].
#[derive(Clone, Copy, Debug, Default, Display, EnumIter, EnumString, IntoStaticStr, PartialEq, Eq)]
pub enum VarietyOrdering {
    /// Ascending decimal number, which is also enumeration order.
    #[default]
    Natural,
    /// Ascending level, then ascending decimal number.
    Level,
    /// Descending qualifier score, then ascending decimal number.
    Score,
}

/// An ordered list of structures produced by a [StructuralVariety].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructList(Vec<Structure>);
impl StructList {
    delegate! {
        to self.0 {
            #[allow(missing_docs)]
            pub fn len(&self) -> usize;
            #[allow(missing_docs)]
            pub fn is_empty(&self) -> bool;
            #[allow(missing_docs)]
            pub fn iter(&self) -> core::slice::Iter<'_, Structure>;
            #[allow(missing_docs)]
            pub fn get(&self, index: usize) -> Option<&Structure>;
            #[allow(missing_docs)]
            pub fn first(&self) -> Option<&Structure>;
        }
    }

    /// The decimal numbers of the structures, in list order.
    pub fn decimal_numbers(&self) -> Vec<u128> {
        self.0.iter().map(|s| s.decimal_number()).collect()
    }

    #[allow(missing_docs)]
    pub fn into_vec(self) -> Vec<Structure> {
        self.0
    }
}
impl IntoIterator for StructList {
    type Item = Structure;
    type IntoIter = std::vec::IntoIter<Structure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A bounded, deterministic enumeration of the structures of a system that
/// satisfy a [VarietyType] policy. Build one with [StructuralVarietyBuilder],
/// then call [generate()](StructuralVariety::generate).
///
/// The instance policies are exponential in the order. The variety imposes no
/// timeout; callers pick `max_count` (and for instances, `range`) to keep the
/// work acceptable.
#[derive(Builder, Clone, Debug)]
#[builder(setter(into))]
pub struct StructuralVariety {
    /// The enumeration policy.
    #[builder(default)]
    variety_type: VarietyType,

    /// The system whose structures are enumerated.
    system: Arc<GeneralSystem>,

    /// Required by the substructure policies.
    #[builder(default)]
    modality: Option<Modality>,

    /// Prunes candidates, and scores them for [VarietyOrdering::Score].
    /// Required by [VarietyType::FiguralSubstructuresOfModality].
    #[builder(default)]
    qualifier: Option<Arc<dyn Qualifier>>,

    /// The result never holds more than this many structures.
    max_count: usize,

    /// How the result is sorted before truncation.
    #[builder(default)]
    ordering: VarietyOrdering,

    /// Restricts [VarietyType::Instances] and
    /// [VarietyType::ClassRepresentatives] to these decimal numbers.
    #[builder(default)]
    range: Option<Range<u128>>,
}
impl StructuralVariety {
    /// A builder whose `max_count` starts at the configured default bound.
    /// Setting `max_count` on the builder still overrides it.
    pub fn builder_with(settings: &CoreSettings) -> StructuralVarietyBuilder {
        let mut builder = StructuralVarietyBuilder::default();
        builder.max_count(settings.max_count());
        builder
    }

    #[allow(missing_docs)]
    pub fn variety_type(&self) -> VarietyType {
        self.variety_type
    }

    #[allow(missing_docs)]
    pub fn system(&self) -> &Arc<GeneralSystem> {
        &self.system
    }

    #[allow(missing_docs)]
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Runs the enumeration.
    pub fn generate(&self) -> Result<StructList, VarietyError> {
        let candidates = match self.variety_type {
            VarietyType::Instances => self.instances(false)?,
            VarietyType::ClassRepresentatives => self.instances(true)?,
            VarietyType::BinarySubstructuresOfModality => self.substructures(false)?,
            VarietyType::FiguralSubstructuresOfModality => self.substructures(true)?,
        };
        let list = self.order_and_truncate(candidates)?;
        log::debug!(
            "{} over {} order {}: {} structures",
            self.variety_type,
            self.system.degree(),
            self.system.order(),
            list.len()
        );
        Ok(list)
    }

    // Under natural ordering the enumeration itself is the final order, so
    // it can stop as soon as the bound is reached.
    fn early_limit(&self) -> usize {
        if self.ordering == VarietyOrdering::Natural {
            self.max_count
        } else {
            usize::MAX
        }
    }

    fn accepts(&self, candidate: &BitStructure) -> bool {
        self.qualifier
            .as_ref()
            .map_or(true, |q| q.accepts(candidate))
    }

    fn instances(&self, representatives_only: bool) -> Result<Vec<BitStructure>, VarietyError> {
        let max = self.system.max_number();
        let (start, end_inclusive) = match &self.range {
            Some(range) => {
                if range.start >= range.end || range.end - 1 > max {
                    return Err(VarietyError::InvalidRange {
                        start: range.start,
                        end: range.end,
                        order: self.system.order(),
                    });
                }
                (range.start, range.end - 1)
            }
            None => (0, max),
        };

        let limit = self.early_limit();
        let mut found = Vec::default();
        let mut number = start;
        while found.len() < limit {
            let candidate = BitStructure::from_decimal(Arc::clone(&self.system), number)?;
            if (!representatives_only
                || class_representative(&candidate).decimal_number() == number)
                && self.accepts(&candidate)
            {
                found.push(candidate);
            }
            if number == end_inclusive {
                break;
            }
            number += 1;
        }
        Ok(found)
    }

    fn substructures(&self, figural: bool) -> Result<Vec<BitStructure>, VarietyError> {
        let policy: &'static str = self.variety_type.into();
        let modality = self
            .modality
            .as_ref()
            .ok_or(VarietyError::MissingModality(policy))?;
        if figural && self.qualifier.is_none() {
            return Err(VarietyError::MissingQualifier(policy));
        }
        if modality.order() != self.system.order() {
            return Err(StructureError::OrderMismatch {
                left: modality.order(),
                right: self.system.order(),
            }
            .into());
        }

        // Ascending submask enumeration: visits exactly the covered numbers.
        let mask = modality.decimal_number();
        let limit = self.early_limit();
        let mut found = Vec::default();
        let mut submask = 0u128;
        while found.len() < limit {
            let candidate = BitStructure::from_decimal(Arc::clone(&self.system), submask)?;
            if self.accepts(&candidate) {
                found.push(candidate);
            }
            submask = (submask | !mask).wrapping_add(1) & mask;
            if submask == 0 {
                break;
            }
        }
        Ok(found)
    }

    fn order_and_truncate(
        &self,
        mut candidates: Vec<BitStructure>,
    ) -> Result<StructList, VarietyError> {
        match self.ordering {
            VarietyOrdering::Natural => {}
            VarietyOrdering::Level => {
                candidates.sort_by_key(|c| (c.level(), c.decimal_number()));
            }
            VarietyOrdering::Score => {
                let mut scored: Vec<(f64, BitStructure)> = candidates
                    .into_iter()
                    .map(|c| {
                        (
                            self.qualifier.as_ref().map_or(0.0, |q| q.score(&c)),
                            c,
                        )
                    })
                    .collect();
                scored.sort_by(|(a_score, a), (b_score, b)| {
                    b_score
                        .total_cmp(a_score)
                        .then(a.decimal_number().cmp(&b.decimal_number()))
                });
                candidates = scored.into_iter().map(|(_, c)| c).collect();
            }
        }
        candidates.truncate(self.max_count);
        let structures = candidates
            .into_iter()
            .map(Structure::from_bit_structure)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StructList(structures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        types::{Degree, SystemCatalog},
        variety::{FnQualifier, LevelQualifier},
    };
    use more_asserts::assert_le;
    use rustc_hash::FxHashSet;

    fn diatonic(catalog: &mut SystemCatalog) -> Modality {
        Modality::parse_code(catalog.harmonic(), "1,0,1,0,1,1,0,1,0,1,0,1", "Ionian").unwrap()
    }

    #[test]
    fn settings_seed_the_bound() {
        let mut catalog = SystemCatalog::default();
        let mut settings = CoreSettings::default();
        settings.set_max_count(5);

        let variety = StructuralVariety::builder_with(&settings)
            .system(catalog.harmonic())
            .build()
            .unwrap();
        assert_eq!(variety.max_count(), 5);
        assert_eq!(variety.generate().unwrap().len(), 5);

        let overridden = StructuralVariety::builder_with(&settings)
            .system(catalog.harmonic())
            .max_count(9usize)
            .build()
            .unwrap();
        assert_eq!(overridden.generate().unwrap().len(), 9);

        assert!(StructuralVarietyBuilder::default()
            .system(catalog.harmonic())
            .build()
            .is_err());
    }

    #[test]
    fn instances_in_natural_order() {
        let mut catalog = SystemCatalog::default();
        let variety = StructuralVarietyBuilder::default()
            .system(catalog.system(Degree::Harmonic, 4).unwrap())
            .max_count(100usize)
            .build()
            .unwrap();
        let list = variety.generate().unwrap();
        assert_eq!(list.decimal_numbers(), (0..16).collect::<Vec<u128>>());

        let bounded = StructuralVarietyBuilder::default()
            .system(catalog.harmonic())
            .max_count(5usize)
            .range(Some(100..200))
            .build()
            .unwrap();
        assert_eq!(
            bounded.generate().unwrap().decimal_numbers(),
            vec![100, 101, 102, 103, 104]
        );
    }

    #[test]
    fn instances_range_is_checked() {
        let mut catalog = SystemCatalog::default();
        let system = catalog.system(Degree::Harmonic, 4).unwrap();
        for range in [5..5, 0..17] {
            let variety = StructuralVarietyBuilder::default()
                .system(Arc::clone(&system))
                .max_count(10usize)
                .range(Some(range))
                .build()
                .unwrap();
            assert!(matches!(
                variety.generate(),
                Err(VarietyError::InvalidRange { order: 4, .. })
            ));
        }
    }

    #[test]
    fn class_representatives() {
        let mut catalog = SystemCatalog::default();
        let variety = StructuralVarietyBuilder::default()
            .variety_type(VarietyType::ClassRepresentatives)
            .system(catalog.harmonic())
            .max_count(10_000usize)
            .build()
            .unwrap();
        let list = variety.generate().unwrap();
        // The number of binary necklaces of length 12.
        assert_eq!(list.len(), 352);
        let classes: FxHashSet<_> = list.iter().map(|s| s.class_number()).collect();
        assert_eq!(classes.len(), 352, "Each class should appear once");
    }

    #[test]
    fn binary_substructures() {
        let mut catalog = SystemCatalog::default();
        let modality = diatonic(&mut catalog);
        let variety = StructuralVarietyBuilder::default()
            .variety_type(VarietyType::BinarySubstructuresOfModality)
            .system(catalog.harmonic())
            .modality(Some(modality.clone()))
            .max_count(1000usize)
            .build()
            .unwrap();
        let list = variety.generate().unwrap();
        assert_eq!(list.len(), 128);
        let numbers = list.decimal_numbers();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        for s in list.iter() {
            assert!(modality.covers(s).unwrap());
        }

        let truncated = StructuralVarietyBuilder::default()
            .variety_type(VarietyType::BinarySubstructuresOfModality)
            .system(catalog.harmonic())
            .modality(Some(modality))
            .max_count(4usize)
            .build()
            .unwrap();
        assert_eq!(truncated.generate().unwrap().decimal_numbers(), vec![0, 1, 4, 5]);
    }

    #[test]
    fn figural_substructures_need_a_qualifier() {
        let mut catalog = SystemCatalog::default();
        let mut builder = StructuralVarietyBuilder::default();
        builder
            .variety_type(VarietyType::FiguralSubstructuresOfModality)
            .system(catalog.harmonic())
            .max_count(1000usize);
        assert_eq!(
            builder.build().unwrap().generate(),
            Err(VarietyError::MissingModality("FiguralSubstructuresOfModality"))
        );

        builder.modality(Some(diatonic(&mut catalog)));
        assert_eq!(
            builder.build().unwrap().generate(),
            Err(VarietyError::MissingQualifier("FiguralSubstructuresOfModality"))
        );

        let qualifier: Arc<dyn Qualifier> = Arc::new(LevelQualifier(3..=3));
        builder.qualifier(Some(qualifier));
        let list = builder.build().unwrap().generate().unwrap();
        // Choose 3 of the 7 diatonic positions.
        assert_eq!(list.len(), 35);
        assert!(list.iter().all(|s| s.level() == 3));
    }

    #[test]
    fn mismatched_modality_order() {
        let mut catalog = SystemCatalog::default();
        let variety = StructuralVarietyBuilder::default()
            .variety_type(VarietyType::BinarySubstructuresOfModality)
            .system(catalog.system(Degree::Harmonic, 7).unwrap())
            .modality(Some(diatonic(&mut catalog)))
            .max_count(10usize)
            .build()
            .unwrap();
        assert!(matches!(
            variety.generate(),
            Err(VarietyError::Structure(StructureError::OrderMismatch {
                left: 12,
                right: 7
            }))
        ));
    }

    #[test]
    fn orderings_are_deterministic() {
        let mut catalog = SystemCatalog::default();
        let modality = diatonic(&mut catalog);
        let qualifier: Arc<dyn Qualifier> =
            Arc::new(FnQualifier::new(|s| s.level() >= 2).with_score(|s| s.level() as f64));
        let build = |ordering| {
            StructuralVarietyBuilder::default()
                .variety_type(VarietyType::FiguralSubstructuresOfModality)
                .system(modality.system().clone())
                .modality(Some(modality.clone()))
                .qualifier(Some(Arc::clone(&qualifier)))
                .ordering(ordering)
                .max_count(20usize)
                .build()
                .unwrap()
        };

        for ordering in [
            VarietyOrdering::Natural,
            VarietyOrdering::Level,
            VarietyOrdering::Score,
        ] {
            let first = build(ordering).generate().unwrap();
            let second = build(ordering).generate().unwrap();
            assert_eq!(first.decimal_numbers(), second.decimal_numbers());
            assert_le!(first.len(), 20);
        }

        let by_level = build(VarietyOrdering::Level).generate().unwrap();
        assert!(by_level.iter().all(|s| s.level() == 2));
        assert_eq!(by_level.first().unwrap().decimal_number(), 0b101);

        let by_score = build(VarietyOrdering::Score).generate().unwrap();
        assert_eq!(by_score.first().unwrap().level(), 7);
        assert_eq!(by_score.get(1).unwrap().level(), 6);
    }
}
