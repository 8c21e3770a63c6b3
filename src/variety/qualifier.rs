// Copyright (c) 2024 Mike Tsao

use crate::structure::{class_representative, BitStructure};
use core::{fmt::Debug, ops::RangeInclusive};
use std::sync::Arc;

/// Decides which candidates a variety keeps, and optionally how they rank.
/// Implementations must be pure so that identical inputs always yield
/// identical varieties.
pub trait Qualifier: Debug + Send + Sync {
    /// Whether the candidate belongs in the variety.
    fn accepts(&self, candidate: &BitStructure) -> bool;

    /// Higher scores sort first under
    /// [VarietyOrdering::Score](super::VarietyOrdering::Score).
    fn score(&self, _candidate: &BitStructure) -> f64 {
        0.0
    }
}

/// Accepts structures whose level falls in the range. Scores by level so that
/// denser structures rank first.
#[derive(Clone, Debug)]
pub struct LevelQualifier(pub RangeInclusive<usize>);
impl Qualifier for LevelQualifier {
    fn accepts(&self, candidate: &BitStructure) -> bool {
        self.0.contains(&candidate.level())
    }

    fn score(&self, candidate: &BitStructure) -> f64 {
        candidate.level() as f64
    }
}

/// Accepts only the canonical member of each rotation class.
#[derive(Clone, Debug, Default)]
pub struct ClassRepresentativeQualifier;
impl Qualifier for ClassRepresentativeQualifier {
    fn accepts(&self, candidate: &BitStructure) -> bool {
        class_representative(candidate).decimal_number() == candidate.decimal_number()
    }
}

/// Adapts a plain function, which is how hosts plug in domain policies such
/// as figural rules.
#[derive(Clone, Copy, Debug)]
pub struct FnQualifier {
    accepts: fn(&BitStructure) -> bool,
    score: Option<fn(&BitStructure) -> f64>,
}
impl FnQualifier {
    #[allow(missing_docs)]
    pub fn new(accepts: fn(&BitStructure) -> bool) -> Self {
        Self {
            accepts,
            score: None,
        }
    }

    #[allow(missing_docs)]
    pub fn with_score(mut self, score: fn(&BitStructure) -> f64) -> Self {
        self.score = Some(score);
        self
    }
}
impl Qualifier for FnQualifier {
    fn accepts(&self, candidate: &BitStructure) -> bool {
        (self.accepts)(candidate)
    }

    fn score(&self, candidate: &BitStructure) -> f64 {
        self.score.map_or(0.0, |score| score(candidate))
    }
}

/// Accepts what every member accepts, and sums their scores.
#[derive(Clone, Debug, Default)]
pub struct AllOf(pub Vec<Arc<dyn Qualifier>>);
impl Qualifier for AllOf {
    fn accepts(&self, candidate: &BitStructure) -> bool {
        self.0.iter().all(|q| q.accepts(candidate))
    }

    fn score(&self, candidate: &BitStructure) -> f64 {
        self.0.iter().map(|q| q.score(candidate)).sum()
    }
}
