// Copyright (c) 2024 Mike Tsao

//! Rotation classes and the behavior metrics derived from a bit pattern.

use super::BitStructure;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Identifies a structure's equivalence class under rotation: the smallest
/// decimal number among all of its rotations. Equal bit-vectors always have
/// equal class numbers, and every rotation of a structure shares its class.
#[derive(Synonym)]
pub struct ClassNumber(pub u128);
impl ClassNumber {
    /// Computes the class by enumerating every rotation.
    pub fn of(bits: &BitStructure) -> Self {
        Self(
            (0..bits.order())
                .map(|steps| bits.rotated(steps).decimal_number())
                .min()
                .unwrap_or_default(),
        )
    }
}

/// The canonical member of the structure's rotation class.
pub fn class_representative(bits: &BitStructure) -> BitStructure {
    (0..bits.order())
        .map(|steps| bits.rotated(steps))
        .min_by_key(|r| r.decimal_number())
        .unwrap_or_else(|| bits.clone())
}

/// The structural code of the class representative.
pub fn class_code(bits: &BitStructure) -> String {
    class_representative(bits).structural_code()
}

/// How often a structure appears in some body of material. Used to rank
/// structures in lists.
#[derive(Synonym, Serialize, Deserialize)]
pub struct Occurrence(pub usize);

/// Metrics derived from the bit pattern, each in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Behavior {
    /// level / order.
    pub density: f64,
    /// Cyclic on/off transitions divided by the order. Alternating patterns
    /// score 1.0; empty and full ones score 0.0.
    pub complexity: f64,
    /// For harmony, the share of position pairs at interval class 1 or at the
    /// half-order interval. For rhythm, the share of onsets on odd positions.
    pub tension: f64,
}
impl Behavior {
    #[allow(missing_docs)]
    pub fn harmonic(bits: &BitStructure) -> Self {
        let vector = interval_vector(bits);
        let pairs: usize = vector.iter().sum();
        let half = bits.order() / 2;
        let tense = vector.first().copied().unwrap_or_default()
            + if half > 1 && bits.order() % 2 == 0 {
                vector.get(half - 1).copied().unwrap_or_default()
            } else {
                0
            };
        Self {
            density: Self::density(bits),
            complexity: Self::complexity(bits),
            tension: if pairs == 0 {
                0.0
            } else {
                tense as f64 / pairs as f64
            },
        }
    }

    #[allow(missing_docs)]
    pub fn rhythmic(bits: &BitStructure) -> Self {
        let onsets = bits.on_positions();
        let odd = onsets.iter().filter(|p| *p % 2 == 1).count();
        Self {
            density: Self::density(bits),
            complexity: Self::complexity(bits),
            tension: if onsets.len() < 2 {
                0.0
            } else {
                odd as f64 / onsets.len() as f64
            },
        }
    }

    fn density(bits: &BitStructure) -> f64 {
        bits.level() as f64 / bits.order() as f64
    }

    fn complexity(bits: &BitStructure) -> f64 {
        let order = bits.order();
        let b = bits.bits();
        let transitions = (0..order).filter(|&i| b[i] != b[(i + 1) % order]).count();
        transitions as f64 / order as f64
    }
}

/// Counts, for each interval class `1..=order/2`, the unordered pairs of on
/// positions that distance apart (measured the short way around the order).
/// Element `k - 1` holds the count for interval class `k`.
pub fn interval_vector(bits: &BitStructure) -> Vec<usize> {
    let order = bits.order();
    let mut vector = vec![0; order / 2];
    let positions = bits.on_positions();
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            let d = b - a;
            let class = d.min(order - d);
            if class > 0 {
                vector[class - 1] += 1;
            }
        }
    }
    vector
}
