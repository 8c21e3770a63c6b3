// Copyright (c) 2024 Mike Tsao

//! Error types reported by the structural core. Every variant says precisely
//! which token, attribute, or bound was violated, so that callers can decide
//! whether to abort a whole load or skip the offending element.

use crate::types::Degree;
use thiserror::Error;

/// Failures while building or inspecting a bit structure.
#[allow(missing_docs)]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    /// The system order is zero or wider than a decimal number can hold.
    #[error("order {order} is not supported (expected 1..={max})")]
    InvalidOrder {
        order: usize,
        max: usize,
    },

    /// A decimal number outside `[0, 2^order)`.
    #[error("decimal number {number} is out of range for order {order}")]
    NumberOutOfRange {
        number: u128,
        order: usize,
    },

    /// A bit position outside `[0, order)`.
    #[error("bit position {position} is out of range for order {order}")]
    PositionOutOfRange {
        position: usize,
        order: usize,
    },

    /// A structural-code token that isn't `0`, `1`, or `<count>*<0|1>`.
    #[error("malformed structural-code token {token:?} at index {index}")]
    MalformedToken {
        index: usize,
        token: String,
    },

    /// A bit-vector or structural code whose length doesn't match the order.
    #[error("expected {expected} bits but found {actual}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// Two structures built against systems of different order.
    #[error("order mismatch: {left} vs. {right}")]
    OrderMismatch {
        left: usize,
        right: usize,
    },

    /// A structure kind was asked to wrap a system of the wrong degree.
    #[error("{expected} structure can't be built on a {actual} system")]
    DegreeMismatch {
        expected: &'static str,
        actual: Degree,
    },

    /// A MIDI key computed from a structure doesn't fit in seven bits.
    #[error("MIDI key {key} is out of range")]
    KeyOutOfRange {
        key: usize,
    },
}

/// Failures while enumerating a structural variety.
#[allow(missing_docs)]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VarietyError {
    /// The chosen variety type filters by a modality, but none was given.
    #[error("{0} requires a modality")]
    MissingModality(&'static str),

    /// The chosen variety type needs a qualifier, but none was given.
    #[error("{0} requires a qualifier")]
    MissingQualifier(&'static str),

    /// The numeric range for instance enumeration is empty or exceeds the
    /// system.
    #[error("range {start}..{end} is not valid for order {order}")]
    InvalidRange {
        start: u128,
        end: u128,
        order: usize,
    },

    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Failures while reading or writing a MIF document.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum MifError {
    /// The document isn't well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute {attribute}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// An attribute is present but its value can't be interpreted.
    #[error("<{element}> has invalid {attribute}={value:?}")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    /// A structural code inside an element failed to parse.
    #[error("<{element}> has an invalid structure: {source}")]
    Structure {
        element: String,
        source: StructureError,
    },

    /// A header field or attribute name that can't be written as an XML name.
    #[error("{name:?} is not a valid XML name")]
    InvalidName { name: String },

    /// A header element holds both text and child elements.
    #[error("<{element}> mixes text with child elements")]
    MixedContent { element: String },
}
