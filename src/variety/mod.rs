// Copyright (c) 2024 Mike Tsao

//! Policy-driven enumeration of the structures of a system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        Qualifier, StructList, StructuralVariety, StructuralVarietyBuilder, VarietyOrdering,
        VarietyType,
    };
}

pub use factory::{
    StructList, StructuralVariety, StructuralVarietyBuilder, StructuralVarietyBuilderError,
    VarietyOrdering, VarietyType,
};
pub use qualifier::{AllOf, ClassRepresentativeQualifier, FnQualifier, LevelQualifier, Qualifier};

mod factory;
mod qualifier;
