// Copyright (c) 2024 Mike Tsao

#![deny(missing_docs, unused_imports, unused_variables)]
#![allow(rustdoc::private_intra_doc_links)]

//! Mifi models musical structures as bit-vectors over a fixed-order system.
//!
//! * A [BitStructure](structure::BitStructure) is a set of positions within a
//! [GeneralSystem](types::GeneralSystem), written as a decimal number or as a
//! run-length structural code such as `1,3*0,1,7*0`.
//! * [HarmonicStructure](structure::HarmonicStructure) and
//! [RhythmicStructure](structure::RhythmicStructure) add musical metadata:
//! class number, shortcut, and behavior.
//! * A [Modality] filters structures down to those it covers.
//! * A [StructuralVariety] enumerates the structures of a system according to
//! a policy, an ordering, and a size bound.
//! * [MifReader] and [MifWriter] move all of the above in and out of MIF, an
//! XML interchange format.

/// A collection of imports that are useful to users of this crate. `use
/// mifi::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        mif::prelude::*, structure::prelude::*, traits::prelude::*, types::prelude::*,
        util::prelude::*, variety::prelude::*,
    };
}

// Fundamental structures that are important enough to re-export at top level.
pub use {
    mif::{MifReader, MifWriter},
    structure::Modality,
    variety::StructuralVariety,
};

pub mod error;
pub mod mif;
pub mod structure;
pub mod traits;
pub mod types;
pub mod util;
pub mod variety;
