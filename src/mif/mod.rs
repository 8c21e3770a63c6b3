// Copyright (c) 2024 Mike Tsao

//! Reading and writing MIF, the XML interchange format for structures,
//! modalities, and bar-by-bar analyses.

/// Commonly used imports.
pub mod prelude {
    pub use super::{MifDocument, MifReader, MifWriter};
}

pub use document::{MifBar, MifBundle, MifDocument, MifElement, MifHeader, MifLine};
pub use reader::MifReader;
pub use writer::MifWriter;
pub use xml::XmlElement;

/// The root element name of every MIF document.
pub const MIF_ROOT: &str = "MIF";
/// The format version written to the root element.
pub const MIF_VERSION: &str = "1";

pub(crate) mod attr {
    pub const DEGREE: &str = "Degree";
    pub const CODE: &str = "Code";
    pub const BIT_FROM: &str = "BitFrom";
    pub const LENGTH: &str = "Length";
    pub const SHORTCUT: &str = "Shortcut";
    pub const LEVEL: &str = "Level";
    pub const OCCURRENCE: &str = "Occurrence";
    pub const NAME: &str = "Name";
    pub const NUMBER: &str = "Number";
    pub const VERSION: &str = "Version";
}

mod document;
mod reader;
mod writer;
mod xml;
