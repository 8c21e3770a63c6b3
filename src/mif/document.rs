// Copyright (c) 2024 Mike Tsao

use super::XmlElement;
use crate::{
    error::MifError,
    structure::{Modality, Structure},
};

/// Free-text metadata such as title, creator, and tempo. Each field is an
/// element subtree that passes through reading and writing verbatim, in
/// document order, including repeated and nested fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MifHeader {
    fields: Vec<XmlElement>,
}
impl MifHeader {
    /// The text of the first field named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .and_then(|f| f.text())
    }

    /// The text of every field named `name`, in document order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.fields
            .iter()
            .filter(move |f| f.name() == name)
            .filter_map(|f| f.text())
    }

    /// Replaces the first field named `name` with a text field, or appends
    /// one if there's none.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), MifError> {
        let field = Self::checked(XmlElement::new(name).with_text(value))?;
        match self.fields.iter_mut().find(|f| f.name() == name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
        Ok(())
    }

    /// Appends a field as is, even if another has the same name.
    pub fn push(&mut self, field: XmlElement) -> Result<(), MifError> {
        self.fields.push(Self::checked(field)?);
        Ok(())
    }

    fn checked(field: XmlElement) -> Result<XmlElement, MifError> {
        match field.invalid_name() {
            Some(name) => Err(MifError::InvalidName {
                name: name.to_string(),
            }),
            None => Ok(field),
        }
    }

    #[allow(missing_docs)]
    pub fn fields(&self) -> &[XmlElement] {
        &self.fields
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A named collection of structures, such as a user's favorite chords.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MifBundle {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub structures: Vec<Structure>,
}

/// A structure placed within a bar, starting at bit `bit_from` and spanning
/// its order.
#[derive(Clone, Debug, PartialEq)]
pub struct MifElement {
    #[allow(missing_docs)]
    pub bit_from: usize,
    #[allow(missing_docs)]
    pub structure: Structure,
}

/// One voice or layer of a bar.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MifLine {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub elements: Vec<MifElement>,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MifBar {
    pub number: usize,
    pub lines: Vec<MifLine>,
}

/// The in-memory form of a MIF file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MifDocument {
    #[allow(missing_docs)]
    pub header: MifHeader,
    #[allow(missing_docs)]
    pub modalities: Vec<Modality>,
    #[allow(missing_docs)]
    pub bundles: Vec<MifBundle>,
    #[allow(missing_docs)]
    pub bars: Vec<MifBar>,
}
impl MifDocument {
    /// Every structure in the document: bundles first, then bar elements in
    /// bar/line order.
    pub fn structures(&self) -> impl Iterator<Item = &Structure> {
        self.bundles
            .iter()
            .flat_map(|b| b.structures.iter())
            .chain(
                self.bars
                    .iter()
                    .flat_map(|bar| bar.lines.iter())
                    .flat_map(|line| line.elements.iter())
                    .map(|e| &e.structure),
            )
    }
}
