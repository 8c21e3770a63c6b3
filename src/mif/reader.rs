// Copyright (c) 2024 Mike Tsao

use super::{
    attr, MifBar, MifBundle, MifDocument, MifElement, MifHeader, MifLine, XmlElement, MIF_ROOT,
};
use crate::{
    error::{MifError, StructureError},
    structure::{BitStructure, Modality, Structure},
    types::{Degree, GeneralSystem, SystemCatalog},
};
use roxmltree::{Document, Node};
use std::{str::FromStr, sync::Arc};

/// Reads MIF documents, resolving each structure's system through the
/// caller's [SystemCatalog].
#[derive(Debug)]
pub struct MifReader<'a> {
    catalog: &'a mut SystemCatalog,
}
impl<'a> MifReader<'a> {
    #[allow(missing_docs)]
    pub fn new(catalog: &'a mut SystemCatalog) -> Self {
        Self { catalog }
    }

    /// Parses a whole document. Returns `Ok(None)` without looking any further
    /// if the root element isn't `MIF`. Unknown elements are skipped.
    pub fn read_str(&mut self, xml: &str) -> Result<Option<MifDocument>, MifError> {
        let document = Document::parse(xml)?;
        let root = document.root_element();
        if root.tag_name().name() != MIF_ROOT {
            log::warn!(
                "not a recognized file: root element is <{}>",
                root.tag_name().name()
            );
            return Ok(None);
        }

        let mut mif = MifDocument::default();
        for section in elements(root) {
            match section.tag_name().name() {
                "Header" => mif.header = Self::read_header(section)?,
                "Modalities" => {
                    for node in elements(section).filter(|n| n.has_tag_name("Modality")) {
                        mif.modalities.push(self.read_modality(node)?);
                    }
                }
                "Bundles" => {
                    for node in elements(section).filter(|n| n.has_tag_name("Bundle")) {
                        mif.bundles.push(self.read_bundle(node)?);
                    }
                }
                "Bars" => {
                    for node in elements(section).filter(|n| n.has_tag_name("Bar")) {
                        mif.bars.push(self.read_bar(node)?);
                    }
                }
                other => log::debug!("skipping unknown section <{other}>"),
            }
        }
        Ok(Some(mif))
    }

    fn read_header(node: Node<'_, '_>) -> Result<MifHeader, MifError> {
        let mut header = MifHeader::default();
        for field in elements(node) {
            header.push(Self::read_verbatim(field)?)?;
        }
        Ok(header)
    }

    // Whitespace between child elements is layout and is dropped. Text that
    // sits next to child elements can't be kept, so it's an error.
    fn read_verbatim(node: Node<'_, '_>) -> Result<XmlElement, MifError> {
        let mut element = node
            .attributes()
            .fold(XmlElement::new(node.tag_name().name()), |e, a| {
                e.with_attribute(a.name(), a.value())
            });
        let text: String = node
            .children()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();
        let mut children = elements(node).peekable();
        if children.peek().is_none() {
            if !text.is_empty() {
                element = element.with_text(&text);
            }
            return Ok(element);
        }
        if !text.trim().is_empty() {
            return Err(MifError::MixedContent {
                element: node.tag_name().name().to_string(),
            });
        }
        for child in children {
            element.push_child(Self::read_verbatim(child)?);
        }
        Ok(element)
    }

    /// Reads one structure-bearing element (`Structure`, `Element`, or any
    /// other with the same attributes). `Level` and `Shortcut` in the file are
    /// ignored and recomputed from `Code`. Without a `Degree` attribute the
    /// structure is harmonic.
    pub fn read_structure(&mut self, node: Node<'_, '_>) -> Result<Structure, MifError> {
        self.read_structure_with(node, Degree::Harmonic)
    }

    fn read_structure_with(
        &mut self,
        node: Node<'_, '_>,
        default_degree: Degree,
    ) -> Result<Structure, MifError> {
        let bits = self.read_bits(node, default_degree)?;
        let structure =
            Structure::from_bit_structure(bits).map_err(|source| structure_error(node, source))?;
        Ok(match optional::<usize>(node, attr::OCCURRENCE)? {
            Some(occurrence) => structure.with_occurrence(occurrence),
            None => structure,
        })
    }

    /// Reads a `Modality` element. Like structures, modalities are harmonic
    /// unless they say otherwise.
    pub fn read_modality(&mut self, node: Node<'_, '_>) -> Result<Modality, MifError> {
        let name = node.attribute(attr::NAME).unwrap_or_default().to_string();
        Ok(Modality::new(self.read_bits(node, Degree::Harmonic)?, name))
    }

    fn read_bits(
        &mut self,
        node: Node<'_, '_>,
        default_degree: Degree,
    ) -> Result<BitStructure, MifError> {
        let code = required(node, attr::CODE)?;
        let length: usize = parse(node, attr::LENGTH, required(node, attr::LENGTH)?)?;
        let degree = optional(node, attr::DEGREE)?.unwrap_or(default_degree);
        let system = self.system(node, degree, length)?;
        BitStructure::parse_code(system, code).map_err(|source| structure_error(node, source))
    }

    fn system(
        &mut self,
        node: Node<'_, '_>,
        degree: Degree,
        order: usize,
    ) -> Result<Arc<GeneralSystem>, MifError> {
        self.catalog
            .system(degree, order)
            .map_err(|source| structure_error(node, source))
    }

    fn read_bundle(&mut self, node: Node<'_, '_>) -> Result<MifBundle, MifError> {
        let mut bundle = MifBundle {
            name: node.attribute(attr::NAME).unwrap_or_default().to_string(),
            ..Default::default()
        };
        for child in elements(node).filter(|n| n.has_tag_name("Structure")) {
            bundle.structures.push(self.read_structure(child)?);
        }
        Ok(bundle)
    }

    fn read_bar(&mut self, node: Node<'_, '_>) -> Result<MifBar, MifError> {
        let mut bar = MifBar {
            number: optional(node, attr::NUMBER)?.unwrap_or_default(),
            ..Default::default()
        };
        for line_node in elements(node).filter(|n| n.has_tag_name("Line")) {
            // A Line's Degree applies to Elements that don't carry their own.
            let line_degree = optional(line_node, attr::DEGREE)?.unwrap_or(Degree::Harmonic);
            let mut line = MifLine {
                name: line_node
                    .attribute(attr::NAME)
                    .unwrap_or_default()
                    .to_string(),
                ..Default::default()
            };
            for element in elements(line_node).filter(|n| n.has_tag_name("Element")) {
                line.elements.push(MifElement {
                    bit_from: optional(element, attr::BIT_FROM)?.unwrap_or_default(),
                    structure: self.read_structure_with(element, line_degree)?,
                });
            }
            bar.lines.push(line);
        }
        Ok(bar)
    }
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn structure_error(node: Node<'_, '_>, source: StructureError) -> MifError {
    MifError::Structure {
        element: node.tag_name().name().to_string(),
        source,
    }
}

fn required<'a>(node: Node<'a, '_>, attribute: &'static str) -> Result<&'a str, MifError> {
    node.attribute(attribute)
        .ok_or_else(|| MifError::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute,
        })
}

fn parse<T: FromStr>(node: Node<'_, '_>, attribute: &'static str, value: &str) -> Result<T, MifError> {
    value.trim().parse().map_err(|_| MifError::InvalidAttribute {
        element: node.tag_name().name().to_string(),
        attribute,
        value: value.to_string(),
    })
}

fn optional<T: FromStr>(node: Node<'_, '_>, attribute: &'static str) -> Result<Option<T>, MifError> {
    node.attribute(attribute)
        .map(|value| parse(node, attribute, value))
        .transpose()
}
