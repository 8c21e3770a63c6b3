// Copyright (c) 2024 Mike Tsao

use super::{
    attr, MifBar, MifBundle, MifDocument, MifElement, MifLine, XmlElement, MIF_ROOT, MIF_VERSION,
};
use crate::{
    structure::{HasBitStructure, Modality, Structure, DEFAULT_RLE_THRESHOLD},
    util::CoreSettings,
};

/// Turns documents and structures into MIF element trees. Output is
/// deterministic: attributes always appear in the same order.
#[derive(Clone, Debug)]
pub struct MifWriter {
    rle_threshold: usize,
}
impl Default for MifWriter {
    fn default() -> Self {
        Self {
            rle_threshold: DEFAULT_RLE_THRESHOLD,
        }
    }
}
impl MifWriter {
    /// Encodes structural codes with the configured run-length threshold.
    pub fn new_with(settings: &CoreSettings) -> Self {
        Self {
            rle_threshold: settings.rle_threshold(),
        }
    }

    /// A `<Structure>` element. Level and Shortcut are written for human
    /// readers; the reader recomputes both.
    pub fn write_structure(&self, structure: &Structure, bit_from: usize) -> XmlElement {
        self.structure_element("Structure", structure, bit_from)
    }

    fn structure_element(&self, name: &str, structure: &Structure, bit_from: usize) -> XmlElement {
        let bits = structure.bit_structure();
        let element = XmlElement::new(name)
            .with_attribute(attr::DEGREE, bits.system().degree())
            .with_attribute(
                attr::CODE,
                bits.structural_code_with_threshold(self.rle_threshold),
            )
            .with_attribute(attr::BIT_FROM, bit_from)
            .with_attribute(attr::LENGTH, bits.order())
            .with_attribute(attr::SHORTCUT, structure.shortcut())
            .with_attribute(attr::LEVEL, bits.level());
        if structure.occurrence().0 > 0 {
            element.with_attribute(attr::OCCURRENCE, structure.occurrence())
        } else {
            element
        }
    }

    #[allow(missing_docs)]
    pub fn write_modality(&self, modality: &Modality) -> XmlElement {
        let bits = modality.bit_structure();
        XmlElement::new("Modality")
            .with_attribute(attr::NAME, modality.name())
            .with_attribute(attr::DEGREE, bits.system().degree())
            .with_attribute(
                attr::CODE,
                bits.structural_code_with_threshold(self.rle_threshold),
            )
            .with_attribute(attr::BIT_FROM, 0)
            .with_attribute(attr::LENGTH, bits.order())
    }

    fn write_bundle(&self, bundle: &MifBundle) -> XmlElement {
        bundle.structures.iter().fold(
            XmlElement::new("Bundle").with_attribute(attr::NAME, &bundle.name),
            |e, s| e.with_child(self.write_structure(s, 0)),
        )
    }

    fn write_element(&self, element: &MifElement) -> XmlElement {
        self.structure_element("Element", &element.structure, element.bit_from)
    }

    fn write_line(&self, line: &MifLine) -> XmlElement {
        line.elements.iter().fold(
            XmlElement::new("Line").with_attribute(attr::NAME, &line.name),
            |e, element| e.with_child(self.write_element(element)),
        )
    }

    fn write_bar(&self, bar: &MifBar) -> XmlElement {
        bar.lines.iter().fold(
            XmlElement::new("Bar").with_attribute(attr::NUMBER, bar.number),
            |e, line| e.with_child(self.write_line(line)),
        )
    }

    /// The whole document under a `MIF` root. Empty sections are omitted.
    pub fn write_document(&self, document: &MifDocument) -> XmlElement {
        let mut root = XmlElement::new(MIF_ROOT).with_attribute(attr::VERSION, MIF_VERSION);
        if !document.header.is_empty() {
            root.push_child(
                document
                    .header
                    .fields()
                    .iter()
                    .fold(XmlElement::new("Header"), |e, field| {
                        e.with_child(field.clone())
                    }),
            );
        }
        if !document.modalities.is_empty() {
            root.push_child(document.modalities.iter().fold(
                XmlElement::new("Modalities"),
                |e, m| e.with_child(self.write_modality(m)),
            ));
        }
        if !document.bundles.is_empty() {
            root.push_child(
                document
                    .bundles
                    .iter()
                    .fold(XmlElement::new("Bundles"), |e, b| {
                        e.with_child(self.write_bundle(b))
                    }),
            );
        }
        if !document.bars.is_empty() {
            root.push_child(
                document
                    .bars
                    .iter()
                    .fold(XmlElement::new("Bars"), |e, b| e.with_child(self.write_bar(b))),
            );
        }
        root
    }

    /// Serializes the document as XML text.
    pub fn to_xml_string(&self, document: &MifDocument) -> String {
        self.write_document(document).to_document_string()
    }
}
