// Copyright (c) 2024 Mike Tsao

use core::fmt::{self, Display, Write};

/// A minimal owned XML element tree for output. Attributes keep insertion
/// order, so the same tree always serializes to the same text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<XmlElement>,
}
impl XmlElement {
    #[allow(missing_docs)]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Appends an attribute, replacing any earlier one with the same name.
    pub fn with_attribute(mut self, name: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
        self
    }

    /// Sets the element's text content. Text and children are exclusive in
    /// this tree; text wins when serializing.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    #[allow(missing_docs)]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    #[allow(missing_docs)]
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[allow(missing_docs)]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    #[allow(missing_docs)]
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[allow(missing_docs)]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[allow(missing_docs)]
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Whether `name` can be written as an element or attribute name.
    pub fn is_valid_name(name: &str) -> bool {
        let mut chars = name.chars();
        chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':')
            && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':'))
    }

    /// The first element or attribute name in this subtree that isn't a valid
    /// XML name.
    pub fn invalid_name(&self) -> Option<&str> {
        if !Self::is_valid_name(&self.name) {
            return Some(&self.name);
        }
        self.attributes
            .iter()
            .map(|(n, _)| n.as_str())
            .find(|n| !Self::is_valid_name(n))
            .or_else(|| self.children.iter().find_map(|c| c.invalid_name()))
    }

    /// Serializes with an XML declaration and two-space indentation.
    pub fn to_document_string(&self) -> String {
        format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n{self}")
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"")?;
            escape(f, value, true)?;
            f.write_char('"')?;
        }
        if let Some(text) = &self.text {
            f.write_char('>')?;
            escape(f, text, false)?;
            writeln!(f, "</{}>", self.name)
        } else if self.children.is_empty() {
            writeln!(f, "/>")
        } else {
            writeln!(f, ">")?;
            for child in &self.children {
                child.write_indented(f, depth + 1)?;
            }
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            writeln!(f, "</{}>", self.name)
        }
    }
}
impl Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

// Whitespace characters are written as references wherever a parser would
// otherwise normalize them away.
fn escape(f: &mut fmt::Formatter<'_>, s: &str, in_attribute: bool) -> fmt::Result {
    for c in s.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' if in_attribute => f.write_str("&quot;")?,
            '\n' if in_attribute => f.write_str("&#10;")?,
            '\t' if in_attribute => f.write_str("&#9;")?,
            '\r' => f.write_str("&#13;")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}
