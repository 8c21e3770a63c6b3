// Copyright (c) 2024 Mike Tsao

//! Structs that hold configuration information about the structural core.
//! Intended to be serialized.

use crate::{
    structure::{BitStructure, HarmonicStructure, Modality, DEFAULT_RLE_THRESHOLD},
    traits::HasSettings,
    types::SystemCatalog,
};
use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// A named structural code, used for the default harmonic templates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NamedCode {
    #[allow(missing_docs)]
    pub name: String,
    /// A structural code over the 12-tone harmonic system.
    pub code: String,
}
impl NamedCode {
    #[allow(missing_docs)]
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
        }
    }
}

/// Contains persistent settings for encoding and enumerating structures.
#[derive(Debug, Derivative, Serialize, Deserialize)]
#[derivative(Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct CoreSettings {
    /// Runs at least this long are run-length encoded in structural codes.
    #[derivative(Default(value = "DEFAULT_RLE_THRESHOLD"))]
    #[serde(default = "CoreSettings::default_rle_threshold")]
    rle_threshold: usize,

    /// The default bound on the size of a structural variety.
    #[derivative(Default(value = "1024"))]
    #[serde(default = "CoreSettings::default_max_count")]
    max_count: usize,

    #[derivative(Default(value = "Self::default_templates()"))]
    #[serde(default = "CoreSettings::default_templates")]
    harmonic_templates: Vec<NamedCode>,

    #[serde(skip)]
    #[derivative(PartialEq = "ignore")]
    has_been_saved: bool,
}
impl HasSettings for CoreSettings {
    fn has_been_saved(&self) -> bool {
        self.has_been_saved
    }

    fn needs_save(&mut self) {
        self.has_been_saved = false;
    }

    fn mark_clean(&mut self) {
        self.has_been_saved = true;
    }
}
impl CoreSettings {
    fn default_rle_threshold() -> usize {
        DEFAULT_RLE_THRESHOLD
    }

    fn default_max_count() -> usize {
        1024
    }

    fn default_templates() -> Vec<NamedCode> {
        vec![
            NamedCode::new("Major triad", "1,3*0,1,0,0,1,4*0"),
            NamedCode::new("Minor triad", "1,0,0,1,3*0,1,4*0"),
            NamedCode::new("Diatonic", "1,0,1,0,1,1,0,1,0,1,0,1"),
            NamedCode::new("Whole tone", "1,0,1,0,1,0,1,0,1,0,1,0"),
            NamedCode::new("Chromatic", "12*1"),
        ]
    }

    /// Parses settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.mark_clean();
        Ok(settings)
    }

    #[allow(missing_docs)]
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[allow(missing_docs)]
    pub fn rle_threshold(&self) -> usize {
        self.rle_threshold
    }

    /// Updates the field and marks the struct eligible to save.
    pub fn set_rle_threshold(&mut self, rle_threshold: usize) {
        if rle_threshold != self.rle_threshold {
            self.rle_threshold = rle_threshold;
            self.needs_save();
        }
    }

    #[allow(missing_docs)]
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Updates the field and marks the struct eligible to save.
    pub fn set_max_count(&mut self, max_count: usize) {
        if max_count != self.max_count {
            self.max_count = max_count;
            self.needs_save();
        }
    }

    #[allow(missing_docs)]
    pub fn harmonic_templates(&self) -> &[NamedCode] {
        &self.harmonic_templates
    }

    /// Adds or replaces the template with this name, and marks the struct
    /// eligible to save.
    pub fn set_harmonic_template(&mut self, template: NamedCode) {
        match self
            .harmonic_templates
            .iter_mut()
            .find(|t| t.name == template.name)
        {
            Some(existing) if *existing == template => return,
            Some(existing) => *existing = template,
            None => self.harmonic_templates.push(template),
        }
        self.needs_save();
    }

    /// Parses the named template against the 12-tone system. Returns
    /// `Ok(None)` if no template has that name.
    pub fn template(
        &self,
        name: &str,
        catalog: &mut SystemCatalog,
    ) -> anyhow::Result<Option<HarmonicStructure>> {
        let Some(template) = self.harmonic_templates.iter().find(|t| t.name == name) else {
            return Ok(None);
        };
        let bits = BitStructure::parse_code(catalog.harmonic(), &template.code)?;
        Ok(Some(HarmonicStructure::new(bits)?))
    }

    /// Like [template()](Self::template), but as a [Modality] for filtering.
    pub fn template_modality(
        &self,
        name: &str,
        catalog: &mut SystemCatalog,
    ) -> anyhow::Result<Option<Modality>> {
        let Some(template) = self.harmonic_templates.iter().find(|t| t.name == name) else {
            return Ok(None);
        };
        Ok(Some(Modality::parse_code(
            catalog.harmonic(),
            &template.code,
            template.name.clone(),
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::HasBitStructure;

    #[test]
    fn defaults_and_dirty_tracking() {
        let mut settings = CoreSettings::default();
        assert_eq!(settings.rle_threshold(), 3);
        assert_eq!(settings.max_count(), 1024);
        assert!(!settings.has_been_saved());

        settings.mark_clean();
        settings.set_max_count(1024);
        assert!(settings.has_been_saved(), "Setting the same value is a no-op");
        settings.set_max_count(64);
        assert!(!settings.has_been_saved());

        settings.mark_clean();
        settings.set_harmonic_template(NamedCode::new("Chromatic", "12*1"));
        assert!(settings.has_been_saved());
        settings.set_harmonic_template(NamedCode::new("Pentatonic", "1,0,1,0,1,0,0,1,0,1,0,0"));
        assert!(!settings.has_been_saved());
        assert_eq!(settings.harmonic_templates().len(), 6);
    }

    #[test]
    fn json_round_trip() {
        let mut settings = CoreSettings::default();
        settings.set_rle_threshold(2);
        let json = settings.to_json().unwrap();
        assert!(json.contains("rle-threshold"));

        let restored = CoreSettings::from_json(&json).unwrap();
        assert_eq!(restored, settings);
        assert!(restored.has_been_saved());

        let partial = CoreSettings::from_json(r#"{ "max-count": 10 }"#).unwrap();
        assert_eq!(partial.max_count(), 10);
        assert_eq!(partial.rle_threshold(), 3);
        assert_eq!(partial.harmonic_templates().len(), 5);

        assert!(CoreSettings::from_json("not json").is_err());
    }

    #[test]
    fn templates_parse() {
        let settings = CoreSettings::default();
        let mut catalog = SystemCatalog::default();
        for template in settings.harmonic_templates() {
            assert!(settings.template(&template.name, &mut catalog).unwrap().is_some());
        }
        let triad = settings.template("Major triad", &mut catalog).unwrap().unwrap();
        assert_eq!(triad.bit_structure().on_positions(), vec![0, 4, 7]);
        assert!(settings.template("Lydian", &mut catalog).unwrap().is_none());

        let diatonic = settings
            .template_modality("Diatonic", &mut catalog)
            .unwrap()
            .unwrap();
        assert!(diatonic.covers(&triad).unwrap());
        assert_eq!(diatonic.level(), 7);
    }
}
