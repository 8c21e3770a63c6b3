// Copyright (c) 2024 Mike Tsao

use mifi::{traits::HasSettings, util::CoreSettings};
use std::path::Path;

/// Loads and saves [CoreSettings] as JSON files.
#[derive(Debug, Default)]
pub struct SettingsPort {}
impl SettingsPort {
    /// A missing file isn't an error. It yields the default settings, which
    /// are marked as needing a save.
    pub fn load(path: &Path) -> anyhow::Result<CoreSettings> {
        if !path.exists() {
            log::info!("no settings at {}; using defaults", path.display());
            let mut settings = CoreSettings::default();
            settings.needs_save();
            return Ok(settings);
        }
        let json = std::fs::read_to_string(path)?;
        CoreSettings::from_json(&json)
    }

    #[allow(missing_docs)]
    pub fn save(path: &Path, settings: &mut CoreSettings) -> anyhow::Result<()> {
        std::fs::write(path, settings.to_json()?)?;
        settings.mark_clean();
        log::info!("saved settings to {}", path.display());
        Ok(())
    }
}
