// Copyright (c) 2024 Mike Tsao

use mifi::{error::MifError, mif::MifDocument, types::SystemCatalog, util::CoreSettings};
use mifi::{MifReader, MifWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why an import didn't produce a document. Every variant is an "import
/// failed" condition from the user's point of view.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("couldn't read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is XML, but not MIF.
    #[error("{} is not a MIF file", path.display())]
    NotRecognized { path: PathBuf },
    #[error("import of {} failed: {source}", path.display())]
    Failed { path: PathBuf, source: MifError },
}

/// Reads and writes MIF files. Systems referenced by imported files are
/// shared through the port's catalog.
#[derive(Debug, Default)]
pub struct MifFilePort {
    catalog: SystemCatalog,
    writer: MifWriter,
}
impl MifFilePort {
    /// Writes with the structural-code settings in `settings`.
    pub fn new_with(settings: &CoreSettings) -> Self {
        Self {
            writer: MifWriter::new_with(settings),
            ..Default::default()
        }
    }

    #[allow(missing_docs)]
    pub fn catalog(&self) -> &SystemCatalog {
        &self.catalog
    }

    #[allow(missing_docs)]
    pub fn import(&mut self, path: &Path) -> Result<MifDocument, ImportError> {
        let xml = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match MifReader::new(&mut self.catalog).read_str(&xml) {
            Ok(Some(document)) => {
                log::info!(
                    "imported {} ({} structures)",
                    path.display(),
                    document.structures().count()
                );
                Ok(document)
            }
            Ok(None) => Err(ImportError::NotRecognized {
                path: path.to_path_buf(),
            }),
            Err(source) => {
                log::warn!("import of {} failed: {source}", path.display());
                Err(ImportError::Failed {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    #[allow(missing_docs)]
    pub fn export(&self, path: &Path, document: &MifDocument) -> anyhow::Result<()> {
        std::fs::write(path, self.writer.to_xml_string(document))?;
        log::info!("exported {}", path.display());
        Ok(())
    }
}
