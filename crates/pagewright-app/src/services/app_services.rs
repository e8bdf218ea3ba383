// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — owns the library store, the conversion pipeline and
// the persisted settings, and exposes the operations the CLI calls.
//
// Everything runs synchronously on the caller's thread. The library root lives
// in exactly one place (the store held here) and is threaded into every
// conversion from there.

use std::path::{Path, PathBuf};

use pagewright_core::AppConfig;
use pagewright_core::error::Result;
use pagewright_core::types::{FileTypeSpec, LibraryEntry};
use pagewright_document::{ConversionPipeline, PdfReader};
use pagewright_library::LibraryStore;
use tracing::{info, warn};

/// Application services for one process.
pub struct AppServices {
    store: LibraryStore,
    pipeline: ConversionPipeline,
    data_dir: PathBuf,
    config: AppConfig,
}

impl AppServices {
    /// Initialise all services from the data directory. Call once at startup.
    ///
    /// Loads `config.json` (defaults if missing or unreadable) and opens the
    /// configured library folder. A configured folder that no longer exists
    /// falls back to the default folder.
    pub fn init(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;
        info!(path = %data_dir.display(), "initialising app services");

        let config = load_config(&data_dir).unwrap_or_default();

        let store = match &config.library_root {
            Some(root) => match LibraryStore::open(root) {
                Ok(store) => store,
                Err(e) => {
                    warn!(error = %e, "configured library folder unusable, using default");
                    LibraryStore::open_default_in(&data_dir)?
                }
            },
            None => LibraryStore::open_default_in(&data_dir)?,
        };

        let pipeline = ConversionPipeline::from_config(&config);

        Ok(Self {
            store,
            pipeline,
            data_dir,
            config,
        })
    }

    // -- Conversion ----------------------------------------------------------

    /// Convert a source file into the current library folder.
    pub fn convert(&self, input: &Path, declared_label: &str) -> Result<PathBuf> {
        let root = self.store.prepare()?;
        self.pipeline.convert(input, declared_label, root)
    }

    /// The selectable file types, in display order.
    pub fn file_types(&self) -> &'static [FileTypeSpec] {
        self.pipeline.registry().types()
    }

    // -- Library -------------------------------------------------------------

    /// Library contents, sorted by file name.
    pub fn list_pdfs(&self) -> Result<Vec<LibraryEntry>> {
        self.store.list_sorted()
    }

    pub fn delete_pdf(&self, name: &str) -> Result<()> {
        self.store.delete(name)
    }

    /// A library entry together with its page count.
    pub fn pdf_info(&self, name: &str) -> Result<(LibraryEntry, usize)> {
        let entry = self.store.entry(name)?;
        let pages = PdfReader::open(&entry.path)?.page_count();
        Ok((entry, pages))
    }

    /// Move the library to an existing folder and remember the choice.
    ///
    /// If the folder is invalid nothing changes, neither in memory nor on disk.
    pub fn set_root(&mut self, path: &Path) -> Result<&Path> {
        self.store.set_root(path)?;
        let mut config = self.config.clone();
        config.library_root = Some(self.store.root().to_path_buf());
        self.save_config(config)?;
        Ok(self.store.root())
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    // -- Config Persistence --------------------------------------------------

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Update and persist the config. The pipeline is rebuilt so that new
    /// layout and rendering settings apply to the next conversion.
    pub fn save_config(&mut self, config: AppConfig) -> Result<()> {
        persist_config(&self.data_dir, &config)?;
        self.pipeline = ConversionPipeline::from_config(&config);
        self.config = config;
        Ok(())
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
