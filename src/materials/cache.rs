//! # Material Cache
//!
//! `materials.json`: a map from lower-cased material name to its record.
//! Entries are created on first analysis and overwritten on re-save.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::errors::MaterialResult;
use super::record::MaterialRecord;
use crate::storage::{JsonFile, MATERIALS_FILE};

#[derive(Debug, Clone)]
pub struct MaterialCache {
    file: JsonFile<BTreeMap<String, MaterialRecord>>,
}

impl MaterialCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// Cache stored in `<data_dir>/materials.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(MATERIALS_FILE))
    }

    pub fn load_all(&self) -> BTreeMap<String, MaterialRecord> {
        self.file.load()
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<MaterialRecord> {
        self.load_all().remove(&MaterialRecord::cache_key(name))
    }

    pub fn save(&self, name: &str, record: &MaterialRecord) -> MaterialResult<()> {
        let key = MaterialRecord::cache_key(name);
        self.file.update(|materials| {
            materials.insert(key, record.clone());
        })?;
        Ok(())
    }
}
