//! Per-project persisted answers.
//!
//! The store is one JSON object at the project root, keyed by generator name.
//! It is loaded and saved explicitly at phase boundaries; nothing is written
//! until [`SessionStore::save`] is called.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::features::{ExtXml, TestFramework};
use crate::paths;
use crate::utils::io;

/// Generator name the application record is stored under.
pub const APP_GENERATOR: &str = "app";

/// Answers persisted by the application generator and read by the tile generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub plugin_name: String,
    pub kebab_plugin_name: String,
    pub namespace: String,
    #[serde(default)]
    pub ext_xmls: BTreeSet<ExtXml>,
    #[serde(default)]
    pub test_frameworks: BTreeSet<TestFramework>,
}

impl AppConfig {
    pub fn has_ext_xml(&self, kind: ExtXml) -> bool {
        self.ext_xmls.contains(&kind)
    }

    pub fn uses(&self, framework: TestFramework) -> bool {
        self.test_frameworks.contains(&framework)
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
    root: Map<String, Value>,
    dirty: bool,
}

impl SessionStore {
    /// Load the store for `project_root`. A missing file is an empty store.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(paths::SESSION_FILE);

        let root = if path.is_file() {
            let raw = io::read_file(&path, "read session store")?;
            match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(Error::config_invalid_json(
                        path.display().to_string(),
                        serde::de::Error::custom("expected a JSON object"),
                    ))
                }
                Err(e) => return Err(Error::config_invalid_json(path.display().to_string(), e)),
            }
        } else {
            Map::new()
        };

        Ok(Self {
            path,
            root,
            dirty: false,
        })
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn has_generator(&self, generator: &str) -> bool {
        self.root.contains_key(generator)
    }

    /// Read one key of a generator's record.
    pub fn get<T: DeserializeOwned>(&self, generator: &str, key: &str) -> Result<Option<T>> {
        let Some(value) = self.root.get(generator).and_then(|g| g.get(key)) else {
            return Ok(None);
        };

        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| Error::config_invalid_json(self.path.display().to_string(), e))
    }

    /// Set one key of a generator's record. Last write wins.
    pub fn set<T: Serialize>(&mut self, generator: &str, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| Error::internal_json(e.to_string(), Some("serialize session value".to_string())))?;

        let entry = self
            .root
            .entry(generator.to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(record) = entry {
            record.insert(key.to_string(), value);
        }

        self.dirty = true;
        Ok(())
    }

    /// Read a generator's whole record as a typed value.
    pub fn get_record<T: DeserializeOwned>(&self, generator: &str) -> Result<Option<T>> {
        let Some(value) = self.root.get(generator) else {
            return Ok(None);
        };

        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| Error::config_invalid_json(self.path.display().to_string(), e))
    }

    /// Merge a typed record into a generator's entry. Keys the record does not
    /// know about are kept.
    pub fn set_record<T: Serialize>(&mut self, generator: &str, record: &T) -> Result<()> {
        let value = serde_json::to_value(record)
            .map_err(|e| Error::internal_json(e.to_string(), Some("serialize session record".to_string())))?;

        let Value::Object(fields) = value else {
            return Err(Error::internal_unexpected("session record must serialize to an object"));
        };

        for (key, value) in fields {
            self.set(generator, &key, &value)?;
        }
        Ok(())
    }

    /// Typed application record; `config.missing` when the application generator never ran.
    pub fn require_app(&self) -> Result<AppConfig> {
        self.get_record(APP_GENERATOR)?
            .ok_or_else(|| Error::config_missing(APP_GENERATOR, self.path.display().to_string()))
    }

    /// Persist the store atomically. No-op when nothing changed.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let mut content = serde_json::to_string_pretty(&self.root)
            .map_err(|e| Error::internal_json(e.to_string(), Some("serialize session store".to_string())))?;
        content.push('\n');

        if let Some(parent) = self.path.parent() {
            io::ensure_dir(parent)?;
        }
        io::write_file_atomic(&self.path, &content, "write session store")?;

        self.dirty = false;
        Ok(())
    }
}
