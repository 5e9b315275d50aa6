//! Manifest document model
//!
//! The distribution manifest is a TOML file with a `[packages]` table mapping
//! package names to versions:
//!
//! ```toml
//! [packages]
//! "OpenTelemetry" = "1.8.0"
//! "OpenTelemetry.Instrumentation.Http" = { version = "1.11.0" }
//! ```
//!
//! Edits go through a parse-modify-serialize cycle over the toml_edit
//! document model: targeted version values are swapped in place with their
//! decoration intact, so comments, ordering, and all unrelated content
//! survive a rewrite byte-for-byte.

use crate::domain::ManifestEntry;
use crate::error::ManifestError;
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::{DocumentMut, Item, Value};

/// Default manifest file name inside the distribution root
pub const DEFAULT_MANIFEST_FILE: &str = "packages.toml";

/// Table holding the package-reference entries
const PACKAGES_TABLE: &str = "packages";

/// In-memory manifest with its source location
pub struct ManifestDocument {
    path: PathBuf,
    doc: DocumentMut,
}

impl ManifestDocument {
    /// Loads and parses the manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ManifestError::read(path, e))?;
        let doc = content
            .parse::<DocumentMut>()
            .map_err(|e| ManifestError::parse(path, e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    /// Source path of this manifest
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Package entries in document order
    ///
    /// Entries whose value carries no readable version string are left out.
    pub fn entries(&self) -> Vec<ManifestEntry> {
        let Some(table) = self.doc.get(PACKAGES_TABLE).and_then(Item::as_table) else {
            return Vec::new();
        };

        table
            .iter()
            .filter_map(|(name, item)| {
                entry_version(item).map(|version| ManifestEntry::new(name, version))
            })
            .collect()
    }

    /// Rewrites one package's version in place
    ///
    /// Returns true when the document changed. A package that is absent, or
    /// already declares the target version, is a no-op. The entry's written
    /// form (plain string, inline table, or sub-table) is preserved.
    pub fn set_version(&mut self, package: &str, version: &str) -> bool {
        let Some(table) = self
            .doc
            .get_mut(PACKAGES_TABLE)
            .and_then(Item::as_table_mut)
        else {
            return false;
        };
        let Some(item) = table.get_mut(package) else {
            return false;
        };

        match item {
            Item::Value(val) => {
                if val.as_str().is_some() {
                    return replace_string_value(val, version);
                }
                if let Some(inline) = val.as_inline_table_mut() {
                    if let Some(inner) = inline.get_mut("version") {
                        return replace_string_value(inner, version);
                    }
                }
                false
            }
            Item::Table(sub) => match sub.get_mut("version") {
                Some(Item::Value(inner)) => replace_string_value(inner, version),
                _ => false,
            },
            _ => false,
        }
    }

    /// Serializes the document back to its source file
    pub fn save(&self) -> Result<(), ManifestError> {
        fs::write(&self.path, self.doc.to_string())
            .map_err(|e| ManifestError::write(&self.path, e))
    }

    /// Serialized document content
    pub fn render(&self) -> String {
        self.doc.to_string()
    }
}

/// Reads the version out of an entry value, whatever its written form
fn entry_version(item: &Item) -> Option<String> {
    if let Some(s) = item.as_str() {
        return Some(s.to_string());
    }
    if let Some(inline) = item.as_inline_table() {
        return inline
            .get("version")
            .and_then(Value::as_str)
            .map(String::from);
    }
    if let Some(table) = item.as_table() {
        return table
            .get("version")
            .and_then(Item::as_str)
            .map(String::from);
    }
    None
}

/// Swaps a string value, keeping its surrounding decoration
fn replace_string_value(val: &mut Value, version: &str) -> bool {
    match val.as_str() {
        Some(current) if current == version => false,
        Some(_) => {
            let decor = val.decor().clone();
            *val = Value::from(version);
            *val.decor_mut() = decor;
            true
        }
        None => false,
    }
}
