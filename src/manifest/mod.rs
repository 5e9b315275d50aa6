//! Manifest and build-descriptor file handling
//!
//! This module provides:
//! - ManifestDocument: toml_edit-backed parse-modify-serialize model of the
//!   distribution package manifest
//! - Build-descriptor constant rewrite keyed on an exact literal pattern

mod descriptor;
mod document;

pub use descriptor::{replace_version, update_default_version, DESCRIPTOR_CONST};
pub use document::{ManifestDocument, DEFAULT_MANIFEST_FILE};
