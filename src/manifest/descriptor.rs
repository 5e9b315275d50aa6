//! Build-descriptor constant rewrite
//!
//! The build descriptor carries one named constant holding the default
//! instrumentation version:
//!
//! ```text
//! pub const AUTO_INSTRUMENTATION_DEFAULT_VERSION: &str = "v1.7.0";
//! ```
//!
//! The rewrite is keyed on the exact constant declaration and replaces only
//! the value. Absent pattern or equal value means no write happens.

use crate::error::ManifestError;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Name of the rewritten constant
pub const DESCRIPTOR_CONST: &str = "AUTO_INSTRUMENTATION_DEFAULT_VERSION";

fn descriptor_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"const AUTO_INSTRUMENTATION_DEFAULT_VERSION: &str = "[^"]*";"#)
            .expect("valid pattern")
    })
}

/// Produces the rewritten descriptor content, or None when nothing changes
pub fn replace_version(content: &str, version: &str) -> Option<String> {
    let re = descriptor_regex();
    if !re.is_match(content) {
        return None;
    }

    let replacement = format!(r#"const {}: &str = "{}";"#, DESCRIPTOR_CONST, version);
    let updated = re.replace(content, replacement.as_str());
    if updated == content {
        return None;
    }
    Some(updated.into_owned())
}

/// Rewrites the descriptor constant on disk
///
/// Returns true when the file changed (or would change, in dry-run mode).
pub fn update_default_version(
    path: &Path,
    version: &str,
    dry_run: bool,
) -> Result<bool, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| ManifestError::read(path, e))?;

    match replace_version(&content, version) {
        Some(updated) => {
            if !dry_run {
                fs::write(path, updated).map_err(|e| ManifestError::write(path, e))?;
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DESCRIPTOR: &str = r#"//! Build defaults

pub const AUTO_INSTRUMENTATION_DEFAULT_VERSION: &str = "v1.6.0";
pub const BUILD_CONFIGURATION: &str = "Release";
"#;

    #[test]
    fn test_replace_version_changes_value_only() {
        let updated = replace_version(DESCRIPTOR, "v1.7.0").unwrap();
        assert!(updated.contains(r#"pub const AUTO_INSTRUMENTATION_DEFAULT_VERSION: &str = "v1.7.0";"#));
        assert!(updated.contains(r#"pub const BUILD_CONFIGURATION: &str = "Release";"#));
        assert!(updated.starts_with("//! Build defaults"));
    }

    #[test]
    fn test_replace_version_equal_value_is_none() {
        assert!(replace_version(DESCRIPTOR, "v1.6.0").is_none());
    }

    #[test]
    fn test_replace_version_missing_constant_is_none() {
        assert!(replace_version("pub const OTHER: &str = \"x\";\n", "v1.7.0").is_none());
    }

    #[test]
    fn test_replace_version_accepts_unprefixed_tag() {
        let content = r#"const AUTO_INSTRUMENTATION_DEFAULT_VERSION: &str = "1.6.0";"#;
        let updated = replace_version(content, "1.7.0").unwrap();
        assert_eq!(
            updated,
            r#"const AUTO_INSTRUMENTATION_DEFAULT_VERSION: &str = "1.7.0";"#
        );
    }

    #[test]
    fn test_update_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defaults.rs");
        fs::write(&path, DESCRIPTOR).unwrap();

        let updated = update_default_version(&path, "v1.7.0", false).unwrap();
        assert!(updated);

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"v1.7.0\""));
        assert!(!content.contains("\"v1.6.0\""));
    }

    #[test]
    fn test_update_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defaults.rs");
        fs::write(&path, DESCRIPTOR).unwrap();

        assert!(update_default_version(&path, "v1.7.0", false).unwrap());
        assert!(!update_default_version(&path, "v1.7.0", false).unwrap());
    }

    #[test]
    fn test_update_dry_run_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("defaults.rs");
        fs::write(&path, DESCRIPTOR).unwrap();

        let updated = update_default_version(&path, "v1.7.0", true).unwrap();
        assert!(updated);
        assert_eq!(fs::read_to_string(&path).unwrap(), DESCRIPTOR);
    }

    #[test]
    fn test_update_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = update_default_version(&dir.path().join("absent.rs"), "v1.7.0", false);
        assert!(matches!(result, Err(ManifestError::Read { .. })));
    }
}
