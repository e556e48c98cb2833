//! # File I/O Module
//!
//! Project file operations:
//! - **Atomic saves**: write to `.tmp`, sync, rename over the target
//! - **Version validation**: refuse files written by a newer schema
//!
//! ## File Format
//!
//! Projects are saved as `.o86` files containing pretty-printed JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use o86_core::file_io::{load_project, save_project};
//! use o86_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("myproject.o86");
//!
//! save_project(&project, path)?;
//! let loaded = load_project(path)?;
//! assert_eq!(loaded.meta.job_id, "25-001");
//! # Ok::<(), o86_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, FILE_EXTENSION, SCHEMA_VERSION};

/// Save a project with atomic write semantics.
///
/// The JSON is written to `<path>.o86.tmp`, synced, then renamed over
/// `path`, so an interrupted save never leaves a truncated project.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension(format!("{FILE_EXTENSION}.tmp"));

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), items = project.items.len(), "project saved");
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - file version is incompatible
/// * `Err(CalcError::SerializationError)` - invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&project.meta.version)?;

    tracing::debug!(path = %path.display(), items = project.items.len(), "project loaded");
    Ok(project)
}

/// Check that a file version is readable by the current schema.
///
/// Major versions must match. While the schema is 0.x, a file with a newer
/// minor version is rejected too.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (file_parts, current_parts) = match (parse(file_version), parse(SCHEMA_VERSION)) {
        (Some(f), Some(c)) if !f.is_empty() && !c.is_empty() => (f, c),
        _ => return Err(mismatch()),
    };

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CalculationItem, LateralBraceInput};
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("o86_test_{}_{}.o86", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");

        let mut project = Project::new("Test Engineer", "TEST-001", "Test Client");
        project.add_item("brace", CalculationItem::LateralBrace(LateralBraceInput { force_kn: 12.0 }));
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.items.len(), 1);
        assert_eq!(loaded.items[0].id, project.items[0].id);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic");
        let tmp_path = path.with_extension("o86.tmp");

        let project = Project::new("Test", "TEST", "Client");
        save_project(&project, &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_project_path("does_not_exist");
        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_project_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, CalcError::SerializationError { .. }));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_file_rejected() {
        let path = temp_project_path("newer");
        let mut project = Project::new("Test", "TEST", "Client");
        project.meta.version = "0.9.0".to_string();
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, CalcError::VersionMismatch { .. }));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.3").is_ok());

        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("abc").is_err());
        assert!(validate_version("").is_err());
    }
}
