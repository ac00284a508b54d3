// src/config/path_resolve.rs

use crate::errors::ConfigError;
use std::path::PathBuf;

/// Resolves the project directory to an absolute, canonicalized path.
///
/// The directory must already exist; clones are created beneath it by git,
/// and nothing here creates directories.
///
/// # Errors
/// Returns `ConfigError::InvalidValue` if the path cannot be resolved or is not a directory.
pub fn resolve_project_dir(dir: &str) -> Result<PathBuf, ConfigError> {
    let resolved = PathBuf::from(dir)
        .canonicalize()
        .map_err(|e| ConfigError::InvalidValue {
            option: "--project-dir".to_string(),
            reason: format!("Failed to resolve '{}': {}", dir, e),
        })?;
    if !resolved.is_dir() {
        return Err(ConfigError::InvalidValue {
            option: "--project-dir".to_string(),
            reason: format!("'{}' is not a directory", dir),
        });
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_existing_dir() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let resolved = resolve_project_dir(temp.path().to_str().unwrap())?;
        assert!(resolved.is_absolute());
        assert!(resolved.is_dir());
        temp.close()?;
        Ok(())
    }

    #[test]
    fn test_resolve_file_is_rejected() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let file_path = temp.path().join("not-a-dir.txt");
        fs::write(&file_path, "content")?;
        let err = resolve_project_dir(file_path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
        Ok(())
    }

    #[test]
    fn test_resolve_non_existent_path() {
        let err = resolve_project_dir("non_existent_path_for_testing_groupmirror").unwrap_err();
        assert!(err.to_string().contains("Failed to resolve"));
    }
}
