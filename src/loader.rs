//! This module provides the `MachineLoader` struct, responsible for loading machine
//! definitions from files, strings, and directories.

use crate::definition::MachineDefinition;
use crate::parser::parse;
use crate::types::{TraceError, MAX_DEFINITION_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The file extension of machine definition files.
pub const DEFINITION_EXTENSION: &str = "tm";

/// `MachineLoader` is a utility struct for loading machine definitions.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a single machine definition from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDefinition)` if the file is read, parsed and validated.
    /// * `Err(TraceError::FileError)` if the file cannot be read or is too large.
    /// * `Err(TraceError::ParseError)` if the file content is not a valid definition.
    pub fn load_definition(path: &Path) -> Result<MachineDefinition, TraceError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TraceError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_definition_from_string(&content)
    }

    /// Loads a single machine definition from string content.
    pub fn load_definition_from_string(content: &str) -> Result<MachineDefinition, TraceError> {
        if content.len() > MAX_DEFINITION_SIZE {
            return Err(TraceError::FileError(format!(
                "Definition is {} bytes, the limit is {} bytes",
                content.len(),
                MAX_DEFINITION_SIZE
            )));
        }

        parse(content)
    }

    /// Loads every definition file (`.tm` extension) from a given directory.
    ///
    /// Directories and files with other extensions are skipped. Each definition file yields
    /// one result, so a broken file does not hide the others.
    pub fn load_definitions(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineDefinition), TraceError>> {
        if !directory.exists() {
            return vec![Err(TraceError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TraceError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(TraceError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir() || path.extension().is_none_or(|ext| ext != DEFINITION_EXTENSION)
                {
                    return None;
                }

                match Self::load_definition(&path) {
                    Ok(definition) => Some(Ok((path, definition))),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping definition");
                        Some(Err(TraceError::FileError(format!(
                            "Failed to load definition from {}: {}",
                            path.display(),
                            e
                        ))))
                    }
                }
            })
            .collect();

        // Directory order is platform dependent
        results.sort_by(|a, b| match (a, b) {
            (Ok((a, _)), Ok((b, _))) => a.cmp(b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        });

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const VALID: &str = "Test Machine\nq0,qa,qr\na\na,_\nq0\nqa\nqr\nq0,a,qa,a,R\n";

    #[test]
    fn test_load_valid_definition() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.tm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let definition = MachineLoader::load_definition(&file_path).unwrap();
        assert_eq!(definition.name, "Test Machine");
        assert_eq!(definition.rules.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = MachineLoader::load_definition(&dir.path().join("missing.tm"));

        assert!(matches!(result, Err(TraceError::FileError(_))));
    }

    #[test]
    fn test_load_invalid_definition() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.tm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"This is not a valid definition").unwrap();

        assert!(MachineLoader::load_definition(&file_path).is_err());
    }

    #[test]
    fn test_load_oversized_definition() {
        let content = format!("{}{}", VALID, " ".repeat(MAX_DEFINITION_SIZE));
        let result = MachineLoader::load_definition_from_string(&content);

        assert!(matches!(result, Err(TraceError::FileError(_))));
    }

    #[test]
    fn test_load_definitions_from_directory() {
        let dir = tempdir().unwrap();

        let mut valid_file = File::create(dir.path().join("valid.tm")).unwrap();
        valid_file.write_all(VALID.as_bytes()).unwrap();

        let mut invalid_file = File::create(dir.path().join("invalid.tm")).unwrap();
        invalid_file.write_all(b"This is not a valid definition").unwrap();

        // Create a non-.tm file that should be ignored
        let mut ignored_file = File::create(dir.path().join("ignored.txt")).unwrap();
        ignored_file.write_all(VALID.as_bytes()).unwrap();

        let results = MachineLoader::load_definitions(dir.path());

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_load_definitions_from_missing_directory() {
        let dir = tempdir().unwrap();
        let results = MachineLoader::load_definitions(&dir.path().join("nope"));

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(TraceError::FileError(_))));
    }
}
