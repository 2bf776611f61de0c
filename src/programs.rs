use crate::definition::MachineDefinition;
use crate::parser::parse;
use crate::types::TraceError;

use std::sync::RwLock;

// Bundled machine definitions
const MACHINE_TEXTS: [&str; 5] = [
    include_str!("../machines/zero-n-one-n.tm"),
    include_str!("../machines/even-zeros.tm"),
    include_str!("../machines/a-plus.tm"),
    include_str!("../machines/contains-aa.tm"),
    include_str!("../machines/loop.tm"),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<MachineDefinition>> = RwLock::new(Vec::new());
}

pub struct MachineCatalog;

impl MachineCatalog {
    /// Parse the bundled machines into the registry, once.
    pub fn load() -> Result<(), TraceError> {
        let mut write_guard = MACHINES
            .write()
            .map_err(|_| TraceError::FileError("Failed to acquire write lock".to_string()))?;

        if write_guard.is_empty() {
            *write_guard = MACHINE_TEXTS
                .iter()
                .map(|text| parse(text))
                .collect::<Result<Vec<_>, _>>()?;
        }

        Ok(())
    }

    /// Get the number of bundled machines
    pub fn count() -> usize {
        let _ = Self::load();

        MACHINES.read().map(|machines| machines.len()).unwrap_or(0)
    }

    /// Get a machine by its index
    pub fn get_by_index(index: usize) -> Result<MachineDefinition, TraceError> {
        Self::load()?;

        MACHINES
            .read()
            .map_err(|_| TraceError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                TraceError::ValidationError(format!("Machine index {} out of range", index))
            })
    }

    /// Get a machine by its name
    pub fn get_by_name(name: &str) -> Result<MachineDefinition, TraceError> {
        Self::load()?;

        MACHINES
            .read()
            .map_err(|_| TraceError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|machine| machine.name == name)
            .cloned()
            .ok_or_else(|| TraceError::ValidationError(format!("Machine '{}' not found", name)))
    }

    /// List all machine names
    pub fn list_names() -> Vec<String> {
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| machines.iter().map(|machine| machine.name.clone()).collect())
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get the original text of a machine by its index
    pub fn get_text_by_index(index: usize) -> Result<&'static str, TraceError> {
        MACHINE_TEXTS.get(index).copied().ok_or_else(|| {
            TraceError::ValidationError(format!("Machine text index {} out of range", index))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_initialization() {
        assert!(MachineCatalog::load().is_ok());
        assert_eq!(MachineCatalog::count(), MACHINE_TEXTS.len());
    }

    #[test]
    fn test_machine_names() {
        let names = MachineCatalog::list_names();

        for name in ["0^n1^n", "even-zeros", "a-plus", "contains-aa", "loop"] {
            assert!(names.contains(&name.to_string()), "missing {name}");
        }
    }

    #[test]
    fn test_get_by_index_and_text() {
        let machine = MachineCatalog::get_by_index(0).unwrap();
        let text = MachineCatalog::get_text_by_index(0).unwrap();

        assert_eq!(machine.name, "0^n1^n");
        assert!(text.starts_with("0^n1^n"));
        assert!(MachineCatalog::get_by_index(99).is_err());
        assert!(MachineCatalog::get_text_by_index(99).is_err());
    }

    #[test]
    fn test_unknown_name() {
        let error = MachineCatalog::get_by_name("busy-beaver").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Definition validation error: Machine 'busy-beaver' not found"
        );
    }

    #[test]
    fn test_nondeterminism_flags() {
        let flags: Vec<(String, bool)> = (0..MachineCatalog::count())
            .map(|i| MachineCatalog::get_by_index(i).unwrap())
            .map(|machine| (machine.name.clone(), machine.is_nondeterministic()))
            .collect();

        assert_eq!(
            flags,
            vec![
                ("0^n1^n".to_string(), false),
                ("even-zeros".to_string(), false),
                ("a-plus".to_string(), true),
                ("contains-aa".to_string(), true),
                ("loop".to_string(), false),
            ]
        );
    }
}
