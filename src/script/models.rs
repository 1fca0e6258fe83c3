use std::{fs::File, io::BufReader, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::ScriptParameter;

/// A named script stored in the registry.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct Script {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub comment: String,
    /// Declared parameters with their default values.
    #[serde(default)]
    pub parameters: Vec<ScriptParameter>,
    pub code: String,
}

impl TryFrom<PathBuf> for Script {
    type Error = Error;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        let file = File::open(&path).map_err(|e| Error::Registry(format!("Could not open {}: {}", path.display(), e)))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader)
            .map_err(|e| Error::Registry(format!("Could not parse {}: {}", path.display(), e)))
    }
}
