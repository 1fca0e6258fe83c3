use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

use super::models::Script;

/// Lookup of named scripts by id.
pub trait ScriptRegistry: Send + Sync {
    fn resolve(&self, script_id: &str) -> Result<Option<Script>>;

    /// Every known script. Only used by configuration surfaces.
    fn list_all(&self) -> Result<Vec<Script>>;
}

/// Registry backed by a directory of `<id>.yml` files.
#[derive(Debug, Clone)]
pub struct YamlScriptRegistry {
    directory: PathBuf,
}

impl YamlScriptRegistry {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        YamlScriptRegistry {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl ScriptRegistry for YamlScriptRegistry {
    fn resolve(&self, script_id: &str) -> Result<Option<Script>> {
        if script_id.is_empty() || script_id.contains(['/', '\\']) || script_id.contains("..") {
            return Err(Error::Registry(format!("Invalid script id: {:?}", script_id)));
        }

        let path = self.directory.join(format!("{}.yml", script_id));
        if !path.exists() {
            return Ok(None);
        }
        Script::try_from(path).map(Some)
    }

    fn list_all(&self) -> Result<Vec<Script>> {
        let entries = fs::read_dir(&self.directory)
            .map_err(|e| Error::Registry(format!("Failed to read scripts directory: {}", e)))?;

        let mut scripts = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::Registry(format!("Failed to read directory entry: {}", e)))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yml") {
                continue;
            }
            match Script::try_from(path.clone()) {
                Ok(script) => scripts.push(script),
                Err(e) => tracing::warn!("Error reading script from {:?}: {}", path, e),
            }
        }
        scripts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(scripts)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryScriptRegistry {
    scripts: BTreeMap<String, Script>,
}

impl InMemoryScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, script: Script) {
        self.scripts.insert(script.id.clone(), script);
    }

    pub fn with_script(mut self, script: Script) -> Self {
        self.insert(script);
        self
    }
}

impl ScriptRegistry for InMemoryScriptRegistry {
    fn resolve(&self, script_id: &str) -> Result<Option<Script>> {
        Ok(self.scripts.get(script_id).cloned())
    }

    fn list_all(&self) -> Result<Vec<Script>> {
        Ok(self.scripts.values().cloned().collect())
    }
}
