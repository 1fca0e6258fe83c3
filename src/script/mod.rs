pub mod executor;
pub mod models;
pub mod parameter;
pub mod registry;
pub mod utils;

use std::{path::PathBuf, sync::Arc};

use serde_json::Value;

pub use executor::*;
pub use models::Script;
pub use parameter::*;
pub use registry::*;

use crate::error::{Error, Result};

pub fn default_scripts_location() -> Result<PathBuf> {
    let path = if cfg!(target_os = "windows") {
        let appdata = std::env::var("APPDATA").map_err(|e| Error::Settings(e.to_string()))?;
        PathBuf::from(appdata).join("nomos").join("scripts")
    } else {
        PathBuf::from("/var/lib/nomos/scripts")
    };
    std::fs::create_dir_all(&path).map_err(|e| Error::Registry(e.to_string()))?;
    Ok(path)
}

/// Resolves scripts by id and hands them to an executor.
#[derive(Clone)]
pub struct ScriptRuntime {
    registry: Arc<dyn ScriptRegistry>,
    executor: Arc<dyn ScriptExecutor>,
}

impl ScriptRuntime {
    pub fn new(registry: Arc<dyn ScriptRegistry>, executor: Arc<dyn ScriptExecutor>) -> Self {
        ScriptRuntime { registry, executor }
    }

    pub fn registry(&self) -> &dyn ScriptRegistry {
        self.registry.as_ref()
    }

    /// Runs `script_id` with `parameters` layered over the script's declared
    /// defaults. A missing script is an error, never an empty result.
    pub fn run(&self, script_id: &str, parameters: &[ScriptParameter], remote: bool) -> Result<Value> {
        let script = self
            .registry
            .resolve(script_id)?
            .ok_or_else(|| Error::ScriptNotFound(script_id.to_string()))?;

        let merged = merged_parameters(&script.parameters, parameters);
        self.executor.execute(&script, &merged, remote)
    }
}
