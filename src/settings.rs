use std::{collections::HashMap, path::PathBuf};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    parameter::DynamicParameterDefinition,
};

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Falls back to the platform's default scripts location.
    #[serde(default)]
    pub scripts_directory: Option<PathBuf>,
    /// Command prefix used for remote execution, e.g. `["ssh", "worker-1"]`.
    #[serde(default)]
    pub remote_command: Option<Vec<String>>,
    #[serde(default)]
    pub messages: HashMap<String, String>,
    #[serde(default)]
    pub parameters: Vec<DynamicParameterDefinition>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_address: default_bind_address(),
            scripts_directory: None,
            remote_command: None,
            messages: HashMap::new(),
            parameters: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads `path` when it exists, otherwise the defaults.
    pub fn load(path: PathBuf) -> Result<Self> {
        if path.exists() {
            Settings::try_from(path)
        } else {
            tracing::info!("No settings file found at {:?}, using defaults", path);
            Ok(Settings::default())
        }
    }
}

impl TryFrom<PathBuf> for Settings {
    type Error = Error;

    fn try_from(path: PathBuf) -> std::result::Result<Self, Self::Error> {
        let yaml_str = std::fs::read_to_string(&path).map_err(|e| Error::Settings(e.to_string()))?;
        let settings: Settings = serde_yaml::from_str(yaml_str.as_str()).map_err(|e| Error::Settings(e.to_string()))?;

        let mut names: Vec<&str> = Vec::new();
        for parameter in &settings.parameters {
            if names.contains(&parameter.name.as_str()) {
                return Err(Error::Settings(format!("Duplicate parameter name: {}", parameter.name)));
            }
            names.push(parameter.name.as_str());
        }

        Ok(settings)
    }
}

pub fn default_settings_location() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("NOMOS_SETTINGS") {
        return Ok(PathBuf::from(path));
    }
    let path = if cfg!(target_os = "windows") {
        let appdata = std::env::var("APPDATA").map_err(|e| Error::Settings(e.to_string()))?;
        PathBuf::from(appdata).join("nomos").join("settings.yml")
    } else {
        PathBuf::from("/var/lib/nomos/settings.yml")
    };
    Ok(path)
}
