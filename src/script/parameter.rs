use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name/value pair bound into a script's execution context.
#[derive(Deserialize, Serialize, Clone, PartialEq, Debug)]
pub struct ScriptParameter {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl ScriptParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        ScriptParameter {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Merges the script's declared parameters with the ones supplied by a
/// parameter definition. Declared values act as defaults, supplied values win.
pub fn merged_parameters(declared: &[ScriptParameter], supplied: &[ScriptParameter]) -> HashMap<String, String> {
    let mut merged = HashMap::new();
    for parameter in declared {
        merged.insert(parameter.name.clone(), parameter.value.clone());
    }
    for parameter in supplied {
        merged.insert(parameter.name.clone(), parameter.value.clone());
    }
    merged
}
