use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    script::ScriptRuntime,
};

use super::definition::{DynamicParameterDefinition, ParameterValue};

/// The dynamic parameters of one job, addressed by name.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    definitions: Vec<DynamicParameterDefinition>,
}

impl ParameterSet {
    pub fn new(definitions: Vec<DynamicParameterDefinition>) -> Self {
        ParameterSet { definitions }
    }

    pub fn definitions(&self) -> &[DynamicParameterDefinition] {
        &self.definitions
    }

    pub fn get(&self, name: &str) -> Result<&DynamicParameterDefinition> {
        self.definitions
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))
    }

    pub fn set_choice_type(&mut self, name: &str, choice_type: &str) -> Result<bool> {
        let definition = self
            .definitions
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))?;
        Ok(definition.set_choice_type(choice_type))
    }

    pub fn default_value(&self, runtime: &ScriptRuntime, name: &str) -> Result<ParameterValue> {
        self.get(name)?.get_default_parameter_value(runtime)
    }

    /// Turns a triggered build's submission into one value per definition.
    /// Submitted values are checked, missing ones fall back to the default.
    pub fn resolve(&self, runtime: &ScriptRuntime, submitted: &HashMap<String, String>) -> Result<Vec<ParameterValue>> {
        if let Some(unknown) = submitted.keys().find(|name| self.get(name).is_err()) {
            return Err(Error::UnknownParameter(unknown.clone()));
        }

        let mut values = Vec::with_capacity(self.definitions.len());
        for definition in &self.definitions {
            let value = match submitted.get(&definition.name) {
                Some(value) => definition.check_parameter_value(
                    runtime,
                    ParameterValue::new(definition.name.clone(), Some(value.clone())),
                )?,
                None => definition.get_default_parameter_value(runtime)?,
            };
            values.push(value);
        }

        Ok(values)
    }
}
