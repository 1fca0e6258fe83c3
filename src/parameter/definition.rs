use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{Error, Result},
    script::{ScriptParameter, ScriptRuntime},
};

use super::choices::{contains_all, format_optional, normalize_script_result, visible_item_count};

pub const PT_SINGLE_SELECT: &str = "PT_SINGLE_SELECT";
pub const PT_MULTI_SELECT: &str = "PT_MULTI_SELECT";
pub const PT_CHECKBOX: &str = "PT_CHECKBOX";
pub const PT_RADIO: &str = "PT_RADIO";

fn default_choice_type() -> String {
    PT_SINGLE_SELECT.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChoiceOptions {
    #[serde(default)]
    pub readonly_input_field: bool,
    /// Rendering hint, forwarded to the presentation layer untouched.
    #[serde(default = "default_choice_type")]
    pub choice_type: String,
}

impl Default for ChoiceOptions {
    fn default() -> Self {
        ChoiceOptions {
            readonly_input_field: false,
            choice_type: default_choice_type(),
        }
    }
}

/// How a definition turns the script result into values.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind")]
pub enum ChoiceStrategy {
    /// Free text, defaulting to the script result.
    #[serde(rename = "string")]
    String,
    /// A list of choices produced by the script.
    #[serde(rename = "choice")]
    Choice(ChoiceOptions),
    /// A checkbox, defaulting to the truthiness of the script result.
    #[serde(rename = "boolean")]
    Boolean,
}

/// A named value handed to the host. `value: None` means the parameter
/// exists but carries no content.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParameterValue {
    pub name: String,
    pub value: Option<String>,
}

impl ParameterValue {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        ParameterValue {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DynamicParameterDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Distinguishes definitions sharing a name across builds.
    #[serde(default)]
    pub uuid: Option<String>,
    pub script_id: String,
    #[serde(default)]
    pub parameters: Vec<ScriptParameter>,
    #[serde(default)]
    pub remote: bool,
    pub strategy: ChoiceStrategy,
}

impl DynamicParameterDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        uuid: Option<String>,
        script_id: impl Into<String>,
        parameters: Vec<ScriptParameter>,
        remote: bool,
        strategy: ChoiceStrategy,
    ) -> Self {
        DynamicParameterDefinition {
            name: name.into(),
            description: description.into(),
            uuid,
            script_id: script_id.into(),
            parameters,
            remote,
            strategy,
        }
    }

    /// Runs the backing script. Every call executes it again.
    pub fn script_result(&self, runtime: &ScriptRuntime) -> Result<Value> {
        runtime.run(&self.script_id, &self.parameters, self.remote)
    }

    pub fn get_choices(&self, runtime: &ScriptRuntime) -> Result<Vec<Value>> {
        Ok(normalize_script_result(self.script_result(runtime)?))
    }

    /// Default value used by the trigger mechanism and the query surface.
    pub fn get_default_parameter_value(&self, runtime: &ScriptRuntime) -> Result<ParameterValue> {
        let value = match &self.strategy {
            ChoiceStrategy::Choice(_) => self.get_choices(runtime)?.first().and_then(format_optional),
            ChoiceStrategy::String => format_optional(&self.script_result(runtime)?),
            ChoiceStrategy::Boolean => Some(is_truthy(&self.script_result(runtime)?).to_string()),
        };
        Ok(ParameterValue::new(self.name.clone(), value))
    }

    /// Returns `parameter` unchanged when it is acceptable for this definition.
    pub fn check_parameter_value(&self, runtime: &ScriptRuntime, parameter: ParameterValue) -> Result<ParameterValue> {
        let actual_value = parameter.value.clone().unwrap_or_default();

        let accepted = match &self.strategy {
            ChoiceStrategy::Choice(_) => contains_all(&self.get_choices(runtime)?, &actual_value),
            ChoiceStrategy::String => true,
            ChoiceStrategy::Boolean => {
                actual_value.is_empty()
                    || actual_value.eq_ignore_ascii_case("true")
                    || actual_value.eq_ignore_ascii_case("false")
            }
        };

        if accepted {
            return Ok(parameter);
        }

        tracing::warn!(parameter = %self.name, value = %actual_value, "Rejected parameter value");
        Err(Error::InvalidChoice(actual_value))
    }

    pub fn get_visible_item_count(&self, runtime: &ScriptRuntime) -> Result<usize> {
        Ok(visible_item_count(self.get_choices(runtime)?.len()))
    }

    pub fn is_readonly_input_field(&self) -> bool {
        match &self.strategy {
            ChoiceStrategy::Choice(options) => options.readonly_input_field,
            _ => false,
        }
    }

    pub fn choice_type(&self) -> Option<&str> {
        match &self.strategy {
            ChoiceStrategy::Choice(options) => Some(options.choice_type.as_str()),
            _ => None,
        }
    }

    /// Updates the rendering hint. Returns false for non-choice definitions.
    pub fn set_choice_type(&mut self, choice_type: impl Into<String>) -> bool {
        match &mut self.strategy {
            ChoiceStrategy::Choice(options) => {
                options.choice_type = choice_type.into();
                true
            }
            _ => false,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("TRUE")));
        assert!(is_truthy(&json!(" true ")));
        assert!(!is_truthy(&json!("yes")));
        assert!(!is_truthy(&json!(1)));
        assert!(!is_truthy(&Value::Null));
    }

    #[test]
    fn test_choice_type_only_applies_to_choices() {
        let mut definition = DynamicParameterDefinition::new(
            "flag",
            "",
            None,
            "script",
            vec![],
            false,
            ChoiceStrategy::Boolean,
        );
        assert_eq!(definition.choice_type(), None);
        assert!(!definition.set_choice_type(PT_RADIO));

        definition.strategy = ChoiceStrategy::Choice(ChoiceOptions::default());
        assert_eq!(definition.choice_type(), Some(PT_SINGLE_SELECT));
        assert!(definition.set_choice_type(PT_MULTI_SELECT));
        assert_eq!(definition.choice_type(), Some(PT_MULTI_SELECT));
    }

    #[test]
    fn test_deserialize_definition() {
        let yaml = r#"
name: BRANCH
script_id: list-branches
parameters:
  - name: repo
    value: nomos
strategy:
  kind: choice
  choice_type: PT_CHECKBOX
"#;
        let definition: DynamicParameterDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(definition.name, "BRANCH");
        assert_eq!(definition.description, "");
        assert_eq!(definition.uuid, None);
        assert!(!definition.remote);
        assert_eq!(definition.parameters, vec![ScriptParameter::new("repo", "nomos")]);
        assert_eq!(definition.choice_type(), Some(PT_CHECKBOX));
        assert!(!definition.is_readonly_input_field());
    }
}
