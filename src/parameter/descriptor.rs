use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{
    error::Result,
    script::{Script, ScriptRegistry},
};

static DEFAULT_MESSAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ScriptChoiceParameterDefinition.DisplayName", "Dynamic Choice Parameter (Scriptler)"),
        ("ScriptStringParameterDefinition.DisplayName", "Dynamic Parameter (Scriptler)"),
        ("ScriptBooleanParameterDefinition.DisplayName", "Dynamic Boolean Parameter (Scriptler)"),
    ])
});

/// Display strings keyed by `<Type>.<Key>`, with built-in English fallbacks.
#[derive(Debug, Clone, Default)]
pub struct Messages {
    overrides: HashMap<String, String>,
}

impl Messages {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Messages { overrides }
    }

    /// Falls back to the key itself when nothing is known about it.
    pub fn format(&self, key: &str) -> String {
        self.overrides
            .get(key)
            .map(String::as_str)
            .or_else(|| DEFAULT_MESSAGES.get(key).copied())
            .unwrap_or(key)
            .to_string()
    }
}

pub trait ParameterDescriptor: Send + Sync {
    /// Matches the `kind` tag of the strategy this descriptor describes.
    fn kind(&self) -> &'static str;

    fn message_prefix(&self) -> &'static str;

    fn display_name(&self, messages: &Messages) -> String {
        messages.format(&format!("{}.DisplayName", self.message_prefix()))
    }

    /// Scripts a configuration form can offer for this parameter type.
    fn scripts(&self, registry: &dyn ScriptRegistry) -> Result<Vec<Script>> {
        registry.list_all()
    }
}

pub struct ScriptChoiceDescriptor;

impl ParameterDescriptor for ScriptChoiceDescriptor {
    fn kind(&self) -> &'static str {
        "choice"
    }

    fn message_prefix(&self) -> &'static str {
        "ScriptChoiceParameterDefinition"
    }
}

pub struct ScriptStringDescriptor;

impl ParameterDescriptor for ScriptStringDescriptor {
    fn kind(&self) -> &'static str {
        "string"
    }

    fn message_prefix(&self) -> &'static str {
        "ScriptStringParameterDefinition"
    }
}

pub struct ScriptBooleanDescriptor;

impl ParameterDescriptor for ScriptBooleanDescriptor {
    fn kind(&self) -> &'static str {
        "boolean"
    }

    fn message_prefix(&self) -> &'static str {
        "ScriptBooleanParameterDefinition"
    }
}

/// Parameter types known to the host, registered explicitly at start-up.
#[derive(Default)]
pub struct DescriptorRegistry {
    descriptors: Vec<Box<dyn ParameterDescriptor>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ScriptStringDescriptor));
        registry.register(Box::new(ScriptChoiceDescriptor));
        registry.register(Box::new(ScriptBooleanDescriptor));
        registry
    }

    /// Registering a kind twice replaces the earlier descriptor.
    pub fn register(&mut self, descriptor: Box<dyn ParameterDescriptor>) {
        self.descriptors.retain(|d| d.kind() != descriptor.kind());
        tracing::debug!(kind = descriptor.kind(), "Registered parameter descriptor");
        self.descriptors.push(descriptor);
    }

    pub fn get(&self, kind: &str) -> Option<&dyn ParameterDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.kind() == kind)
            .map(|d| d.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ParameterDescriptor> {
        self.descriptors.iter().map(|d| d.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::InMemoryScriptRegistry;

    #[test]
    fn test_display_name_uses_overrides() {
        let messages = Messages::new(HashMap::from([(
            "ScriptChoiceParameterDefinition.DisplayName".to_string(),
            "Dynamische Auswahl".to_string(),
        )]));
        assert_eq!(ScriptChoiceDescriptor.display_name(&messages), "Dynamische Auswahl");
        assert_eq!(
            ScriptBooleanDescriptor.display_name(&messages),
            "Dynamic Boolean Parameter (Scriptler)"
        );
        assert_eq!(messages.format("Unknown.Key"), "Unknown.Key");
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = DescriptorRegistry::with_defaults();
        let ids: Vec<&str> = registry.iter().map(|d| d.kind()).collect();
        assert_eq!(ids, vec!["string", "choice", "boolean"]);
        assert!(registry.get("choice").is_some());
        assert!(registry.get("text").is_none());
    }

    #[test]
    fn test_register_replaces_same_type() {
        let mut registry = DescriptorRegistry::with_defaults();
        registry.register(Box::new(ScriptChoiceDescriptor));
        assert_eq!(registry.iter().count(), 3);
    }

    #[test]
    fn test_scripts_delegate_to_registry() {
        let registry = InMemoryScriptRegistry::new().with_script(Script {
            id: "branches".to_string(),
            name: "Branches".to_string(),
            code: "git branch".to_string(),
            ..Default::default()
        });
        let scripts = ScriptChoiceDescriptor.scripts(&registry).unwrap();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].id, "branches");
    }
}
