use serde_json::Value;
use std::collections::HashMap;

pub(crate) trait ParameterSubstitution {
    fn substitute_parameters(&self, parameters: &HashMap<String, String>) -> Result<String, String>;
}

impl ParameterSubstitution for str {
    fn substitute_parameters(&self, parameters: &HashMap<String, String>) -> Result<String, String> {
        const PREFIX: &str = "$(parameters.";

        let mut result = String::with_capacity(self.len());
        let mut remaining = self;

        // Only $(parameters.xxx) is ours, any other $( belongs to the shell
        while let Some(start) = remaining.find(PREFIX) {
            result.push_str(&remaining[..start]);
            let reference = &remaining[start + PREFIX.len()..];
            let end = reference
                .find(')')
                .ok_or_else(|| "Missing closing bracket ')'".to_string())?;

            let name = &reference[..end];
            let value = parameters
                .get(name)
                .ok_or_else(|| format!("Parameter '{}' not found", name))?;
            result.push_str(value);

            remaining = &reference[end + 1..];
        }
        result.push_str(remaining);

        Ok(result)
    }
}

/// Interprets a script's standard output as its return value.
///
/// Blank output is `null`. Output starting with `[`, `{` or `"` is read as
/// JSON when it parses. Anything else becomes its non-empty lines, kept as
/// strings: a single line is a string, several are an array.
pub fn parse_script_output(stdout: &str) -> Value {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if trimmed.starts_with(['[', '{', '"']) {
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return value;
        }
    }

    let mut lines: Vec<Value> = trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Value::String(line.to_string()))
        .collect();

    if lines.len() == 1 {
        lines.remove(0)
    } else {
        Value::Array(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_substitution() {
        let mut parameters = HashMap::new();
        parameters.insert("param1".to_string(), "value1".to_string());
        parameters.insert("VERSION".to_string(), "1.0.0".to_string());

        assert_eq!("$(parameters.param1)".substitute_parameters(&parameters).unwrap(), "value1");

        assert_eq!(
            "echo $(parameters.param1)_$(parameters.VERSION) done"
                .substitute_parameters(&parameters)
                .unwrap(),
            "echo value1_1.0.0 done"
        );

        // Shell command substitution is left alone, even for known names
        assert_eq!(
            "for b in $(git branch); do echo $b-$(VERSION); done"
                .substitute_parameters(&parameters)
                .unwrap(),
            "for b in $(git branch); do echo $b-$(VERSION); done"
        );
        assert!("echo $(date) $(parameters.param1".substitute_parameters(&parameters).is_err());

        assert_eq!("echo plain".substitute_parameters(&parameters).unwrap(), "echo plain");

        // Missing parameter
        assert!("$(parameters.missing)".substitute_parameters(&parameters).is_err());

        // Missing closing bracket
        assert!("$(parameters.param1".substitute_parameters(&parameters).is_err());
    }

    #[test]
    fn test_substituted_value_is_not_rescanned() {
        let mut parameters = HashMap::new();
        parameters.insert("a".to_string(), "$(parameters.b)".to_string());

        assert_eq!("$(parameters.a)".substitute_parameters(&parameters).unwrap(), "$(parameters.b)");
    }

    #[test]
    fn test_parse_script_output() {
        assert_eq!(parse_script_output(""), Value::Null);
        assert_eq!(parse_script_output("  \n"), Value::Null);
        assert_eq!(parse_script_output("[\"a\", \"b\"]\n"), json!(["a", "b"]));
        assert_eq!(parse_script_output("{\"k\": 1}"), json!({"k": 1}));
        assert_eq!(parse_script_output("\"quoted\""), json!("quoted"));
        assert_eq!(parse_script_output("[not json"), json!("[not json"));
        assert_eq!(parse_script_output("release-1\n"), json!("release-1"));
        assert_eq!(parse_script_output("a\n\nb\nc\n"), json!(["a", "b", "c"]));
    }

    #[test]
    fn test_parse_script_output_keeps_scalars_as_printed() {
        assert_eq!(parse_script_output("1.10\n"), json!("1.10"));
        assert_eq!(parse_script_output("42"), json!("42"));
        assert_eq!(parse_script_output("null"), json!("null"));
        assert_eq!(parse_script_output("true"), json!("true"));
        assert_eq!(parse_script_output("1.10\n2.0\n"), json!(["1.10", "2.0"]));
    }
}
