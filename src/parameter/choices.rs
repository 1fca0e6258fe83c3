use serde_json::Value;

/// Upper bound on the number of rows a choice list renders at once. Shared by
/// every choice-style parameter.
pub const DEFAULT_MAX_VISIBLE_ITEM_COUNT: usize = 5;

/// Turns a raw script result into an ordered list of choices.
///
/// Arrays contribute their elements in order, `null` yields no choices, and
/// any other value is a single choice.
pub fn normalize_script_result(result: Value) -> Vec<Value> {
    match result {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// String form of a choice, or `None` for `null`.
pub fn format_optional(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Splits a submission on `,`, dropping empty tokens.
pub fn split_submission(submitted: &str) -> Vec<&str> {
    submitted.split(',').filter(|token| !token.is_empty()).collect()
}

/// True when every submitted token is one of the stringified choices.
/// An empty submission contains no tokens and is therefore always accepted.
pub fn contains_all(choices: &[Value], submitted: &str) -> bool {
    let string_choices: Vec<String> = choices
        .iter()
        .map(|choice| format_optional(choice).unwrap_or_default())
        .collect();

    split_submission(submitted)
        .iter()
        .all(|token| string_choices.iter().any(|choice| choice == token))
}

pub fn visible_item_count(choice_count: usize) -> usize {
    choice_count.min(DEFAULT_MAX_VISIBLE_ITEM_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_script_result() {
        assert!(normalize_script_result(Value::Null).is_empty());
        assert_eq!(normalize_script_result(json!(["b", "a", 3])), vec![json!("b"), json!("a"), json!(3)]);
        assert_eq!(normalize_script_result(json!("only")), vec![json!("only")]);
        assert_eq!(normalize_script_result(json!({"k": 1})), vec![json!({"k": 1})]);
        assert!(normalize_script_result(json!([])).is_empty());
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(&Value::Null), None);
        assert_eq!(format_optional(&json!("text")), Some("text".to_string()));
        assert_eq!(format_optional(&json!(12)), Some("12".to_string()));
        assert_eq!(format_optional(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(format_optional(&json!(false)), Some("false".to_string()));
        assert_eq!(format_optional(&json!([1, 2])), Some("[1,2]".to_string()));
    }

    #[test]
    fn test_split_submission() {
        assert!(split_submission("").is_empty());
        assert_eq!(split_submission("a"), vec!["a"]);
        assert_eq!(split_submission("a,,b,"), vec!["a", "b"]);
        assert_eq!(split_submission("a, b"), vec!["a", " b"]);
    }

    #[test]
    fn test_contains_all() {
        let choices = vec![json!("a"), json!("b"), json!(3), Value::Null];
        assert!(contains_all(&choices, "b,a"));
        assert!(contains_all(&choices, "3"));
        assert!(contains_all(&choices, ""));
        assert!(!contains_all(&choices, "a,d"));
        assert!(!contains_all(&[], "a"));
        assert!(contains_all(&[], ""));
    }

    #[test]
    fn test_visible_item_count() {
        assert_eq!(visible_item_count(0), 0);
        assert_eq!(visible_item_count(3), 3);
        assert_eq!(visible_item_count(5), 5);
        assert_eq!(visible_item_count(8), 5);
    }
}
