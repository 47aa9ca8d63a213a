use crate::Value;

/// `Null` and the empty string count as "not set" for inserts and key checks.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Textual form used when inlining values into debug SQL.
pub fn to_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Bool(b) => format!("'{}'", i32::from(*b)),
        other => format!("'{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("")));
        assert!(!is_blank(&json!(" ")));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!(false)));
    }

    #[test]
    fn test_to_literal() {
        assert_eq!(to_literal(&json!("joe")), "'joe'");
        assert_eq!(to_literal(&json!(42)), "'42'");
        assert_eq!(to_literal(&json!(true)), "'1'");
        assert_eq!(to_literal(&Value::Null), "NULL");
    }
}
