//! Query-string serialization
//!
//! Flat key→value maps become query strings with the backend's omission
//! rules: unset, `false`, and empty values are dropped, and array values are
//! either joined into one comma-separated parameter or repeated per element.

/// A single query-parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Str(String),
    Int(i64),
    List(Vec<String>),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Serialize parameters into a query string (no leading `?`).
///
/// Omission rules:
/// - `None` values and `Bool(false)` are dropped
/// - empty strings are dropped
/// - empty-string array elements are dropped; an array with nothing left is
///   dropped entirely
/// - with `join_array`, remaining elements join into one comma-separated
///   parameter; otherwise the key repeats per element
pub fn to_query_string(params: &[(&str, Option<ParamValue>)], join_array: bool) -> String {
    let mut parts: Vec<String> = Vec::new();

    for (key, value) in params {
        let Some(value) = value else { continue };
        match value {
            ParamValue::Bool(false) => {}
            ParamValue::Bool(true) => parts.push(encode_pair(key, "true")),
            ParamValue::Str(s) if s.is_empty() => {}
            ParamValue::Str(s) => parts.push(encode_pair(key, s)),
            ParamValue::Int(n) => parts.push(encode_pair(key, &n.to_string())),
            ParamValue::List(items) => {
                let kept: Vec<&str> =
                    items.iter().map(String::as_str).filter(|s| !s.is_empty()).collect();
                if kept.is_empty() {
                    continue;
                }
                if join_array {
                    parts.push(encode_pair(key, &kept.join(",")));
                } else {
                    for item in kept {
                        parts.push(encode_pair(key, item));
                    }
                }
            }
        }
    }

    parts.join("&")
}

fn encode_pair(key: &str, value: &str) -> String {
    format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_absent_false_and_empty_values() {
        let qs = to_query_string(
            &[
                ("a", None),
                ("b", None),
                ("c", Some(ParamValue::Bool(false))),
                ("d", Some(ParamValue::List(vec!["".into(), "x".into(), "y".into()]))),
                ("e", Some(ParamValue::Str("z".into()))),
            ],
            true,
        );
        assert_eq!(qs, "d=x%2Cy&e=z");
    }

    #[test]
    fn repeats_key_when_not_joining() {
        let qs = to_query_string(
            &[("d", Some(ParamValue::List(vec!["x".into(), "".into(), "y".into()])))],
            false,
        );
        assert_eq!(qs, "d=x&d=y");
    }

    #[test]
    fn true_flag_is_kept() {
        let qs = to_query_string(&[("retrieve_json_payload", Some(ParamValue::Bool(true)))], true);
        assert_eq!(qs, "retrieve_json_payload=true");
    }

    #[test]
    fn all_empty_list_is_dropped() {
        let qs = to_query_string(
            &[("d", Some(ParamValue::List(vec!["".into()]))), ("e", Some("z".into()))],
            true,
        );
        assert_eq!(qs, "e=z");
    }

    #[test]
    fn values_are_percent_encoded() {
        let qs = to_query_string(&[("q", Some(ParamValue::Str("a b&c".into())))], true);
        assert_eq!(qs, "q=a%20b%26c");
    }
}
