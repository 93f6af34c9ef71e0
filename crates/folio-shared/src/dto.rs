//! Data Transfer Objects - request types for the blog API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/blogs` and `PUT /api/blogs/{id}`.
///
/// Every field is optional on the wire; required fields are enforced by the
/// service so that a missing title is reported the same way as a blank one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub tags: Option<TagsPayload>,
}

/// Tags as sent by clients: an array of values or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsPayload {
    List(Vec<Value>),
    Text(String),
    /// Any other scalar, read as a single comma-separated string.
    Other(Value),
}

impl TagsPayload {
    /// Flatten list elements to strings. Strings are taken as-is, `null`
    /// becomes empty, whole-valued numbers drop their fraction (`1.0` is
    /// `"1"`), and everything else is rendered as JSON text.
    pub fn stringify(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
            other => other.to_string(),
        }
    }

    /// Read a `tags` value that is neither an array nor a string. `false`
    /// and zero carry no tags; anything else is stringified.
    pub fn scalar_text(value: &Value) -> String {
        match value {
            Value::Bool(false) | Value::Null => String::new(),
            Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
            other => Self::stringify(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_tags_accept_array_or_string() {
        let payload: PostPayload =
            serde_json::from_value(json!({"title": "T", "content": "C", "tags": ["a", 1, null]})).unwrap();
        assert_eq!(
            payload.tags,
            Some(TagsPayload::List(vec![json!("a"), json!(1), Value::Null]))
        );

        let payload: PostPayload =
            serde_json::from_value(json!({"title": "T", "content": "C", "tags": "a, b"})).unwrap();
        assert_eq!(payload.tags, Some(TagsPayload::Text("a, b".into())));

        let payload: PostPayload = serde_json::from_value(json!({"tags": 7})).unwrap();
        assert_eq!(payload.tags, Some(TagsPayload::Other(json!(7))));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let payload: PostPayload = serde_json::from_value(json!({"tags": null})).unwrap();
        assert_eq!(payload, PostPayload::default());
    }

    #[test]
    fn test_stringify() {
        assert_eq!(TagsPayload::stringify(&json!(" rust ")), " rust ");
        assert_eq!(TagsPayload::stringify(&json!(42)), "42");
        assert_eq!(TagsPayload::stringify(&json!(true)), "true");
        assert_eq!(TagsPayload::stringify(&Value::Null), "");
        assert_eq!(TagsPayload::stringify(&json!(["x"])), r#"["x"]"#);
        assert_eq!(TagsPayload::stringify(&json!(1.0)), "1");
        assert_eq!(TagsPayload::stringify(&json!(2.5)), "2.5");
        assert_eq!(TagsPayload::stringify(&json!(-3.0)), "-3");
    }

    #[test]
    fn test_scalar_text_drops_falsy_values() {
        assert_eq!(TagsPayload::scalar_text(&json!(false)), "");
        assert_eq!(TagsPayload::scalar_text(&json!(0)), "");
        assert_eq!(TagsPayload::scalar_text(&json!(0.0)), "");
        assert_eq!(TagsPayload::scalar_text(&json!(true)), "true");
        assert_eq!(TagsPayload::scalar_text(&json!(7)), "7");
        assert_eq!(TagsPayload::scalar_text(&json!(7.0)), "7");
    }
}
