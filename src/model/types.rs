//! Wire entities returned by the conversation API.
//!
//! Everything here is an immutable snapshot; the views never mutate these
//! values. Sub-entity lists tolerate being absent or `null` and come back as
//! empty vectors.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of `GET /api/conversations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub message_count: u64,
}

/// Body of `GET /api/conversations/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationDetail {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Message>,
}

/// Who sent a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    User,
    Assistant,
    Tool,
    Other(String),
}

impl Sender {
    /// Raw wire value, also used as the CSS class of the message block.
    pub fn as_str(&self) -> &str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
            Sender::Tool => "tool",
            Sender::Other(raw) => raw,
        }
    }

    /// Display label: the wire value with its first character upper-cased.
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for Sender {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "user" => Sender::User,
            "assistant" => Sender::Assistant,
            "tool" => Sender::Tool,
            _ => Sender::Other(raw),
        }
    }
}

impl From<Sender> for String {
    fn from(sender: Sender) -> Self {
        sender.as_str().to_string()
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    /// Markdown source.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code_blocks: Vec<CodeBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tool_outputs: Vec<ToolOutput>,
}

impl Message {
    /// Text body if present and non-empty.
    pub fn body(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    /// e.g. "file_selection", "code_chunk_uri", "symbol_link"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub content: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub uri_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<ToolData>,
}

/// Tool payload, classified once when the response is decoded.
///
/// Objects and arrays stay structured so they can be pretty-printed; strings,
/// numbers and booleans collapse to their display text. Whole-valued floats
/// are stored as integers so `2.0` displays as `2`, matching how browsers
/// print JSON numbers. JSON `null` never reaches this type (the field becomes
/// `None`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolData {
    Scalar(String),
    Structured(serde_json::Value),
}

impl From<serde_json::Value> for ToolData {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match normalize_numbers(value) {
            Value::String(s) => ToolData::Scalar(s),
            value @ (Value::Object(_) | Value::Array(_)) => ToolData::Structured(value),
            Value::Null => ToolData::Scalar(String::new()),
            other => ToolData::Scalar(other.to_string()),
        }
    }
}

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Rewrite whole-valued floats (`2.0`, `-3e2`) as integers, recursively.
fn normalize_numbers(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
                Value::from(f as i64)
            }
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_numbers(v)))
                .collect(),
        ),
        other => other,
    }
}

impl<'de> Deserialize<'de> for ToolData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(ToolData::from)
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_uses_snake_case_wire_names() {
        let rows: Vec<ConversationSummary> =
            serde_json::from_value(json!([{"id": "a", "title": "Chat A", "message_count": 3}]))
                .unwrap();
        assert_eq!(rows[0].message_count, 3);
        assert_eq!(rows[0].title, "Chat A");
    }

    #[test]
    fn message_tolerates_missing_and_null_lists() {
        let msg: Message = serde_json::from_value(json!({
            "id": "m1",
            "sender": "user",
            "attachments": null,
            "tool_outputs": []
        }))
        .unwrap();
        assert!(msg.text.is_none());
        assert!(msg.attachments.is_empty());
        assert!(msg.code_blocks.is_empty());
        assert!(msg.tool_outputs.is_empty());
        assert_eq!(msg.body(), None);
    }

    #[test]
    fn empty_text_has_no_body() {
        let msg: Message =
            serde_json::from_value(json!({"id": "m1", "sender": "assistant", "text": ""}))
                .unwrap();
        assert_eq!(msg.body(), None);
    }

    #[test]
    fn sender_keeps_unknown_values() {
        let s: Sender = serde_json::from_value(json!("system")).unwrap();
        assert_eq!(s, Sender::Other("system".into()));
        assert_eq!(s.label(), "System");
        assert_eq!(Sender::User.label(), "User");
        assert_eq!(Sender::Other(String::new()).label(), "");
    }

    #[test]
    fn tool_data_is_classified_at_decode_time() {
        let out: ToolOutput = serde_json::from_value(json!({
            "tool_name": "search",
            "status": "ok",
            "data": {"hits": 2}
        }))
        .unwrap();
        assert!(matches!(out.data, Some(ToolData::Structured(_))));

        let out: ToolOutput = serde_json::from_value(json!({"data": [1, 2]})).unwrap();
        assert!(matches!(out.data, Some(ToolData::Structured(_))));

        let out: ToolOutput = serde_json::from_value(json!({"data": "plain"})).unwrap();
        assert_eq!(out.data, Some(ToolData::Scalar("plain".into())));

        let out: ToolOutput = serde_json::from_value(json!({"data": 42})).unwrap();
        assert_eq!(out.data, Some(ToolData::Scalar("42".into())));

        let out: ToolOutput = serde_json::from_value(json!({"data": true})).unwrap();
        assert_eq!(out.data, Some(ToolData::Scalar("true".into())));
    }

    #[test]
    fn whole_floats_display_without_fraction() {
        let out: ToolOutput = serde_json::from_str(r#"{"data": 2.0}"#).unwrap();
        assert_eq!(out.data, Some(ToolData::Scalar("2".into())));

        let out: ToolOutput = serde_json::from_str(r#"{"data": 2.5}"#).unwrap();
        assert_eq!(out.data, Some(ToolData::Scalar("2.5".into())));

        let out: ToolOutput =
            serde_json::from_str(r#"{"data": {"score": 1.0, "nested": [-3.0, 0.25]}}"#).unwrap();
        assert_eq!(
            out.data,
            Some(ToolData::Structured(json!({"score": 1, "nested": [-3, 0.25]})))
        );
    }

    #[test]
    fn null_tool_data_is_absent() {
        let out: ToolOutput = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(out.data.is_none());
        let out: ToolOutput = serde_json::from_value(json!({})).unwrap();
        assert!(out.data.is_none());
    }

    #[test]
    fn attachment_type_field_maps_to_kind() {
        let att: Attachment =
            serde_json::from_value(json!({"name": "main.rs", "type": "file_selection"})).unwrap();
        assert_eq!(att.kind, "file_selection");
        assert!(att.path.is_none());
    }
}
