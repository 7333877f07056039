//! Wire shapes for the live-update channel.
//!
//! Outbound messages are tagged JSON arrays, e.g.
//! `["update-attrs", selector, {attr: value}]`. The transport only carries
//! them; the DOM semantics live in the client script.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeSeq, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    /// Patch attributes on every element matching the selector.
    UpdateAttrs {
        selector: String,
        attrs: BTreeMap<String, String>,
    },
    /// Replace the text content of every element matching the selector.
    UpdateText { selector: String, text: String },
    /// Append an HTML node under the element matching the selector.
    Append { selector: String, node: String },
    /// Several messages applied in order.
    Batch(Vec<ServerMessage>),
}

impl ServerMessage {
    pub fn update_attrs(selector: impl Into<String>, attrs: &[(&str, &str)]) -> Self {
        ServerMessage::UpdateAttrs {
            selector: selector.into(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn update_text(selector: impl Into<String>, text: impl Into<String>) -> Self {
        ServerMessage::UpdateText {
            selector: selector.into(),
            text: text.into(),
        }
    }

    pub fn append(selector: impl Into<String>, node: impl Into<String>) -> Self {
        ServerMessage::Append {
            selector: selector.into(),
            node: node.into(),
        }
    }

    pub fn batch(messages: Vec<ServerMessage>) -> Self {
        ServerMessage::Batch(messages)
    }
}

impl Serialize for ServerMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ServerMessage::UpdateAttrs { selector, attrs } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("update-attrs")?;
                seq.serialize_element(selector)?;
                seq.serialize_element(attrs)?;
                seq.end()
            }
            ServerMessage::UpdateText { selector, text } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("update-text")?;
                seq.serialize_element(selector)?;
                seq.serialize_element(text)?;
                seq.end()
            }
            ServerMessage::Append { selector, node } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("append")?;
                seq.serialize_element(selector)?;
                seq.serialize_element(node)?;
                seq.end()
            }
            ServerMessage::Batch(messages) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("batch")?;
                seq.serialize_element(messages)?;
                seq.end()
            }
        }
    }
}

/// Inbound messages from a live client.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    /// A form submitted over the socket: `["submit", path, urlencoded-body]`.
    Submit { path: String, body: String },
    /// The client navigated without reconnecting: `["visit", url]`.
    Visit { url: String },
}

impl ClientMessage {
    /// Parse one inbound frame. Anything malformed is dropped, not an error.
    pub fn parse(text: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(text).ok()?;
        let parts = value.as_array()?;
        match parts.first()?.as_str()? {
            "submit" => Some(ClientMessage::Submit {
                path: parts.get(1)?.as_str()?.to_string(),
                body: parts.get(2)?.as_str()?.to_string(),
            }),
            "visit" => Some(ClientMessage::Visit {
                url: parts.get(1)?.as_str()?.to_string(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_attrs_wire_shape() {
        let msg = ServerMessage::update_attrs(
            r#".seat[data-row="1"][data-col="2"]"#,
            &[("class", "seat occupied")],
        );
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!([
                "update-attrs",
                ".seat[data-row=\"1\"][data-col=\"2\"]",
                { "class": "seat occupied" }
            ])
        );
    }

    #[test]
    fn update_text_and_append_wire_shapes() {
        let text = ServerMessage::update_text("#book-seat-container", "Booked seat 11 (successful)");
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            json!(["update-text", "#book-seat-container", "Booked seat 11 (successful)"])
        );

        let append = ServerMessage::append("body", "<div data-href=\"/\"></div>");
        assert_eq!(
            serde_json::to_value(&append).unwrap(),
            json!(["append", "body", "<div data-href=\"/\"></div>"])
        );
    }

    #[test]
    fn batch_nests_messages() {
        let msg = ServerMessage::batch(vec![
            ServerMessage::update_text("#a", "x"),
            ServerMessage::append("body", "<p></p>"),
        ]);
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!(["batch", [["update-text", "#a", "x"], ["append", "body", "<p></p>"]]])
        );
    }

    #[test]
    fn parses_submit_and_visit() {
        assert_eq!(
            ClientMessage::parse(r#"["submit", "/seat-plan/book", "row=1&col=2"]"#),
            Some(ClientMessage::Submit {
                path: "/seat-plan/book".to_string(),
                body: "row=1&col=2".to_string(),
            })
        );
        assert_eq!(
            ClientMessage::parse(r#"["visit", "/seat-plan/1/2"]"#),
            Some(ClientMessage::Visit {
                url: "/seat-plan/1/2".to_string(),
            })
        );
    }

    #[test]
    fn drops_malformed_frames() {
        assert_eq!(ClientMessage::parse("not json"), None);
        assert_eq!(ClientMessage::parse(r#"{"type":"submit"}"#), None);
        assert_eq!(ClientMessage::parse(r#"["unknown", "x"]"#), None);
        assert_eq!(ClientMessage::parse(r#"["submit", "/path"]"#), None);
    }
}
