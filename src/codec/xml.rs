//! XML to JSON value normalization.
//!
//! The mapping is shape based, not schema based:
//!
//! | XML shape                              | JSON value                      |
//! |----------------------------------------|---------------------------------|
//! | `<a>text</a>`                          | `"text"`                        |
//! | `<a unit="MAW">text</a>`               | `"text"` (attributes collapsed) |
//! | `<a/>`                                 | `null`                          |
//! | `<a k="v"/>`                           | `{"@k": "v"}`                   |
//! | `<a k="v"><b>1</b></a>`                | `{"@k": "v", "b": "1"}`         |
//! | `<a><b>1</b><b>2</b></a>`              | `{"b": ["1", "2"]}`             |
//!
//! A single child stays a scalar or object. Turning it into a list where a
//! list is expected is the schema's job, see [`super::coerce::one_or_many`].
//! Element and attribute names are namespace-local; `xmlns` declarations are
//! dropped. All scalar values stay strings.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors produced while normalizing a document.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("document has no root element")]
    Empty,

    #[error("element <{0}> is not closed")]
    Unclosed(String),
}

/// A normalized document: the root element's local name and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: String,
    pub value: Value,
}

struct Frame {
    name: String,
    attributes: Vec<(String, String)>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = attribute.key;
            if key.as_ref() == b"xmlns" || key.as_ref().starts_with(b"xmlns:") {
                continue;
            }
            let key = String::from_utf8_lossy(key.local_name().as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let text = self.text.trim();

        if self.children.is_empty() {
            if !text.is_empty() {
                return (self.name, Value::String(text.to_owned()));
            }
            if self.attributes.is_empty() {
                return (self.name, Value::Null);
            }
        }

        let mut object = Map::new();
        for (key, value) in self.attributes {
            object.insert(format!("@{key}"), Value::String(value));
        }
        for (key, value) in self.children {
            object.insert(key, value);
        }
        if !text.is_empty() {
            object.insert("#text".to_owned(), Value::String(text.to_owned()));
        }
        (self.name, Value::Object(object))
    }
}

/// Repeated siblings accumulate into an array, in document order.
fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        None => {
            children.insert(name, value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// Parse `input` into a normalized JSON tree.
pub fn to_value(input: &str) -> Result<XmlDocument, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let closed = match reader.read_event()? {
            Event::Start(start) => {
                stack.push(Frame::open(&start)?);
                None
            }
            Event::Empty(start) => Some(Frame::open(&start)?.close()),
            Event::End(_) => stack.pop().map(Frame::close),
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape()?);
                }
                None
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
                None
            }
            Event::Eof => break,
            _ => None,
        };

        if let Some((name, value)) = closed {
            match stack.last_mut() {
                Some(parent) => insert_child(&mut parent.children, name, value),
                None if root.is_none() => root = Some((name, value)),
                None => {}
            }
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(XmlError::Unclosed(frame.name));
    }

    let (root, value) = root.ok_or(XmlError::Empty)?;
    Ok(XmlDocument { root, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_and_attributes_collapse() {
        let doc = to_value(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <Doc xmlns="urn:example">
                <mRID>abc</mRID>
                <zone codingScheme="A01">10Y1001A1001A82H</zone>
                <empty/>
                <flagged kind="x"/>
            </Doc>"#,
        )
        .unwrap();

        assert_eq!(doc.root, "Doc");
        assert_eq!(
            doc.value,
            json!({
                "mRID": "abc",
                "zone": "10Y1001A1001A82H",
                "empty": null,
                "flagged": {"@kind": "x"}
            })
        );
    }

    #[test]
    fn test_repeated_siblings_become_array_in_order() {
        let doc = to_value(
            "<Period><Point><position>1</position></Point>\
             <Point><position>2</position></Point>\
             <Point><position>3</position></Point></Period>",
        )
        .unwrap();

        assert_eq!(
            doc.value,
            json!({"Point": [
                {"position": "1"},
                {"position": "2"},
                {"position": "3"}
            ]})
        );
    }

    #[test]
    fn test_single_child_stays_object() {
        let doc = to_value("<Period><Point><position>1</position></Point></Period>").unwrap();
        assert_eq!(doc.value, json!({"Point": {"position": "1"}}));
    }

    #[test]
    fn test_prefixed_names_and_entities() {
        let doc = to_value(
            r#"<ns:Reason xmlns:ns="urn:x"><ns:text>a &amp; b</ns:text><ns:code><![CDATA[999]]></ns:code></ns:Reason>"#,
        )
        .unwrap();
        assert_eq!(doc.root, "Reason");
        assert_eq!(doc.value, json!({"text": "a & b", "code": "999"}));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(to_value(""), Err(XmlError::Empty)));
        assert!(to_value("<a><b>1</b>").is_err());
        assert!(to_value("<a></b>").is_err());
    }
}
