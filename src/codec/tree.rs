//! Mutable element tree over quick-xml
//!
//! Jenkins job configuration is an ordered, attributed XML document that the
//! codec mutates in place on update, so the event stream is materialized into
//! a small owned tree. Lookups for absent children return `Option`/empty
//! values rather than errors; malformed XML syntax is the only failure mode.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::pipeline::errors::CodecError;

/// A single XML element: tag, ordered attributes, text content, ordered
/// children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Element tag.
    pub tag: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Concatenated text content.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes, text or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Sets the text content, builder style.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets an attribute, builder style.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the value of an attribute, inserting it if absent.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.attributes.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.attributes.push((key, value));
        }
    }

    /// Returns the first child with the given tag.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Returns the first child with the given tag, mutably.
    pub fn child_mut(&mut self, tag: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.tag == tag)
    }

    /// Iterates over all children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Returns the first child with the given tag, creating and appending it
    /// if absent. Existing siblings keep their order.
    pub fn get_or_create_child(&mut self, tag: &str) -> &mut Element {
        let index = match self.children.iter().position(|c| c.tag == tag) {
            Some(index) => index,
            None => {
                self.children.push(Element::new(tag));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Appends a child and returns a reference to it.
    pub fn add_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let index = self.children.len() - 1;
        &mut self.children[index]
    }

    /// Appends a child holding only text.
    pub fn add_text_child(&mut self, tag: impl Into<String>, text: impl Into<String>) {
        self.children.push(Element::new(tag).with_text(text));
    }

    /// Sets the text of the first child with the given tag, creating the
    /// child if absent.
    pub fn set_child_text(&mut self, tag: &str, text: impl Into<String>) {
        self.get_or_create_child(tag).text = text.into();
    }

    /// Removes every child with the given tag. No-op if none exist.
    pub fn remove_children(&mut self, tag: &str) {
        self.children.retain(|c| c.tag != tag);
    }

    /// Text of the first child with the given tag, or the empty string.
    #[must_use]
    pub fn child_text(&self, tag: &str) -> &str {
        self.child(tag).map_or("", |c| c.text.as_str())
    }
}

/// An owned XML document with a fixed `UTF-8` prolog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Root element.
    pub root: Element,
}

impl Document {
    /// Wraps a root element.
    #[must_use]
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Parses a document from XML text.
    ///
    /// Whitespace-only text nodes (indentation of pretty-printed documents)
    /// are dropped while building the tree.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Xml`] when the input is not well-formed.
    pub fn parse(input: &str) -> Result<Self, CodecError> {
        let mut reader = Reader::from_str(input);
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref start)) => {
                    stack.push(element_from_start(start)?);
                }
                Ok(Event::Empty(ref start)) => {
                    let element = element_from_start(start)?;
                    place(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| CodecError::Xml("unexpected closing tag".to_string()))?;
                    place(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref text)) => {
                    let value = text.unescape()?;
                    if !value.trim().is_empty()
                        && let Some(parent) = stack.last_mut()
                    {
                        parent.text.push_str(&value);
                    }
                }
                Ok(Event::CData(ref cdata)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.text.push_str(&String::from_utf8_lossy(cdata));
                    }
                }
                Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(err) => return Err(CodecError::from(err)),
            }
            buf.clear();
        }

        match root {
            Some(root) if stack.is_empty() => Ok(Self { root }),
            _ => Err(CodecError::Xml("document has no root element".to_string())),
        }
    }

    /// Serializes the document with a `version='1.0'` prolog and two-space
    /// indentation.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Xml`] when serialization fails.
    pub fn to_xml(&self) -> Result<String, CodecError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        write_element(&mut writer, &self.root)?;
        let body = String::from_utf8_lossy(&writer.into_inner()).into_owned();
        Ok(format!("<?xml version='1.0' encoding='UTF-8'?>\n{body}"))
    }
}

fn place(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), CodecError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(CodecError::Xml("multiple root elements".to_string()));
    }
    Ok(())
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, CodecError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(tag);
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &Element,
) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(element.tag.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if element.text.is_empty() && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.tag.as_str())))?;
    Ok(())
}

/// Rewrites the declared XML version on the first line of a document.
///
/// Jenkins serves job configuration with a `1.1` prolog but the rest of the
/// toolchain speaks `1.0`; the swap must be textual so the remainder of the
/// document passes through bit-for-bit.
#[must_use]
pub fn replace_xml_version(xml: &str, from: &str, to: &str) -> String {
    match xml.split_once('\n') {
        Some((first, rest)) => format!("{}\n{rest}", swap_version(first, from, to)),
        None => swap_version(xml, from, to),
    }
}

fn swap_version(line: &str, from: &str, to: &str) -> String {
    let single_quoted = format!("version='{from}'");
    if line.contains(&single_quoted) {
        return line.replacen(&single_quoted, &format!("version='{to}'"), 1);
    }
    line.replacen(
        &format!("version=\"{from}\""),
        &format!("version=\"{to}\""),
        1,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_and_serialize_round_trip() {
        let xml = "<?xml version='1.0' encoding='UTF-8'?>\n<root a=\"1\">\n  <child>text</child>\n  <empty/>\n</root>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.root.tag, "root");
        assert_eq!(doc.root.attribute("a"), Some("1"));
        assert_eq!(doc.root.child_text("child"), "text");
        let reparsed = Document::parse(&doc.to_xml().unwrap()).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_parse_malformed_is_error() {
        assert!(matches!(
            Document::parse("<root><child></root>"),
            Err(CodecError::Xml(_))
        ));
    }

    #[test]
    fn test_parse_truncated_is_error() {
        assert!(matches!(
            Document::parse("<root><child>"),
            Err(CodecError::Xml(_))
        ));
    }

    #[test]
    fn test_get_or_create_child_preserves_order() {
        let mut root = Element::new("root");
        root.add_text_child("first", "1");
        root.add_text_child("second", "2");
        root.get_or_create_child("first").text = "updated".to_string();
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].text, "updated");

        root.get_or_create_child("third");
        assert_eq!(root.children[2].tag, "third");
    }

    #[test]
    fn test_remove_children_no_op_when_absent() {
        let mut root = Element::new("root");
        root.add_text_child("keep", "x");
        root.remove_children("missing");
        root.remove_children("keep");
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_child_text_absent_is_empty() {
        let root = Element::new("root");
        assert_eq!(root.child_text("missing"), "");
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut el = Element::new("el").with_attribute("class", "old");
        el.set_attribute("class", "new");
        assert_eq!(el.attributes.len(), 1);
        assert_eq!(el.attribute("class"), Some("new"));
    }

    #[test]
    fn test_text_escaping_round_trip() {
        let mut root = Element::new("root");
        root.add_text_child("script", "if (a < b && c > d) { echo \"x\" }");
        let doc = Document::new(root);
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("&lt;"));
        let reparsed = Document::parse(&xml).unwrap();
        assert_eq!(
            reparsed.root.child_text("script"),
            "if (a < b && c > d) { echo \"x\" }"
        );
    }

    #[test]
    fn test_replace_xml_version_first_line_only() {
        let xml = "<?xml version='1.0' encoding='UTF-8'?>\n<root><v>version='1.0'</v></root>";
        let rewritten = replace_xml_version(xml, "1.0", "1.1");
        assert!(rewritten.starts_with("<?xml version='1.1' encoding='UTF-8'?>"));
        assert!(rewritten.contains("<v>version='1.0'</v>"));
        assert_eq!(replace_xml_version(&rewritten, "1.1", "1.0"), xml);
    }
}
