//! Owned element tree for save documents.
//!
//! The tree keeps every element, text run and CDATA section in document
//! order so lookups behave like a DOM: "first element with tag X" means the
//! first one met in a pre-order walk.

use std::fmt::Display;
use std::slice;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::core_api::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
}

impl Node {
    /// Character data of a text or CDATA node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::CData(text) => Some(text),
            Self::Element(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    /// Direct children named `tag`.
    pub fn child_elements<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter_map(move |child| match child {
            Node::Element(element) if element.name == tag => Some(element),
            _ => None,
        })
    }

    /// Descendants named `tag` in document order, not including `self`.
    pub fn descendants<'a, 't>(&'a self, tag: &'t str) -> Descendants<'a, 't> {
        Descendants {
            tag,
            stack: vec![self.children.iter()],
        }
    }

    pub fn first_descendant(&self, tag: &str) -> Option<&Element> {
        self.descendants(tag).next()
    }
}

pub struct Descendants<'a, 't> {
    tag: &'t str,
    stack: Vec<slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Descendants<'a, '_> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(Node::Element(element)) => {
                    self.stack.push(element.children.iter());
                    if element.name == self.tag {
                        return Some(element);
                    }
                }
                Some(_) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveDocument {
    root: Element,
}

impl SaveDocument {
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = Reader::from_str(text);
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let position = reader.buffer_position();
            match reader.read_event() {
                Ok(Event::Start(start)) => open.push(element_from_start(&reader, &start)?),
                Ok(Event::Empty(start)) => {
                    let element = element_from_start(&reader, &start)?;
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::End(end)) => {
                    let Some(element) = open.pop() else {
                        return Err(CoreError::parse(format!(
                            "unexpected closing tag </{}> at byte {position}",
                            String::from_utf8_lossy(end.name().as_ref())
                        )));
                    };
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::Text(text)) => {
                    let text = text
                        .unescape()
                        .map_err(|err| xml_error(position, err))?
                        .into_owned();
                    push_character_data(&mut open, Node::Text(text), position)?;
                }
                Ok(Event::CData(data)) => {
                    let data = reader
                        .decoder()
                        .decode(&data)
                        .map_err(|err| xml_error(position, err))?
                        .into_owned();
                    push_character_data(&mut open, Node::CData(data), position)?;
                }
                Ok(Event::Eof) => break,
                // declarations, comments, processing instructions, doctype
                Ok(_) => {}
                Err(err) => return Err(xml_error(reader.buffer_position(), err)),
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(CoreError::parse(format!(
                "unexpected end of document: <{}> is never closed",
                unclosed.name
            )));
        }

        root.map(|root| Self { root })
            .ok_or_else(|| CoreError::parse("document has no root element"))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// First element named `tag` anywhere in the document, root included.
    pub fn first_element(&self, tag: &str) -> Option<&Element> {
        if self.root.name == tag {
            return Some(&self.root);
        }
        self.root.first_descendant(tag)
    }
}

fn element_from_start(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Element, CoreError> {
    let position = reader.buffer_position();
    let name = reader
        .decoder()
        .decode(start.name().as_ref())
        .map_err(|err| xml_error(position, err))?
        .into_owned();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| xml_error(position, err))?;
        let key = reader
            .decoder()
            .decode(attribute.key.as_ref())
            .map_err(|err| xml_error(position, err))?
            .into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| xml_error(position, err))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), CoreError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(Node::Element(element));
        return Ok(());
    }
    if let Some(existing) = root {
        return Err(CoreError::parse(format!(
            "second root element <{}> after <{}>",
            element.name, existing.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn push_character_data(
    open: &mut [Element],
    node: Node,
    position: impl Display,
) -> Result<(), CoreError> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    match node.as_text() {
        Some(text) if text.trim().is_empty() => Ok(()),
        _ => Err(CoreError::parse(format!(
            "character data outside the root element at byte {position}"
        ))),
    }
}

fn xml_error(position: impl Display, err: impl Display) -> CoreError {
    CoreError::parse(format!("malformed XML at byte {position}: {err}"))
}
