//! Build an element tree from workbook markup

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::node::XmlNode;
use crate::error::ExtractError;

/// A fully parsed workbook document
#[derive(Debug, Clone)]
pub struct Document {
    root: XmlNode,
}

impl Document {
    /// Parse markup into an element tree.
    ///
    /// Parsing is lenient: end tag names are not matched against start tags,
    /// stray end tags are ignored and elements still open at end of input are
    /// closed. Text, comments and processing instructions are dropped.
    pub fn parse(text: &str) -> Result<Self, ExtractError> {
        let mut reader = Reader::from_str(text);
        let config = reader.config_mut();
        config.trim_text(true);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        // Bottom of the stack is the nameless document root
        let mut stack = vec![XmlNode::default()];

        loop {
            let event = reader.read_event().map_err(|source| ExtractError::Parse {
                position: reader.error_position() as u64,
                source,
            })?;
            match event {
                Event::Start(e) => stack.push(element_from(&e)),
                Event::Empty(e) => {
                    let node = element_from(&e);
                    if let Some(parent) = stack.last_mut() {
                        parent.push_child(node);
                    }
                }
                Event::End(_) => close_top(&mut stack),
                Event::Eof => break,
                _ => {}
            }
        }

        while stack.len() > 1 {
            close_top(&mut stack);
        }

        Ok(Self {
            root: stack.pop().unwrap_or_default(),
        })
    }

    /// The synthetic root holding the top-level elements
    pub fn root(&self) -> &XmlNode {
        &self.root
    }
}

fn close_top(stack: &mut Vec<XmlNode>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(node) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.push_child(node);
        }
    }
}

fn element_from(e: &BytesStart<'_>) -> XmlNode {
    let mut node = XmlNode::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes().with_checks(false).flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        // Unknown entities keep their raw text
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        node = node.with_attr(key, value);
    }
    node
}
