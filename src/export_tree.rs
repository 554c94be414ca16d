use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// One XML element of the export, reduced to what the extractor needs.
/// Attributes are not kept, the WordPress export carries all its data in child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Local name, without namespace prefix (`wp:post_id` is stored as `post_id`)
    pub name: String,
    /// Text and CDATA found directly inside this element, unescaped
    pub text: String,
    pub children: Vec<Element>,
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        source: quick_xml::Error,
    },
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("closing tag </{0}> without a matching opening tag")]
    Unbalanced(String),
    #[error("more than one root element, found <{0}> after the document root")]
    MultipleRoots(String),
    #[error("document has no root element")]
    Empty,
}

impl Element {
    pub fn new(name: &str) -> Element {
        Element {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }
}

fn local_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<(), TreeError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }

    if root.is_some() {
        return Err(TreeError::MultipleRoots(element.name));
    }
    *root = Some(element);
    Ok(())
}

/// Parses the export text into a tree of elements.
pub fn parse_tree(xml: &str) -> Result<Element, TreeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = vec![];
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|source| TreeError::Xml {
            position: reader.error_position() as u64,
            source,
        })?;

        match event {
            Event::Start(e) => stack.push(Element::new(&local_name(&e))),
            Event::Empty(e) => attach(&mut stack, &mut root, Element::new(&local_name(&e)))?,
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                let element = stack.pop().ok_or(TreeError::Unbalanced(name))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let text: Cow<str> = t.unescape().map_err(|e| TreeError::Xml {
                        position: reader.buffer_position() as u64,
                        source: quick_xml::Error::from(e),
                    })?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctype carry no data
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(TreeError::Unclosed(open.name));
    }

    root.ok_or(TreeError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_namespace_prefix() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss xmlns:wp="http://wordpress.org/export/1.2/"><channel><item><wp:post_id>12</wp:post_id></item></channel></rss>"#;
        let root = parse_tree(xml).unwrap();
        assert_eq!(root.name, "rss");
        let item = root.child("channel").unwrap().child("item").unwrap();
        assert_eq!(item.child_text("post_id"), Some("12"));
    }

    #[test]
    fn test_cdata_and_entities() {
        let xml = "<item><title>Tom &amp; Jerry</title><encoded><![CDATA[<p>a & b</p>]]></encoded></item>";
        let root = parse_tree(xml).unwrap();
        assert_eq!(root.child_text("title"), Some("Tom & Jerry"));
        assert_eq!(root.child_text("encoded"), Some("<p>a & b</p>"));
    }

    #[test]
    fn test_empty_element() {
        let root = parse_tree("<item><post_name/><x>1</x><x>2</x></item>").unwrap();
        assert_eq!(root.child_text("post_name"), Some(""));
        let xs: Vec<&str> = root.children("x").map(|x| x.text.as_str()).collect();
        assert_eq!(xs, ["1", "2"]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_tree(""), Err(TreeError::Empty)));
        assert!(parse_tree("<a><b></b>").is_err());
        assert!(matches!(parse_tree("<a></a><b></b>"), Err(TreeError::MultipleRoots(name)) if name == "b"));
        assert!(parse_tree("<a></b>").is_err());
    }
}
