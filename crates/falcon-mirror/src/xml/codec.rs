use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::element::{XmlElement, XmlNode};
use crate::error::XmlError;

/// Declaration emitted ahead of every serialized entity document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Parses a document into its root element.
pub fn parse(xml: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader.read_event().map_err(|e| XmlError::Parse {
            position: reader.buffer_position() as u64,
            message: e.to_string(),
        })?;

        match event {
            Event::Start(ref e) => {
                stack.push(start_element(e)?);
            }
            Event::Empty(ref e) => {
                let element = start_element(e)?;
                close_element(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| XmlError::Parse {
                    position: reader.buffer_position() as u64,
                    message: "unbalanced closing tag".to_string(),
                })?;
                close_element(element, &mut stack, &mut root);
            }
            Event::Text(e) => {
                let text = e.decode().map_err(|err| XmlError::Parse {
                    position: reader.buffer_position() as u64,
                    message: err.to_string(),
                })?;
                push_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(&e.into_inner())?.to_string();
                push_text(&mut stack, &text);
            }
            Event::GeneralRef(e) => {
                let name = std::str::from_utf8(&e)?;
                let resolved = resolve_reference(name).ok_or_else(|| XmlError::Parse {
                    position: reader.buffer_position() as u64,
                    message: format!("unknown entity reference '&{};'", name),
                })?;
                push_text(&mut stack, &resolved);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::Parse {
            position: reader.buffer_position() as u64,
            message: format!("unclosed element '{}'", stack[stack.len() - 1].name),
        });
    }

    root.ok_or(XmlError::NoRoot)
}

fn start_element(e: &BytesStart<'_>) -> Result<XmlElement, XmlError> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut element = XmlElement::new(name);

    for attr in e.attributes() {
        let attr = attr.map_err(|err| XmlError::Parse {
            position: 0,
            message: err.to_string(),
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value().map_err(|err| XmlError::Parse {
            position: 0,
            message: err.to_string(),
        })?;
        element.attributes.push((key, value.into_owned()));
    }

    Ok(element)
}

fn close_element(
    mut element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) {
    // Indentation between child elements is not content.
    if element.elements().next().is_some() {
        element
            .children
            .retain(|node| !matches!(node, XmlNode::Text(t) if t.trim().is_empty()));
    }

    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn push_text(stack: &mut [XmlElement], text: &str) {
    let Some(current) = stack.last_mut() else {
        return;
    };
    if let Some(XmlNode::Text(previous)) = current.children.last_mut() {
        previous.push_str(text);
    } else if !text.is_empty() {
        current.children.push(XmlNode::Text(text.to_string()));
    }
}

fn resolve_reference(name: &str) -> Option<String> {
    match name {
        "amp" => Some("&".to_string()),
        "lt" => Some("<".to_string()),
        "gt" => Some(">".to_string()),
        "quot" => Some("\"".to_string()),
        "apos" => Some("'".to_string()),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value).map(String::from)
        }
    }
}

/// Serializes the tree, prefixed with the standalone XML declaration.
pub fn to_xml_string(root: &XmlElement) -> Result<String, XmlError> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(|e| XmlError::Write(e.to_string()))?;
    write_element(&mut writer, root)?;

    String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Write(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| XmlError::Write(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| XmlError::Write(e.to_string()))?;

    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            XmlNode::Text(t) => writer
                .write_event(Event::Text(BytesText::from_escaped(partial_escape(t))))
                .map_err(|e| XmlError::Write(e.to_string()))?,
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| XmlError::Write(e.to_string()))
}
