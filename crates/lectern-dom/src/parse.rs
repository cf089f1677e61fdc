//! HTML-to-tree parser.
//!
//! The markdown engine emits XML-compatible HTML (void elements are
//! self-closed, text is entity-escaped), so the rendered string can be
//! wrapped in a synthetic `<body>` root and read with quick-xml.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::DomError;
use crate::tree::TreeNode;

/// Parse rendered HTML into a `body` tree.
pub fn parse_body(html: &str) -> Result<TreeNode, DomError> {
    let wrapped = format!("<body>{html}</body>");
    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut body = loop {
        match reader.read_event()? {
            Event::Start(e) => break element_from(&reader, &e),
            Event::Eof => return Err(DomError::EmptyDocument),
            _ => {}
        }
    };
    parse_into(&mut reader, &mut body)?;
    Ok(body)
}

/// Read events into `node` until its end tag.
fn parse_into(reader: &mut Reader<&[u8]>, node: &mut TreeNode) -> Result<(), DomError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let mut child = element_from(reader, &e);
                parse_into(reader, &mut child)?;
                node.children.push(child);
            }
            Event::Empty(e) => {
                node.children.push(element_from(reader, &e));
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                append_text(node, &text);
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?.into_owned();
                append_text(node, &decode_entity(&entity));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                append_text(node, &text);
            }
            Event::End(_) | Event::Eof => return Ok(()),
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }
}

fn element_from(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> TreeNode {
    let tag = reader
        .decoder()
        .decode(e.name().as_ref())
        .map_or_else(
            |_| String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            std::borrow::Cow::into_owned,
        );
    let mut node = TreeNode::new(tag);
    for attr in e.attributes().flatten() {
        let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
            |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            std::borrow::Cow::into_owned,
        );
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        node.attrs.push((key, value));
    }
    node
}

/// Append text to the node's text or the last child's tail.
fn append_text(node: &mut TreeNode, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Decode an entity reference to its character value.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "quot" => "\"".to_owned(),
        "apos" => "'".to_owned(),
        "nbsp" => "\u{a0}".to_owned(),
        _ => {
            if let Some(code) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                if let Some(c) = u32::from_str_radix(code, 16).ok().and_then(char::from_u32) {
                    return c.to_string();
                }
            } else if let Some(code) = entity.strip_prefix('#') {
                if let Some(c) = code.parse::<u32>().ok().and_then(char::from_u32) {
                    return c.to_string();
                }
            }
            // Unknown reference: keep the source form.
            format!("&{entity};")
        }
    }
}
