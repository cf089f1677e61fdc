//! Tree-to-HTML serializer.

use std::fmt::Write;

use crate::tree::TreeNode;

/// HTML elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize the children of `body` to an HTML string.
///
/// The wrapper element itself is not emitted; the result is the document
/// contents handed to the page template.
pub fn serialize_children(body: &TreeNode) -> String {
    let mut out = String::with_capacity(4096);
    if !body.text.is_empty() {
        out.push_str(&escape_text(&body.text));
    }
    for child in &body.children {
        write_node(child, &mut out);
    }
    out
}

fn write_node(node: &TreeNode, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);
    for (key, value) in &node.attrs {
        write!(out, r#" {}="{}""#, key, escape_attr(value)).unwrap();
    }

    if VOID_ELEMENTS.contains(&node.tag.as_str()) {
        out.push('>');
    } else {
        out.push('>');
        if !node.text.is_empty() {
            out.push_str(&escape_text(&node.text));
        }
        for child in &node.children {
            write_node(child, out);
        }
        write!(out, "</{}>", node.tag).unwrap();
    }

    if !node.tail.is_empty() {
        out.push_str(&escape_text(&node.tail));
    }
}

fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(ch),
        }
    }
    result
}

fn escape_attr(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_nested_elements() {
        let strong = TreeNode::new("strong").with_text("bold").with_tail("!");
        let p = TreeNode::new("p").with_text("say ").with_children(vec![strong]);
        let body = TreeNode::new("body").with_children(vec![p]);
        assert_eq!(serialize_children(&body), "<p>say <strong>bold</strong>!</p>");
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let img = TreeNode::new("img").with_attr("src", "a.png");
        let body = TreeNode::new("body").with_children(vec![img]);
        assert_eq!(serialize_children(&body), r#"<img src="a.png">"#);
    }

    #[test]
    fn text_is_escaped() {
        let p = TreeNode::new("p").with_text("a < b & c");
        let body = TreeNode::new("body").with_children(vec![p]);
        assert_eq!(serialize_children(&body), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn attributes_are_escaped_and_ordered() {
        let a = TreeNode::new("a")
            .with_attr("href", "x?a=1&b=2")
            .with_attr("target", "_blank");
        let body = TreeNode::new("body").with_children(vec![a]);
        assert_eq!(
            serialize_children(&body),
            r#"<a href="x?a=1&amp;b=2" target="_blank"></a>"#
        );
    }

    #[test]
    fn parse_then_serialize_is_stable() {
        let html = r#"<h1>T</h1>
<p class="alert">note</p>
<p>body <em>text</em></p>"#;
        let body = crate::parse::parse_body(html).unwrap();
        assert_eq!(serialize_children(&body), html);
    }
}
