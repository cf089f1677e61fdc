//! Structural validation of a postprocessed document.

use crate::error::DomError;
use crate::tree::TreeNode;

/// Check the required document shape.
///
/// Exactly one top-level heading must exist, and the only content allowed
/// before it is any number of alert paragraphs plus at most one plain
/// introductory paragraph.
pub fn validate(body: &TreeNode) -> Result<(), DomError> {
    let headings = body.count(&|n| n.tag == "h1");
    if headings != 1 {
        return Err(DomError::HeadingCount(headings));
    }

    let mut leading = body
        .children
        .iter()
        .filter(|child| !is_alert_paragraph(child));

    match leading.next() {
        Some(first) if first.tag == "h1" => Ok(()),
        Some(first) if first.tag == "p" => match leading.next() {
            Some(second) if second.tag == "h1" => Ok(()),
            _ => Err(DomError::LeadingContent),
        },
        _ => Err(DomError::LeadingContent),
    }
}

/// Title text of the document's sole heading.
pub fn document_title(body: &TreeNode) -> Option<String> {
    find_heading(body).map(|h1| h1.text_content().trim().to_owned())
}

fn find_heading(node: &TreeNode) -> Option<&TreeNode> {
    for child in &node.children {
        if child.tag == "h1" {
            return Some(child);
        }
        if let Some(found) = find_heading(child) {
            return Some(found);
        }
    }
    None
}

fn is_alert_paragraph(node: &TreeNode) -> bool {
    node.tag == "p" && node.has_class("alert")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_body;

    fn check(html: &str) -> Result<(), DomError> {
        validate(&parse_body(html).unwrap())
    }

    #[test]
    fn accepts_heading_first() {
        assert!(check("<h1>T</h1>\n<p>body</p>").is_ok());
    }

    #[test]
    fn accepts_alerts_before_heading() {
        assert!(check(r#"<p class="alert">a</p><p class="alert">b</p><h1>T</h1>"#).is_ok());
    }

    #[test]
    fn accepts_single_intro_paragraph() {
        assert!(check("<p>intro</p><h1>T</h1>").is_ok());
    }

    #[test]
    fn accepts_alert_between_intro_and_heading() {
        assert!(check(r#"<p>intro</p><p class="alert">a</p><h1>T</h1>"#).is_ok());
    }

    #[test]
    fn rejects_two_leading_paragraphs() {
        assert!(matches!(
            check("<p>one</p><p>two</p><h1>T</h1>"),
            Err(DomError::LeadingContent)
        ));
    }

    #[test]
    fn rejects_non_paragraph_before_heading() {
        assert!(matches!(
            check("<ul><li>x</li></ul><h1>T</h1>"),
            Err(DomError::LeadingContent)
        ));
    }

    #[test]
    fn rejects_missing_heading() {
        assert!(matches!(
            check("<p>only text</p>"),
            Err(DomError::HeadingCount(0))
        ));
    }

    #[test]
    fn rejects_duplicate_headings() {
        assert!(matches!(
            check("<h1>A</h1><h1>B</h1>"),
            Err(DomError::HeadingCount(2))
        ));
    }

    #[test]
    fn counts_nested_headings() {
        assert!(matches!(
            check("<h1>A</h1><div><h1>B</h1></div>"),
            Err(DomError::HeadingCount(2))
        ));
    }

    #[test]
    fn extracts_title_text() {
        let body = parse_body("<h1>My <em>Course</em></h1>").unwrap();
        assert_eq!(document_title(&body), Some("My Course".to_owned()));
    }
}
