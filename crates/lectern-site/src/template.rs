//! Page template.
//!
//! A pure function from `{title, prefix, contents}` to a full page string.
//! The shell matches what the presentation runtime expects: a container
//! with a header (expand/collapse controls) and a main content area.

use std::fmt::Write;

/// Render a complete HTML page.
pub fn render(title: &str, prefix: &str, contents: &str) -> String {
    let mut html = String::with_capacity(contents.len() + 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = write!(html, "<title>{}</title>\n", escape(title));
    let _ = write!(
        html,
        "<link rel=\"stylesheet\" href=\"{prefix}css/style.css\">\n"
    );
    let _ = write!(html, "<script src=\"{prefix}js/player.js\" defer></script>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<div class=\"container\">\n");
    html.push_str("<header>\n");
    html.push_str("<a href=\"\" class=\"expand-all\">Expandir</a>\n");
    html.push_str("<a href=\"\" class=\"collapse-all\">Recolher</a>\n");
    html.push_str("</header>\n");
    html.push_str("<main>\n");
    html.push_str(contents);
    html.push_str("\n</main>\n</div>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_contains_contents_and_title() {
        let html = render("My Lesson", "../", "<h1>My Lesson</h1>");
        assert!(html.contains("<title>My Lesson</title>"));
        assert!(html.contains("<h1>My Lesson</h1>"));
        assert!(html.contains("href=\"../css/style.css\""));
        assert!(html.contains("src=\"../js/player.js\""));
    }

    #[test]
    fn error_page_assets_are_absolute() {
        let html = render("Not Found", "/", "<h1>Not Found</h1>");
        assert!(html.contains("href=\"/css/style.css\""));
    }

    #[test]
    fn title_is_escaped() {
        let html = render("a < b", "", "");
        assert!(html.contains("<title>a &lt; b</title>"));
    }

    #[test]
    fn shell_has_container_and_header_controls() {
        let html = render("T", "", "<p>x</p>");
        assert!(html.contains("<div class=\"container\">"));
        assert!(html.contains("<main>"));
        assert_eq!(html.matches("<a href=\"\"").count(), 2);
    }
}
