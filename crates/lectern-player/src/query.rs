//! Query-string handling for compiled pages.

/// Initial slide index from the page's query string.
///
/// The `slide` parameter is 1-based; it only takes effect when it parses
/// as an integer within range.
pub fn initial_slide(query: &str, slide_count: usize) -> Option<usize> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let value = query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == "slide").then_some(value)
    })?;
    let number: usize = value.parse().ok()?;
    (number >= 1 && number <= slide_count).then(|| number - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_in_range_value() {
        assert_eq!(initial_slide("?slide=3", 5), Some(2));
        assert_eq!(initial_slide("slide=1", 5), Some(0));
    }

    #[test]
    fn ignores_out_of_range_values() {
        assert_eq!(initial_slide("?slide=0", 5), None);
        assert_eq!(initial_slide("?slide=6", 5), None);
    }

    #[test]
    fn ignores_non_numeric_values() {
        assert_eq!(initial_slide("?slide=abc", 5), None);
        assert_eq!(initial_slide("?slide=", 5), None);
    }

    #[test]
    fn finds_parameter_among_others() {
        assert_eq!(initial_slide("?a=1&slide=2&b=3", 5), Some(1));
    }

    #[test]
    fn missing_parameter_yields_none() {
        assert_eq!(initial_slide("?a=1", 5), None);
        assert_eq!(initial_slide("", 5), None);
    }
}
