//! Owned HTML tree node.

/// Node in the rendered document tree.
///
/// Text placement follows the XML convention: `text` is the content before
/// the first child element, `tail` is the content following this element
/// inside its parent. Attributes keep their source order so serialization
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNode {
    /// Element tag name.
    pub tag: String,
    /// Direct text content.
    pub text: String,
    /// Text after this element (XML tail).
    pub tail: String,
    /// Element attributes, in order.
    pub attrs: Vec<(String, String)>,
    /// Child elements.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set tail content.
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
    }

    /// Whether the space-separated `class` attribute contains `class_name`.
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// Concatenated text of this node and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
            out.push_str(&child.tail);
        }
    }

    /// Depth-first search for the first descendant matching `pred`.
    pub fn find_mut(&mut self, pred: &dyn Fn(&TreeNode) -> bool) -> Option<&mut TreeNode> {
        for child in &mut self.children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_mut(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Count descendants (not including self) matching `pred`.
    #[must_use]
    pub fn count(&self, pred: &dyn Fn(&TreeNode) -> bool) -> usize {
        self.children
            .iter()
            .map(|child| usize::from(pred(child)) + child.count(pred))
            .sum()
    }
}
