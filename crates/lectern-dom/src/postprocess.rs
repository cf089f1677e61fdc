//! Tree postprocessing.
//!
//! Walks the rendered body and rewrites elements into final semantic
//! markup: paragraph sigils, table figures, list items, code language
//! inference, link targets, and image paths. The walk is two-phase: nodes
//! consumed by a transform are only marked during traversal and pruned
//! afterwards, so the structure is never removed from under the walker.

use std::io;

use crate::error::DomError;
use crate::sigil::{Sigil, SigilMatch};
use crate::tree::TreeNode;

/// Callback listing an asset folder (path relative to the document's
/// directory). Returns the raw file names; the caller sorts them.
pub type ListDirFn<'a> = &'a dyn Fn(&str) -> io::Result<Vec<String>>;

/// Per-document postprocessing context.
pub struct PostprocessContext<'a> {
    /// Site-root prefix for this document (`""`, `"../"`, ... or `"/"` for
    /// error pages).
    pub prefix: &'a str,
    /// Asset folder listing, used by the animation sigil.
    pub list_dir: ListDirFn<'a>,
}

/// Rewrite the rendered body in place.
pub fn postprocess(body: &mut TreeNode, ctx: &PostprocessContext<'_>) -> Result<(), DomError> {
    let mut walker = Walker {
        ctx,
        lecture_exists: false,
        pending_sources: Vec::new(),
    };
    walker.process_children(body)?;
    prune(body);
    walker.attach_lecture_sources(body);
    Ok(())
}

struct Walker<'a> {
    ctx: &'a PostprocessContext<'a>,
    /// Whether the page's single lecture video element has been created.
    lecture_exists: bool,
    /// Sources from duplicate lecture paragraphs, attached after the walk.
    pending_sources: Vec<String>,
}

impl Walker<'_> {
    fn process_children(&mut self, node: &mut TreeNode) -> Result<(), DomError> {
        for child in &mut node.children {
            match child.tag.as_str() {
                "p" => self.process_paragraph(child)?,
                "table" => self.process_table(child)?,
                "ul" | "ol" => {
                    for item in &mut child.children {
                        self.process_paragraph(item)?;
                    }
                }
                "blockquote" | "details" | "div" | "em" | "strong" | "span" => {
                    self.process_children(child)?;
                }
                "pre" => process_pre(child),
                "code" => infer_code_language(child),
                "a" => {
                    if child.attr("href").is_some_and(|href| href.starts_with("http")) {
                        child.set_attr("target", "_blank");
                    }
                }
                "img" => self.process_image(child),
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply the sigil rules to a paragraph-like node (`p`, list item, or
    /// table cell). Exactly one rule fires, first match wins.
    fn process_paragraph(&mut self, node: &mut TreeNode) -> Result<(), DomError> {
        match Sigil::detect(&node.text) {
            SigilMatch::Fires(Sigil::Small) => {
                let rest = node.text[1..].to_owned();
                let children = std::mem::take(&mut node.children);
                let mut small = TreeNode::new("small").with_text(rest).with_children(children);
                self.process_children(&mut small)?;
                node.text = String::new();
                node.children = vec![small];
            }
            SigilMatch::Fires(Sigil::Alert) => {
                node.set_attr("class", "alert");
                node.text = node.text[1..].to_owned();
                self.process_children(node)?;
            }
            SigilMatch::Fires(Sigil::Lecture) => {
                let src = node.text.trim()[1..].to_owned();
                if self.lecture_exists {
                    self.pending_sources.push(src);
                    mark_removed(node);
                } else {
                    self.lecture_exists = true;
                    let tail = std::mem::take(&mut node.tail);
                    *node = TreeNode::new("video")
                        .with_attr("class", "reader-lecture")
                        .with_children(vec![lecture_source(&src)])
                        .with_tail(tail);
                }
            }
            SigilMatch::Fires(Sigil::Animation) => {
                let name = node.text.trim()[1..].to_owned();
                if name.is_empty() {
                    return Ok(());
                }
                let folder = format!("img/{name}");
                let mut files =
                    (self.ctx.list_dir)(&folder).map_err(|source| DomError::AssetListing {
                        folder: folder.clone(),
                        source,
                    })?;
                files.sort();
                if files.is_empty() {
                    return Ok(());
                }
                let mut frames = Vec::with_capacity(files.len());
                for (i, file) in files.iter().enumerate() {
                    let mut img = TreeNode::new("img")
                        .with_attr("class", "frame")
                        .with_attr("src", format!("{name}/{}", file.replace('|', "||")))
                        .with_attr("alt", (i + 1).to_string());
                    self.process_image(&mut img);
                    frames.push(img);
                }
                let tail = std::mem::take(&mut node.tail);
                *node = TreeNode::new("div")
                    .with_attr("class", "animation")
                    .with_children(frames)
                    .with_tail(tail);
            }
            SigilMatch::Fires(Sigil::Anchor) => {
                let id = node.text[1..].to_owned();
                let tail = std::mem::take(&mut node.tail);
                *node = TreeNode::new("a")
                    .with_attr("class", "anchor")
                    .with_attr("id", id)
                    .with_tail(tail);
            }
            SigilMatch::Fires(Sigil::Video) => {
                let words = node.text.trim()[1..].to_owned();
                let mut parts = words.split('%');
                let raw = parts.next().unwrap_or("");
                let src = if raw.starts_with("http") {
                    raw.to_owned()
                } else {
                    format!("vid/{raw}")
                };
                let mut video = TreeNode::new("video").with_attr("src", src);
                if let Some(poster) = parts.next() {
                    video = video.with_attr("poster", format!("vid/{poster}"));
                }
                video.set_attr("controls", "");
                let tail = std::mem::take(&mut node.tail);
                *node = TreeNode::new("figure")
                    .with_attr("class", "video")
                    .with_children(vec![video])
                    .with_tail(tail);
            }
            SigilMatch::Fires(Sigil::Embed) => {
                let words = node.text.trim()[1..].to_owned();
                let mut parts = words.split('&');
                let user = parts.next().unwrap_or("").to_owned();
                let slug = parts.next().unwrap_or("").to_owned();
                let tab = parts.next().unwrap_or("").to_owned();
                node.text.clear();
                node.children.clear();
                node.attrs.clear();
                node.set_attr("class", "codepen");
                node.set_attr("data-theme-id", "dark");
                node.set_attr("data-user", user);
                node.set_attr("data-slug-hash", slug);
                node.set_attr("data-default-tab", tab);
            }
            SigilMatch::Escaped(_) => {
                node.text.remove(0);
                self.process_plain(node)?;
            }
            SigilMatch::Plain => self.process_plain(node)?,
        }
        Ok(())
    }

    /// Default paragraph handling: lone images become figures, everything
    /// else recurses into per-tag rules.
    fn process_plain(&mut self, node: &mut TreeNode) -> Result<(), DomError> {
        let lone_image = node.text.trim().is_empty()
            && node.children.len() == 1
            && node.children[0].tag == "img"
            && node.children[0].tail.trim().is_empty();
        if lone_image {
            let mut img = node.children.pop().unwrap_or_default();
            img.tail = String::new();
            self.process_image(&mut img);
            let tail = std::mem::take(&mut node.tail);
            *node = TreeNode::new("figure")
                .with_attr("class", "img")
                .with_children(vec![img])
                .with_tail(tail);
        } else {
            self.process_children(node)?;
        }
        Ok(())
    }

    /// Table figure wrapping, boolean-marker header cell, and per-cell
    /// paragraph processing.
    fn process_table(&mut self, node: &mut TreeNode) -> Result<(), DomError> {
        let mut table = std::mem::take(node);
        let tail = std::mem::take(&mut table.tail);

        if let Some(th) = table
            .children
            .first_mut()
            .and_then(|section| section.children.first_mut())
            .and_then(|row| row.children.first_mut())
        {
            if th.children.is_empty() && th.text == "x" {
                th.text.clear();
                table.set_attr("class", "cross");
            } else if th.children.is_empty() && th.text == "^x" {
                th.text = "x".to_owned();
            }
        }

        for section in &mut table.children {
            for row in &mut section.children {
                for cell in &mut row.children {
                    self.process_paragraph(cell)?;
                }
            }
        }

        *node = TreeNode::new("figure")
            .with_attr("class", "table")
            .with_children(vec![table])
            .with_tail(tail);
        Ok(())
    }

    /// Parse the size directive, then root relative paths under `img/`.
    fn process_image(&self, img: &mut TreeNode) {
        let Some(src) = img.attr("src") else { return };
        let (mut path, height) = parse_size_directive(src);
        if let Some(height) = height {
            img.set_attr("style", format!("max-height: {height}em;"));
        }
        if !(path.starts_with("..") || path.starts_with("http") || path.starts_with('/')) {
            path = format!("img/{path}");
            if self.ctx.prefix == "/" {
                path = format!("/{path}");
            }
        }
        img.set_attr("src", path);
    }

    /// Attach sources collected from duplicate lecture paragraphs to the
    /// page's single video element.
    fn attach_lecture_sources(self, body: &mut TreeNode) {
        if self.pending_sources.is_empty() {
            return;
        }
        if let Some(video) = body.find_mut(&|n| n.tag == "video" && n.has_class("reader-lecture")) {
            for src in self.pending_sources {
                video.children.push(lecture_source(&src));
            }
        }
    }
}

fn lecture_source(src: &str) -> TreeNode {
    TreeNode::new("source").with_attr("src", format!("vid/{src}"))
}

/// Raw-timing strips re-flow their wrapped text; other preformatted blocks
/// get their code element's language inferred.
fn process_pre(node: &mut TreeNode) {
    if node.has_class("times") {
        if let Some(code) = node.children.first() {
            let inner = code.text.clone();
            node.children.clear();
            node.text = format!("\n{inner}\n");
        }
    } else if let Some(code) = node.children.iter_mut().find(|c| c.tag == "code") {
        infer_code_language(code);
    }
}

/// Infer a code element's language class from its content.
///
/// A leading `~` forces the no-highlight terminal style and is stripped;
/// otherwise the first whitespace-delimited token is taken as the language
/// and removed from the content. A fence-supplied class is left alone.
fn infer_code_language(code: &mut TreeNode) {
    if code.attr("class").is_some() {
        return;
    }
    if let Some(rest) = code.text.strip_prefix('~') {
        code.text = rest.to_owned();
        code.set_attr("class", "terminal nohighlight");
        return;
    }
    let first_space = code.text.char_indices().find(|(_, c)| c.is_whitespace());
    match first_space {
        Some((idx, c)) if idx > 0 => {
            let lang = code.text[..idx].to_owned();
            code.text = code.text[idx + c.len_utf8()..].to_owned();
            code.set_attr("class", format!("language-{lang}"));
        }
        _ => code.set_attr("class", "terminal nohighlight"),
    }
}

/// Split an image source on its size directive.
///
/// The delimiter is a `|` that is not adjacent to another `|` (doubling
/// escapes), and must occur exactly once to count. Doubled runs collapse to
/// literal characters either way.
fn parse_size_directive(src: &str) -> (String, Option<String>) {
    let chars: Vec<char> = src.chars().collect();
    let mut singles = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '|' {
            let start = i;
            while i < chars.len() && chars[i] == '|' {
                i += 1;
            }
            if i - start == 1 {
                singles.push(start);
            }
        } else {
            i += 1;
        }
    }
    let delimiter = (singles.len() == 1).then(|| singles[0]);

    match delimiter {
        Some(pos) => (
            decode_doubles(&chars[..pos]),
            Some(decode_doubles(&chars[pos + 1..])),
        ),
        None => (decode_doubles(&chars), None),
    }
}

/// Collapse doubled delimiter runs to literal characters.
fn decode_doubles(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '|' {
            let start = i;
            while i < chars.len() && chars[i] == '|' {
                i += 1;
            }
            for _ in 0..(i - start).div_ceil(2) {
                out.push('|');
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn mark_removed(node: &mut TreeNode) {
    let tail = std::mem::take(&mut node.tail);
    *node = TreeNode {
        tail,
        ..TreeNode::default()
    };
}

/// Remove marked nodes, keeping their separating whitespace.
fn prune(node: &mut TreeNode) {
    let mut i = 0;
    while i < node.children.len() {
        if node.children[i].tag.is_empty() {
            let removed = node.children.remove(i);
            if i == 0 {
                node.text.push_str(&removed.tail);
            } else {
                node.children[i - 1].tail.push_str(&removed.tail);
            }
        } else {
            prune(&mut node.children[i]);
            i += 1;
        }
    }
}
