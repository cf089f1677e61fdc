//! Document compiler.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lectern_dom::{PostprocessContext, parse_body, postprocess, serialize_children};
use lectern_dom::{document_title, validate};
use lectern_renderer::{RenderContext, render_document};

use crate::error::CompileError;
use crate::prefix::site_prefix;
use crate::template;

/// Result of compiling one source document.
#[derive(Debug)]
pub struct CompiledPage {
    /// Output path relative to the site root (`.html` extension).
    pub rel_path: PathBuf,
    /// Complete page string.
    pub html: String,
    /// Title extracted from the document's sole heading.
    pub title: String,
    /// Non-fatal notes from the render stage.
    pub warnings: Vec<String>,
}

/// Compiles source documents independently of each other.
///
/// The compiler holds only the immutable source root; per-file state lives
/// on the stack of [`compile_file`](Self::compile_file), so documents may
/// be compiled from multiple threads.
pub struct Compiler {
    source_root: PathBuf,
}

impl Compiler {
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    /// Compile the document at `rel_path` (relative to the source root).
    pub fn compile_file(&self, rel_path: &Path) -> Result<CompiledPage, CompileError> {
        let source = fs::read_to_string(self.source_root.join(rel_path))?;
        self.compile_source(rel_path, &source)
    }

    /// Compile from already-loaded source text.
    pub fn compile_source(
        &self,
        rel_path: &Path,
        source: &str,
    ) -> Result<CompiledPage, CompileError> {
        let dir = self
            .source_root
            .join(rel_path.parent().unwrap_or_else(|| Path::new("")));
        let prefix = site_prefix(rel_path);

        let rendered = render_document(source, &RenderContext::new(&dir))?;

        let mut body = parse_body(&rendered.html)?;
        let list_dir = |folder: &str| list_dir_names(&dir.join(folder));
        let ctx = PostprocessContext {
            prefix: &prefix,
            list_dir: &list_dir,
        };
        postprocess(&mut body, &ctx)?;
        validate(&body)?;

        let title = document_title(&body).unwrap_or_default();
        let contents = serialize_children(&body);
        let html = template::render(&title, &prefix, &contents);

        tracing::debug!(path = %rel_path.display(), title = %title, "compiled document");

        Ok(CompiledPage {
            rel_path: rel_path.with_extension("html"),
            html,
            title,
            warnings: rendered.warnings,
        })
    }
}

/// File names in a directory; the animation transform sorts them.
fn list_dir_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_dom::DomError;

    fn compiler() -> Compiler {
        Compiler::new(".")
    }

    #[test]
    fn compiles_minimal_document() {
        let page = compiler()
            .compile_source(Path::new("lesson.md"), "# Hello\n\nSome text.\n")
            .unwrap();
        assert_eq!(page.rel_path, PathBuf::from("lesson.html"));
        assert_eq!(page.title, "Hello");
        assert!(page.html.contains("<title>Hello</title>"));
        assert!(page.html.contains("<p>Some text.</p>"));
    }

    #[test]
    fn nested_document_gets_relative_prefix() {
        let page = compiler()
            .compile_source(Path::new("course/intro/lesson.md"), "# T\n")
            .unwrap();
        assert!(page.html.contains("href=\"../../css/style.css\""));
    }

    #[test]
    fn error_document_gets_absolute_prefix() {
        let page = compiler()
            .compile_source(Path::new("error/404.md"), "# Missing\n\n![x](sad.png)\n")
            .unwrap();
        assert!(page.html.contains("href=\"/css/style.css\""));
        assert!(page.html.contains("src=\"/img/sad.png\""));
    }

    #[test]
    fn missing_heading_aborts_compile() {
        let result = compiler().compile_source(Path::new("x.md"), "just a paragraph\n");
        assert!(matches!(
            result,
            Err(CompileError::Structure(DomError::HeadingCount(0)))
        ));
    }

    #[test]
    fn two_headings_abort_compile() {
        let result = compiler().compile_source(Path::new("x.md"), "# A\n\n# B\n");
        assert!(matches!(
            result,
            Err(CompileError::Structure(DomError::HeadingCount(2)))
        ));
    }

    #[test]
    fn leading_content_aborts_compile() {
        let result =
            compiler().compile_source(Path::new("x.md"), "one\n\ntwo\n\n# Late Heading\n");
        assert!(matches!(
            result,
            Err(CompileError::Structure(DomError::LeadingContent))
        ));
    }

    #[test]
    fn alert_paragraphs_may_precede_heading() {
        let page = compiler()
            .compile_source(Path::new("x.md"), "!Heads up\n\n# Title\n")
            .unwrap();
        assert!(page.html.contains(r#"<p class="alert">Heads up</p>"#));
    }

    #[test]
    fn slides_and_times_compile_together() {
        let source = "# Deck\n\n++++++++++++++ One\nfirst slide\n++++++++++++++\n\n///////\n1.5 3.0\n///////\n";
        let page = compiler().compile_source(Path::new("deck.md"), source).unwrap();
        assert!(page.html.contains(r#"<div class="slide">"#));
        assert!(page.html.contains(r#"<pre class="times">"#));
        assert!(page.html.contains("1.5 3.0"));
    }

    #[test]
    fn includes_are_spliced_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("course")).unwrap();
        fs::write(dir.path().join("course/part.md"), "included line\n").unwrap();
        fs::write(
            dir.path().join("course/lesson.md"),
            "# T\n\n{{part.md}}\n",
        )
        .unwrap();

        let compiler = Compiler::new(dir.path());
        let page = compiler.compile_file(Path::new("course/lesson.md")).unwrap();
        assert!(page.html.contains("included line"));
    }

    #[test]
    fn animation_folder_is_listed_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("img/steps")).unwrap();
        fs::write(dir.path().join("img/steps/02.png"), b"").unwrap();
        fs::write(dir.path().join("img/steps/01.png"), b"").unwrap();
        fs::write(dir.path().join("walk.md"), "# T\n\n;steps\n").unwrap();

        let compiler = Compiler::new(dir.path());
        let page = compiler.compile_file(Path::new("walk.md")).unwrap();
        let first = page.html.find("img/steps/01.png").unwrap();
        let second = page.html.find("img/steps/02.png").unwrap();
        assert!(first < second);
        assert!(page.html.contains(r#"<div class="animation">"#));
    }

    #[test]
    fn missing_animation_folder_aborts_compile() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("walk.md"), "# T\n\n;gone\n").unwrap();

        let compiler = Compiler::new(dir.path());
        let result = compiler.compile_file(Path::new("walk.md"));
        assert!(matches!(
            result,
            Err(CompileError::Structure(DomError::AssetListing { .. }))
        ));
    }
}
