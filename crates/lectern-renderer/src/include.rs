//! File inclusion.
//!
//! A line consisting of `{{path}}` is replaced by the contents of the
//! referenced file (relative to the including document's directory),
//! recursively. A depth limit stops include cycles.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::fence::FenceTracker;

/// Callback used to read included files.
pub type ReadFileFn = dyn Fn(&Path) -> io::Result<String> + Send + Sync;

fn read_from_disk(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}

/// Expands `{{path}}` include lines.
pub struct IncludeExpander<'a> {
    base_dir: PathBuf,
    read_file: &'a ReadFileFn,
    max_depth: usize,
}

impl<'a> IncludeExpander<'a> {
    /// Create an expander reading from disk, rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> IncludeExpander<'static> {
        IncludeExpander {
            base_dir: base_dir.into(),
            read_file: &read_from_disk,
            max_depth: 10,
        }
    }

    /// Replace the file reading callback (used by tests and callers with
    /// non-filesystem sources).
    #[must_use]
    pub fn with_read_file(mut self, read_file: &'a ReadFileFn) -> Self {
        self.read_file = read_file;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expand all include lines in `source`.
    ///
    /// A missing include file or an include chain deeper than the limit is
    /// an error; the caller aborts that document's compile.
    pub fn expand(&self, source: &str) -> Result<String, RenderError> {
        self.expand_with_depth(source, 0)
    }

    fn expand_with_depth(&self, source: &str, depth: usize) -> Result<String, RenderError> {
        if depth > self.max_depth {
            return Err(RenderError::IncludeDepth(self.max_depth));
        }

        let mut output = String::with_capacity(source.len());
        let mut fences = FenceTracker::new();

        for line in source.lines() {
            fences.observe(line);
            match include_target(line) {
                Some(target) if !fences.in_fence() => {
                    let path = self.base_dir.join(target);
                    let included = (self.read_file)(&path)
                        .map_err(|source| RenderError::Include { path, source })?;
                    output.push_str(&self.expand_with_depth(&included, depth + 1)?);
                    if !output.ends_with('\n') {
                        output.push('\n');
                    }
                }
                _ => {
                    output.push_str(line);
                    output.push('\n');
                }
            }
        }

        Ok(output)
    }
}

/// Parse an include line: `{{path}}` with nothing else on the line.
fn include_target(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix("{{")?.strip_suffix("}}")?;
    let inner = inner.trim();
    (!inner.is_empty()).then_some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reader(files: &'static [(&'static str, &'static str)]) -> impl Fn(&Path) -> io::Result<String> {
        move |path: &Path| {
            files
                .iter()
                .find(|(name, _)| path.ends_with(name))
                .map(|(_, text)| (*text).to_owned())
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
        }
    }

    #[test]
    fn expands_include_line() {
        let read = reader(&[("part.md", "included text\n")]);
        let expander = IncludeExpander::new(".").with_read_file(&read);
        let out = expander.expand("before\n{{part.md}}\nafter\n").unwrap();
        assert_eq!(out, "before\nincluded text\nafter\n");
    }

    #[test]
    fn expands_nested_includes() {
        let read = reader(&[("a.md", "A\n{{b.md}}\n"), ("b.md", "B\n")]);
        let expander = IncludeExpander::new(".").with_read_file(&read);
        let out = expander.expand("{{a.md}}\n").unwrap();
        assert_eq!(out, "A\nB\n");
    }

    #[test]
    fn missing_include_is_an_error() {
        let read = reader(&[]);
        let expander = IncludeExpander::new(".").with_read_file(&read);
        let err = expander.expand("{{nope.md}}\n").unwrap_err();
        assert!(matches!(err, RenderError::Include { .. }));
    }

    #[test]
    fn include_cycle_hits_depth_limit() {
        let read = reader(&[("loop.md", "{{loop.md}}\n")]);
        let expander = IncludeExpander::new(".")
            .with_read_file(&read)
            .with_max_depth(3);
        let err = expander.expand("{{loop.md}}\n").unwrap_err();
        assert!(matches!(err, RenderError::IncludeDepth(3)));
    }

    #[test]
    fn includes_inside_code_fences_are_literal() {
        let read = reader(&[("part.md", "should not appear\n")]);
        let expander = IncludeExpander::new(".").with_read_file(&read);
        let out = expander.expand("```\n{{part.md}}\n```\n").unwrap();
        assert_eq!(out, "```\n{{part.md}}\n```\n");
    }
}
