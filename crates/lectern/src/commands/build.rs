//! Batch build command.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use rayon::prelude::*;

use lectern_site::Compiler;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the `build` command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Source directory containing markdown documents.
    #[arg(long, default_value = "src")]
    pub(crate) source: PathBuf,

    /// Output directory for compiled pages.
    #[arg(long, default_value = "site")]
    pub(crate) output: PathBuf,

    /// Enable info-level logging.
    #[arg(long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    /// Compile every document; returns the number of failed files.
    ///
    /// Documents compile independently, so the batch runs in parallel and
    /// one file's failure never aborts the others.
    pub(crate) fn execute(&self, output: &Output) -> Result<usize, CliError> {
        let documents = discover_documents(&self.source)?;
        if documents.is_empty() {
            output.info(&format!(
                "No markdown documents under {}",
                self.source.display()
            ));
            return Ok(0);
        }

        let compiler = Compiler::new(&self.source);
        let results: Vec<(PathBuf, Result<(), CliError>)> = documents
            .par_iter()
            .map(|rel_path| {
                let result = self.build_one(&compiler, rel_path);
                (rel_path.clone(), result)
            })
            .collect();

        let mut failed = 0;
        for (rel_path, result) in &results {
            match result {
                Ok(()) => tracing::info!(path = %rel_path.display(), "compiled"),
                Err(err) => {
                    failed += 1;
                    output.error(&format!("{}: {err}", rel_path.display()));
                }
            }
        }

        let compiled = results.len() - failed;
        if failed == 0 {
            output.success(&format!("Compiled {compiled} document(s)"));
        } else {
            output.error(&format!("Compiled {compiled}, failed {failed}"));
        }
        Ok(failed)
    }

    fn build_one(&self, compiler: &Compiler, rel_path: &Path) -> Result<(), CliError> {
        let page = compiler.compile_file(rel_path)?;
        for warning in &page.warnings {
            tracing::warn!(path = %rel_path.display(), "{warning}");
        }
        let out_path = self.output.join(&page.rel_path);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, &page.html)?;
        Ok(())
    }
}

/// Markdown files under `root`, relative paths, hidden entries skipped.
fn discover_documents(root: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut documents = Vec::new();
    if root.exists() {
        walk(root, Path::new(""), &mut documents)?;
    }
    documents.sort();
    Ok(documents)
}

fn walk(dir: &Path, rel: &Path, documents: &mut Vec<PathBuf>) -> Result<(), CliError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        let rel_path = rel.join(&name);
        if entry.file_type()?.is_dir() {
            walk(&path, &rel_path, documents)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            documents.push(rel_path);
        }
    }
    Ok(())
}
