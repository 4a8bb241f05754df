//! Corpus generation from a directory of markdown files.
//!
//! The topmost directories that directly hold `.md` files become namespaces,
//! named by their path relative to the source directory. Everything below a
//! namespace directory is folded into its tree:
//!
//! ```text
//! docs/
//! ├── bytes/example.md            → namespace "bytes", leaf "example"
//! ├── crypto/aes/example.md       → namespace "crypto/aes", leaf "example"
//! └── crypto/aes/extra/gcm.md     →   node "extra", leaf "gcm"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::{Corpus, Registry};
use crate::error::CorpusError;
use crate::tree::{Children, DocTree, EncodedContent};

/// Directory entry with its type resolved once.
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

impl Entry {
    fn is_markdown(&self) -> bool {
        !self.is_dir && self.path.extension().is_some_and(|e| e == "md")
    }
}

/// Builds a [`Corpus`] by walking a markdown source directory.
pub struct CorpusBuilder {
    source_dir: PathBuf,
}

impl CorpusBuilder {
    /// Create a builder for `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Walk the source directory and build the corpus.
    ///
    /// Namespaces and keys are emitted in lexical order.
    pub fn build(&self) -> Result<Corpus, CorpusError> {
        if !self.source_dir.is_dir() {
            return Err(CorpusError::SourceNotFound(self.source_dir.clone()));
        }

        let mut namespaces = Vec::new();
        let mut tree = Children::new();
        for entry in read_sorted(&self.source_dir)? {
            if entry.is_dir {
                collect_namespaces(&entry.path, &entry.name, &mut namespaces, &mut tree)?;
            } else if entry.is_markdown() {
                tracing::warn!(
                    path = %entry.path.display(),
                    "Skipping markdown file outside any namespace"
                );
            }
        }

        tracing::info!(
            source = %self.source_dir.display(),
            namespaces = namespaces.len(),
            "Built corpus"
        );
        Corpus::new(Registry::new(namespaces), tree)
    }
}

/// Register `dir` as a namespace if it holds markdown, otherwise search below it.
fn collect_namespaces(
    dir: &Path,
    id: &str,
    namespaces: &mut Vec<String>,
    tree: &mut Children,
) -> Result<(), CorpusError> {
    let entries = read_sorted(dir)?;

    if entries.iter().any(Entry::is_markdown) {
        let children = build_children(entries)?;
        namespaces.push(id.to_owned());
        tree.insert(id.to_owned(), DocTree::Node(children));
        return Ok(());
    }

    for entry in entries.into_iter().filter(|e| e.is_dir) {
        let child_id = format!("{id}/{}", entry.name);
        collect_namespaces(&entry.path, &child_id, namespaces, tree)?;
    }
    Ok(())
}

/// Build the children of a namespace or nested node.
///
/// Directories with no markdown anywhere below are dropped. A file and a
/// directory mapping to the same key (`http.md` next to `http/`) are rejected.
fn build_children(entries: Vec<Entry>) -> Result<Children, CorpusError> {
    let mut children = Children::new();
    let mut origins: HashMap<String, PathBuf> = HashMap::new();
    for entry in entries {
        let (key, value) = if entry.is_dir {
            let nested = build_children(read_sorted(&entry.path)?)?;
            if nested.is_empty() {
                continue;
            }
            (entry.name.clone(), DocTree::Node(nested))
        } else if entry.is_markdown() {
            let key = entry
                .path
                .file_stem()
                .map_or_else(|| entry.name.clone(), |s| s.to_string_lossy().into_owned());
            let raw = fs::read(&entry.path)?;
            (key, DocTree::Leaf(EncodedContent::encode(raw)))
        } else {
            continue;
        };

        if let Some(existing) = origins.get(&key) {
            return Err(CorpusError::Validation(format!(
                "'{}' and '{}' both map to key '{key}'",
                existing.display(),
                entry.path.display()
            )));
        }
        origins.insert(key.clone(), entry.path);
        children.insert(key, value);
    }
    Ok(children)
}

/// Read a directory, skipping hidden entries, sorted by name.
fn read_sorted(dir: &Path) -> Result<Vec<Entry>, CorpusError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let is_dir = entry.file_type()?.is_dir();
        entries.push(Entry {
            name,
            path: entry.path(),
            is_dir,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
