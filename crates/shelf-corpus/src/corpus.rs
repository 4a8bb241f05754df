//! Namespace registry and the loaded corpus.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BrowseError, CorpusError};
use crate::resolve::Resolution;
use crate::tree::{Children, DocTree};

/// Ordered list of namespace identifiers.
///
/// Order is significant: path resolution is first-match-wins by position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry(Vec<String>);

impl Registry {
    /// Create a registry from identifiers, keeping their order.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    /// Iterate identifiers in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the registry has no namespaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|existing| existing == id)
    }

    fn validate(&self) -> Result<(), CorpusError> {
        let mut seen = HashSet::with_capacity(self.0.len());
        for id in &self.0 {
            if id.is_empty() {
                return Err(CorpusError::Validation(
                    "namespace identifiers cannot be empty".to_owned(),
                ));
            }
            if id.starts_with('/') || id.ends_with('/') {
                return Err(CorpusError::Validation(format!(
                    "namespace '{id}' cannot start or end with '/'"
                )));
            }
            if !seen.insert(id.as_str()) {
                return Err(CorpusError::Validation(format!(
                    "duplicate namespace '{id}'"
                )));
            }
        }
        Ok(())
    }
}

/// On-disk corpus document.
#[derive(Serialize, Deserialize)]
struct CorpusFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespaces: Option<Registry>,
    tree: Children,
}

/// What a request path browses to.
#[derive(Debug)]
pub enum Browse<'a> {
    /// The global namespace index.
    Index,
    /// A tree value to render.
    Page {
        /// Matched namespace.
        namespace: &'a str,
        /// Resolved tree value.
        node: &'a DocTree,
        /// Host-relative path of the parent page (empty for the host root).
        back_path: String,
    },
}

/// Namespace registry plus documentation tree.
///
/// Immutable once constructed; share it behind an `Arc`.
#[derive(Debug)]
pub struct Corpus {
    registry: Registry,
    tree: Children,
}

impl Corpus {
    /// Create a corpus from a registry and a tree.
    ///
    /// Registry and top-level tree keys are expected to correspond one to one.
    /// Mismatches are logged, not rejected.
    pub fn new(registry: Registry, tree: Children) -> Result<Self, CorpusError> {
        registry.validate()?;

        for id in registry.iter() {
            if !tree.contains_key(id) {
                tracing::warn!(namespace = %id, "Registered namespace has no documentation tree");
            }
        }
        for key in tree.keys() {
            if !registry.contains(key) {
                tracing::warn!(namespace = %key, "Documentation tree is not registered");
            }
        }

        Ok(Self { registry, tree })
    }

    /// Parse a corpus from JSON.
    ///
    /// When `namespaces` is absent the registry is the tree's top-level keys in
    /// document order.
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let file: CorpusFile = serde_json::from_str(json)?;
        let registry = file
            .namespaces
            .unwrap_or_else(|| Registry::new(file.tree.keys().cloned()));
        Self::new(registry, file.tree)
    }

    /// Load a corpus file.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        if !path.exists() {
            return Err(CorpusError::NotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        let corpus = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            namespaces = corpus.registry.len(),
            "Loaded corpus"
        );
        Ok(corpus)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, CorpusError> {
        let file = CorpusFile {
            namespaces: Some(self.registry.clone()),
            tree: self.tree.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Namespace registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Top-level tree, keyed by namespace.
    #[must_use]
    pub fn tree(&self) -> &Children {
        &self.tree
    }

    /// Resolve a request path to a tree value or the global index.
    pub fn browse<'a>(&'a self, path: &'a str) -> Result<Browse<'a>, BrowseError> {
        let resolution = self.registry.resolve(path);
        let (namespace, remainder) = match resolution {
            Resolution::GlobalIndex => return Ok(Browse::Index),
            Resolution::NamespaceRoot(id) => (id, ""),
            Resolution::NamespaceRelative {
                namespace,
                remainder,
            } => (namespace, remainder),
            Resolution::NotFound => return Err(BrowseError::PathNotFound(path.to_owned())),
        };

        let root = self
            .tree
            .get(namespace)
            .ok_or_else(|| BrowseError::PathNotFound(path.to_owned()))?;
        let node = root.descend(remainder)?;

        Ok(Browse::Page {
            namespace,
            node,
            back_path: resolution.back_path(path),
        })
    }
}
