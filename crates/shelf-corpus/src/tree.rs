//! Documentation tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::BrowseError;

/// Named children of a tree node, in insertion order.
pub type Children = IndexMap<String, DocTree>;

/// Node of the documentation tree.
///
/// In the corpus file a JSON string is a [`DocTree::Leaf`] and a JSON object is a
/// [`DocTree::Node`]. Any other JSON value fails deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocTree {
    /// Encoded documentation fragment.
    Leaf(EncodedContent),
    /// Named children, leaves and nodes mixed freely.
    Node(Children),
}

impl DocTree {
    /// Walk `remainder` one segment per level.
    ///
    /// The remainder is split on `/` with empty segments discarded, so `""`,
    /// `"/"` and `"//"` all return `self`.
    pub fn descend(&self, remainder: &str) -> Result<&DocTree, BrowseError> {
        let mut current = self;
        for segment in remainder.split('/').filter(|s| !s.is_empty()) {
            current = match current {
                Self::Node(children) => children
                    .get(segment)
                    .ok_or_else(|| BrowseError::PathNotFound(remainder.to_owned()))?,
                Self::Leaf(_) => return Err(BrowseError::PathNotFound(remainder.to_owned())),
            };
        }
        Ok(current)
    }

    /// Children of a node, `None` for a leaf.
    #[must_use]
    pub fn children(&self) -> Option<&Children> {
        match self {
            Self::Node(children) => Some(children),
            Self::Leaf(_) => None,
        }
    }
}

/// Lowercase hex encoding of a documentation fragment's raw bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedContent(String);

impl EncodedContent {
    /// Encode raw bytes.
    #[must_use]
    pub fn encode(raw: impl AsRef<[u8]>) -> Self {
        Self(hex::encode(raw))
    }

    /// Decode back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.0)
    }

    /// Encoded form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EncodedContent {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}

impl From<&str> for EncodedContent {
    fn from(encoded: &str) -> Self {
        Self(encoded.to_owned())
    }
}
