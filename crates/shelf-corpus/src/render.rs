//! Node rendering.
//!
//! A node renders to child links followed by decoded leaf content. The output
//! is markdown source with inline HTML anchors, ready for the markdown
//! renderer.

use crate::error::BrowseError;
use crate::tree::DocTree;

/// Render a resolved tree node.
///
/// Child nodes become `<a href="{link_prefix}/{key}">{key}</a><br/><br/>`
/// anchors, leaves become `"{key}\n"` followed by their decoded bytes. All
/// anchors precede all content regardless of key order; within each group
/// the tree order is kept.
///
/// # Errors
///
/// - [`BrowseError::MalformedTree`] if `node` is a leaf
/// - [`BrowseError::Decode`] if any leaf child is not valid hex; nothing is
///   returned for the node in that case
pub fn render_node(node: &DocTree, link_prefix: &str) -> Result<Vec<u8>, BrowseError> {
    let DocTree::Node(children) = node else {
        return Err(BrowseError::MalformedTree(link_prefix.to_owned()));
    };

    let mut links = Vec::new();
    let mut content = Vec::new();
    for (key, value) in children {
        match value {
            DocTree::Node(_) => {
                links.extend_from_slice(
                    format!(r#"<a href="{link_prefix}/{key}">{key}</a><br/><br/>"#).as_bytes(),
                );
            }
            DocTree::Leaf(encoded) => {
                let decoded = encoded.decode().map_err(|source| BrowseError::Decode {
                    key: key.clone(),
                    source,
                })?;
                content.extend_from_slice(key.as_bytes());
                content.push(b'\n');
                content.extend_from_slice(&decoded);
            }
        }
    }

    links.extend_from_slice(&content);
    Ok(links)
}
