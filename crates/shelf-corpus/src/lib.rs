//! Documentation corpus for Shelf.
//!
//! A corpus is a read-only hierarchy of documentation fragments organized by
//! namespace and symbol. It is loaded once at startup and shared immutably
//! between request handlers.
//!
//! # Architecture
//!
//! ```text
//! request path ──► Registry::resolve ──► Resolution
//!                                          │
//!                                          ▼
//!                  Corpus::browse ──► DocTree::descend ──► render_node ──► bytes
//! ```
//!
//! - [`Registry`]: ordered list of namespace identifiers
//! - [`DocTree`]: leaf content or named children
//! - [`Registry::resolve`]: first-match-wins namespace matching
//! - [`render_node`]: child links first, then decoded leaf content
//! - [`CorpusBuilder`]: generates a corpus from a directory of markdown files
//!
//! # Example
//!
//! ```
//! use shelf_corpus::{Browse, Corpus, render_node};
//!
//! let json = r#"{"namespaces": ["bytes"], "tree": {"bytes": {"leafA": "68656c6c6f"}}}"#;
//! let corpus = Corpus::from_json(json).unwrap();
//!
//! let Browse::Page { node, .. } = corpus.browse("/bytes").unwrap() else {
//!     unreachable!()
//! };
//! let content = render_node(node, "http://h/bytes").unwrap();
//! assert_eq!(content, b"leafA\nhello");
//! ```

mod builder;
mod corpus;
mod error;
mod render;
mod resolve;
mod tree;

pub use builder::CorpusBuilder;
pub use corpus::{Browse, Corpus, Registry};
pub use error::{BrowseError, CorpusError};
pub use render::render_node;
pub use resolve::{Resolution, parent_dir};
pub use tree::{Children, DocTree, EncodedContent};
