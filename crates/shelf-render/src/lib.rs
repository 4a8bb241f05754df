//! HTML output for Shelf.
//!
//! - [`page`]: wraps rendered content in the header/footer shell
//! - [`index`]: flat namespace index served at `/`
//! - [`markdown_to_html`]: markdown rendering with GFM extensions
//!
//! # Example
//!
//! ```
//! use shelf_render::{markdown_to_html, page};
//!
//! let body = markdown_to_html("leafA\nhello");
//! let html = page("http://h", "http://h/bytes", &body);
//! assert!(html.contains("<p>leafA\nhello</p>"));
//! ```

mod index;
mod markdown;
mod shell;

pub use index::index;
pub use markdown::markdown_to_html;
pub use shell::{FOOTER, escape_html, header, page};
