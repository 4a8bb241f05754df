//! Markdown to HTML.

use pulldown_cmark::{Options, Parser, html};

/// Render markdown source to HTML.
///
/// Inline HTML (the child anchors produced for index nodes) passes through
/// unchanged. Output is not validated.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
