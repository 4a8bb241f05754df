//! Global namespace index.

use std::fmt::Write;

/// Render one `<a href="{host}/{id}">{id}</a><br/>` anchor per namespace, in
/// the given order, with no surrounding markup.
pub fn index<'a>(host: &str, namespaces: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for id in namespaces {
        let _ = write!(out, r#"<a href="{host}/{id}">{id}</a><br/>"#);
    }
    out
}
