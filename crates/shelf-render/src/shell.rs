//! Page shell.
//!
//! Static header and footer around rendered documentation. The header holds
//! the stylesheet and the two navigation links; the footer closes the content
//! container opened by the header.

const STYLE: &str = r#"<style>
    body {
        margin: 0;
        background: #f6f8fa;
        color: #24292e;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    }

    .boxed-group {
        position: relative;
        width: 980px;
        margin: 30px auto;
        border: 1px solid #d1d5da;
        border-radius: 3px;
        background: #fff;
    }

    .boxed-group > h3 {
        margin: 0;
        padding: 9px 10px 10px 15px;
        font-size: 14px;
        line-height: 17px;
        background-color: #f6f8fa;
        border-bottom: 1px solid #d8dee4;
        border-radius: 3px 3px 0 0;
    }

    .boxed-group > h3 span {
        margin-left: 12px;
    }

    .markdown-body {
        padding: 20px 30px;
        font-size: 16px;
        line-height: 1.5;
        word-wrap: break-word;
    }

    .markdown-body a {
        color: #0366d6;
        text-decoration: none;
    }

    .markdown-body a:hover {
        text-decoration: underline;
    }

    .markdown-body pre {
        padding: 16px;
        overflow: auto;
        font-size: 85%;
        line-height: 1.45;
        background-color: #f6f8fa;
        border-radius: 3px;
    }

    .markdown-body code {
        font-family: SFMono-Regular, Consolas, "Liberation Mono", Menlo, monospace;
    }

    .markdown-body table {
        border-collapse: collapse;
    }

    .markdown-body table th,
    .markdown-body table td {
        padding: 6px 13px;
        border: 1px solid #dfe2e5;
    }

    .markdown-body hr {
        border: 0;
        border-bottom: 1px solid #eee;
    }
</style>"#;

/// Closes the content container opened by [`header`].
pub const FOOTER: &str = "</div></div></body></html>\n";

/// Page header with links to the root index (`host`) and the parent page
/// (`back_uri`).
pub fn header(host: &str, back_uri: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
<meta charset="utf-8">
{STYLE}
<title></title>
<body>
<div class="boxed-group">
    <h3>
        <span><a href="{host}">Index</a></span>
        <span><a href="{back}">Parent</a></span>
    </h3>
    <div class="markdown-body article">
"#,
        host = escape_html(host),
        back = escape_html(back_uri),
    )
}

/// Full page: header, content, footer.
pub fn page(host: &str, back_uri: &str, content: &str) -> String {
    let mut out = header(host, back_uri);
    out.push_str(content);
    out.push_str(FOOTER);
    out
}

/// Escape special HTML characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
