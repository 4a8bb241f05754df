//! Request path resolution.
//!
//! Matching is first-match-wins by registry position, not by specificity.
//! With a registry of `["os", "os/exec"]` the path `/os/exec` is an exact match
//! for `os/exec`, but `/os/exec/Cmd` falls through to the substring scan and
//! resolves against `os` with remainder `/exec/Cmd`.

use crate::corpus::Registry;

/// Outcome of matching a request path against the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The path is `/`.
    GlobalIndex,
    /// The path is `/{id}` or `/{id}/`.
    NamespaceRoot(&'a str),
    /// The path contains `id` somewhere.
    NamespaceRelative {
        /// Matched namespace.
        namespace: &'a str,
        /// Path with the leading `/{id}` stripped.
        remainder: &'a str,
    },
    /// No registry entry matches.
    NotFound,
}

impl Registry {
    /// Resolve a request path.
    ///
    /// Exact matches are tried across the whole registry before any substring
    /// match is considered.
    pub fn resolve<'a>(&'a self, path: &'a str) -> Resolution<'a> {
        if path == "/" {
            return Resolution::GlobalIndex;
        }

        let exact = self.iter().find(|id| {
            path.strip_prefix('/')
                .map(|rest| rest.strip_suffix('/').unwrap_or(rest))
                .is_some_and(|rest| rest == *id)
        });
        if let Some(id) = exact {
            return Resolution::NamespaceRoot(id);
        }

        // Substring match, then a purely textual prefix strip. When the path does
        // not start with `/{id}` the remainder is the whole path.
        match self.iter().find(|id| path.contains(*id)) {
            Some(id) => Resolution::NamespaceRelative {
                namespace: id,
                remainder: path
                    .strip_prefix('/')
                    .and_then(|rest| rest.strip_prefix(id))
                    .unwrap_or(path),
            },
            None => Resolution::NotFound,
        }
    }
}

impl Resolution<'_> {
    /// Path of the parent page, relative to the host.
    ///
    /// Namespace roots link back to the host root (empty path); relative pages
    /// link to the lexical parent directory of the request path.
    #[must_use]
    pub fn back_path(&self, path: &str) -> String {
        match self {
            Self::NamespaceRelative { .. } => parent_dir(path),
            Self::GlobalIndex | Self::NamespaceRoot(_) | Self::NotFound => String::new(),
        }
    }
}

/// Lexical parent directory of a slash-separated path.
///
/// Drops the last element and cleans the result: repeated slashes collapse,
/// `.` and `..` are resolved, and a trailing slash is removed.
///
/// ```
/// use shelf_corpus::parent_dir;
///
/// assert_eq!(parent_dir("/bytes/Buffer"), "/bytes");
/// assert_eq!(parent_dir("/bytes/Buffer/"), "/bytes/Buffer");
/// assert_eq!(parent_dir("/bytes"), "/");
/// assert_eq!(parent_dir("bytes"), ".");
/// ```
#[must_use]
pub fn parent_dir(path: &str) -> String {
    let dir = path.rfind('/').map_or("", |i| &path[..=i]);
    clean(dir)
}

fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_owned();
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_owned()
    } else {
        joined
    }
}
