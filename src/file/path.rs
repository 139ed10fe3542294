//! Table path utilities.
//!
//! Table keys are slash-separated, relative, and never end with `/`.

/// Parent of a file sitting at the top level of the table.
pub const ROOT: &str = ".";

/// Normalize a lookup path to table-key form.
///
/// Strips a single leading `./` and any trailing `/`.
///
/// ```
/// use binclude::file::normalize;
///
/// assert_eq!(normalize("./a.txt"), "a.txt");
/// assert_eq!(normalize("dir/"), "dir");
/// ```
pub fn normalize(path: &str) -> &str {
    let path = path.strip_prefix("./").unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && !path.is_empty() {
        // "/" stays a (missing) root rather than collapsing to ""
        "/"
    } else {
        trimmed
    }
}

/// Directory part of a table path, `"."` for top-level entries.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => ROOT,
    }
}

/// Last component of a table path.
pub fn base_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Every proper ancestor directory of `path`, outermost first.
///
/// `"a/b/c.txt"` yields `"a"` then `"a/b"`.
pub(crate) fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/')
        .map(move |(idx, _)| &path[..idx])
        .filter(|dir| !dir.is_empty())
}
