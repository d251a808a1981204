//! Slug and branch-name helpers.
//!
//! Branch names such as `heads/feature/login` cannot be used verbatim in a
//! translation-platform slug, so slashes are flattened to underscores. The
//! mapping is lossy: the original branch is only recoverable from stored
//! category metadata or by an explicit lookup.

/// Prefixes that mark a ref as already absolute.
const ABSOLUTE_PREFIXES: &[&str] = &["heads/", "tags/"];

/// Replace every `/` in `value` with `_`.
///
/// ```
/// use locsync_types::slugify;
///
/// assert_eq!(slugify("heads/my_branch"), "heads_my_branch");
/// ```
pub fn slugify(value: &str) -> String {
    value.replace('/', "_")
}

/// Qualify a bare branch name with `heads/`.
///
/// Names that already start with `heads/` or `tags/` are returned unchanged.
pub fn absolute_branch(branch: &str) -> String {
    if ABSOLUTE_PREFIXES.iter().any(|p| branch.starts_with(p)) {
        branch.to_string()
    } else {
        format!("heads/{branch}")
    }
}
