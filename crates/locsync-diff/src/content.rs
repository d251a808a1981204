//! Content-level diff: raw file bytes in, serialized delta out.

use locsync_document::{parse, serialize, Format, FormatResult};
use locsync_types::TxResource;
use tracing::debug;

use crate::tree_diff::{diff_documents, summarize};

/// Compute the upload delta between two versions of `resource`'s source file.
///
/// The format comes from the resource's declared type. Returns `Ok(None)`
/// when HEAD adds or changes nothing, so no upload is needed. Parse failures
/// in either version are returned, never swallowed.
pub fn diff_between(
    head: &[u8],
    base: &[u8],
    resource: &dyn TxResource,
) -> FormatResult<Option<Vec<u8>>> {
    let format = Format::from_resource_type(resource.resource_type())?;
    let delta = diff_content(head, base, format)?;
    debug!(
        resource = %resource.resource_slug(),
        %format,
        changed = delta.is_some(),
        "computed content diff"
    );
    Ok(delta)
}

/// Like [`diff_between`], for content whose format is already known.
pub fn diff_content(head: &[u8], base: &[u8], format: Format) -> FormatResult<Option<Vec<u8>>> {
    let head_doc = parse(head, format)?;
    let base_doc = parse(base, format)?;

    let Some(delta) = diff_documents(&head_doc, &base_doc) else {
        return Ok(None);
    };

    let summary = summarize(&head_doc, &base_doc);
    debug!(
        added = summary.added,
        modified = summary.modified,
        "serializing diff"
    );
    serialize(&delta, format).map(Some)
}
