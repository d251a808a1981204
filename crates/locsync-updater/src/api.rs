//! Collaborator interfaces consumed by the updater.
//!
//! Both traits are blocking: every call returns once the remote has
//! answered. Timeouts and cancellation belong to the implementing client.
//! Implementations must be thread-safe (`Send + Sync`) so one client can
//! serve concurrent webhook deliveries.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use locsync_types::TxResource;

use crate::error::{ApiError, ApiResult};

/// A commit, reduced to what the updater needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    /// Sha of the commit's root tree.
    pub tree_sha: String,
}

/// A recursive listing of a commit's files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub sha: String,
    pub entries: Vec<TreeEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Repository-relative path.
    pub path: String,
    /// Sha of the entry's blob.
    pub sha: String,
}

/// Raw blob payload as returned by the repository API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub content: String,
    pub encoding: String,
}

impl Blob {
    /// Encoding name for payloads that are already text.
    pub const UTF8: &'static str = "utf-8";

    /// Encoding name for base64 payloads.
    pub const BASE64: &'static str = "base64";

    pub fn utf8(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: Self::UTF8.to_string(),
        }
    }

    pub fn base64(data: &[u8]) -> Self {
        Self {
            content: base64::engine::general_purpose::STANDARD.encode(data),
            encoding: Self::BASE64.to_string(),
        }
    }

    /// Decode the payload to raw bytes.
    ///
    /// UTF-8 payloads are returned as-is. Anything else is treated as base64;
    /// line breaks inside the payload are ignored.
    pub fn decode(&self) -> ApiResult<Vec<u8>> {
        if self.encoding == Self::UTF8 {
            return Ok(self.content.clone().into_bytes());
        }

        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| ApiError::Decode(format!("blob is not valid base64: {e}")))
    }
}

/// Metadata of a resource on the translation platform.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDetails {
    pub slug: String,
    /// Raw category strings; see [`locsync_types::categories`].
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Read access to the source repository.
pub trait RepositoryApi: Send + Sync {
    /// Look up a commit by sha.
    fn get_commit(&self, repo: &str, sha: &str) -> ApiResult<Commit>;

    /// List the files of a tree.
    fn tree(&self, repo: &str, tree_sha: &str) -> ApiResult<Tree>;

    /// Fetch a blob by sha.
    fn blob(&self, repo: &str, sha: &str) -> ApiResult<Blob>;

    /// Download the content of `path` as of `git_ref` (a branch, tag or sha).
    fn download(&self, repo: &str, path: &str, git_ref: &str) -> ApiResult<Vec<u8>>;
}

/// Write access to the translation project.
pub trait TranslationApi: Send + Sync {
    fn resource_exists(&self, resource: &dyn TxResource) -> ApiResult<bool>;

    fn get_resource(&self, project_slug: &str, resource_slug: &str) -> ApiResult<ResourceDetails>;

    /// Create a resource with its content and encoded categories in one call.
    fn create(&self, resource: &dyn TxResource, content: &[u8], categories: &str) -> ApiResult<()>;

    /// Upload content, creating the resource if needed. Categories are left
    /// untouched.
    fn create_or_update(&self, resource: &dyn TxResource, content: &[u8]) -> ApiResult<()>;

    /// Replace the encoded categories of an existing resource.
    fn update_details(&self, resource: &dyn TxResource, categories: &str) -> ApiResult<()>;

    /// Replace the source content of an existing resource.
    fn update_content(&self, resource: &dyn TxResource, content: &[u8]) -> ApiResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_blob_is_returned_verbatim() {
        let blob = Blob::utf8("en:\n  a: b\n");
        assert_eq!(blob.decode().unwrap(), b"en:\n  a: b\n");
    }

    #[test]
    fn base64_blob_is_decoded() {
        let blob = Blob::base64(b"en:\n  hello: world\n");
        assert_eq!(blob.encoding, "base64");
        assert_eq!(blob.decode().unwrap(), b"en:\n  hello: world\n");
    }

    #[test]
    fn base64_with_line_breaks_is_decoded() {
        let blob = Blob {
            content: "ZW46CiAg\naGVsbG86\nIHdvcmxk\n".into(),
            encoding: "base64".into(),
        };
        assert_eq!(blob.decode().unwrap(), b"en:\n  hello: world");
    }

    #[test]
    fn invalid_base64_is_a_decode_error() {
        let blob = Blob {
            content: "not base64!".into(),
            encoding: "base64".into(),
        };
        assert!(matches!(blob.decode(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn resource_details_categories_default_to_empty() {
        let details: ResourceDetails = toml::from_str("slug = \"app\"").unwrap();
        assert_eq!(details.slug, "app");
        assert!(details.categories.is_empty());
    }
}
