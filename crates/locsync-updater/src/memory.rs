//! In-memory collaborators for testing and dry runs.
//!
//! [`InMemoryRepository`] serves commits, trees and blobs from maps.
//! [`InMemoryTranslationProject`] stores resources and records every call it
//! receives, in order, so tests can assert on the exact call sequence. Both
//! keep their state behind `RwLock`s and are safe to share across threads.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use locsync_types::TxResource;

use crate::api::{Blob, Commit, RepositoryApi, ResourceDetails, TranslationApi, Tree, TreeEntry};
use crate::error::{ApiError, ApiResult};

fn read<T>(lock: &RwLock<T>) -> ApiResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| ApiError::Unavailable(format!("lock poisoned: {e}")))
}

fn write<T>(lock: &RwLock<T>) -> ApiResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| ApiError::Unavailable(format!("lock poisoned: {e}")))
}

/// An in-memory source repository.
#[derive(Debug)]
pub struct InMemoryRepository {
    name: String,
    commits: RwLock<HashMap<String, Commit>>,
    trees: RwLock<HashMap<String, Tree>>,
    blobs: RwLock<HashMap<String, Blob>>,
    /// File contents keyed by `(git_ref, path)`.
    files: RwLock<HashMap<(String, String), Vec<u8>>>,
}

impl InMemoryRepository {
    /// Create an empty repository named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commits: RwLock::new(HashMap::new()),
            trees: RwLock::new(HashMap::new()),
            blobs: RwLock::new(HashMap::new()),
            files: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a commit holding `files`.
    ///
    /// Blobs are stored base64-encoded, the way hosting APIs usually return
    /// them. Each file is also downloadable with the commit sha as ref.
    pub fn add_commit(&self, sha: &str, files: &[(&str, &[u8])]) -> ApiResult<()> {
        let tree_sha = format!("tree-{sha}");
        let mut entries = Vec::with_capacity(files.len());

        for (idx, (path, content)) in files.iter().enumerate() {
            let blob_sha = format!("blob-{sha}-{idx}");
            self.insert_blob(&blob_sha, Blob::base64(content))?;
            self.set_file(sha, path, content)?;
            entries.push(TreeEntry {
                path: (*path).to_string(),
                sha: blob_sha,
            });
        }

        write(&self.trees)?.insert(
            tree_sha.clone(),
            Tree {
                sha: tree_sha.clone(),
                entries,
            },
        );
        write(&self.commits)?.insert(
            sha.to_string(),
            Commit {
                sha: sha.to_string(),
                tree_sha,
            },
        );
        Ok(())
    }

    /// Store or replace a blob.
    pub fn insert_blob(&self, sha: &str, blob: Blob) -> ApiResult<()> {
        write(&self.blobs)?.insert(sha.to_string(), blob);
        Ok(())
    }

    /// Make `content` downloadable at `path` as of `git_ref`.
    pub fn set_file(&self, git_ref: &str, path: &str, content: &[u8]) -> ApiResult<()> {
        write(&self.files)?.insert((git_ref.to_string(), path.to_string()), content.to_vec());
        Ok(())
    }

    fn check_repo(&self, repo: &str) -> ApiResult<()> {
        if repo != self.name {
            return Err(ApiError::NotFound {
                kind: "repository",
                id: repo.to_string(),
            });
        }
        Ok(())
    }
}

impl RepositoryApi for InMemoryRepository {
    fn get_commit(&self, repo: &str, sha: &str) -> ApiResult<Commit> {
        self.check_repo(repo)?;
        read(&self.commits)?
            .get(sha)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                kind: "commit",
                id: sha.to_string(),
            })
    }

    fn tree(&self, repo: &str, tree_sha: &str) -> ApiResult<Tree> {
        self.check_repo(repo)?;
        read(&self.trees)?
            .get(tree_sha)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                kind: "tree",
                id: tree_sha.to_string(),
            })
    }

    fn blob(&self, repo: &str, sha: &str) -> ApiResult<Blob> {
        self.check_repo(repo)?;
        read(&self.blobs)?
            .get(sha)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                kind: "blob",
                id: sha.to_string(),
            })
    }

    fn download(&self, repo: &str, path: &str, git_ref: &str) -> ApiResult<Vec<u8>> {
        self.check_repo(repo)?;
        read(&self.files)?
            .get(&(git_ref.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                kind: "file",
                id: format!("{path}@{git_ref}"),
            })
    }
}

/// The kind of a recorded [`ApiCall`], used to inject failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiCallKind {
    ResourceExists,
    GetResource,
    Create,
    CreateOrUpdate,
    UpdateDetails,
    UpdateContent,
}

/// A call received by [`InMemoryTranslationProject`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    ResourceExists { slug: String },
    GetResource { slug: String },
    Create { slug: String, content: Vec<u8>, categories: String },
    CreateOrUpdate { slug: String, content: Vec<u8> },
    UpdateDetails { slug: String, categories: String },
    UpdateContent { slug: String, content: Vec<u8> },
}

impl ApiCall {
    pub fn kind(&self) -> ApiCallKind {
        match self {
            ApiCall::ResourceExists { .. } => ApiCallKind::ResourceExists,
            ApiCall::GetResource { .. } => ApiCallKind::GetResource,
            ApiCall::Create { .. } => ApiCallKind::Create,
            ApiCall::CreateOrUpdate { .. } => ApiCallKind::CreateOrUpdate,
            ApiCall::UpdateDetails { .. } => ApiCallKind::UpdateDetails,
            ApiCall::UpdateContent { .. } => ApiCallKind::UpdateContent,
        }
    }
}

/// A resource as stored by [`InMemoryTranslationProject`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredResource {
    pub content: Vec<u8>,
    pub categories: Vec<String>,
}

/// An in-memory translation project that records its calls.
#[derive(Debug, Default)]
pub struct InMemoryTranslationProject {
    resources: RwLock<HashMap<(String, String), StoredResource>>,
    calls: RwLock<Vec<ApiCall>>,
    failures: RwLock<HashSet<ApiCallKind>>,
}

impl InMemoryTranslationProject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a resource, as if created earlier.
    pub fn insert_resource(
        &self,
        project_slug: &str,
        resource_slug: &str,
        content: &[u8],
        categories: &[&str],
    ) -> ApiResult<()> {
        write(&self.resources)?.insert(
            (project_slug.to_string(), resource_slug.to_string()),
            StoredResource {
                content: content.to_vec(),
                categories: categories.iter().map(|c| c.to_string()).collect(),
            },
        );
        Ok(())
    }

    pub fn resource(&self, project_slug: &str, resource_slug: &str) -> Option<StoredResource> {
        read(&self.resources)
            .ok()?
            .get(&(project_slug.to_string(), resource_slug.to_string()))
            .cloned()
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<ApiCall> {
        read(&self.calls).map(|c| c.clone()).unwrap_or_default()
    }

    /// Kinds of the calls received so far, oldest first.
    pub fn call_kinds(&self) -> Vec<ApiCallKind> {
        self.calls().iter().map(ApiCall::kind).collect()
    }

    /// Make every future call of `kind` fail with [`ApiError::Request`].
    pub fn fail_on(&self, kind: ApiCallKind) -> ApiResult<()> {
        write(&self.failures)?.insert(kind);
        Ok(())
    }

    fn record(&self, call: ApiCall) -> ApiResult<()> {
        let kind = call.kind();
        write(&self.calls)?.push(call);
        if read(&self.failures)?.contains(&kind) {
            return Err(ApiError::Request(format!("injected failure on {kind:?}")));
        }
        Ok(())
    }

    fn key(resource: &dyn TxResource) -> (String, String) {
        (
            resource.project_slug().to_string(),
            resource.resource_slug().to_string(),
        )
    }

    fn not_found(resource: &dyn TxResource) -> ApiError {
        ApiError::NotFound {
            kind: "resource",
            id: resource.resource_slug().to_string(),
        }
    }
}

fn category_list(categories: &str) -> Vec<String> {
    if categories.trim().is_empty() {
        Vec::new()
    } else {
        vec![categories.to_string()]
    }
}

impl TranslationApi for InMemoryTranslationProject {
    fn resource_exists(&self, resource: &dyn TxResource) -> ApiResult<bool> {
        self.record(ApiCall::ResourceExists {
            slug: resource.resource_slug().to_string(),
        })?;
        Ok(read(&self.resources)?.contains_key(&Self::key(resource)))
    }

    fn get_resource(&self, project_slug: &str, resource_slug: &str) -> ApiResult<ResourceDetails> {
        self.record(ApiCall::GetResource {
            slug: resource_slug.to_string(),
        })?;
        read(&self.resources)?
            .get(&(project_slug.to_string(), resource_slug.to_string()))
            .map(|stored| ResourceDetails {
                slug: resource_slug.to_string(),
                categories: stored.categories.clone(),
            })
            .ok_or_else(|| ApiError::NotFound {
                kind: "resource",
                id: resource_slug.to_string(),
            })
    }

    fn create(&self, resource: &dyn TxResource, content: &[u8], categories: &str) -> ApiResult<()> {
        self.record(ApiCall::Create {
            slug: resource.resource_slug().to_string(),
            content: content.to_vec(),
            categories: categories.to_string(),
        })?;
        let mut resources = write(&self.resources)?;
        let key = Self::key(resource);
        if resources.contains_key(&key) {
            return Err(ApiError::Request(format!(
                "resource already exists: {}",
                key.1
            )));
        }
        resources.insert(
            key,
            StoredResource {
                content: content.to_vec(),
                categories: category_list(categories),
            },
        );
        Ok(())
    }

    fn create_or_update(&self, resource: &dyn TxResource, content: &[u8]) -> ApiResult<()> {
        self.record(ApiCall::CreateOrUpdate {
            slug: resource.resource_slug().to_string(),
            content: content.to_vec(),
        })?;
        write(&self.resources)?
            .entry(Self::key(resource))
            .or_default()
            .content = content.to_vec();
        Ok(())
    }

    fn update_details(&self, resource: &dyn TxResource, categories: &str) -> ApiResult<()> {
        self.record(ApiCall::UpdateDetails {
            slug: resource.resource_slug().to_string(),
            categories: categories.to_string(),
        })?;
        let mut resources = write(&self.resources)?;
        let stored = resources
            .get_mut(&Self::key(resource))
            .ok_or_else(|| Self::not_found(resource))?;
        stored.categories = category_list(categories);
        Ok(())
    }

    fn update_content(&self, resource: &dyn TxResource, content: &[u8]) -> ApiResult<()> {
        self.record(ApiCall::UpdateContent {
            slug: resource.resource_slug().to_string(),
            content: content.to_vec(),
        })?;
        let mut resources = write(&self.resources)?;
        let stored = resources
            .get_mut(&Self::key(resource))
            .ok_or_else(|| Self::not_found(resource))?;
        stored.content = content.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locsync_types::Resource;

    fn resource() -> Resource {
        Resource::new("proj", "app", "YAML", "en", "en.yml", "", "<lang>.yml")
    }

    #[test]
    fn repository_serves_added_commit() {
        let repo = InMemoryRepository::new("acme/app");
        repo.add_commit("c1", &[("en.yml", b"en:\n  a: b\n")]).unwrap();

        let commit = repo.get_commit("acme/app", "c1").unwrap();
        let tree = repo.tree("acme/app", &commit.tree_sha).unwrap();
        assert_eq!(tree.entries.len(), 1);
        assert_eq!(tree.entries[0].path, "en.yml");

        let blob = repo.blob("acme/app", &tree.entries[0].sha).unwrap();
        assert_eq!(blob.encoding, Blob::BASE64);
        assert_eq!(blob.decode().unwrap(), b"en:\n  a: b\n");
        assert_eq!(repo.download("acme/app", "en.yml", "c1").unwrap(), b"en:\n  a: b\n");
    }

    #[test]
    fn repository_reports_missing_objects() {
        let repo = InMemoryRepository::new("acme/app");
        assert!(matches!(
            repo.get_commit("acme/app", "nope"),
            Err(ApiError::NotFound { kind: "commit", .. })
        ));
        assert!(matches!(
            repo.download("acme/app", "en.yml", "main"),
            Err(ApiError::NotFound { kind: "file", .. })
        ));
        assert!(matches!(
            repo.get_commit("other/repo", "c1"),
            Err(ApiError::NotFound { kind: "repository", .. })
        ));
    }

    #[test]
    fn project_create_then_exists() {
        let project = InMemoryTranslationProject::new();
        let r = resource();

        assert!(!project.resource_exists(&r).unwrap());
        project.create(&r, b"content", "branch:heads/main").unwrap();
        assert!(project.resource_exists(&r).unwrap());

        let details = project.get_resource("proj", "app").unwrap();
        assert_eq!(details.categories, vec!["branch:heads/main".to_string()]);
    }

    #[test]
    fn create_twice_fails() {
        let project = InMemoryTranslationProject::new();
        let r = resource();
        project.create(&r, b"a", "").unwrap();
        assert!(matches!(project.create(&r, b"b", ""), Err(ApiError::Request(_))));
    }

    #[test]
    fn update_missing_resource_is_not_found() {
        let project = InMemoryTranslationProject::new();
        assert!(matches!(
            project.update_content(&resource(), b"x"),
            Err(ApiError::NotFound { .. })
        ));
    }

    #[test]
    fn create_or_update_upserts_content() {
        let project = InMemoryTranslationProject::new();
        let r = resource();
        project.create_or_update(&r, b"v1").unwrap();
        project.create_or_update(&r, b"v2").unwrap();
        assert_eq!(project.resource("proj", "app").unwrap().content, b"v2");
    }

    #[test]
    fn calls_are_recorded_in_order() {
        let project = InMemoryTranslationProject::new();
        let r = resource();
        project.resource_exists(&r).unwrap();
        project.create_or_update(&r, b"v1").unwrap();
        assert_eq!(
            project.call_kinds(),
            vec![ApiCallKind::ResourceExists, ApiCallKind::CreateOrUpdate]
        );
    }

    #[test]
    fn injected_failure_is_returned_and_recorded() {
        let project = InMemoryTranslationProject::new();
        project.fail_on(ApiCallKind::ResourceExists).unwrap();
        assert!(matches!(
            project.resource_exists(&resource()),
            Err(ApiError::Request(_))
        ));
        assert_eq!(project.call_kinds(), vec![ApiCallKind::ResourceExists]);
    }
}
