//! The resource updater.
//!
//! For a resource and a pushed commit, the updater finds the resource's
//! source file in the commit tree and uploads it in one of two modes:
//!
//! - **Diff mode** (a diff point is configured): only phrases that are new or
//!   changed relative to the diff point are uploaded, through the
//!   branch-aware path. Caller-supplied categories are not applied.
//! - **Whole-file mode**: the full file is uploaded, through the branch-aware
//!   path when every branch is processed, or as a plain create-or-update.
//!
//! The branch-aware path checks whether the resource exists. If it does, its
//! categories are merged and updated before its content; if not, it is
//! created with content and categories in a single call. The check and the
//! write are not atomic: two concurrent deliveries for the same resource and
//! branch can interleave, and the last content write wins.
//!
//! Collaborator failures abort the update immediately; nothing is retried.

use std::sync::Arc;

use locsync_diff::diff_between;
use locsync_types::categories::{self, Categories, BRANCH_KEY};
use locsync_types::{ConfigError, TxResource};

use crate::api::{RepositoryApi, TranslationApi, TreeEntry};
use crate::config::RepoConfig;
use crate::error::UpdateResult;
use crate::logger::{TracingLogger, UpdateLogger};

/// How an entry's content reached the translation project.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadKind {
    /// A new resource was created with content and categories.
    Created,
    /// An existing resource got new categories, then new content.
    Updated,
    /// Content was uploaded without touching categories.
    CreatedOrUpdated,
}

/// What happened to one matching tree entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    Uploaded(UploadKind),
    /// Diff mode found nothing new or changed; nothing was uploaded.
    Unchanged,
    /// The entry's content could not be parsed; nothing was uploaded.
    Failed(String),
}

/// Per-entry results of one [`ResourceUpdater::update_resource`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub entries: Vec<(String, EntryOutcome)>,
}

impl UpdateReport {
    /// Returns `true` if no tree entry matched the resource.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that were uploaded.
    pub fn uploaded(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, EntryOutcome::Uploaded(_)))
            .count()
    }

    /// Entries whose content could not be parsed.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(path, outcome)| match outcome {
            EntryOutcome::Failed(reason) => Some((path.as_str(), reason.as_str())),
            _ => None,
        })
    }
}

/// Pushes source-file changes from repository commits to a translation
/// project.
///
/// An updater holds only immutable configuration and shared collaborator
/// handles, so one instance can serve concurrent deliveries.
pub struct ResourceUpdater {
    repo: RepoConfig,
    repo_api: Arc<dyn RepositoryApi>,
    tx_api: Arc<dyn TranslationApi>,
    logger: Arc<dyn UpdateLogger>,
}

impl ResourceUpdater {
    /// Create an updater that logs through [`TracingLogger`].
    pub fn new(
        repo: RepoConfig,
        repo_api: Arc<dyn RepositoryApi>,
        tx_api: Arc<dyn TranslationApi>,
    ) -> Self {
        Self {
            repo,
            repo_api,
            tx_api,
            logger: Arc::new(TracingLogger),
        }
    }

    /// Replace the logger.
    pub fn with_logger(mut self, logger: Arc<dyn UpdateLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn repo(&self) -> &RepoConfig {
        &self.repo
    }

    /// Upload `resource`'s source file as of `commit_sha`.
    ///
    /// In whole-file mode `categories` are merged on top of the resource's
    /// existing categories whenever the branch-aware path is taken. Diff mode
    /// ignores them: a diff upload keeps the resource's own categories. Returns
    /// one report entry per tree entry matching the resource's source file.
    ///
    /// # Errors
    ///
    /// - `Config`: the repository name or the resource's source file is blank
    /// - `Api`: any collaborator call failed; the update stops there
    pub fn update_resource(
        &self,
        resource: &dyn TxResource,
        commit_sha: &str,
        categories: &Categories,
    ) -> UpdateResult<UpdateReport> {
        self.repo.validate()?;
        if resource.source_file().trim().is_empty() {
            return Err(ConfigError::MissingField {
                context: format!("resource {}", resource.resource_slug()),
                field: "source_file".into(),
            }
            .into());
        }

        self.logger.info(&format!(
            "processing updated resource {} at {commit_sha}",
            resource.resource_slug()
        ));

        let commit = self.repo_api.get_commit(&self.repo.name, commit_sha)?;
        let tree = self.repo_api.tree(&self.repo.name, &commit.tree_sha)?;

        let mut report = UpdateReport::default();
        for entry in &tree.entries {
            self.logger.debug(&format!("tree entry: {}", entry.path));
            if entry.path != resource.source_file() {
                continue;
            }

            let outcome = match self.repo.diff_point() {
                Some(diff_point) => self.upload_diff(resource, entry, diff_point)?,
                None => self.upload_whole(resource, entry, categories)?,
            };
            report.entries.push((entry.path.clone(), outcome));
        }

        if report.is_empty() {
            self.logger.info(&format!(
                "{} not found in commit {commit_sha}",
                resource.source_file()
            ));
        }
        Ok(report)
    }

    fn upload_whole(
        &self,
        resource: &dyn TxResource,
        entry: &TreeEntry,
        categories: &Categories,
    ) -> UpdateResult<EntryOutcome> {
        let content = self.contents_of(&entry.sha)?;

        let kind = if self.repo.process_all_branches() {
            self.upload_by_branch(resource, &content, categories)?
        } else {
            self.tx_api.create_or_update(resource, &content)?;
            UploadKind::CreatedOrUpdated
        };
        Ok(EntryOutcome::Uploaded(kind))
    }

    fn upload_diff(
        &self,
        resource: &dyn TxResource,
        entry: &TreeEntry,
        diff_point: &str,
    ) -> UpdateResult<EntryOutcome> {
        let head = self.contents_of(&entry.sha)?;
        let base = self
            .repo_api
            .download(&self.repo.name, &entry.path, diff_point)?;

        match diff_between(&head, &base, resource) {
            Ok(Some(delta)) => {
                // Only the remote categories and the branch default apply.
                let kind = self.upload_by_branch(resource, &delta, &Categories::new())?;
                Ok(EntryOutcome::Uploaded(kind))
            }
            Ok(None) => {
                self.logger.info(&format!(
                    "no new or changed phrases in {} since {diff_point}",
                    entry.path
                ));
                Ok(EntryOutcome::Unchanged)
            }
            Err(e) => {
                self.logger
                    .warn(&format!("skipping {}: {e}", entry.path));
                Ok(EntryOutcome::Failed(e.to_string()))
            }
        }
    }

    fn upload_by_branch(
        &self,
        resource: &dyn TxResource,
        content: &[u8],
        extra: &Categories,
    ) -> UpdateResult<UploadKind> {
        let exists = self.tx_api.resource_exists(resource)?;

        let mut merged = if exists {
            self.categories_for(resource)?
        } else {
            Categories::new()
        };
        merged.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        if let Some(branch) = resource.branch() {
            merged
                .entry(BRANCH_KEY.to_string())
                .or_insert_with(|| branch.to_string());
        }
        let encoded = categories::encode(&merged);

        if exists {
            self.tx_api.update_details(resource, &encoded)?;
            self.tx_api.update_content(resource, content)?;
            self.logger
                .info(&format!("updated resource {}", resource.resource_slug()));
            Ok(UploadKind::Updated)
        } else {
            self.tx_api.create(resource, content, &encoded)?;
            self.logger
                .info(&format!("created resource {}", resource.resource_slug()));
            Ok(UploadKind::Created)
        }
    }

    fn categories_for(&self, resource: &dyn TxResource) -> UpdateResult<Categories> {
        let (project_slug, resource_slug) = resource.slugs();
        let details = self.tx_api.get_resource(project_slug, resource_slug)?;
        Ok(categories::decode_all(
            details.categories.iter().map(String::as_str),
        ))
    }

    fn contents_of(&self, sha: &str) -> UpdateResult<Vec<u8>> {
        let blob = self.repo_api.blob(&self.repo.name, sha)?;
        Ok(blob.decode()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_outcomes() {
        let report = UpdateReport {
            entries: vec![
                ("a.yml".into(), EntryOutcome::Uploaded(UploadKind::Created)),
                ("b.yml".into(), EntryOutcome::Unchanged),
                ("c.yml".into(), EntryOutcome::Failed("bad".into())),
            ],
        };
        assert!(!report.is_empty());
        assert_eq!(report.uploaded(), 1);
        assert_eq!(report.failures().collect::<Vec<_>>(), vec![("c.yml", "bad")]);
    }
}
