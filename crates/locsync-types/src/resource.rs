//! Translation resources and their branch-scoped variants.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::slug::slugify;
use crate::tx_config::TxConfig;

/// Placeholder replaced by a language code in translation file patterns.
pub const LANG_PLACEHOLDER: &str = "<lang>";

/// A single translatable file within a translation project.
///
/// Resources are immutable; they are built from the project's tx config and
/// looked up by slug per request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    project_slug: String,
    resource_slug: String,
    resource_type: String,
    source_lang: String,
    source_file: String,
    lang_map: String,
    translation_file: String,
}

impl Resource {
    /// Create a resource.
    ///
    /// `lang_map` uses the `remote:local` pair syntax of the tx config
    /// (`"ko-KR:ko, pt-BR:pt"`) and may be empty. `translation_file` is a path
    /// pattern containing [`LANG_PLACEHOLDER`].
    pub fn new(
        project_slug: impl Into<String>,
        resource_slug: impl Into<String>,
        resource_type: impl Into<String>,
        source_lang: impl Into<String>,
        source_file: impl Into<String>,
        lang_map: impl Into<String>,
        translation_file: impl Into<String>,
    ) -> Self {
        Self {
            project_slug: project_slug.into(),
            resource_slug: resource_slug.into(),
            resource_type: resource_type.into(),
            source_lang: source_lang.into(),
            source_file: source_file.into(),
            lang_map: lang_map.into(),
            translation_file: translation_file.into(),
        }
    }

    pub fn project_slug(&self) -> &str {
        &self.project_slug
    }

    pub fn resource_slug(&self) -> &str {
        &self.resource_slug
    }

    /// The declared document type, e.g. `YAML` or `KEYVALUEJSON`.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    /// Repository path of the source-language file.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn translation_file(&self) -> &str {
        &self.translation_file
    }

    /// Parse the language map into `remote -> local` pairs.
    ///
    /// Malformed pairs (no `:`) are skipped.
    pub fn lang_map(&self) -> BTreeMap<String, String> {
        self.lang_map
            .split(',')
            .filter_map(|pair| {
                let (remote, local) = pair.split_once(':')?;
                let (remote, local) = (remote.trim(), local.trim());
                if remote.is_empty() || local.is_empty() {
                    return None;
                }
                Some((remote.to_string(), local.to_string()))
            })
            .collect()
    }

    /// The repository path holding translations for `language`.
    ///
    /// `language` is the platform's language code; it is mapped through
    /// [`Resource::lang_map`] before substitution.
    pub fn translation_path(&self, language: &str) -> String {
        let local = self
            .lang_map()
            .remove(language)
            .unwrap_or_else(|| language.to_string());
        self.translation_file.replace(LANG_PLACEHOLDER, &local)
    }
}

/// A [`Resource`] tracked separately per branch.
///
/// The effective slug is `<resource_slug>-<slugify(branch)>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BranchResource {
    resource: Resource,
    branch: String,
    slug: String,
}

impl BranchResource {
    pub fn new(resource: Resource, branch: impl Into<String>) -> Self {
        let branch = branch.into();
        let slug = Self::scoped_slug(resource.resource_slug(), &branch);
        Self {
            resource,
            branch,
            slug,
        }
    }

    /// The slug a resource named `resource_slug` gets on `branch`.
    ///
    /// ```
    /// use locsync_types::BranchResource;
    ///
    /// assert_eq!(
    ///     BranchResource::scoped_slug("resource_slug", "heads/my_branch"),
    ///     "resource_slug-heads_my_branch"
    /// );
    /// ```
    pub fn scoped_slug(resource_slug: &str, branch: &str) -> String {
        format!("{resource_slug}-{}", slugify(branch))
    }

    /// Find the resource in `config` whose branch-scoped slug for `branch`
    /// equals `slug`.
    ///
    /// Returns `None` when no resource matches, including when `slug` was
    /// derived from a different branch.
    pub fn find(config: &TxConfig, slug: &str, branch: &str) -> Option<Self> {
        config
            .resources()
            .iter()
            .map(|resource| Self::new(resource.clone(), branch))
            .find(|candidate| candidate.slug == slug)
    }

    /// The base resource, with its unscoped slug.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }
}

/// Common view over plain and branch-scoped resources.
///
/// Collaborator APIs address resources through this trait so that both
/// flavors can be uploaded by the same code path.
pub trait TxResource: fmt::Debug + Send + Sync {
    /// The underlying resource declaration.
    fn base(&self) -> &Resource;

    /// The slug this resource is stored under on the translation platform.
    fn resource_slug(&self) -> &str;

    /// The branch this resource is scoped to, if any.
    fn branch(&self) -> Option<&str>;

    fn project_slug(&self) -> &str {
        self.base().project_slug()
    }

    fn source_file(&self) -> &str {
        self.base().source_file()
    }

    fn resource_type(&self) -> &str {
        self.base().resource_type()
    }

    fn source_lang(&self) -> &str {
        self.base().source_lang()
    }

    /// `(project_slug, resource_slug)` as used by the platform's lookup calls.
    fn slugs(&self) -> (&str, &str) {
        (self.project_slug(), self.resource_slug())
    }
}

impl TxResource for Resource {
    fn base(&self) -> &Resource {
        self
    }

    fn resource_slug(&self) -> &str {
        &self.resource_slug
    }

    fn branch(&self) -> Option<&str> {
        None
    }
}

impl TxResource for BranchResource {
    fn base(&self) -> &Resource {
        &self.resource
    }

    fn resource_slug(&self) -> &str {
        &self.slug
    }

    fn branch(&self) -> Option<&str> {
        Some(&self.branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCE_SLUG: &str = "resource_slug";
    const SLUG_WITH_BRANCH: &str = "resource_slug-heads_my_branch";
    const BRANCH: &str = "heads/my_branch";

    fn base_resource() -> Resource {
        Resource::new(
            "project_slug",
            RESOURCE_SLUG,
            "type",
            "source_lang",
            "source_file",
            "ko-KR:ko",
            "translations/<lang>/file.yml",
        )
    }

    fn config() -> TxConfig {
        TxConfig::new(vec![base_resource()], BTreeMap::new())
    }

    #[test]
    fn branch_slug_appends_slugified_branch() {
        let resource = BranchResource::new(base_resource(), BRANCH);
        assert_eq!(resource.resource().resource_slug(), RESOURCE_SLUG);
        assert_eq!(TxResource::resource_slug(&resource), SLUG_WITH_BRANCH);
    }

    #[test]
    fn find_recovers_resource_and_branch() {
        let found = BranchResource::find(&config(), SLUG_WITH_BRANCH, BRANCH).unwrap();
        assert_eq!(found.resource(), &base_resource());
        assert_eq!(found.branch(), BRANCH);
    }

    #[test]
    fn find_with_unknown_slug_is_none() {
        assert!(BranchResource::find(&config(), "foobar", BRANCH).is_none());
    }

    #[test]
    fn find_with_other_branch_is_none() {
        assert!(BranchResource::find(&config(), SLUG_WITH_BRANCH, "foobar").is_none());
    }

    #[test]
    fn plain_resource_has_no_branch() {
        let resource = base_resource();
        assert_eq!(resource.branch(), None);
        assert_eq!(resource.slugs(), ("project_slug", RESOURCE_SLUG));
    }

    #[test]
    fn lang_map_parses_pairs() {
        let resource = Resource::new("p", "r", "YAML", "en", "en.yml", "ko-KR:ko, pt-BR : pt,bogus", "<lang>.yml");
        let map = resource.lang_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["ko-KR"], "ko");
        assert_eq!(map["pt-BR"], "pt");
    }

    #[test]
    fn translation_path_uses_mapped_language() {
        let resource = base_resource();
        assert_eq!(resource.translation_path("ko-KR"), "translations/ko/file.yml");
        assert_eq!(resource.translation_path("de"), "translations/de/file.yml");
    }
}
