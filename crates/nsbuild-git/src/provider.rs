//! Repository provider built on git2

use std::path::Path;

use git2::{ObjectType, Repository, StatusOptions};

use nsbuild_version::Version;

use crate::error::{Error, Result};
use crate::suggest::classify_messages;

/// A tag whose name parses as a version.
#[derive(Debug, Clone)]
pub struct VersionTag {
    /// The tag name as it appears in the repository (prefix included).
    pub name: String,
    pub version: Version,
}

/// Git operations for the bump command.
pub struct GitProvider {
    repo: Repository,
}

impl GitProvider {
    /// Discover the repository containing `path`.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| Error::NotARepository {
            path: path.to_path_buf(),
        })?;
        Ok(Self { repo })
    }

    /// Whether the working tree has no changes.
    ///
    /// Untracked files count as changes; ignored files do not.
    pub fn is_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(true).include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }

    /// Create a lightweight tag for `version` at HEAD.
    ///
    /// With `prefix` the tag is named `v{version}`, otherwise `{version}`.
    /// Returns the tag name.
    pub fn create_version_tag(&self, version: &Version, prefix: bool) -> Result<String> {
        let name = if prefix {
            format!("v{version}")
        } else {
            version.to_string()
        };

        if self
            .repo
            .refname_to_id(&format!("refs/tags/{name}"))
            .is_ok()
        {
            return Err(Error::TagExists { name });
        }

        let head = self.repo.head()?.peel(ObjectType::Commit)?;
        self.repo.tag_lightweight(&name, &head, false)?;
        tracing::debug!(tag = %name, "Created version tag");
        Ok(name)
    }

    /// The highest version among tags whose names parse as versions.
    ///
    /// Tags that do not parse (release candidates of other schemes,
    /// deployment markers) are skipped.
    pub fn latest_version_tag(&self) -> Result<Option<VersionTag>> {
        let names = self.repo.tag_names(None)?;
        let latest = names
            .iter()
            .flatten()
            .filter_map(|name| {
                Version::parse(name).ok().map(|version| VersionTag {
                    name: name.to_string(),
                    version,
                })
            })
            .max_by(|a, b| a.version.cmp(&b.version));
        Ok(latest)
    }

    /// Suggest the next version from the commits since the latest
    /// version tag.
    ///
    /// Messages are classified conventional-commit style: a breaking
    /// change suggests a major bump, a feature a minor one, anything else
    /// a micro bump. With no commits to read, a micro bump is suggested.
    pub fn suggest_next(&self, current: &Version) -> Result<Version> {
        let latest = self.latest_version_tag()?;
        let messages = self.messages_since(latest.as_ref().map(|tag| tag.name.as_str()))?;
        let bump = classify_messages(messages.iter().map(String::as_str));
        Ok(bump.apply(current))
    }

    /// Commit messages from HEAD back to (excluding) the given tag.
    fn messages_since(&self, tag: Option<&str>) -> Result<Vec<String>> {
        let mut walk = self.repo.revwalk()?;
        walk.push_head()?;
        if let Some(tag) = tag {
            let tagged = self
                .repo
                .revparse_single(&format!("refs/tags/{tag}"))?
                .peel_to_commit()?;
            walk.hide(tagged.id())?;
        }

        let mut messages = Vec::new();
        for oid in walk {
            let commit = self.repo.find_commit(oid?)?;
            if let Some(message) = commit.message() {
                messages.push(message.to_string());
            }
        }
        Ok(messages)
    }
}
