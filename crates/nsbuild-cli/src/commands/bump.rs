//! The bump command
//!
//! Reads the current version from the manifest, applies the requested
//! increment (or derives one from commit history), and prints the result.
//! The resulting version is the only thing written to stdout so the
//! command composes in scripts; status text goes to stderr.

use std::path::Path;

use toml::Value;

use nsbuild_git::GitProvider;
use nsbuild_manifest::Manifest;
use nsbuild_version::Version;

use crate::cli::BumpAction;
use crate::error::{CliError, Result};

/// Tagging flags for the bump command.
pub struct TagOptions {
    /// Create a git tag for the resulting version.
    pub create: bool,
    /// Allow tagging from a dirty working tree.
    pub allow_dirty: bool,
    /// Prepend `v` to the tag name.
    pub prefix: bool,
}

pub fn run_bump(
    manifest_path: &Path,
    action: Option<BumpAction>,
    options: TagOptions,
) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    let current = current_version(&manifest, manifest_path)?;

    let next = match &action {
        None => None,
        Some(action) => Some(match action.bump() {
            Some(bump) => bump.apply(&current),
            None => suggest(manifest_path, &current)?,
        }),
    };

    match next {
        Some(next) => {
            if options.create {
                if next != current {
                    create_tag(&next, manifest_path, &options)?;
                } else {
                    eprintln!("computed version equals the current version, not creating a tag");
                }
            }
            eprintln!("new version will be:");
            println!("{next}");
        }
        None => {
            eprintln!("current version is:");
            println!("{current}");
            if options.create {
                create_tag(&current, manifest_path, &options)?;
            }
        }
    }

    Ok(())
}

/// The declared `project.version`.
///
/// A manifest without one (or with a dynamic version) cannot be bumped
/// from here; that is an operator error, not a silent no-op.
fn current_version(manifest: &Manifest, path: &Path) -> Result<Version> {
    let version = manifest
        .metadata()
        .and_then(|metadata| metadata.get("version"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            CliError::user(format!(
                "{} does not declare project.version",
                path.display()
            ))
        })?;
    Ok(Version::parse(version)?)
}

fn suggest(manifest_path: &Path, current: &Version) -> Result<Version> {
    let git = GitProvider::discover(project_root(manifest_path))?;
    Ok(git.suggest_next(current)?)
}

/// Tag the repository, unless the working tree forbids it.
///
/// A dirty tree without `--dirty` is the one expected non-fatal outcome:
/// a diagnostic on stderr, no tag, and the command continues.
fn create_tag(version: &Version, manifest_path: &Path, options: &TagOptions) -> Result<()> {
    let git = GitProvider::discover(project_root(manifest_path))?;

    if !git.is_clean()? && !options.allow_dirty {
        eprintln!("repository is dirty, not creating a tag");
        return Ok(());
    }

    let name = git.create_version_tag(version, options.prefix)?;
    eprintln!("created tag {name} from the resulting version");
    Ok(())
}

fn project_root(manifest_path: &Path) -> &Path {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
