//! The resolve command
//!
//! Runs the namespace resolution the build hook performs at initialize
//! time and prints the effective manifest, so operators can inspect what
//! a sub-package build will actually package.

use std::path::Path;

use nsbuild_core::{BuildContext, BuildHook, BuildSettings, NAMESPACE_SETTING, NamespaceHook};
use nsbuild_manifest::Manifest;

use crate::error::Result;

pub fn run_resolve(manifest_path: &Path, namespace: &str) -> Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    let root = manifest_path.parent().unwrap_or(Path::new("."));

    let mut settings = BuildSettings::new();
    settings.insert(NAMESPACE_SETTING.to_string(), namespace.to_string());

    let mut context = BuildContext::new(root, manifest, settings);
    NamespaceHook::with_tracing().initialize(&mut context)?;

    print!("{}", context.into_manifest().render()?);
    Ok(())
}
