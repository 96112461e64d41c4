//! Namespace declaration reader and build-target selection
//!
//! The declaration lives at `tool.pdm.namespace`: a `packages` table keyed
//! by sub-package name plus an `override` flag governing merge mode. A
//! manifest without the declaration is an ordinary project, not an error.

use toml::{Table, Value};

use nsbuild_manifest::Manifest;

use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, Result};
use crate::hooks::BuildSettings;

/// Dotted location of the namespace declaration.
pub const NAMESPACE_TABLE_PATH: [&str; 3] = ["tool", "pdm", "namespace"];

/// Build-time settings key naming the requested sub-package.
pub const NAMESPACE_SETTING: &str = "namespace";

/// Read the namespace declaration from the manifest.
///
/// Returns an empty table when the manifest carries no declaration.
/// Returns [`Error::ConfigShape`] when the declaration or its `packages`
/// field is present but not a table.
pub fn namespace_table(manifest: &Manifest) -> Result<Table> {
    let namespace = match manifest.table_at(&NAMESPACE_TABLE_PATH) {
        Ok(None) => return Ok(Table::new()),
        Ok(Some(table)) => table,
        Err(nsbuild_manifest::Error::NotATable { path }) => {
            return Err(Error::ConfigShape { path });
        }
        Err(other) => return Err(Error::Manifest(other)),
    };

    if let Some(packages) = namespace.get("packages")
        && !packages.is_table()
    {
        return Err(Error::ConfigShape {
            path: format!("{}.packages", NAMESPACE_TABLE_PATH.join(".")),
        });
    }

    Ok(namespace.clone())
}

/// The declared sub-package names, in manifest order.
pub fn declared_targets(namespace: &Table) -> Vec<String> {
    namespace
        .get("packages")
        .and_then(Value::as_table)
        .map(|packages| packages.keys().cloned().collect())
        .unwrap_or_default()
}

/// Decide which sub-package this invocation targets.
///
/// No `namespace` entry in the settings means an ordinary build, which is
/// the common case, not an error. A name that is not declared is reported as
/// [`Error::UnknownNamespaceTarget`]: it indicates an operator typo at the
/// build-invocation boundary and must never be silently ignored.
pub fn build_target(
    settings: &BuildSettings,
    manifest: &Manifest,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<Option<String>> {
    let namespace = namespace_table(manifest)?;
    let targets = declared_targets(&namespace);

    diagnostics.emit(&format!("namespace settings: {settings:?}"));
    diagnostics.emit(&format!("namespace targets: {targets:?}"));

    match settings.get(NAMESPACE_SETTING).map(String::as_str) {
        None | Some("") => Ok(None),
        Some(name) if targets.iter().any(|target| target == name) => Ok(Some(name.to_string())),
        Some(name) => Err(Error::UnknownNamespaceTarget {
            name: name.to_string(),
        }),
    }
}
