//! Effective-manifest computation for one namespace target
//!
//! Rewrites the root manifest in place so the rest of the build pipeline
//! packages the selected sub-package: build-setting overrides land in the
//! build table, metadata is replaced or merged per the declaration's
//! `override` flag, and the declaration itself is removed so a nested
//! build invocation sees an ordinary manifest.

use toml::{Table, Value};

use nsbuild_manifest::{METADATA_TABLE, Manifest};

use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, Result};
use crate::merge::deep_merge;
use crate::namespace::{NAMESPACE_TABLE_PATH, namespace_table};

/// Build-table flag recording that resolution already ran.
pub const MARKER_FLAG: &str = "namespace_build";

/// True when the manifest already carries the resolution marker.
///
/// Callers check this before invoking [`resolve`]; a manifest that was
/// already rewritten must not be rewritten again (the merge step is not
/// idempotent).
pub fn resolution_done(manifest: &Manifest) -> bool {
    manifest
        .build_config()
        .and_then(|build| build.get(MARKER_FLAG))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Rewrite the manifest for the given sub-package.
///
/// On failure the manifest may be partially rewritten; the caller aborts
/// the build, so no rollback is attempted.
pub fn resolve(
    manifest: &mut Manifest,
    target: &str,
    diagnostics: &mut dyn DiagnosticSink,
) -> Result<()> {
    let namespace = namespace_table(manifest)?;
    let using_override = namespace
        .get("override")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut definition = match namespace
        .get("packages")
        .and_then(Value::as_table)
        .and_then(|packages| packages.get(target))
    {
        None => {
            return Err(Error::UnknownNamespaceTarget {
                name: target.to_string(),
            });
        }
        Some(Value::Table(table)) => table.clone(),
        Some(_) => {
            return Err(Error::MalformedPackageDefinition {
                name: target.to_string(),
            });
        }
    };

    let metadata_fragment = match definition.remove(METADATA_TABLE) {
        None => Table::new(),
        Some(Value::Table(table)) => table,
        Some(_) => {
            return Err(Error::MalformedPackageMetadata {
                name: target.to_string(),
            });
        }
    };

    // Whatever remains of the definition overrides the build table by
    // plain key overwrite: build settings are replaced per target, never
    // deep-merged.
    let build = manifest.build_config_mut()?;
    for (key, value) in definition {
        build.insert(key, value);
    }
    build.insert(MARKER_FLAG.to_string(), Value::Boolean(true));
    diagnostics.emit(&format!("namespace build config:\n{}", dump(build)));

    if using_override {
        manifest
            .data_mut()
            .insert(METADATA_TABLE.to_string(), Value::Table(metadata_fragment));
    } else {
        let dependencies = metadata_fragment
            .get("dependencies")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        let optional_dependencies = metadata_fragment
            .get("optional-dependencies")
            .cloned()
            .unwrap_or_else(|| Value::Table(Table::new()));

        let metadata = manifest.metadata_mut()?;
        deep_merge(metadata, &metadata_fragment)?;
        // The generic merge concatenates the dependency arrays; these two
        // fields must end up exactly package-specific.
        metadata.insert("dependencies".to_string(), dependencies);
        metadata.insert(
            "optional-dependencies".to_string(),
            optional_dependencies,
        );
    }

    // Drop the declaration so nested builds cannot re-trigger resolution
    // or reference unavailable targets.
    if let Some(parent) = manifest.table_at_mut(&NAMESPACE_TABLE_PATH[..2])? {
        parent.remove(NAMESPACE_TABLE_PATH[2]);
    }

    manifest.validate()?;

    if let Some(metadata) = manifest.metadata() {
        diagnostics.emit(&format!("namespace metadata:\n{}", dump(metadata)));
    }

    Ok(())
}

fn dump(table: &Table) -> String {
    serde_json::to_string_pretty(table).unwrap_or_else(|_| "<unserializable>".to_string())
}
