//! Hook-level resolution scenarios
//!
//! Drives `NamespaceHook` the way the host pipeline does and checks the
//! observable manifest state after each path: ordinary builds, guarded
//! re-entry, both metadata modes, and operator mistakes.

use nsbuild_core::{
    BufferSink, BuildContext, BuildHook, BuildSettings, Error, MARKER_FLAG, NamespaceHook,
    resolution_done,
};
use nsbuild_manifest::Manifest;
use pretty_assertions::assert_eq;
use toml::Value;

fn settings(pairs: &[(&str, &str)]) -> BuildSettings {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn initialized(content: &str, pairs: &[(&str, &str)]) -> BuildContext {
    let manifest = Manifest::parse(content).unwrap();
    let mut context = BuildContext::new("/work/acme", manifest, settings(pairs));
    NamespaceHook::with_tracing()
        .initialize(&mut context)
        .unwrap();
    context
}

#[test]
fn plain_manifest_passes_through_untouched() {
    let content = r#"
[project]
name = "acme"
version = "1.0.0"
dependencies = ["click>=8"]
"#;
    let context = initialized(content, &[]);
    assert_eq!(context.manifest(), &Manifest::parse(content).unwrap());
}

#[test]
fn guarded_manifest_passes_through_even_with_target_request() {
    let content = format!(
        r#"
[project]
name = "acme"
version = "1.0.0"

[tool.pdm.build]
{MARKER_FLAG} = true

[tool.pdm.namespace.packages.acme-client.project]
name = "acme-client"
"#
    );
    let context = initialized(&content, &[("namespace", "acme-client")]);
    assert_eq!(context.manifest(), &Manifest::parse(&content).unwrap());
}

#[test]
fn unknown_target_fails_and_leaves_manifest_unchanged() {
    let content = r#"
[project]
name = "acme"
version = "1.0.0"

[tool.pdm.namespace.packages.acme-client.project]
name = "acme-client"
"#;
    let manifest = Manifest::parse(content).unwrap();
    let mut context = BuildContext::new(
        "/work/acme",
        manifest.clone(),
        settings(&[("namespace", "acme-cilent")]),
    );

    let error = NamespaceHook::with_tracing()
        .initialize(&mut context)
        .unwrap_err();

    assert!(matches!(error, Error::UnknownNamespaceTarget { name } if name == "acme-cilent"));
    assert_eq!(context.manifest(), &manifest);
}

#[test]
fn merge_mode_end_to_end() {
    let content = r#"
[project]
name = "acme"
version = "1.0.0"
dependencies = ["shared-core>=1"]

[tool.pdm.namespace.packages.acme-client.project]
name = "acme-client"
dependencies = ["httpx>=0.27"]
"#;
    let context = initialized(content, &[("namespace", "acme-client")]);
    let manifest = context.into_manifest();

    let build = manifest.build_config().unwrap();
    assert_eq!(build[MARKER_FLAG].as_bool(), Some(true));

    assert_eq!(manifest.table_at(&["tool", "pdm", "namespace"]).unwrap(), None);

    let metadata = manifest.metadata().unwrap();
    let dependencies: Vec<&str> = metadata["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(dependencies, ["httpx>=0.27"]);
    assert!(resolution_done(&manifest));
}

#[test]
fn override_mode_drops_root_only_fields() {
    let content = r#"
[project]
name = "acme"
version = "1.0.0"
description = "root description"

[tool.pdm.namespace]
override = true

[tool.pdm.namespace.packages.acme-client.project]
name = "acme-client"
version = "0.1.0"
"#;
    let context = initialized(content, &[("namespace", "acme-client")]);
    let metadata = context.into_manifest();
    let metadata = metadata.metadata().unwrap();

    assert_eq!(metadata.len(), 2, "only the fragment's fields survive");
    assert!(metadata.get("description").is_none());
}

#[test]
fn misshapen_declaration_is_a_config_shape_error() {
    let content = r#"
[project]
name = "acme"
version = "1.0.0"

[tool.pdm]
namespace = ["not", "a", "table"]
"#;
    let manifest = Manifest::parse(content).unwrap();
    let mut context = BuildContext::new("/work/acme", manifest, settings(&[]));

    let error = NamespaceHook::new(Box::new(BufferSink::new()))
        .initialize(&mut context)
        .unwrap_err();

    assert!(matches!(error, Error::ConfigShape { path } if path == "tool.pdm.namespace"));
}
