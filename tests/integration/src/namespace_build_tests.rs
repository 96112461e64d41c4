//! End-to-end namespace build scenarios
//!
//! Exercises the complete flow a build invocation goes through: parse the
//! manifest, run the initialize hook, and hand the rewritten manifest to
//! the (simulated) packaging pipeline, including the serialize/reparse
//! boundary a nested build crosses.

use nsbuild_core::{
    BuildContext, BuildHook, BuildSettings, MARKER_FLAG, NamespaceHook, resolution_done,
};
use nsbuild_manifest::Manifest;
use toml::Value;

const ROOT: &str = r#"
[project]
name = "acme"
version = "1.0.0"
description = "one source tree, several distributions"
dependencies = ["shared-core>=1"]
requires-python = ">=3.10"

[tool.pdm.build]
package-dir = "src"

[tool.pdm.namespace.packages.acme-client]
includes = ["src/acme/client"]

[tool.pdm.namespace.packages.acme-client.project]
name = "acme-client"
dependencies = ["bar"]

[tool.pdm.namespace.packages.acme-server.project]
name = "acme-server"
dependencies = ["uvicorn>=0.30"]
"#;

fn settings(pairs: &[(&str, &str)]) -> BuildSettings {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn run_initialize(content: &str, pairs: &[(&str, &str)]) -> Manifest {
    let mut context = BuildContext::new(
        "/work/acme",
        Manifest::parse(content).unwrap(),
        settings(pairs),
    );
    NamespaceHook::with_tracing()
        .initialize(&mut context)
        .unwrap();
    context.into_manifest()
}

#[test]
fn full_merge_mode_build() {
    let manifest = run_initialize(ROOT, &[("namespace", "acme-client")]);

    // The packaging pipeline must see the marker and no declaration.
    assert_eq!(
        manifest.build_config().unwrap()[MARKER_FLAG].as_bool(),
        Some(true)
    );
    assert_eq!(
        manifest.table_at(&["tool", "pdm", "namespace"]).unwrap(),
        None
    );

    // Metadata is merged, dependencies are package-specific.
    let metadata = manifest.metadata().unwrap();
    assert_eq!(metadata["name"].as_str(), Some("acme-client"));
    assert_eq!(metadata["version"].as_str(), Some("1.0.0"));
    assert_eq!(
        metadata["description"].as_str(),
        Some("one source tree, several distributions")
    );
    let dependencies: Vec<&str> = metadata["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(dependencies, ["bar"]);

    // Sibling keys of the package definition land in the build table.
    let build = manifest.build_config().unwrap();
    assert_eq!(build["package-dir"].as_str(), Some("src"));
    assert_eq!(
        build["includes"].as_array().unwrap()[0].as_str(),
        Some("src/acme/client")
    );
}

#[test]
fn nested_build_sees_an_ordinary_manifest() {
    let manifest = run_initialize(ROOT, &[("namespace", "acme-client")]);

    // A packaging subprocess receives a freshly serialized copy.
    let rendered = manifest.render().unwrap();
    let reparsed = Manifest::parse(&rendered).unwrap();
    assert!(resolution_done(&reparsed));

    // Re-entry with the same settings: the marker short-circuits before
    // target selection, so the missing declaration is never a problem.
    let mut context = BuildContext::new(
        "/work/acme",
        reparsed.clone(),
        settings(&[("namespace", "acme-client")]),
    );
    NamespaceHook::with_tracing()
        .initialize(&mut context)
        .unwrap();
    assert_eq!(context.manifest(), &reparsed);

    // Re-entry without settings is equally a no-op.
    let mut context = BuildContext::new("/work/acme", reparsed.clone(), settings(&[]));
    NamespaceHook::with_tracing()
        .initialize(&mut context)
        .unwrap();
    assert_eq!(context.manifest(), &reparsed);
}

#[test]
fn sibling_targets_resolve_independently() {
    let client = run_initialize(ROOT, &[("namespace", "acme-client")]);
    let server = run_initialize(ROOT, &[("namespace", "acme-server")]);

    assert_eq!(
        client.metadata().unwrap()["name"].as_str(),
        Some("acme-client")
    );
    assert_eq!(
        server.metadata().unwrap()["name"].as_str(),
        Some("acme-server")
    );

    let server_dependencies: Vec<&str> = server.metadata().unwrap()["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(server_dependencies, ["uvicorn>=0.30"]);
}

#[test]
fn ordinary_build_passes_the_manifest_through() {
    let manifest = run_initialize(ROOT, &[]);
    assert_eq!(manifest, Manifest::parse(ROOT).unwrap());

    let plain = "[project]\nname = \"plain\"\nversion = \"0.1.0\"\n";
    let manifest = run_initialize(plain, &[]);
    assert_eq!(manifest, Manifest::parse(plain).unwrap());
}

#[test]
fn resolved_manifest_still_validates() {
    let manifest = run_initialize(ROOT, &[("namespace", "acme-server")]);
    manifest.validate().unwrap();
}
