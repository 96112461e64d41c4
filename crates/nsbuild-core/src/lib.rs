//! Namespace sub-package resolution
//!
//! One logical source tree can be published as several independently
//! distributable sub-packages that share a root manifest. The manifest
//! declares them under `tool.pdm.namespace`:
//!
//! ```toml
//! [tool.pdm.namespace]
//! override = false
//!
//! [tool.pdm.namespace.packages.acme-client.project]
//! name = "acme-client"
//! dependencies = ["httpx>=0.27"]
//! ```
//!
//! When a build invocation carries a `namespace=<name>` setting, the
//! resolver rewrites the manifest in place for that one sub-package:
//! build-setting overrides replace entries of the build table, metadata is
//! either replaced wholesale (`override = true`) or structurally merged,
//! and the namespace declaration itself is removed so nested builds see an
//! ordinary manifest.
//!
//! # Architecture
//!
//! ```text
//!        host build pipeline
//!               |
//!         hooks::BuildHook          lifecycle surface
//!               |
//!    namespace reader / selector    which sub-package, if any
//!               |
//!        resolver::resolve          effective-manifest computation
//!               |
//!        merge::deep_merge          structural merge primitive
//! ```

pub mod diagnostics;
pub mod error;
pub mod hooks;
pub mod merge;
pub mod namespace;
pub mod resolver;

pub use diagnostics::{BufferSink, DiagnosticSink, TracingSink};
pub use error::{Error, Result};
pub use hooks::{BuildContext, BuildHook, BuildSettings, NamespaceHook};
pub use merge::deep_merge;
pub use namespace::{NAMESPACE_SETTING, NAMESPACE_TABLE_PATH, build_target, declared_targets, namespace_table};
pub use resolver::{MARKER_FLAG, resolution_done, resolve};
