//! Build lifecycle surface
//!
//! The host pipeline drives a build through a fixed set of lifecycle
//! points; [`BuildHook`] mirrors them with default no-op implementations.
//! [`NamespaceHook`] is the one hook this crate ships: it rewrites the
//! manifest at initialize time and leaves every other phase alone.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use nsbuild_manifest::Manifest;

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::Result;
use crate::namespace::build_target;
use crate::resolver::{resolution_done, resolve};

/// Opaque per-invocation settings supplied by the build command.
pub type BuildSettings = BTreeMap<String, String>;

/// State shared with hooks for the duration of one build invocation.
///
/// Owns the manifest; hooks mutate it in place and the packaging pipeline
/// consumes whatever is left when the hooks are done.
#[derive(Debug)]
pub struct BuildContext {
    root: PathBuf,
    manifest: Manifest,
    settings: BuildSettings,
}

impl BuildContext {
    pub fn new(root: impl Into<PathBuf>, manifest: Manifest, settings: BuildSettings) -> Self {
        Self {
            root: root.into(),
            manifest,
            settings,
        }
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn manifest_mut(&mut self) -> &mut Manifest {
        &mut self.manifest
    }

    /// The build-time settings for this invocation, read-only.
    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Take the manifest out of the context when the build is done.
    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }
}

/// Lifecycle hooks called by the host pipeline, one per build phase.
pub trait BuildHook {
    /// Whether the hook participates in this build.
    fn enabled(&self, _context: &BuildContext) -> bool {
        true
    }

    /// Called before the build starts, for hooks holding cleanable state.
    fn clean(&mut self, _context: &mut BuildContext) -> Result<()> {
        Ok(())
    }

    /// Called before file collection; manifest changes made here are seen
    /// by every later phase.
    fn initialize(&mut self, _context: &mut BuildContext) -> Result<()> {
        Ok(())
    }

    /// Called in the packaging subprocess with the extra build arguments.
    /// Context changes made here are not written back to the parent build.
    fn update_build_args(
        &mut self,
        _context: &mut BuildContext,
        _args: &mut BTreeMap<String, String>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called with the collected `{archive path -> source path}` mapping.
    fn update_files(
        &mut self,
        _context: &mut BuildContext,
        _files: &mut BTreeMap<String, PathBuf>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after the artifact is written.
    fn finalize(&mut self, _context: &mut BuildContext, _artifact: &Path) -> Result<()> {
        Ok(())
    }
}

/// The namespace-resolving hook.
pub struct NamespaceHook {
    diagnostics: Box<dyn DiagnosticSink>,
}

impl NamespaceHook {
    pub fn new(diagnostics: Box<dyn DiagnosticSink>) -> Self {
        Self { diagnostics }
    }

    /// Hook with diagnostics forwarded to `tracing`.
    pub fn with_tracing() -> Self {
        Self::new(Box::new(TracingSink))
    }
}

impl Default for NamespaceHook {
    fn default() -> Self {
        Self::with_tracing()
    }
}

impl BuildHook for NamespaceHook {
    fn initialize(&mut self, context: &mut BuildContext) -> Result<()> {
        if resolution_done(context.manifest()) {
            // A nested invocation received the rewritten manifest; running
            // the non-idempotent merge again would corrupt it.
            return Ok(());
        }

        let Some(target) = build_target(
            context.settings(),
            context.manifest(),
            self.diagnostics.as_mut(),
        )?
        else {
            return Ok(());
        };

        tracing::debug!(namespace = %target, "Resolving namespace build");
        resolve(context.manifest_mut(), &target, self.diagnostics.as_mut())
    }
}
