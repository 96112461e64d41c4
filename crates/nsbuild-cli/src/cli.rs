//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use nsbuild_version::{Bump, PreLabel};

/// nsbuild - Build tools for namespace sub-packages
#[derive(Parser, Debug)]
#[command(name = "nsbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the next project version
    ///
    /// Reads the current version from the manifest's project table, applies
    /// the requested increment, and writes the resulting version to stdout
    /// (status text goes to stderr). Without an action the current version
    /// is printed.
    ///
    /// Examples:
    ///   nsbuild bump minor           # 1.2.3 -> 1.3.0
    ///   nsbuild bump pre --label rc  # 1.2.3 -> 1.2.4rc1
    ///   nsbuild bump suggest         # next version from commit history
    ///   nsbuild bump micro --tag     # bump and tag the repository
    Bump {
        /// The increment to apply
        #[command(subcommand)]
        action: Option<BumpAction>,

        /// Create a git tag for the resulting version
        #[arg(long, global = true)]
        tag: bool,

        /// Allow tagging from a dirty working tree
        #[arg(long, global = true)]
        dirty: bool,

        /// Name the tag without the leading 'v'
        #[arg(long, global = true)]
        no_tag_prefix: bool,

        /// Path to the project manifest
        #[arg(long, global = true, default_value = "pyproject.toml")]
        manifest: PathBuf,
    },

    /// Print the effective manifest for a namespace sub-package
    ///
    /// Runs the same resolution the build hook performs at initialize time
    /// and writes the rewritten manifest as TOML to stdout.
    Resolve {
        /// The declared sub-package to resolve
        #[arg(short, long)]
        namespace: String,

        /// Path to the project manifest
        #[arg(long, default_value = "pyproject.toml")]
        manifest: PathBuf,
    },
}

/// Version increment actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BumpAction {
    /// Increment the major release component
    Major,
    /// Increment the minor release component
    Minor,
    /// Increment the micro release component
    Micro,
    /// Increment the version epoch
    Epoch,
    /// Start or advance a dev-release counter
    Dev,
    /// Start or advance a post-release counter
    Post,
    /// Start a pre-release on the next micro, or advance the current one
    Pre {
        /// Pre-release rung to use
        #[arg(long, value_enum, default_value = "alpha")]
        label: PreRung,
    },
    /// Next major release as a pre-release
    PreMajor,
    /// Next minor release as a pre-release
    PreMinor,
    /// Next micro release as a pre-release
    PrePatch,
    /// Advance the current pre-release number
    PreRelease,
    /// Strip pre/post/dev suffixes
    Finalize,
    /// Strip pre/post/dev suffixes and the epoch
    Reset,
    /// Suggest the next version from commit history
    Suggest,
}

impl BumpAction {
    /// The increment this action maps to; `None` for `Suggest`, which is
    /// derived from history instead.
    pub fn bump(&self) -> Option<Bump> {
        match self {
            Self::Major => Some(Bump::Major),
            Self::Minor => Some(Bump::Minor),
            Self::Micro => Some(Bump::Micro),
            Self::Epoch => Some(Bump::Epoch),
            Self::Dev => Some(Bump::Dev),
            Self::Post => Some(Bump::Post),
            Self::Pre { label } => Some(Bump::Pre((*label).into())),
            Self::PreMajor => Some(Bump::PreMajor),
            Self::PreMinor => Some(Bump::PreMinor),
            Self::PrePatch => Some(Bump::PrePatch),
            Self::PreRelease => Some(Bump::PreRelease),
            Self::Finalize => Some(Bump::Finalize),
            Self::Reset => Some(Bump::Reset),
            Self::Suggest => None,
        }
    }
}

/// Pre-release rung selector for `bump pre`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreRung {
    Alpha,
    Beta,
    Rc,
}

impl From<PreRung> for PreLabel {
    fn from(rung: PreRung) -> Self {
        match rung {
            PreRung::Alpha => Self::Alpha,
            PreRung::Beta => Self::Beta,
            PreRung::Rc => Self::Rc,
        }
    }
}
