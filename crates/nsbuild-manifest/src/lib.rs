//! Project manifest model for nsbuild
//!
//! A manifest is the parsed `pyproject.toml` of the project being built: a
//! tree of tables, arrays, and scalars. This crate wraps that tree in a
//! [`Manifest`] type whose accessors fail predictably when a location that
//! must be a table holds something else, and provides the host-schema
//! validation the build pipeline re-runs after the manifest is rewritten.
//!
//! Well-known locations:
//!
//! - `project`: the package metadata table (name, version, dependencies)
//! - `tool.pdm.build`: build-backend settings
//!
//! # Example
//!
//! ```
//! use nsbuild_manifest::Manifest;
//!
//! let manifest = Manifest::parse(r#"
//! [project]
//! name = "demo"
//! version = "0.1.0"
//! "#).unwrap();
//!
//! assert!(manifest.validate().is_ok());
//! assert_eq!(manifest.metadata().unwrap()["name"].as_str(), Some("demo"));
//! ```

pub mod error;
pub mod manifest;
mod validate;

pub use error::{Error, Result};
pub use manifest::{BUILD_TABLE_PATH, Manifest, METADATA_TABLE};
