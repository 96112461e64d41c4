//! Manifest tree and typed accessors
//!
//! The manifest is held as a plain [`toml::Table`] and mutated in place by
//! the resolver for the remainder of one build invocation. Accessors come
//! in two flavors: read-only lookups that return `None` for absent
//! locations, and create-on-demand mutable lookups that materialize the
//! table chain. Both fail with [`Error::NotATable`] when an intermediate
//! value has the wrong kind, naming the offending dotted path.

use std::fs;
use std::path::Path;

use toml::{Table, Value};

use crate::error::{Error, Result};

/// Top-level key of the package metadata table.
pub const METADATA_TABLE: &str = "project";

/// Dotted location of the build-backend settings table.
pub const BUILD_TABLE_PATH: [&str; 3] = ["tool", "pdm", "build"];

/// A parsed project manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    data: Table,
}

impl Manifest {
    /// Parse a manifest from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let data = content.parse::<Table>()?;
        Ok(Self { data })
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(?path, "Loading manifest");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Wrap an already-built table.
    pub fn from_table(data: Table) -> Self {
        Self { data }
    }

    /// Serialize the manifest back to TOML text.
    pub fn render(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.data)?)
    }

    /// The whole manifest tree.
    pub fn data(&self) -> &Table {
        &self.data
    }

    /// Mutable access to the whole manifest tree.
    pub fn data_mut(&mut self) -> &mut Table {
        &mut self.data
    }

    /// The `project` metadata table, if present.
    pub fn metadata(&self) -> Option<&Table> {
        self.data.get(METADATA_TABLE).and_then(Value::as_table)
    }

    /// The `project` metadata table, created when absent.
    pub fn metadata_mut(&mut self) -> Result<&mut Table> {
        self.ensure_table_mut(&[METADATA_TABLE])
    }

    /// The build-backend settings table, if present.
    pub fn build_config(&self) -> Option<&Table> {
        self.table_at(&BUILD_TABLE_PATH).ok().flatten()
    }

    /// The build-backend settings table, created when absent.
    pub fn build_config_mut(&mut self) -> Result<&mut Table> {
        self.ensure_table_mut(&BUILD_TABLE_PATH)
    }

    /// Walk a chain of table keys.
    ///
    /// Returns `Ok(None)` when any key along the path is absent, and
    /// [`Error::NotATable`] when a present value is not a table.
    pub fn table_at(&self, path: &[&str]) -> Result<Option<&Table>> {
        let mut current = &self.data;
        let mut walked = Vec::with_capacity(path.len());
        for key in path {
            walked.push(*key);
            match current.get(*key) {
                None => return Ok(None),
                Some(Value::Table(table)) => current = table,
                Some(_) => {
                    return Err(Error::NotATable {
                        path: walked.join("."),
                    });
                }
            }
        }
        Ok(Some(current))
    }

    /// Mutable variant of [`Manifest::table_at`]; never creates tables.
    pub fn table_at_mut(&mut self, path: &[&str]) -> Result<Option<&mut Table>> {
        let mut current = &mut self.data;
        let mut walked = Vec::with_capacity(path.len());
        for key in path {
            walked.push(*key);
            match current.get_mut(*key) {
                None => return Ok(None),
                Some(Value::Table(table)) => current = table,
                Some(_) => {
                    return Err(Error::NotATable {
                        path: walked.join("."),
                    });
                }
            }
        }
        Ok(Some(current))
    }

    /// Walk a chain of table keys, inserting empty tables for absent ones.
    pub fn ensure_table_mut(&mut self, path: &[&str]) -> Result<&mut Table> {
        let mut current = &mut self.data;
        let mut walked = Vec::with_capacity(path.len());
        for key in path {
            walked.push(*key);
            let slot = current
                .entry((*key).to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            current = slot.as_table_mut().ok_or_else(|| Error::NotATable {
                path: walked.join("."),
            })?;
        }
        Ok(current)
    }
}
