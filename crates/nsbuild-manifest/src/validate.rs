//! Host-schema validation
//!
//! Re-checks the manifest shape the packaging pipeline relies on. The
//! resolver runs this after rewriting the manifest so a bad namespace
//! fragment cannot smuggle a malformed metadata table into the build.

use toml::Value;

use nsbuild_version::{Constraint, Version};

use crate::error::{Error, Result};
use crate::manifest::{BUILD_TABLE_PATH, METADATA_TABLE, Manifest};

impl Manifest {
    /// Validate the manifest against the packaging schema.
    ///
    /// Checks the `project` table (required `name`, a parseable `version`
    /// unless declared dynamic, dependency field shapes, `requires-python`
    /// syntax) and that the `tool.pdm.build` chain, where present, is made
    /// of tables.
    pub fn validate(&self) -> Result<()> {
        let metadata = match self.data().get(METADATA_TABLE) {
            None => {
                return Err(Error::MissingField {
                    field: METADATA_TABLE.to_string(),
                });
            }
            Some(Value::Table(table)) => table,
            Some(_) => {
                return Err(Error::NotATable {
                    path: METADATA_TABLE.to_string(),
                });
            }
        };

        match metadata.get("name") {
            None => {
                return Err(Error::MissingField {
                    field: "project.name".to_string(),
                });
            }
            Some(Value::String(_)) => {}
            Some(_) => {
                return Err(Error::FieldType {
                    field: "project.name".to_string(),
                    expected: "a string",
                });
            }
        }

        let dynamic_version = match metadata.get("dynamic") {
            None => false,
            Some(Value::Array(fields)) => fields
                .iter()
                .any(|field| field.as_str() == Some("version")),
            Some(_) => {
                return Err(Error::FieldType {
                    field: "project.dynamic".to_string(),
                    expected: "an array of strings",
                });
            }
        };

        match metadata.get("version") {
            None if dynamic_version => {}
            None => {
                return Err(Error::MissingField {
                    field: "project.version".to_string(),
                });
            }
            Some(Value::String(version)) => {
                Version::parse(version).map_err(|source| Error::InvalidVersion {
                    version: version.clone(),
                    source,
                })?;
            }
            Some(_) => {
                return Err(Error::FieldType {
                    field: "project.version".to_string(),
                    expected: "a string",
                });
            }
        }

        if let Some(dependencies) = metadata.get("dependencies") {
            check_requirement_array("project.dependencies", dependencies)?;
        }

        match metadata.get("optional-dependencies") {
            None => {}
            Some(Value::Table(groups)) => {
                for (group, requirements) in groups {
                    check_requirement_array(
                        &format!("project.optional-dependencies.{group}"),
                        requirements,
                    )?;
                }
            }
            Some(_) => {
                return Err(Error::FieldType {
                    field: "project.optional-dependencies".to_string(),
                    expected: "a table of requirement arrays",
                });
            }
        }

        match metadata.get("requires-python") {
            None => {}
            Some(Value::String(constraint)) => {
                Constraint::parse(constraint)
                    .map_err(|source| Error::InvalidConstraint { source })?;
            }
            Some(_) => {
                return Err(Error::FieldType {
                    field: "project.requires-python".to_string(),
                    expected: "a string",
                });
            }
        }

        // Walks the chain and rejects non-table links along the way.
        self.table_at(&BUILD_TABLE_PATH)?;

        Ok(())
    }
}

fn check_requirement_array(field: &str, value: &Value) -> Result<()> {
    let items = value.as_array().ok_or_else(|| Error::FieldType {
        field: field.to_string(),
        expected: "an array of strings",
    })?;
    for item in items {
        if !item.is_str() {
            return Err(Error::FieldType {
                field: field.to_string(),
                expected: "an array of strings",
            });
        }
    }
    Ok(())
}
