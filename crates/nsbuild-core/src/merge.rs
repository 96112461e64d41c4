//! Recursive structural merge
//!
//! The merge primitive behind merge-mode metadata resolution. Arrays
//! concatenate and tables recurse; a kind mismatch on either side aborts
//! the whole merge, since a half-merged manifest is unsafe to package.

use toml::map::Entry;
use toml::{Table, Value};

use crate::error::{Error, Result};

/// Merge `source` into `target` in place, recursively.
///
/// Per key of `source`:
///
/// - absent from `target`: inserted as-is
/// - both arrays: `source` elements appended after `target`'s, duplicates
///   preserved
/// - both tables: merged recursively
/// - one side an array or table, the other a different kind:
///   [`Error::MergeTypeConflict`] on first hit, nothing else is merged
/// - scalars otherwise: `source` overwrites `target`
///
/// Not idempotent where arrays are involved (re-merging duplicates their
/// elements); call at most once per manifest per build.
pub fn deep_merge(target: &mut Table, source: &Table) -> Result<()> {
    for (key, incoming) in source {
        match target.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(incoming.clone());
            }
            Entry::Occupied(mut slot) => match (slot.get_mut(), incoming) {
                (Value::Array(existing), Value::Array(additions)) => {
                    existing.extend(additions.iter().cloned());
                }
                (Value::Table(existing), Value::Table(nested)) => {
                    deep_merge(existing, nested)?;
                }
                (Value::Array(_) | Value::Table(_), _) | (_, Value::Array(_) | Value::Table(_)) => {
                    return Err(Error::MergeTypeConflict { key: key.clone() });
                }
                (existing, _) => *existing = incoming.clone(),
            },
        }
    }
    Ok(())
}
