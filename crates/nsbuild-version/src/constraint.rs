//! PEP 440 specifier strings checked against concrete versions
//!
//! Built for `requires-python`-style fields: comma-separated clauses that
//! must all hold. Versions are normalized onto [`semver::Version`] for
//! comparison (missing minor/patch components default to zero), which
//! covers the final-release versions these fields carry in practice.
//!
//! Supported clause forms: the six comparison operators (`>=`, `>`, `<=`,
//! `<`, `==`, `!=`), prefix matches (`==3.9.*`, `!=3.9.*`), and compatible
//! releases (`~=3.9`, `~=3.9.1`).
//!
//! # Example
//!
//! ```
//! use nsbuild_version::Constraint;
//!
//! let constraint = Constraint::parse(">=3.10,<3.14").unwrap();
//! assert!(constraint.satisfies("3.12"));
//! assert!(!constraint.satisfies("3.9.21"));
//! ```

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Ge,
    Gt,
    Le,
    Lt,
    Eq,
    Ne,
}

impl Op {
    fn holds(self, candidate: &semver::Version, bound: &semver::Version) -> bool {
        match self {
            Self::Ge => candidate >= bound,
            Self::Gt => candidate > bound,
            Self::Le => candidate <= bound,
            Self::Lt => candidate < bound,
            Self::Eq => candidate == bound,
            Self::Ne => candidate != bound,
        }
    }
}

#[derive(Debug, Clone)]
enum Clause {
    /// Plain comparison against a normalized version.
    Compare { op: Op, bound: semver::Version },
    /// Prefix match: `==X.*` / `==X.Y.*` (negated for `!=`).
    Prefix {
        negated: bool,
        major: u64,
        minor: Option<u64>,
    },
}

impl Clause {
    fn holds(&self, candidate: &semver::Version) -> bool {
        match self {
            Self::Compare { op, bound } => op.holds(candidate, bound),
            Self::Prefix {
                negated,
                major,
                minor,
            } => {
                let matches =
                    candidate.major == *major && minor.is_none_or(|m| candidate.minor == m);
                matches != *negated
            }
        }
    }
}

/// A parsed constraint: every clause must hold.
#[derive(Debug, Clone)]
pub struct Constraint {
    clauses: Vec<Clause>,
    /// Original constraint text for display.
    raw: String,
}

impl Constraint {
    /// Parse a comma-separated PEP 440 specifier string.
    pub fn parse(constraint: &str) -> Result<Self> {
        let raw = constraint.to_string();
        let mut clauses = Vec::new();

        for part in constraint.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            parse_clause(part, &mut clauses)?;
        }

        if clauses.is_empty() {
            return Err(Error::ConstraintParse {
                constraint: raw,
                reason: "empty constraint".to_string(),
            });
        }

        Ok(Self { clauses, raw })
    }

    /// Check a version string against this constraint.
    ///
    /// Returns `false` when the version string cannot be normalized.
    pub fn satisfies(&self, version: &str) -> bool {
        match normalize(version) {
            Ok(candidate) => self.satisfies_version(&candidate),
            Err(_) => false,
        }
    }

    /// Check an already-parsed version against this constraint.
    pub fn satisfies_version(&self, candidate: &semver::Version) -> bool {
        self.clauses.iter().all(|clause| clause.holds(candidate))
    }

    /// The original constraint text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse one clause, pushing the resulting checks onto `clauses`.
///
/// `~=` expands to two checks, which is why this appends instead of
/// returning a single clause.
fn parse_clause(part: &str, clauses: &mut Vec<Clause>) -> Result<()> {
    let fail = |reason: String| Error::ConstraintParse {
        constraint: part.to_string(),
        reason,
    };

    if let Some(rest) = part.strip_prefix("~=") {
        let rest = rest.trim();
        let components = split_components(rest).map_err(&fail)?;
        if components.len() < 2 {
            return Err(fail("compatible release needs at least two components".into()));
        }
        clauses.push(Clause::Compare {
            op: Op::Ge,
            bound: normalize(rest).map_err(&fail)?,
        });
        // All but the last component are pinned: ~=X.Y pins X, ~=X.Y.Z pins X.Y.
        clauses.push(Clause::Prefix {
            negated: false,
            major: components[0],
            minor: (components.len() > 2).then(|| components[1]),
        });
        return Ok(());
    }

    let (op, rest) = if let Some(rest) = part.strip_prefix(">=") {
        (Op::Ge, rest)
    } else if let Some(rest) = part.strip_prefix("<=") {
        (Op::Le, rest)
    } else if let Some(rest) = part.strip_prefix("==") {
        (Op::Eq, rest)
    } else if let Some(rest) = part.strip_prefix("!=") {
        (Op::Ne, rest)
    } else if let Some(rest) = part.strip_prefix('>') {
        (Op::Gt, rest)
    } else if let Some(rest) = part.strip_prefix('<') {
        (Op::Lt, rest)
    } else {
        // Bare version implies equality.
        (Op::Eq, part)
    };
    let rest = rest.trim();

    if let Some(prefix) = rest.strip_suffix(".*") {
        if !matches!(op, Op::Eq | Op::Ne) {
            return Err(fail("prefix match only valid with == or !=".into()));
        }
        let components = split_components(prefix).map_err(&fail)?;
        if components.len() > 2 {
            return Err(fail("prefix match supports at most major.minor".into()));
        }
        clauses.push(Clause::Prefix {
            negated: matches!(op, Op::Ne),
            major: components[0],
            minor: components.get(1).copied(),
        });
        return Ok(());
    }

    clauses.push(Clause::Compare {
        op,
        bound: normalize(rest).map_err(&fail)?,
    });
    Ok(())
}

fn split_components(s: &str) -> std::result::Result<Vec<u64>, String> {
    if s.is_empty() {
        return Err("missing version".to_string());
    }
    s.split('.')
        .map(|part| {
            part.parse()
                .map_err(|_| format!("invalid version component '{part}'"))
        })
        .collect()
}

/// Normalize onto semver by defaulting missing minor/patch to zero.
///
/// - `"3"` -> `3.0.0`
/// - `"3.12"` -> `3.12.0`
/// - `"3.12.1"` -> `3.12.1`
fn normalize(s: &str) -> std::result::Result<semver::Version, String> {
    let components = split_components(s.trim())?;
    match components.as_slice() {
        [major] => Ok(semver::Version::new(*major, 0, 0)),
        [major, minor] => Ok(semver::Version::new(*major, *minor, 0)),
        [major, minor, patch] => Ok(semver::Version::new(*major, *minor, *patch)),
        _ => Err(format!("too many components in '{s}'")),
    }
}
