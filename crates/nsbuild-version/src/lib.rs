//! PEP 440 version handling for nsbuild
//!
//! Provides three pieces:
//!
//! - [`Version`]: a PEP 440 subset (epoch, three-part release, pre-release,
//!   post-release, dev-release) with parsing, canonical display, and total
//!   ordering
//! - [`Bump`]: the increment actions exposed by the `nsbuild bump` command
//! - [`Constraint`]: PEP 440 specifier strings (e.g. `requires-python`)
//!   checked against concrete versions
//!
//! # Example
//!
//! ```
//! use nsbuild_version::{Bump, Version};
//!
//! let current = Version::parse("1.2.3").unwrap();
//! let next = Bump::Minor.apply(&current);
//! assert_eq!(next.to_string(), "1.3.0");
//! assert!(next > current);
//! ```

pub mod bump;
pub mod constraint;
pub mod error;
pub mod version;

pub use bump::Bump;
pub use constraint::Constraint;
pub use error::{Error, Result};
pub use version::{PreLabel, Version};
