//! PEP 440 subset version type
//!
//! Covers the segments the bump command manipulates: an optional epoch, a
//! three-part release, and optional pre/post/dev suffixes. Local version
//! labels and releases with more than three components are not supported.
//!
//! Ordering follows PEP 440: for the same release, a dev-release sorts
//! below any pre-release, pre-releases sort below the final release, and
//! post-releases sort above it. A dev suffix attached to a pre- or
//! post-release sorts just below the version without it.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Pre-release ladder rung: `a` < `b` < `rc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreLabel {
    Alpha,
    Beta,
    Rc,
}

impl PreLabel {
    /// Canonical PEP 440 spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "a",
            Self::Beta => "b",
            Self::Rc => "rc",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Alpha => 0,
            Self::Beta => 1,
            Self::Rc => 2,
        }
    }

    /// Parse a label, accepting the spellings PEP 440 normalizes:
    /// `a`/`alpha`, `b`/`beta`, `c`/`rc`/`pre`/`preview`.
    fn parse(s: &str) -> Option<Self> {
        match s {
            "a" | "alpha" => Some(Self::Alpha),
            "b" | "beta" => Some(Self::Beta),
            "c" | "rc" | "pre" | "preview" => Some(Self::Rc),
            _ => None,
        }
    }
}

/// A parsed version.
///
/// Canonical textual form: `[N!]X.Y.Z[{a|b|rc}N][.postN][.devN]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub epoch: u64,
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
    pub pre: Option<(PreLabel, u64)>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
}

impl Version {
    /// A plain final release with no epoch or suffixes.
    pub fn new(major: u64, minor: u64, micro: u64) -> Self {
        Self {
            epoch: 0,
            major,
            minor,
            micro,
            pre: None,
            post: None,
            dev: None,
        }
    }

    /// Parse a version string.
    ///
    /// Accepts one to three release components (missing ones default to
    /// zero), a leading `v` (so git tag names parse directly), `-`/`_` as
    /// separator spellings, and the alternate pre-release labels PEP 440
    /// normalizes (`alpha`, `beta`, `c`).
    pub fn parse(input: &str) -> Result<Self> {
        let fail = |reason: &str| Error::VersionParse {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let text = input.trim();
        if text.is_empty() {
            return Err(fail("empty version"));
        }
        let normalized = text.to_ascii_lowercase().replace(['-', '_'], ".");
        let normalized = normalized.strip_prefix('v').unwrap_or(&normalized);

        let (epoch, rest) = match normalized.split_once('!') {
            Some((epoch, rest)) => {
                let epoch = epoch.parse().map_err(|_| fail("invalid epoch"))?;
                (epoch, rest)
            }
            None => (0, normalized),
        };

        // The release is everything up to the first letter.
        let (release, suffix) = match rest.find(|c: char| c.is_ascii_alphabetic()) {
            Some(pos) => (rest[..pos].trim_end_matches('.'), &rest[pos..]),
            None => (rest, ""),
        };

        let mut components = [0u64; 3];
        let parts: Vec<&str> = release.split('.').collect();
        if release.is_empty() || parts.len() > 3 {
            return Err(fail("release must have one to three components"));
        }
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| fail("invalid release component"))?;
        }

        let mut version = Self {
            epoch,
            major: components[0],
            minor: components[1],
            micro: components[2],
            pre: None,
            post: None,
            dev: None,
        };

        if !suffix.is_empty() {
            for segment in suffix.split('.') {
                let digits_at = segment
                    .find(|c: char| c.is_ascii_digit())
                    .unwrap_or(segment.len());
                let (label, number) = segment.split_at(digits_at);
                let number: u64 = if number.is_empty() {
                    0
                } else {
                    number.parse().map_err(|_| fail("invalid suffix number"))?
                };

                if let Some(pre_label) = PreLabel::parse(label) {
                    if version.pre.is_some() || version.post.is_some() || version.dev.is_some() {
                        return Err(fail("pre-release segment out of order"));
                    }
                    version.pre = Some((pre_label, number));
                } else if matches!(label, "post" | "rev" | "r") {
                    if version.post.is_some() || version.dev.is_some() {
                        return Err(fail("post-release segment out of order"));
                    }
                    version.post = Some(number);
                } else if label == "dev" {
                    if version.dev.is_some() {
                        return Err(fail("duplicate dev segment"));
                    }
                    version.dev = Some(number);
                } else {
                    return Err(fail("unrecognized version segment"));
                }
            }
        }

        Ok(version)
    }

    /// True when no pre/post/dev suffix is attached.
    pub fn is_final(&self) -> bool {
        self.pre.is_none() && self.post.is_none() && self.dev.is_none()
    }

    /// True for versions that precede their final release (pre or dev).
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    // Ordering key per PEP 440. The pre slot doubles as the final/dev
    // discriminator: a bare dev-release sorts below every pre-release of
    // the same release, and a final release above all of them.
    fn sort_key(&self) -> (u64, u64, u64, u64, (u8, u8, u64), (u8, u64), (u8, u64)) {
        let pre_key = match (&self.pre, self.post, self.dev) {
            (Some((label, number)), _, _) => (1, label.rank(), *number),
            (None, None, Some(_)) => (0, 0, 0),
            (None, _, _) => (2, 0, 0),
        };
        let post_key = match self.post {
            Some(number) => (1, number),
            None => (0, 0),
        };
        let dev_key = match self.dev {
            Some(number) => (0, number),
            None => (1, 0),
        };
        (
            self.epoch,
            self.major,
            self.minor,
            self.micro,
            pre_key,
            post_key,
            dev_key,
        )
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}!", self.epoch)?;
        }
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if let Some((label, number)) = &self.pre {
            write!(f, "{}{}", label.as_str(), number)?;
        }
        if let Some(number) = self.post {
            write!(f, ".post{number}")?;
        }
        if let Some(number) = self.dev {
            write!(f, ".dev{number}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
