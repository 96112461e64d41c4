//! Version increment actions
//!
//! Each action produces a new [`Version`] from the current one; the input
//! is never modified. The mapping from command names to actions lives in
//! the CLI crate.

use crate::version::{PreLabel, Version};

/// An increment applied to a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bump {
    /// Next major release; zeroes minor/micro, drops suffixes.
    Major,
    /// Next minor release; zeroes micro, drops suffixes.
    Minor,
    /// Next micro release; drops suffixes.
    Micro,
    /// Next epoch; keeps the release, drops suffixes.
    Epoch,
    /// Start or advance a dev-release counter.
    Dev,
    /// Start or advance a post-release counter; drops dev.
    Post,
    /// Start an `a1` pre-release on the next micro, or advance the current
    /// pre-release, switching to the given rung when it differs.
    Pre(PreLabel),
    /// Next major release as an `a1` pre-release.
    PreMajor,
    /// Next minor release as an `a1` pre-release.
    PreMinor,
    /// Next micro release as an `a1` pre-release.
    PrePatch,
    /// Advance the current pre-release counter, or behave as `PrePatch`.
    PreRelease,
    /// Drop pre/post/dev suffixes, keeping epoch and release.
    Finalize,
    /// Drop pre/post/dev suffixes and the epoch.
    Reset,
}

impl Bump {
    /// Compute the incremented version.
    pub fn apply(self, current: &Version) -> Version {
        match self {
            Self::Major => final_release(current.epoch, current.major + 1, 0, 0),
            Self::Minor => final_release(current.epoch, current.major, current.minor + 1, 0),
            Self::Micro => {
                final_release(current.epoch, current.major, current.minor, current.micro + 1)
            }
            Self::Epoch => final_release(
                current.epoch + 1,
                current.major,
                current.minor,
                current.micro,
            ),
            Self::Dev => Version {
                dev: Some(current.dev.map_or(1, |n| n + 1)),
                ..current.clone()
            },
            Self::Post => Version {
                post: Some(current.post.map_or(1, |n| n + 1)),
                dev: None,
                ..current.clone()
            },
            Self::Pre(label) => match current.pre {
                Some((rung, number)) if rung == label => pre_release(
                    current.epoch,
                    current.major,
                    current.minor,
                    current.micro,
                    label,
                    number + 1,
                ),
                Some(_) => pre_release(
                    current.epoch,
                    current.major,
                    current.minor,
                    current.micro,
                    label,
                    1,
                ),
                None => pre_release(
                    current.epoch,
                    current.major,
                    current.minor,
                    current.micro + 1,
                    label,
                    1,
                ),
            },
            Self::PreMajor => {
                pre_release(current.epoch, current.major + 1, 0, 0, PreLabel::Alpha, 1)
            }
            Self::PreMinor => pre_release(
                current.epoch,
                current.major,
                current.minor + 1,
                0,
                PreLabel::Alpha,
                1,
            ),
            Self::PrePatch => pre_release(
                current.epoch,
                current.major,
                current.minor,
                current.micro + 1,
                PreLabel::Alpha,
                1,
            ),
            Self::PreRelease => match current.pre {
                Some((rung, number)) => pre_release(
                    current.epoch,
                    current.major,
                    current.minor,
                    current.micro,
                    rung,
                    number + 1,
                ),
                None => Self::PrePatch.apply(current),
            },
            Self::Finalize => final_release(
                current.epoch,
                current.major,
                current.minor,
                current.micro,
            ),
            Self::Reset => final_release(0, current.major, current.minor, current.micro),
        }
    }
}

fn final_release(epoch: u64, major: u64, minor: u64, micro: u64) -> Version {
    Version {
        epoch,
        major,
        minor,
        micro,
        pre: None,
        post: None,
        dev: None,
    }
}

fn pre_release(
    epoch: u64,
    major: u64,
    minor: u64,
    micro: u64,
    label: PreLabel,
    number: u64,
) -> Version {
    Version {
        pre: Some((label, number)),
        ..final_release(epoch, major, minor, micro)
    }
}
