//! Conventional-commit classification
//!
//! Maps a batch of commit messages onto the bump they imply. Only the
//! coarse distinctions matter here: breaking change, feature, everything
//! else.

use nsbuild_version::Bump;

/// Pick the bump a set of commit messages implies.
///
/// A message is breaking when its subject carries a `!` before the colon
/// (`feat!:`, `refactor(core)!:`) or its body contains a
/// `BREAKING CHANGE:` footer. A `feat` subject implies a minor bump.
/// Everything else, including an empty batch, implies a micro bump.
pub fn classify_messages<'a>(messages: impl IntoIterator<Item = &'a str>) -> Bump {
    let mut bump = Bump::Micro;
    for message in messages {
        if is_breaking(message) {
            return Bump::Major;
        }
        if subject_type(message) == Some("feat") {
            bump = Bump::Minor;
        }
    }
    bump
}

fn is_breaking(message: &str) -> bool {
    if message.contains("BREAKING CHANGE:") || message.contains("BREAKING-CHANGE:") {
        return true;
    }
    let subject = message.lines().next().unwrap_or("");
    match subject.split_once(':') {
        Some((head, _)) => head.trim_end().ends_with('!'),
        None => false,
    }
}

/// The conventional-commit type of the subject line, scope stripped.
fn subject_type(message: &str) -> Option<&str> {
    let subject = message.lines().next()?;
    let (head, _) = subject.split_once(':')?;
    let head = head.trim_end().trim_end_matches('!');
    let head = match head.split_once('(') {
        Some((kind, _)) => kind,
        None => head,
    };
    Some(head.trim())
}
