use std::fmt;
use std::str::FromStr;

use crate::error::{Result, UtilityError};

/// A release tag of the form `v{major}.{minor}.{patch}`.
///
/// Exactly three non-negative components, no pre-release or build metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VersionTag {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Represents the type of semantic version bump to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl VersionTag {
    /// Tag used when no version file exists yet.
    pub const INITIAL: VersionTag = VersionTag::new(0, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionTag {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionTag {
    type Err = UtilityError;

    /// Parses the canonical tag form. Surrounding whitespace is ignored.
    ///
    /// # Example
    /// ```ignore
    /// assert_eq!("v1.2.3".parse::<VersionTag>()?, VersionTag::new(1, 2, 3));
    /// assert!("1.2.3".parse::<VersionTag>().is_err()); // missing 'v'
    /// assert!("v1.2".parse::<VersionTag>().is_err()); // too few components
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let malformed = || {
            UtilityError::parse(format!(
                "'{}' is not a version tag of the form v<major>.<minor>.<patch>",
                trimmed
            ))
        };

        let body = trimmed.strip_prefix('v').ok_or_else(malformed)?;
        let parts: Vec<&str> = body.split('.').collect();
        if parts.len() != 3 {
            return Err(malformed());
        }

        let component = |part: &str| -> Result<u64> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse::<u64>().map_err(|e| {
                UtilityError::parse(format!("version component '{}': {}", part, e))
            })
        };

        Ok(VersionTag::new(
            component(parts[0])?,
            component(parts[1])?,
            component(parts[2])?,
        ))
    }
}

/// Classifies a free-text bump directive.
///
/// Case-insensitive substring search. `MAJOR` is checked before `MINOR`, so a
/// directive mentioning both is a major bump. Anything else is a patch bump.
pub fn classify_directive(directive: &str) -> BumpKind {
    let upper = directive.to_uppercase();
    if upper.contains("MAJOR") {
        BumpKind::Major
    } else if upper.contains("MINOR") {
        BumpKind::Minor
    } else {
        BumpKind::Patch
    }
}

/// Bumps a version by one step of the given kind.
///
/// Increments the appropriate component and resets lower components to 0:
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
///
/// A component already at `u64::MAX` cannot be incremented and yields a
/// [`UtilityError::Parse`].
pub fn bump(version: VersionTag, kind: BumpKind) -> Result<VersionTag> {
    let overflow = || UtilityError::parse(format!("cannot bump {}: component out of range", version));
    let next = match kind {
        BumpKind::Major => {
            VersionTag::new(version.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
        }
        BumpKind::Minor => VersionTag::new(
            version.major,
            version.minor.checked_add(1).ok_or_else(overflow)?,
            0,
        ),
        BumpKind::Patch => VersionTag::new(
            version.major,
            version.minor,
            version.patch.checked_add(1).ok_or_else(overflow)?,
        ),
    };
    Ok(next)
}

/// Classifies `directive` and applies the resulting bump.
pub fn bump_with_directive(version: VersionTag, directive: &str) -> Result<VersionTag> {
    bump(version, classify_directive(directive))
}
