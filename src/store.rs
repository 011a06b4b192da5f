//! Flat-file persistence of the current version tag.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, UtilityError};
use crate::version::VersionTag;

/// Reads the tag stored at `path`.
///
/// A missing file yields [`VersionTag::INITIAL`]. A file whose trimmed
/// contents are not a canonical tag is a [`UtilityError::Parse`].
pub fn read(path: impl AsRef<Path>) -> Result<VersionTag> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "version file not found, starting from v0.0.0");
            return Ok(VersionTag::INITIAL);
        }
        Err(e) => return Err(e.into()),
    };
    let contents = String::from_utf8(bytes).map_err(|e| {
        UtilityError::parse(format!("version file is not UTF-8: {} (in {})", e, path.display()))
    })?;

    let tag = contents.parse::<VersionTag>().map_err(|e| match e {
        UtilityError::Parse(msg) => {
            UtilityError::parse(format!("{} (in {})", msg, path.display()))
        }
        other => other,
    })?;
    debug!(path = %path.display(), %tag, "read version file");
    Ok(tag)
}

/// Overwrites `path` with the canonical form of `tag`, without a trailing newline.
pub fn write(path: impl AsRef<Path>, tag: &VersionTag) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, tag.to_string())?;
    debug!(path = %path.display(), %tag, "wrote version file");
    Ok(())
}
