//! Ownership and permission checks for the default netrc location.
//!
//! A netrc file holds plaintext passwords, so the implicit `~/.netrc`
//! must belong to the invoking user and must not grant group or other
//! any access. Explicitly supplied paths skip this check.

use crate::error::Result;
use std::path::Path;

/// Verify that `path` is owned by the current user and that its mode
/// grants nothing to group or other.
///
/// The check runs before any file content is read, so an insecurely
/// permissioned file never leaks credentials into a parse result. On
/// platforms without POSIX ownership this is a no-op.
#[cfg(unix)]
pub fn check_owner(path: &Path) -> Result<()> {
    let meta = std::fs::metadata(path).map_err(|e| crate::error::Error::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    check_metadata(&meta, path)
}

#[cfg(not(unix))]
pub fn check_owner(_path: &Path) -> Result<()> {
    Ok(())
}

/// Like [`check_owner`], but against an already-open handle, so the file
/// that is checked is the file that is read.
#[cfg(unix)]
pub(crate) fn check_file(file: &std::fs::File, path: &Path) -> Result<()> {
    let meta = file.metadata().map_err(|e| crate::error::Error::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    check_metadata(&meta, path)
}

#[cfg(not(unix))]
pub(crate) fn check_file(_file: &std::fs::File, _path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn check_metadata(meta: &std::fs::Metadata, path: &Path) -> Result<()> {
    use crate::error::Error;
    use std::os::unix::fs::MetadataExt;

    let uid = unsafe { libc::getuid() };
    if meta.uid() != uid {
        return Err(Error::WrongOwner {
            path: path.to_path_buf(),
            owner: user_name(meta.uid()),
            user: user_name(uid),
        });
    }

    // S_IRWXG | S_IRWXO
    if meta.mode() & 0o077 != 0 {
        return Err(Error::Permissions {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Resolve a uid to a user name for diagnostics, falling back to a
/// numeric form. Best effort only; the failure decision never depends
/// on it.
#[cfg(unix)]
fn user_name(uid: libc::uid_t) -> String {
    let pw = unsafe { libc::getpwuid(uid) };
    if pw.is_null() {
        return format!("uid {}", uid);
    }
    unsafe { std::ffi::CStr::from_ptr((*pw).pw_name) }
        .to_string_lossy()
        .into_owned()
}
