//! Path resolution for the default netrc location.

use std::path::PathBuf;

/// Get the path to the user's netrc file (`~/.netrc`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn default_netrc_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".netrc"))
}
