//! File permission changes used by post-processing plugins.

use std::io;
use std::path::Path;

/// rwxrwxr--
pub const EXECUTABLE_MODE: u32 = 0o774;

/// Marks files as executable.
pub trait PermissionSetter {
    /// A missing file must surface as `io::ErrorKind::NotFound`.
    fn set_executable(&self, path: &Path) -> io::Result<()>;
}

/// Sets permissions on the real filesystem.
pub struct SystemPermissions;

impl SystemPermissions {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemPermissions {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionSetter for SystemPermissions {
    #[cfg(unix)]
    fn set_executable(&self, path: &Path) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(EXECUTABLE_MODE))
    }

    #[cfg(not(unix))]
    fn set_executable(&self, path: &Path) -> io::Result<()> {
        // No executable bit here; only report missing files.
        std::fs::metadata(path).map(|_| ())
    }
}
