/// Storage read-permission checks.
///
/// The presentation layer asks before every scan. A denied check means no
/// scan is attempted at all.
use std::path::Path;

/// Decides whether the storage under a root may be read.
pub trait PermissionCheck: Send + Sync {
    fn is_read_granted(&self, root: &Path) -> bool;
}

/// Grants read access when the root can actually be listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPermission;

impl PermissionCheck for FsPermission {
    fn is_read_granted(&self, root: &Path) -> bool {
        is_read_granted(root)
    }
}

/// Always answers the same way. Useful when access is decided elsewhere
/// (an OS prompt, a command-line switch).
#[derive(Debug, Clone, Copy)]
pub struct FixedPermission(pub bool);

impl PermissionCheck for FixedPermission {
    fn is_read_granted(&self, _root: &Path) -> bool {
        self.0
    }
}

/// Check whether the current process can list `root`.
pub fn is_read_granted(root: &Path) -> bool {
    std::fs::read_dir(root).is_ok()
}
