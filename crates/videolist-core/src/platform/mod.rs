/// Platform-specific functionality — storage read-permission checks.

pub mod permissions;

pub use permissions::{is_read_granted, FixedPermission, FsPermission, PermissionCheck};
