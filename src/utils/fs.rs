// ============================================================================
// File system utilities
// ============================================================================

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Set secure permissions (600 on Unix)
#[cfg(unix)]
pub fn set_secure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
pub fn set_secure_permissions(_path: &Path) -> Result<()> {
    Ok(()) // Not applicable on non-Unix systems
}
