//! Signed-in session, kept in `~/.vms/session.json`.
//!
//! The file only records who signed in and with which role. It is a local
//! guard for the editing commands; the server does not check it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use vms_core::auth::Session;

const SESSION_DIR: &str = ".vms";
const SESSION_FILE: &str = "session.json";

pub fn session_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(SESSION_DIR).join(SESSION_FILE))
}

/// Write `session` to `path`, creating the directory if needed.
pub fn save(path: &Path, session: &Session) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let json = serde_json::to_vec_pretty(session).context("failed to encode session")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;

    // Restrict permissions on Unix.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        let _ = std::fs::set_permissions(path, perms);
    }

    Ok(())
}

/// Read the session at `path`, if any.
pub fn load(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let session = serde_json::from_slice(&raw)
        .with_context(|| format!("{} is corrupt; run `vms logout`", path.display()))?;
    Ok(Some(session))
}

/// Remove the session at `path`. Returns whether one existed.
pub fn remove(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
    Ok(true)
}

/// The stored session, which must belong to an admin.
pub fn require_admin(path: &Path) -> Result<Session> {
    let Some(session) = load(path)? else {
        bail!("not logged in; run `vms login` first");
    };
    if !session.is_admin() {
        bail!(
            "signed in as {} ({}); editing the hero banner needs an admin account",
            session.email,
            session.role
        );
    }
    Ok(session)
}

fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .context("HOME not set")
    }
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .context("USERPROFILE not set")
    }
}
