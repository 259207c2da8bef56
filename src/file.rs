// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Sibling scratch path for staging a full replacement of `target`.
pub fn staging_dir_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| s!("staged"));
    name.push_str(".tmp");
    target.with_file_name(name)
}

/// Publish a fully staged directory over `target`.
///
/// The old tree is moved aside first, then the staged tree renamed into
/// place, so no reader ever observes a half-written mix of old and new
/// files. The displaced tree is removed last (best effort).
pub fn replace_directory(staged: &Path, target: &Path) -> io::Result<()> {
    let old = target.with_file_name(format!(
        "{}.old",
        target.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| s!("dir")),
    ));

    if old.exists() {
        fs::remove_dir_all(&old)?;
    }
    let had_prior = target.exists();
    if had_prior {
        fs::rename(target, &old)?;
    }
    if let Err(e) = fs::rename(staged, target) {
        // Roll the prior tree back so we never leave nothing behind.
        if had_prior {
            let _ = fs::rename(&old, target);
        }
        return Err(e);
    }
    if had_prior {
        let _ = fs::remove_dir_all(&old);
    }
    Ok(())
}
