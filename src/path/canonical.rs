// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Canonical directory paths.
//!
//! Aliases end up inside a POSIX shell `cd` command, so every directory Ada
//! stores goes through the same canonical form, no matter which platform or
//! shell it came from:
//!
//! 1. Absolute, with every symlink resolved.
//! 2. Case-exact, i.e., each segment spelled the way the file system stores
//!    it, even on case-insensitive file systems.
//! 3. Forward slashes only, with a leading drive designator such as `C:`
//!    folded into a `/c` segment.
//!
//! So `c:\users\ME\projects` becomes `/c/Users/me/projects` on a Windows host
//! where the directory really is stored as `C:\Users\me\projects`.
//!
//! Paths that do not exist are left untouched.

use std::{
    ffi::{OsStr, OsString},
    fs, io,
    path::{Component, Path, PathBuf, Prefix},
};
use tracing::{debug, instrument};

/// View of the file system that canonicalization relies on.
///
/// Allows canonicalization to be exercised against an in-memory layout
/// instead of the real disk.
pub trait FileSystem {
    /// Check that path names an existing file or directory.
    fn exists(&self, path: &Path) -> bool;

    /// Check that path names an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Absolute, symlink-free, case-exact form of an existing path.
    fn exact_path(&self, path: &Path) -> io::Result<PathBuf>;
}

/// The real file system through [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// Resolve symlinks, then walk from the root down, spelling each segment
    /// the way its parent directory lists it.
    fn exact_path(&self, path: &Path) -> io::Result<PathBuf> {
        let resolved = fs::canonicalize(path)?;
        let mut exact = PathBuf::new();
        for component in resolved.components() {
            match component {
                Component::Prefix(prefix) => {
                    exact.push(fold_verbatim(prefix.kind(), prefix.as_os_str()));
                }
                Component::Normal(name) => {
                    let stored = stored_name(&exact, name.to_os_string());
                    exact.push(stored);
                }
                other => exact.push(other.as_os_str()),
            }
        }

        Ok(exact)
    }
}

// INVARIANT: Canonicalization on Windows yields `\\?\C:` or `\\?\UNC\server\share`,
// fold them back to `C:` and `\\server\share`.
fn fold_verbatim(kind: Prefix<'_>, raw: &OsStr) -> OsString {
    match kind {
        Prefix::VerbatimDisk(letter) | Prefix::Disk(letter) => {
            OsString::from(format!("{}:", char::from(letter)))
        }
        Prefix::VerbatimUNC(server, share) | Prefix::UNC(server, share) => {
            let mut folded = OsString::from(r"\\");
            folded.push(server);
            folded.push(r"\");
            folded.push(share);
            folded
        }
        _ => raw.to_os_string(),
    }
}

// Exact match wins, then the first ASCII case-insensitive match. Unreadable
// parents keep the name as given.
fn stored_name(parent: &Path, name: OsString) -> OsString {
    let Ok(entries) = fs::read_dir(parent) else {
        return name;
    };

    let wanted = name.to_string_lossy().into_owned();
    let mut folded = None;
    for entry in entries.flatten() {
        let candidate = entry.file_name();
        if candidate == name {
            return candidate;
        }

        if folded.is_none() && candidate.to_string_lossy().eq_ignore_ascii_case(&wanted) {
            folded = Some(candidate);
        }
    }

    folded.unwrap_or(name)
}

/// Turn user supplied paths into canonical alias directories.
///
/// Relative paths are taken relative to the configured current directory,
/// never the process working directory.
#[derive(Debug, Clone)]
pub struct PathCanonicalizer<F = RealFs>
where
    F: FileSystem,
{
    current_dir: PathBuf,
    fs: F,
}

impl PathCanonicalizer<RealFs> {
    /// Construct new canonicalizer over the real file system.
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self::with_file_system(current_dir, RealFs)
    }
}

impl<F> PathCanonicalizer<F>
where
    F: FileSystem,
{
    /// Construct new canonicalizer over given file system view.
    pub fn with_file_system(current_dir: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            current_dir: current_dir.into(),
            fs,
        }
    }

    /// Check that path names an existing directory.
    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.fs.is_dir(&self.absolute(path.as_ref()))
    }

    /// Canonical form of the configured current directory.
    pub fn resolve_current_dir(&self) -> String {
        self.resolve(self.current_dir.clone())
    }

    /// Resolve path into its canonical form.
    ///
    /// Returns the path unchanged if it does not exist. Never fails: if the
    /// file system cannot produce the exact form of an existing path, the
    /// path is also returned unchanged.
    #[instrument(skip(self, raw), level = "debug")]
    pub fn resolve(&self, raw: impl AsRef<Path>) -> String {
        let raw = raw.as_ref();
        let path = self.absolute(raw);
        if !self.fs.exists(&path) {
            debug!("leave missing path as is: {:?}", raw.display());
            return raw.to_string_lossy().into_owned();
        }

        match self.fs.exact_path(&path) {
            Ok(exact) => to_slash_form(exact.to_string_lossy()),
            Err(error) => {
                debug!("cannot determine exact form of {:?}: {error}", path.display());
                raw.to_string_lossy().into_owned()
            }
        }
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || drive_letter(&path.to_string_lossy()).is_some() {
            return path.to_path_buf();
        }

        self.current_dir.join(path)
    }
}

/// Rewrite path into forward slash form.
///
/// A leading drive designator like `C:` turns into `/c`. Every backslash
/// turns into a forward slash. Paths that are already POSIX-style pass
/// through as is.
pub fn to_slash_form(path: impl AsRef<str>) -> String {
    let path = path.as_ref();
    match drive_letter(path) {
        // INVARIANT: Drive letter and colon are both one byte wide.
        Some(letter) => format!(
            "/{}{}",
            letter.to_ascii_lowercase(),
            path[2..].replace('\\', "/")
        ),
        None => path.replace('\\', "/"),
    }
}

fn drive_letter(path: &str) -> Option<char> {
    let mut chars = path.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    (chars.next() == Some(':')).then_some(letter)
}
