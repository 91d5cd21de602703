// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine where the files Ada works with live by default, and turn
//! directories into the canonical form stored in the alias file. See
//! [`canonical`] for the latter.

pub mod canonical;

use std::path::PathBuf;

/// Name of the alias file inside the user's home directory.
pub const ALIAS_FILE_NAME: &str = ".dir-aliases";

/// Determine absolute path to user's home directory.
///
/// Does not check if the path returned actually exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(NoWayHome)
}

/// Determine default absolute path to the alias file.
///
/// Uses `$HOME/.dir-aliases`. Does not check if the path returned actually
/// exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if home directory path cannot be determined.
pub fn default_alias_file() -> Result<PathBuf> {
    home_dir().map(|path| path.join(ALIAS_FILE_NAME))
}

/// Determine default absolute path to the settings file.
///
/// Uses XDG Base Directory path `$XDG_CONFIG_HOME/ada/config.toml`, or the
/// platform equivalent. Returns `None` when no configuration directory can be
/// determined, since the settings file is optional anyway.
///
/// # See Also
///
/// - [XDG Base Directory](https://wiki.archlinux.org/title/XDG_Base_Directory)
pub fn default_settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|path| path.join("ada").join("config.toml"))
}

/// No way to determine user's home directory.
///
/// # See Also
///
/// - [`dirs::home_dir`](https://docs.rs/dirs/latest/dirs/fn.home_dir.html)
#[derive(Clone, Debug, thiserror::Error)]
#[error("cannot determine absolute path to user's home directory")]
pub struct NoWayHome;

/// Friendly result alias :3
pub type Result<T, E = NoWayHome> = std::result::Result<T, E>;
