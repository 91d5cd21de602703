// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration layout.
//!
//! Ada needs exactly two pieces of outside information to do its job: where
//! the alias file lives, and which directory counts as the current one. Both
//! are gathered once at start-up into a [`Config`], and handed to everything
//! else from there. Nothing below this layer looks at the environment on its
//! own.
//!
//! # Settings File
//!
//! The user may keep an optional settings file at
//! `$XDG_CONFIG_HOME/ada/config.toml`:
//!
//! ```toml
//! alias_file = "$XDG_DATA_HOME/dir-aliases"
//! ```
//!
//! The `alias_file` field goes through shell expansion, so `~` and
//! environment variables are allowed.
//!
//! # Precedence
//!
//! 1. Alias file given on the command line, or through `ADA_ALIAS_FILE`.
//! 2. Alias file from the settings file.
//! 3. `$HOME/.dir-aliases`.

use crate::path::{default_alias_file, default_settings_file, NoWayHome};

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    fs::read_to_string,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, instrument};

/// Settings file layout.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the alias file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_file: Option<PathBuf>,
}

impl Settings {
    /// Read settings file at target path.
    ///
    /// A missing settings file yields default settings.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::ReadSettings`] if settings file exists but
    ///   cannot be read.
    /// - Return [`ConfigError::Deserialize`] if settings file is not valid.
    /// - Return [`ConfigError::ShellExpansion`] if alias file path cannot be
    ///   expanded.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match read_to_string(path) {
            Ok(data) => {
                debug!("read settings file {:?}", path.display());
                data.parse()
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(ConfigError::ReadSettings {
                source: error,
                settings_path: path.to_path_buf(),
            }),
        }
    }
}

impl FromStr for Settings {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut settings: Settings = toml::de::from_str(data).map_err(ConfigError::Deserialize)?;

        // INVARIANT: Perform shell expansion on alias file field.
        if let Some(alias_file) = settings.alias_file.take() {
            let expanded = shellexpand::full(alias_file.to_string_lossy().as_ref())
                .map_err(ConfigError::ShellExpansion)?
                .into_owned();
            settings.alias_file = Some(PathBuf::from(expanded));
        }

        Ok(settings)
    }
}

impl Display for Settings {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

/// Everything Ada needs to know about its surroundings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Alias file to load and rewrite.
    pub alias_file: PathBuf,

    /// Directory used whenever the user does not name one.
    pub current_dir: PathBuf,
}

impl Config {
    /// Construct new configuration.
    pub fn new(alias_file: impl Into<PathBuf>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            alias_file: alias_file.into(),
            current_dir: current_dir.into(),
        }
    }

    /// Gather configuration from the process environment.
    ///
    /// Uses the process working directory as the current directory, and the
    /// default settings file location.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::CurrentDir`] if working directory cannot be
    ///   determined.
    /// - Return [`ConfigError::NoWayHome`] if alias file falls back to the
    ///   home directory, but home cannot be determined.
    /// - Any error of [`Settings::read`].
    #[instrument(skip(alias_file), level = "debug")]
    pub fn load(alias_file: Option<PathBuf>) -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        let settings = match default_settings_file() {
            Some(path) => Settings::read(path)?,
            None => Settings::default(),
        };

        Self::layered(alias_file, settings, current_dir)
    }

    /// Layer alias file choices on top of each other.
    ///
    /// Explicit alias file beats settings, settings beat the default. A
    /// relative alias file is taken relative to the current directory.
    ///
    /// # Errors
    ///
    /// - Return [`ConfigError::NoWayHome`] if neither choice is given, and
    ///   home directory cannot be determined.
    pub fn layered(
        alias_file: Option<PathBuf>,
        settings: Settings,
        current_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let current_dir = current_dir.into();
        let alias_file = match alias_file.or(settings.alias_file) {
            Some(path) => current_dir.join(path),
            None => default_alias_file()?,
        };
        debug!("use alias file {:?}", alias_file.display());

        Ok(Self::new(alias_file, current_dir))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to deserialize settings.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize settings.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on settings.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),

    /// Settings file exists but cannot be read.
    #[error("failed to read settings file at {:?}", settings_path.display())]
    ReadSettings {
        #[source]
        source: std::io::Error,
        settings_path: PathBuf,
    },

    /// Current working directory cannot be determined.
    #[error("cannot determine current directory")]
    CurrentDir(#[source] std::io::Error),

    /// Home directory cannot be determined.
    #[error(transparent)]
    NoWayHome(#[from] NoWayHome),
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

/// Friendly result alias :3
type Result<T, E = ConfigError> = std::result::Result<T, E>;
