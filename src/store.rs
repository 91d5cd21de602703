// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Alias store management and manipulation.
//!
//! Ada keeps every directory alias in one flat file called the __alias
//! file__. The alias store is the in-memory copy of that file: an ordered
//! listing of [`AliasRecord`]s, in the order they appear in the file.
//!
//! # Alias File Layout
//!
//! The alias file defaults to `$HOME/.dir-aliases`. Each alias takes up one
//! line of POSIX shell alias syntax (see [`crate::alias`]). Blank lines and
//! lines starting with `#` are ignored. Lines that fail to parse are reported
//! and skipped, never fatal.
//!
//! # Rewrites
//!
//! Every successful mutation rewrites the entire alias file from the store.
//! Comments, blank lines, and malformed lines do not survive a rewrite. The
//! new content goes to a sibling temporary file first, which is then renamed
//! over the alias file.
//!
//! # Duplicate Aliases
//!
//! Nothing stops two records from sharing a name. Lookups, replacements, and
//! deletions always pick the first record in file order.

use crate::{
    alias::{parse_line, AliasRecord, MalformedLine},
    config::Config,
    path::canonical::{FileSystem, PathCanonicalizer, RealFs},
};

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs::{canonicalize, create_dir_all, read, rename, write, OpenOptions},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};

/// In-memory copy of the alias file.
#[derive(Debug)]
pub struct AliasStore<F = RealFs>
where
    F: FileSystem,
{
    alias_path: PathBuf,
    records: Vec<AliasRecord>,
    malformed: Vec<MalformedLine>,
    canonicalizer: PathCanonicalizer<F>,
}

impl AliasStore<RealFs> {
    /// Open alias file named by configuration.
    ///
    /// # Errors
    ///
    /// - Any error of [`AliasStore::open_with`].
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_with(
            &config.alias_file,
            PathCanonicalizer::new(&config.current_dir),
        )
    }
}

impl<F> AliasStore<F>
where
    F: FileSystem,
{
    /// Open alias file at target path, canonicalizing directories through
    /// given canonicalizer.
    ///
    /// Creates an empty alias file, along with any missing parent
    /// directories, if it does not exist yet.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::CreateAliasFile`] if missing alias file cannot
    ///   be created.
    /// - Return [`StoreError::ReadAliasFile`] if alias file cannot be read.
    #[instrument(skip(alias_path, canonicalizer), level = "debug")]
    pub fn open_with(
        alias_path: impl Into<PathBuf>,
        canonicalizer: PathCanonicalizer<F>,
    ) -> Result<Self> {
        let alias_path = alias_path.into();
        let create_error = |err| StoreError::CreateAliasFile {
            source: err,
            alias_path: alias_path.clone(),
        };

        // INVARIANT: Create alias file if needed.
        if let Some(parent) = alias_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            create_dir_all(parent).map_err(create_error)?;
        }
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&alias_path)
            .map_err(create_error)?;

        debug!("load alias file {:?}", alias_path.display());
        let content = read(&alias_path).map_err(|err| StoreError::ReadAliasFile {
            source: err,
            alias_path: alias_path.clone(),
        })?;

        let (records, malformed) = parse_records(&content, &alias_path);
        for line in &malformed {
            warn!("{line}");
        }

        Ok(Self {
            alias_path,
            records,
            malformed,
            canonicalizer,
        })
    }

    /// All alias records in file order.
    pub fn records(&self) -> &[AliasRecord] {
        self.records.as_slice()
    }

    /// Lines skipped during load because they could not be parsed.
    pub fn malformed_lines(&self) -> &[MalformedLine] {
        self.malformed.as_slice()
    }

    /// All alias names in file order, duplicates included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.alias.as_str())
    }

    /// Find first record with matching alias name.
    ///
    /// Alias names are compared case-sensitively.
    pub fn find_by_alias(&self, alias: impl AsRef<str>) -> Option<&AliasRecord> {
        self.records
            .iter()
            .find(|record| record.alias == alias.as_ref())
    }

    /// Find first record pointing to directory.
    ///
    /// Directories are compared as plain strings without regard to case. No
    /// canonicalization takes place, see [`AliasStore::find_by_path`] for
    /// that.
    pub fn find_by_directory(&self, directory: impl AsRef<str>) -> Option<&AliasRecord> {
        let directory = directory.as_ref().to_lowercase();
        self.records
            .iter()
            .find(|record| record.directory.to_lowercase() == directory)
    }

    /// Find first record pointing to path after canonicalizing it.
    ///
    /// Uses the current directory if no path is given.
    pub fn find_by_path(&self, path: Option<&Path>) -> Option<&AliasRecord> {
        let directory = match path {
            Some(path) => self.canonicalizer.resolve(path),
            None => self.canonicalizer.resolve_current_dir(),
        };
        self.find_by_directory(directory)
    }

    /// Add new alias to the end of the store.
    ///
    /// Uses the current directory if no directory is given. Existing aliases
    /// of the same name are left alone. Rewrites the alias file.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::InvalidDirectory`] if given directory does not
    ///   exist.
    /// - Return [`StoreError::WriteAliasFile`] if alias file cannot be
    ///   rewritten.
    #[instrument(skip(self, alias, directory), level = "debug")]
    pub fn add(&mut self, alias: impl Into<String>, directory: Option<&Path>) -> Result<()> {
        let record = AliasRecord::new(alias, self.target_directory(directory)?);
        info!("add alias {record}");
        self.records.push(record);
        self.save()
    }

    /// Point first alias of given name at a new directory.
    ///
    /// Uses the current directory if no directory is given. Later duplicates
    /// keep their directory. Rewrites the alias file.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::NotFound`] if alias does not exist.
    /// - Return [`StoreError::InvalidDirectory`] if given directory does not
    ///   exist.
    /// - Return [`StoreError::WriteAliasFile`] if alias file cannot be
    ///   rewritten.
    #[instrument(skip(self, alias, directory), level = "debug")]
    pub fn replace(&mut self, alias: impl AsRef<str>, directory: Option<&Path>) -> Result<()> {
        let alias = alias.as_ref();
        let index = self.position(alias)?;
        let directory = self.target_directory(directory)?;

        let record = &mut self.records[index];
        info!("point alias {alias} from {:?} to {directory:?}", record.directory);
        record.directory = directory;
        self.save()
    }

    /// Remove first alias of given name.
    ///
    /// Later duplicates stay. Rewrites the alias file.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::NotFound`] if alias does not exist.
    /// - Return [`StoreError::WriteAliasFile`] if alias file cannot be
    ///   rewritten.
    #[instrument(skip(self, alias), level = "debug")]
    pub fn delete(&mut self, alias: impl AsRef<str>) -> Result<AliasRecord> {
        let index = self.position(alias.as_ref())?;
        let record = self.records.remove(index);
        info!("delete alias {record}");
        self.save()?;

        Ok(record)
    }

    /// Render every record as an alias file line, in file order.
    pub fn serialize(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    /// Rewrite alias file with current content of the store.
    ///
    /// A symlinked alias file is written through, leaving the link intact.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::WriteAliasFile`] if alias file cannot be
    ///   written.
    pub fn save(&self) -> Result<()> {
        let write_error = |err| StoreError::WriteAliasFile {
            source: err,
            alias_path: self.alias_path.clone(),
        };

        // INVARIANT: Rename onto the real file, never over a symlink.
        let target = canonicalize(&self.alias_path).unwrap_or_else(|_| self.alias_path.clone());
        let mut temp_name = target.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = target.with_file_name(temp_name);

        debug!("write alias file {:?}", target.display());
        write(&temp_path, self.to_string().as_bytes()).map_err(write_error)?;
        rename(&temp_path, &target).map_err(write_error)?;

        Ok(())
    }

    fn position(&self, alias: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.alias == alias)
            .ok_or_else(|| StoreError::NotFound {
                alias: alias.to_owned(),
            })
    }

    fn target_directory(&self, directory: Option<&Path>) -> Result<String> {
        match directory {
            Some(directory) if !self.canonicalizer.is_dir(directory) => {
                Err(StoreError::InvalidDirectory {
                    path: directory.to_path_buf(),
                })
            }
            Some(directory) => Ok(self.canonicalizer.resolve(directory)),
            None => Ok(self.canonicalizer.resolve_current_dir()),
        }
    }
}

impl<F> Display for AliasStore<F>
where
    F: FileSystem,
{
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        for record in &self.records {
            writeln!(fmt, "{record}")?;
        }

        Ok(())
    }
}

/// Parse alias file content.
///
/// Returns parsed records in file order, along with every line that failed
/// to parse. Lines that are not valid UTF-8 count as failed. Line numbers
/// count every physical line, comments and blank lines included.
pub fn parse_records(
    content: impl AsRef<[u8]>,
    alias_path: &Path,
) -> (Vec<AliasRecord>, Vec<MalformedLine>) {
    let mut records = Vec::new();
    let mut malformed = Vec::new();

    for (index, line) in content.as_ref().split(|byte| *byte == b'\n').enumerate() {
        let line = std::str::from_utf8(line).map(str::trim);
        if matches!(line, Ok(line) if line.is_empty() || line.starts_with('#')) {
            continue;
        }

        match line.ok().and_then(parse_line) {
            Some(record) => records.push(record),
            None => malformed.push(MalformedLine {
                line: index + 1,
                path: alias_path.to_path_buf(),
            }),
        }
    }

    (records, malformed)
}

/// All possible error types for alias store interaction.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Alias does not exist in the store.
    #[error("not a directory alias: {alias}")]
    NotFound { alias: String },

    /// Directory given for an alias does not exist.
    #[error("directory does not exist: {}", path.display())]
    InvalidDirectory { path: PathBuf },

    /// Alias file cannot be created when missing.
    #[error("failed to create alias file at {:?}", alias_path.display())]
    CreateAliasFile {
        #[source]
        source: std::io::Error,
        alias_path: PathBuf,
    },

    /// Alias file cannot be read from.
    #[error("failed to read from alias file at {:?}", alias_path.display())]
    ReadAliasFile {
        #[source]
        source: std::io::Error,
        alias_path: PathBuf,
    },

    /// Alias file cannot be written to.
    #[error("failed to write to alias file at {:?}", alias_path.display())]
    WriteAliasFile {
        #[source]
        source: std::io::Error,
        alias_path: PathBuf,
    },
}

/// Friendly result alias :3
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
