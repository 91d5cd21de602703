// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Operations on the alias store.
//!
//! The command line selects exactly one operation through a flag, and feeds
//! it positional arguments:
//!
//! | Flag | Operation                        | Positional arguments      |
//! |------|----------------------------------|---------------------------|
//! | `-a` | add alias                        | `<alias> [<directory>]`   |
//! | `-d` | delete alias                     | `<alias>`                 |
//! | `-r` | replace alias directory          | `<alias> [<directory>]`   |
//! | `-t` | print alias of directory         | `[<directory>]`           |
//! | `-l` | list aliases in alias file form  | none                      |
//! | `-m` | list alias names                 | none                      |
//!
//! Directories default to the current directory when left out.

use crate::{
    alias::is_valid_name,
    path::canonical::FileSystem,
    store::{AliasStore, StoreError},
};

use std::{io::Write, path::PathBuf};
use tracing::{debug, instrument};

/// Operation flags given on the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OperationFlags {
    pub add: bool,
    pub delete: bool,
    pub replace: bool,
    pub this_dir: bool,
    pub list: bool,
    pub list_names: bool,
}

impl OperationFlags {
    fn count(&self) -> usize {
        [
            self.add,
            self.delete,
            self.replace,
            self.this_dir,
            self.list,
            self.list_names,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

/// Single operation to perform on the alias store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append new alias.
    Add {
        alias: String,
        directory: Option<PathBuf>,
    },

    /// Remove first alias of given name.
    Delete { alias: String },

    /// Point first alias of given name at another directory.
    Replace {
        alias: String,
        directory: Option<PathBuf>,
    },

    /// Print name of first alias pointing at directory.
    ThisDir { directory: Option<PathBuf> },

    /// Print every alias the way the alias file stores it.
    List,

    /// Print every alias name on one line, comma separated.
    ListNames,
}

impl Command {
    /// Select operation from flags and positional arguments.
    ///
    /// # Errors
    ///
    /// - Return [`UsageError::TooManyOperations`] if more than one operation
    ///   flag is set.
    /// - Return [`UsageError::NoOperation`] if no operation flag is set.
    /// - Return [`UsageError::MissingAlias`] if operation needs an alias,
    ///   but none was given.
    /// - Return [`UsageError::InvalidAliasName`] if new alias is not made of
    ///   word characters.
    /// - Return [`UsageError::UnexpectedArgument`] if operation was given
    ///   more positional arguments than it takes.
    pub fn select(
        flags: OperationFlags,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, UsageError> {
        match flags.count() {
            0 => return Err(UsageError::NoOperation),
            1 => {}
            _ => return Err(UsageError::TooManyOperations),
        }

        let mut args = args.into_iter().map(Into::<String>::into);
        let command = if flags.add {
            let alias = args.next().ok_or(UsageError::MissingAlias { action: "add" })?;
            if !is_valid_name(&alias) {
                return Err(UsageError::InvalidAliasName { name: alias });
            }
            Self::Add {
                alias,
                directory: args.next().map(PathBuf::from),
            }
        } else if flags.delete {
            Self::Delete {
                alias: args.next().ok_or(UsageError::MissingAlias { action: "delete" })?,
            }
        } else if flags.replace {
            Self::Replace {
                alias: args.next().ok_or(UsageError::MissingAlias { action: "replace" })?,
                directory: args.next().map(PathBuf::from),
            }
        } else if flags.this_dir {
            Self::ThisDir {
                directory: args.next().map(PathBuf::from),
            }
        } else if flags.list {
            Self::List
        } else {
            Self::ListNames
        };

        // INVARIANT: Every positional argument must be consumed.
        if let Some(argument) = args.next() {
            return Err(UsageError::UnexpectedArgument { argument });
        }

        debug!("selected command {command:?}");
        Ok(command)
    }

    /// Run operation on alias store, printing any results to given output.
    ///
    /// Mutating operations rewrite the alias file on success only.
    ///
    /// # Errors
    ///
    /// - Return [`CommandError::Store`] if the alias store refuses the
    ///   operation.
    /// - Return [`CommandError::Output`] if results cannot be printed.
    #[instrument(skip(store, out), level = "debug")]
    pub fn run<F>(self, store: &mut AliasStore<F>, out: &mut impl Write) -> Result<()>
    where
        F: FileSystem,
    {
        match self {
            Self::Add { alias, directory } => store.add(alias, directory.as_deref())?,
            Self::Delete { alias } => {
                store.delete(alias)?;
            }
            Self::Replace { alias, directory } => store.replace(alias, directory.as_deref())?,
            Self::ThisDir { directory } => {
                if let Some(record) = store.find_by_path(directory.as_deref()) {
                    writeln!(out, "{}", record.alias)?;
                }
            }
            Self::List => write!(out, "{store}")?,
            Self::ListNames => writeln!(out, "{}", store.names().collect::<Vec<_>>().join(", "))?,
        }

        Ok(())
    }
}

/// Command line was used wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// More than one operation flag was given.
    #[error("only one of -a, -d, -r, -t, -l, -m can be supplied")]
    TooManyOperations,

    /// No operation flag was given.
    #[error("one of -a, -d, -r, -t, -l, -m must be supplied")]
    NoOperation,

    /// Operation needs an alias to work on.
    #[error("you must supply an alias to {action}")]
    MissingAlias { action: &'static str },

    /// New alias is not made of word characters.
    #[error("invalid alias name {name:?}, use letters, digits, and underscores only")]
    InvalidAliasName { name: String },

    /// Operation does not take this many positional arguments.
    #[error("unexpected argument {argument:?}")]
    UnexpectedArgument { argument: String },
}

/// Command execution error types.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Alias store refused operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Results cannot be printed.
    #[error("failed to print results")]
    Output(#[from] std::io::Error),
}

/// Friendly result alias :3
type Result<T, E = CommandError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alias::AliasRecord, config::Config, path::canonical::to_slash_form};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;
    use simple_test_case::test_case;
    use std::{fs, path::Path};

    fn flags(letters: &str) -> OperationFlags {
        OperationFlags {
            add: letters.contains('a'),
            delete: letters.contains('d'),
            replace: letters.contains('r'),
            this_dir: letters.contains('t'),
            list: letters.contains('l'),
            list_names: letters.contains('m'),
        }
    }

    fn open_store(content: &str) -> anyhow::Result<AliasStore> {
        let cwd = std::env::current_dir()?;
        fs::write(".dir-aliases", content)?;
        Ok(AliasStore::open(&Config::new(cwd.join(".dir-aliases"), cwd))?)
    }

    fn run(command: Command, store: &mut AliasStore) -> anyhow::Result<String> {
        let mut out = Vec::new();
        command.run(store, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test_case("a", &["proj"], Command::Add { alias: "proj".into(), directory: None }; "add here")]
    #[test_case("a", &["proj", "/srv"], Command::Add { alias: "proj".into(), directory: Some("/srv".into()) }; "add directory")]
    #[test_case("d", &["proj"], Command::Delete { alias: "proj".into() }; "delete")]
    #[test_case("r", &["proj"], Command::Replace { alias: "proj".into(), directory: None }; "replace here")]
    #[test_case("r", &["proj", "/srv"], Command::Replace { alias: "proj".into(), directory: Some("/srv".into()) }; "replace directory")]
    #[test_case("t", &[], Command::ThisDir { directory: None }; "this dir")]
    #[test_case("t", &["/srv"], Command::ThisDir { directory: Some("/srv".into()) }; "other dir")]
    #[test_case("l", &[], Command::List; "list")]
    #[test_case("m", &[], Command::ListNames; "list names")]
    #[test]
    fn select_command(letters: &str, args: &[&str], expect: Command) {
        pretty_assertions::assert_eq!(Command::select(flags(letters), args.iter().copied()), Ok(expect));
    }

    #[test_case("ad", &["proj"], UsageError::TooManyOperations; "add and delete")]
    #[test_case("lm", &[], UsageError::TooManyOperations; "both listings")]
    #[test_case("", &["proj"], UsageError::NoOperation; "positional only")]
    #[test_case("a", &[], UsageError::MissingAlias { action: "add" }; "add without alias")]
    #[test_case("d", &[], UsageError::MissingAlias { action: "delete" }; "delete without alias")]
    #[test_case("r", &[], UsageError::MissingAlias { action: "replace" }; "replace without alias")]
    #[test_case("a", &["my-proj"], UsageError::InvalidAliasName { name: "my-proj".into() }; "add bad name")]
    #[test_case("d", &["a", "b"], UsageError::UnexpectedArgument { argument: "b".into() }; "delete extra")]
    #[test_case("l", &["x"], UsageError::UnexpectedArgument { argument: "x".into() }; "list extra")]
    #[test]
    fn select_command_fails(letters: &str, args: &[&str], expect: UsageError) {
        pretty_assertions::assert_eq!(Command::select(flags(letters), args.iter().copied()), Err(expect));
    }

    #[sealed_test]
    fn run_listings() -> anyhow::Result<()> {
        let content = indoc! {r#"
            alias proj='cd /home/user/projects'
            alias docs='cd /home/user/docs'
        "#};
        let mut store = open_store(content)?;

        assert_eq!(run(Command::List, &mut store)?, content);
        assert_eq!(run(Command::ListNames, &mut store)?, "proj, docs\n");

        Ok(())
    }

    #[sealed_test]
    fn run_this_dir() -> anyhow::Result<()> {
        fs::create_dir_all("projects")?;
        let here = to_slash_form(fs::canonicalize(".")?.to_string_lossy());
        let mut store = open_store(&format!("alias here='cd {here}'\n"))?;

        let result = run(Command::ThisDir { directory: None }, &mut store)?;
        assert_eq!(result, "here\n");

        let result = run(Command::ThisDir { directory: Some("projects".into()) }, &mut store)?;
        assert_eq!(result, "");

        Ok(())
    }

    #[sealed_test]
    fn run_mutations() -> anyhow::Result<()> {
        fs::create_dir_all("work")?;
        let work = to_slash_form(fs::canonicalize("work")?.to_string_lossy());
        let mut store = open_store("")?;

        let command = Command::Add {
            alias: "w".into(),
            directory: Some("work".into()),
        };
        assert_eq!(run(command, &mut store)?, "");
        assert_eq!(store.records(), [AliasRecord::new("w", &work)]);

        let command = Command::Replace {
            alias: "w".into(),
            directory: None,
        };
        run(command, &mut store)?;
        let here = to_slash_form(fs::canonicalize(".")?.to_string_lossy());
        assert_eq!(store.records(), [AliasRecord::new("w", here)]);

        run(Command::Delete { alias: "w".into() }, &mut store)?;
        assert!(store.records().is_empty());
        assert_eq!(fs::read_to_string(Path::new(".dir-aliases"))?, "");

        Ok(())
    }

    #[sealed_test]
    fn run_delete_missing_alias() -> anyhow::Result<()> {
        let mut store = open_store("alias a='cd /a'\n")?;

        let mut out = Vec::new();
        let result = Command::Delete { alias: "nope".into() }.run(&mut store, &mut out);
        assert!(matches!(
            result,
            Err(CommandError::Store(StoreError::NotFound { .. }))
        ));
        assert_eq!(
            result.map_err(|error| error.to_string()),
            Err("not a directory alias: nope".into())
        );

        Ok(())
    }
}
