// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Directory alias records.
//!
//! A __directory alias__ is a short name bound to one directory. Each alias
//! is stored as its own line in the alias file using POSIX shell alias
//! syntax, so the file itself can be sourced by a shell:
//!
//! ```text
//! alias proj='cd /home/user/projects'
//! ```
//!
//! # Line Grammar
//!
//! The keywords `alias` and `cd` match without regard to case. The alias name
//! is made of word characters only (`[A-Za-z0-9_]`). The directory is
//! everything between `cd` and the closing single quote, minus surrounding
//! whitespace. It may contain spaces and slashes.

use regex::Regex;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    path::PathBuf,
    sync::LazyLock,
};

// INVARIANT: Constant pattern, exercised by the unit tests below.
static ALIAS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)alias\s+(?P<name>[A-Za-z0-9_]+)\s*=\s*'cd\s+(?P<value>\S(?:.*\S)?)\s*'")
        .expect("constant alias line pattern is valid")
});

/// Single alias entry of the alias file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    /// Name of the alias.
    pub alias: String,

    /// Canonical directory the alias points to.
    pub directory: String,
}

impl AliasRecord {
    /// Construct new alias record.
    pub fn new(alias: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            directory: directory.into(),
        }
    }
}

impl Display for AliasRecord {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        write!(fmt, "alias {}='cd {}'", self.alias, self.directory)
    }
}

/// Parse one line of the alias file.
///
/// Surrounding whitespace is ignored. Returns `None` if the line does not
/// follow the alias line grammar. Comment and blank line handling is left to
/// the caller.
pub fn parse_line(line: impl AsRef<str>) -> Option<AliasRecord> {
    let captures = ALIAS_LINE.captures(line.as_ref().trim())?;
    Some(AliasRecord::new(&captures["name"], &captures["value"]))
}

/// Check that an alias name only holds word characters.
pub fn is_valid_name(name: impl AsRef<str>) -> bool {
    let name = name.as_ref();
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Line of the alias file that could not be parsed.
///
/// Not fatal. Loading skips the line and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// Line number, starting at 1.
    pub line: usize,

    /// Alias file the line came from.
    pub path: PathBuf,
}

impl Display for MalformedLine {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        write!(
            fmt,
            "alias on line {} of file {} is invalid",
            self.line,
            self.path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use simple_test_case::test_case;

    #[test_case("alias proj='cd /home/user/projects'", "proj", "/home/user/projects"; "plain")]
    #[test_case("  alias proj='cd /home/user/projects'  ", "proj", "/home/user/projects"; "surrounding whitespace")]
    #[test_case("ALIAS Proj_2 = 'CD /c/Users/me'", "Proj_2", "/c/Users/me"; "keyword case")]
    #[test_case("alias docs='cd /home/user/My Documents'", "docs", "/home/user/My Documents"; "spaces in directory")]
    #[test_case("alias root='cd /'", "root", "/"; "single character directory")]
    #[test_case("alias pad='cd    /srv/www   '", "pad", "/srv/www"; "padded directory")]
    #[test]
    fn parse_line_accepts(line: &str, alias: &str, directory: &str) {
        pretty_assertions::assert_eq!(parse_line(line), Some(AliasRecord::new(alias, directory)));
    }

    #[test_case("garbage"; "free text")]
    #[test_case("alias ='cd /tmp'"; "missing name")]
    #[test_case("alias my-proj='cd /tmp'"; "non word name")]
    #[test_case("alias proj='cd '"; "missing directory")]
    #[test_case("alias proj='ls /tmp'"; "not a cd command")]
    #[test_case("alias proj=cd /tmp"; "unquoted")]
    #[test]
    fn parse_line_rejects(line: &str) {
        pretty_assertions::assert_eq!(parse_line(line), None);
    }

    #[test]
    fn display_alias_record() {
        let record = AliasRecord::new("proj", "/home/user/My Projects");
        assert_eq!(record.to_string(), "alias proj='cd /home/user/My Projects'");
        assert_eq!(parse_line(record.to_string()), Some(record));
    }

    #[test_case("proj", true; "letters")]
    #[test_case("a_1", true; "underscore and digit")]
    #[test_case("", false; "empty")]
    #[test_case("my-proj", false; "dash")]
    #[test_case("ünï", false; "non ascii")]
    #[test]
    fn alias_name_validation(name: &str, expect: bool) {
        pretty_assertions::assert_eq!(is_valid_name(name), expect);
    }

    #[test]
    fn display_malformed_line() {
        let warning = MalformedLine {
            line: 2,
            path: PathBuf::from("/home/user/.dir-aliases"),
        };
        assert_eq!(
            warning.to_string(),
            "alias on line 2 of file /home/user/.dir-aliases is invalid"
        );
    }
}
