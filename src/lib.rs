// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Short mnemonic aliases for directories.
//!
//! Ada binds short names to directories, and keeps those bindings in one
//! alias file that a POSIX shell can source directly:
//!
//! ```text
//! alias proj='cd /home/user/projects'
//! alias win='cd /c/Users/me'
//! ```
//!
//! Every directory is stored in canonical form (see
//! [`path::canonical`]), so the same alias file works from any shell on any
//! platform. The [`store`] module owns the alias file, while the [`command`]
//! module maps command line operations onto it.

pub mod alias;
pub mod command;
pub mod config;
pub mod path;
pub mod store;

pub use alias::{AliasRecord, MalformedLine};
pub use command::{Command, OperationFlags, UsageError};
pub use config::Config;
pub use path::canonical::PathCanonicalizer;
pub use store::AliasStore;
