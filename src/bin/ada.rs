// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use ada::{
    command::{Command, OperationFlags, UsageError},
    config::Config,
    store::AliasStore,
};

use anyhow::Result;
use clap::Parser;
use std::{
    env::args_os,
    io::{stderr, stdout},
    path::{Path, PathBuf},
    process::exit,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "ada [options] [<alias>] [<directory>]",
    arg_required_else_help = true,
    version
)]
struct Cli {
    /// Add directory alias. Uses current directory if none supplied.
    #[arg(short = 'a')]
    pub add: bool,

    /// Remove directory alias.
    #[arg(short = 'd')]
    pub delete: bool,

    /// Replace directory of alias. Uses current directory if none supplied.
    #[arg(short = 'r')]
    pub replace: bool,

    /// Print alias of directory. Uses current directory if none supplied.
    #[arg(short = 't')]
    pub this_dir: bool,

    /// List all directory aliases.
    #[arg(short = 'l')]
    pub list: bool,

    /// List names of all directory aliases.
    #[arg(short = 'm')]
    pub list_names: bool,

    /// Alias file to use instead of the default.
    #[arg(long, env = "ADA_ALIAS_FILE", value_name = "path")]
    pub alias_file: Option<PathBuf>,

    /// Alias to operate on, followed by its directory.
    #[arg(value_name = "args")]
    pub args: Vec<String>,
}

impl Cli {
    fn run(self) -> Result<()> {
        let flags = OperationFlags {
            add: self.add,
            delete: self.delete,
            replace: self.replace,
            this_dir: self.this_dir,
            list: self.list,
            list_names: self.list_names,
        };

        // INVARIANT: Reject bad usage before the alias file is touched.
        let command = Command::select(flags, self.args)?;
        let config = Config::load(self.alias_file)?;
        let mut store = AliasStore::open(&config)?;
        command.run(&mut store, &mut stdout().lock())?;

        Ok(())
    }
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time()
        .with_writer(stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        eprintln!("{} Error: {error:#}", program_name());
        exit(exit_code(&error));
    }

    exit(0)
}

fn run() -> Result<()> {
    Cli::parse().run()
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if error.is::<UsageError>() {
        2
    } else {
        1
    }
}

fn program_name() -> String {
    args_os()
        .next()
        .and_then(|arg| {
            Path::new(&arg)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").into())
}
