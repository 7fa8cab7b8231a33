// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use prebin::commands::install::InstallCommand;
use prebin::commands::run::RunCommand;
use prebin::commands::uninstall::UninstallCommand;
use prebin::config::{MANIFEST_FILE_NAME, PrebinConfig};
use prebin::error::{Result, format_error_chain, get_exit_code};
use prebin::logging;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prebin")]
#[command(author, version, about = "Installer for prebuilt release binaries", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the package manifest
    #[arg(long, value_name = "PATH", default_value = MANIFEST_FILE_NAME, global = true)]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and install the binary for the current platform
    #[command(visible_alias = "i")]
    Install {
        /// Force reinstall even if already installed
        #[arg(short, long)]
        force: bool,

        /// Disable progress indicators
        #[arg(long)]
        no_progress: bool,

        /// Download timeout in seconds
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,
    },

    /// Run the installed binary, forwarding arguments and exit code
    Run {
        /// Arguments passed through to the binary
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },

    /// Remove the installed binary
    #[command(visible_alias = "u", alias = "remove")]
    Uninstall,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger based on CLI flags and environment
    logging::setup_logger(cli.verbose);

    // Load the manifest once at startup
    let config = match PrebinConfig::load(&cli.manifest) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| {
        match cli.command {
            Commands::Install {
                force,
                no_progress,
                timeout,
            } => {
                let command = InstallCommand::new(&config)?;
                command.execute(force, no_progress, timeout)
            }
            Commands::Run { args } => {
                let command = RunCommand::new(&config)?;
                command.execute(args)
            }
            Commands::Uninstall => {
                let command = UninstallCommand::new(&config)?;
                command.execute()
            }
        }
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }
}
