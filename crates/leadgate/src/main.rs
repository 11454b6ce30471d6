// SPDX-FileCopyrightText: 2026 Leadgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! leadgate - website lead intake.
//!
//! This is the binary entry point: it loads configuration and dispatches to
//! the `serve`, `config`, and `submit` commands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;
mod submit;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leadgate_config::LeadgateConfig;

/// leadgate - forwards website contact forms to Telegram and Bitrix24.
#[derive(Parser, Debug)]
#[command(name = "leadgate", version, about, long_about = None)]
struct Cli {
    /// Load this TOML file instead of searching the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Print the effective configuration with secrets redacted.
    Config,
    /// Run a single lead through the pipeline and print the receipt.
    Submit(submit::SubmitArgs),
}

fn load_config(path: Option<&PathBuf>) -> LeadgateConfig {
    let loaded = match path {
        Some(path) => leadgate_config::load_and_validate_path(path),
        None => leadgate_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            leadgate_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Config) => print_config(&config),
        Some(Commands::Submit(args)) => submit::run_submit(config, args).await,
        None => {
            println!("leadgate: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &LeadgateConfig) -> Result<(), leadgate_core::LeadError> {
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| leadgate_core::LeadError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}
