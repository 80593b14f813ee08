// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! pgprint CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = cli::load_config(cli.config.as_deref(), cli.max_depth)?;

    match cli.command {
        Commands::Version => {
            println!("{} {}", "pgprint".bold().green(), pgprint::VERSION);
            println!("Planner and parse-tree node inspector");
            Ok(())
        }

        Commands::Print { snapshot, args } => cli::handle_print(snapshot, args, config),

        Commands::Symbols { snapshot } => cli::handle_symbols(snapshot),

        Commands::Repl { snapshot } => cli::handle_repl(snapshot, config),
    }
}
