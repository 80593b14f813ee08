// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pgprint")]
#[command(version, about = "Render planner and parse-tree nodes from a heap snapshot")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,

    /// JSON file with rendering options
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Truncate nodes nested deeper than this
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Render the node an expression points to
    Print {
        /// Heap snapshot to read
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Expression, e.g. "stmt->planTree"
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List the symbols a snapshot defines
    Symbols {
        #[arg(short, long)]
        snapshot: PathBuf,
    },

    /// Start the interactive console
    Repl {
        #[arg(short, long)]
        snapshot: PathBuf,
    },
}
