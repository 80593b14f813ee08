// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for pgprint

use colored::Colorize;
use std::path::{Path, PathBuf};

use super::output::ReportFormatter;
use super::repl::run_console;
use pgprint::{DispatchTable, InspectConfig, PrintCommand, SnapshotMemory};

/// Rendering options from `--config`, with `--max-depth` taking precedence
pub fn load_config(
    path: Option<&Path>,
    max_depth: Option<usize>,
) -> Result<InspectConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => InspectConfig::load(path)
            .map_err(|e| format!("Failed to load config {:?}: {}", path, e))?,
        None => InspectConfig::default(),
    };

    Ok(match max_depth {
        Some(depth) => config.with_max_depth(Some(depth)),
        None => config,
    })
}

/// Handle the print command (one-off rendering)
pub fn handle_print(
    snapshot: PathBuf,
    args: Vec<String>,
    config: InspectConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let memory = load_snapshot(&snapshot)?;
    let command = PrintCommand::new(&memory, &memory, DispatchTable::global(), config);

    match command.invoke(&shell_words::join(&args)) {
        Ok(report) => {
            println!("{}", ReportFormatter::report(&report));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            Err(e.into())
        }
    }
}

/// Handle the symbols command
pub fn handle_symbols(snapshot: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let memory = load_snapshot(&snapshot)?;
    println!("{}", ReportFormatter::symbols(&memory));
    Ok(())
}

/// Handle the repl command
pub fn handle_repl(
    snapshot: PathBuf,
    config: InspectConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let memory = load_snapshot(&snapshot)?;

    println!("{}", "pgprint".bold().green());
    println!(
        "Loaded {} records from {:?}",
        memory.record_count(),
        snapshot
    );
    println!("Type 'help' for commands, 'quit' to exit\n");

    run_console(&memory, config)
}

fn load_snapshot(path: &Path) -> Result<SnapshotMemory, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("Snapshot not found at {:?}", path).into());
    }
    SnapshotMemory::load(path).map_err(|e| format!("Failed to read snapshot {:?}: {}", path, e).into())
}
