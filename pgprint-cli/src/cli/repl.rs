// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Interactive console
//!
//! Console commands live in a [`CommandRegistry`] built once when the console
//! starts and torn down with [`CommandRegistry::shutdown`] when it exits.

use colored::Colorize;
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};
use std::collections::BTreeMap;
use std::path::Path;

use super::output::ReportFormatter;
use pgprint::{DispatchTable, InspectConfig, PrintCommand, SnapshotMemory};

/// Whether the console keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State shared by every console command
pub struct ConsoleContext<'a> {
    pub memory: &'a SnapshotMemory,
    pub print: PrintCommand<'a>,
}

type Handler = fn(&ConsoleContext<'_>, &CommandRegistry, &str) -> Flow;

struct RegisteredCommand {
    summary: &'static str,
    handler: Handler,
}

/// Named console commands
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Registry with `pgprint`, `symbols`, `help` and `quit`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(
            PrintCommand::NAME,
            "Render the node an expression points to",
            run_print,
        );
        registry.register("symbols", "List snapshot symbols", run_symbols);
        registry.register("help", "Show this help message", run_help);
        registry.register("quit", "Exit the console", run_quit);
        registry.register("exit", "Exit the console", run_quit);

        log::info!("Registered {} console commands", registry.commands.len());
        registry
    }

    pub fn register(&mut self, name: &'static str, summary: &'static str, handler: Handler) {
        self.commands
            .insert(name, RegisteredCommand { summary, handler });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Run one input line: the first word names the command, the rest is its argument
    pub fn dispatch(&self, ctx: &ConsoleContext<'_>, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest),
            None => (line, ""),
        };

        match self.commands.get(name) {
            Some(command) => (command.handler)(ctx, self, rest),
            None => {
                eprintln!(
                    "{}",
                    format!("Unknown command '{}'. Type 'help' for commands.", name).red()
                );
                Flow::Continue
            }
        }
    }

    /// Teardown boundary for the console's commands
    pub fn shutdown(self) {
        log::info!("Unregistered {} console commands", self.commands.len());
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn run_print(ctx: &ConsoleContext<'_>, _registry: &CommandRegistry, args: &str) -> Flow {
    match ctx.print.invoke(args) {
        Ok(report) => println!("{}", ReportFormatter::report(&report)),
        Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
    }
    Flow::Continue
}

fn run_symbols(ctx: &ConsoleContext<'_>, _registry: &CommandRegistry, _args: &str) -> Flow {
    println!("{}", ReportFormatter::symbols(ctx.memory));
    Flow::Continue
}

fn run_help(_ctx: &ConsoleContext<'_>, registry: &CommandRegistry, _args: &str) -> Flow {
    println!("{}", "Available commands:".bold().green());
    for (name, command) in &registry.commands {
        println!("  {:<8} - {}", name.cyan(), command.summary);
    }
    println!("\n{}", "Examples:".bold().green());
    println!("  {}", "pgprint stmt->planTree".yellow());
    println!("  {}", "pgprint \"(Plan *) 0x7f3a2c001040\"".yellow());
    Flow::Continue
}

fn run_quit(_ctx: &ConsoleContext<'_>, _registry: &CommandRegistry, _args: &str) -> Flow {
    Flow::Quit
}

/// Read-eval loop over one snapshot
pub fn run_console(
    memory: &SnapshotMemory,
    config: InspectConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = ConsoleContext {
        memory,
        print: PrintCommand::new(memory, memory, DispatchTable::global(), config),
    };
    let registry = CommandRegistry::with_builtins();

    let editor_config = Config::builder()
        .edit_mode(EditMode::Emacs)
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();

    let mut rl = Editor::<(), _>::with_config(editor_config)?;

    let history_path = ".pgprint/history.txt";
    if let Some(parent) = Path::new(history_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.load_history(history_path);

    loop {
        let line = match rl.readline(&format!("{} ", "pgprint>".cyan())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        if !line.trim().is_empty() {
            rl.add_history_entry(line.trim())?;
        }
        if registry.dispatch(&ctx, &line) == Flow::Quit {
            break;
        }
    }

    println!("{}", "Goodbye!".green());
    let _ = rl.save_history(history_path);
    registry.shutdown();
    Ok(())
}
