// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for pgprint
//!
//! Provides one-shot rendering of a snapshot expression, a symbol listing,
//! and an interactive console.

pub mod commands;
pub mod handlers;
pub mod output;
pub mod repl;

pub use commands::{Cli, Commands};
pub use handlers::{handle_print, handle_repl, handle_symbols, load_config};
