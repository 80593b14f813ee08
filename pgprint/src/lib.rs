// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! pgprint - readable dumps of query-plan and parse-tree nodes
//!
//! pgprint walks the tagged node records of a relational database engine
//! (plan trees, expressions, query and planner state, partitioning DDL) and
//! renders them as indented text reports for debugging sessions.
//!
//! # Features
//!
//! - **Tag dispatch**: one renderer per node tag, family renderers for
//!   plan-like nodes, and a bare-name fallback for everything else
//! - **Null-safe**: absent children render as `(NULL)` and absent lists as `(NIL)`
//! - **Pluggable memory**: renderers only see the [`MemoryAccessor`] contract;
//!   [`SnapshotMemory`] serves it from a JSON heap snapshot
//!
//! # Usage
//!
//! ```bash
//! # Render one expression from a snapshot
//! pgprint print --snapshot core.json "stmt->planTree"
//!
//! # Interactive console
//! pgprint repl --snapshot core.json
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod memory;
pub mod report;

pub use config::InspectConfig;
pub use error::{InspectError, InspectResult};
pub use format::{DispatchTable, Formatter, NodeTag};
pub use memory::{ExpressionEvaluator, Handle, MemoryAccessor, SnapshotMemory, Value, View};
pub use report::{render_report, PrintCommand, Report};

/// pgprint version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// pgprint crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
