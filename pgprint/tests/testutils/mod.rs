//! Test utilities for pgprint integration tests
//!
//! Snapshots are built in memory with [`snapshot_fixture::SnapshotFixture`],
//! which hands out addresses and fills in the fields each renderer reads.

#![allow(dead_code)]

pub mod snapshot_fixture;
