//! Core library for pxscale.
//!
//! pxscale rewrites hard-coded pixel literals in Remotion scene components
//! into calls to a resolution-aware scaling helper (`s(N)`), binds that
//! helper inside every scene component and imports its hook. The rewrite is
//! purely textual and idempotent: running it twice changes nothing.
//!
//! The library exposes the pipeline ([`rewrite`]) for direct use and the
//! batch driver ([`commands`]) behind the `pxscale` binary.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling the batch run and the stdin filter.
pub mod commands;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module defining the entry point logic shared by the binary and tests.
pub mod entry_point;

/// Byte-range edits and their validated application.
pub mod fix;

/// Module for colored status lines and tables.
pub mod output;

/// The ordered text-transformation pipeline.
pub mod rewrite;

/// Module containing utility functions.
pub mod utils;
