//! `expense-ledger` - the persistence layer of a personal expense tracker
//!
//! This crate provides the data-access layer for a two-entity ledger backed
//! by a local `SQLite` file: an account store (CRUD over bank accounts), an
//! append-only transaction log with full and last-N reads, and a schema
//! manager with a destructive version-upgrade policy.

#![deny(
    unsafe_code,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unwrap_used,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc // Will add gradually
)]

/// Configuration loading for the database path
pub mod config;
/// Account store, transaction store, schema manager, and connection handling
pub mod db;
/// Unified error types and result handling
pub mod errors;
/// Account, transaction, and expense-type records
pub mod models;
