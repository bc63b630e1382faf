//! # Userboard Shared Library
//!
//! Database plumbing and models used by the Userboard API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection settings, retry policy and the connection provisioner
//! - `models`: Database models and their queries

pub mod db;
pub mod models;

/// Current version of the Userboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
