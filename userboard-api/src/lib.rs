//! # Userboard API Server Library
//!
//! This library provides the core functionality for the Userboard API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: Route handlers and page rendering

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
