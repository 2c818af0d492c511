//! Shared types and configuration for Filedock.
//!
//! This crate provides common pieces used across all other crates:
//! - Typed file identifiers
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::FileId;
