//! Booth Billing Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the booth billing system. It includes:
//!
//! - Domain models (CallCategory, Call, Booth, summary records)
//! - The duration source abstraction used when registering calls
//! - Unified error handling
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
