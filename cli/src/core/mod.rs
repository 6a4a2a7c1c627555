//! # Canon Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `config`: configuration loading, merging and validation
//! - `error`: the `CanonError` taxonomy and the crate-wide `Result` alias
//! - `templating`: Tera rendering for skeletons and the context file
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{CanonError, Result}; // For error handling
//! use crate::core::templating; // For rendering templates
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
