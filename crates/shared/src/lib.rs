//! Shared utilities and common types for the Worklog backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Offset pagination parameters
//! - Sort specification parsing
//! - Common validation logic
//! - JWT utilities

pub mod jwt;
pub mod pagination;
pub mod sorting;
pub mod validation;
