//! Persistence layer for the Worklog backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - The sqlx implementation of the work-entry store

pub mod db;
pub mod entities;
pub mod repositories;
