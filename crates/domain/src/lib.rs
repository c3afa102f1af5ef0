//! Domain layer for the Worklog backend.
//!
//! This crate contains:
//! - Domain models (work entries, report filters, aggregation results)
//! - Pure report services (scope resolution, access guard, interval
//!   aggregation, daily rollup)
//! - The read-only record store capability trait
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;
pub mod store;
