//! Pure report services.

pub mod access;
pub mod aggregate;
pub mod rollup;
pub mod scope;
