//! Database row mappings.

pub mod work_entry;

pub use work_entry::WorkEntryRow;
