//! Repository implementations.

pub mod work_entry;

pub use work_entry::WorkEntryRepository;
