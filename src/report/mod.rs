//! Reporting: the year-by-year ACE/NTC table and timing messages.

pub mod format;

pub use format::*;
