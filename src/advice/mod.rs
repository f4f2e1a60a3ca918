//! Symptom matcher
//!
//! Case-insensitive substring lookup over a fixed, ordered advice table.

pub mod table;

pub use table::{AdviceEntry, AdviceMatch, AdviceTable, FALLBACK_ADVICE};
