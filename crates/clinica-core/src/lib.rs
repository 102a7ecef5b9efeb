//! clinica-core
//!
//! Pure domain types shared by the measurement and progress engines.
//! No I/O. Records are loaded and persisted by the surrounding application
//! and handed to the engines as plain values.

pub mod error;
pub mod lenient;
pub mod models;
