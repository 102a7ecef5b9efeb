//! clinica-progress
//!
//! Treatment-plan adherence and progress rollups. Every function is a pure,
//! deterministic read over caller-owned tasks and goals; the reference
//! instant is always passed in, never read from the clock.

pub mod adherence;
pub mod roadmap;

pub use adherence::{AdherenceOptions, AdherenceSnapshot, compute_adherence, compute_adherence_with};
