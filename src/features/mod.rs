//! Feature implementations for streaks.
//!
//! - Statistics, calendar, insights, and achievements
//! - Shell integration

pub mod shell;
pub mod stats;
