//! Core utilities shared across commands.

mod datetime;

pub use datetime::{local_today, parse_date};
