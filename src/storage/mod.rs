//! Storage layer for streaks.
//!
//! `SQLite`-based persistence for habits and their daily completions.

mod database;
mod migrations;

pub use database::Database;
