//! Habits and their daily completions.

mod store;
mod types;

pub use store::HabitStore;
pub use types::{
    format_amount, Habit, HabitCompletion, HabitId, HabitRef, HabitUpdate, NewHabit,
};
