use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StreaksError;
use crate::features::stats::effective_target;

pub type HabitId = i64;

static COLOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap_or_else(|e| panic!("Invalid color regex: {e}"))
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    /// Daily goal. Always positive for stored habits.
    pub target: f64,
    #[serde(default)]
    pub unit: Option<String>,
    pub color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Whether `progress` meets this habit's daily goal.
    #[must_use]
    pub fn is_met_by(&self, progress: f64) -> bool {
        progress >= effective_target(self.target)
    }

    /// Target with its unit, e.g. `8 glasses`.
    #[must_use]
    pub fn target_label(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} {unit}", format_amount(self.target)),
            None => format_amount(self.target),
        }
    }
}

/// Progress logged against one habit for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitCompletion {
    pub habit_id: HabitId,
    pub completion_date: NaiveDate,
    pub progress: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl HabitCompletion {
    #[must_use]
    pub const fn new(habit_id: HabitId, completion_date: NaiveDate, progress: f64) -> Self {
        Self {
            habit_id,
            completion_date,
            progress,
            notes: None,
        }
    }
}

/// Fields for creating a habit.
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub name: String,
    pub target: f64,
    pub unit: Option<String>,
    pub color: String,
}

impl NewHabit {
    /// Check name, target, and color.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::InvalidArgument` for the first invalid field.
    pub fn validate(&self) -> Result<(), StreaksError> {
        validate_name(&self.name)?;
        validate_target(self.target)?;
        validate_color(&self.color)
    }
}

/// Partial update for an existing habit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub target: Option<f64>,
    pub unit: Option<String>,
    pub color: Option<String>,
}

impl HabitUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.target.is_none() && self.unit.is_none() && self.color.is_none()
    }

    /// Check every field that is set.
    ///
    /// # Errors
    ///
    /// Returns `StreaksError::InvalidArgument` for the first invalid field.
    pub fn validate(&self) -> Result<(), StreaksError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(target) = self.target {
            validate_target(target)?;
        }
        if let Some(color) = &self.color {
            validate_color(color)?;
        }
        Ok(())
    }
}

/// How a habit is referred to on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitRef {
    Id(HabitId),
    Name(String),
}

impl HabitRef {
    /// Numeric input is an id, anything else a name.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        input
            .parse::<HabitId>()
            .map_or_else(|_| Self::Name(input.to_string()), Self::Id)
    }
}

impl std::fmt::Display for HabitRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

fn validate_name(name: &str) -> Result<(), StreaksError> {
    if name.trim().is_empty() {
        return Err(StreaksError::InvalidArgument(
            "habit name must not be empty".to_string(),
        ));
    }
    if name.trim().parse::<HabitId>().is_ok() {
        return Err(StreaksError::InvalidArgument(format!(
            "habit name '{name}' is numeric and would be read as an id"
        )));
    }
    Ok(())
}

fn validate_target(target: f64) -> Result<(), StreaksError> {
    if !target.is_finite() || target <= 0.0 {
        return Err(StreaksError::InvalidArgument(format!(
            "target must be a positive number, got {target}"
        )));
    }
    Ok(())
}

fn validate_color(color: &str) -> Result<(), StreaksError> {
    if !COLOR_PATTERN.is_match(color) {
        return Err(StreaksError::InvalidArgument(format!(
            "color must look like #RRGGBB, got '{color}'"
        )));
    }
    Ok(())
}

/// Format a progress amount without a trailing `.0`.
#[must_use]
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_habit(name: &str, target: f64, color: &str) -> NewHabit {
        NewHabit {
            name: name.to_string(),
            target,
            unit: None,
            color: color.to_string(),
        }
    }

    #[test]
    fn test_validate_new_habit() {
        assert!(new_habit("Water", 8.0, "#22c55e").validate().is_ok());
        assert!(new_habit("", 8.0, "#22c55e").validate().is_err());
        assert!(new_habit("42", 8.0, "#22c55e").validate().is_err());
        assert!(new_habit("Water", 0.0, "#22c55e").validate().is_err());
        assert!(new_habit("Water", -3.0, "#22c55e").validate().is_err());
        assert!(new_habit("Water", f64::NAN, "#22c55e").validate().is_err());
        assert!(new_habit("Water", 8.0, "green").validate().is_err());
        assert!(new_habit("Water", 8.0, "#22c55").validate().is_err());
    }

    #[test]
    fn test_habit_ref_parse() {
        assert_eq!(HabitRef::parse("12"), HabitRef::Id(12));
        assert_eq!(HabitRef::parse(" Read "), HabitRef::Name("Read".to_string()));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(8.0), "8");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(0.333), "0.33");
    }

    #[test]
    fn test_is_met_by_uses_clamped_target() {
        let habit = Habit {
            id: 1,
            name: "Stretch".to_string(),
            target: 0.5,
            unit: None,
            color: "#000000".to_string(),
            is_active: true,
            created_at: Utc::now(),
        };
        assert!(!habit.is_met_by(0.5));
        assert!(habit.is_met_by(1.0));
    }

    #[test]
    fn test_completion_json_shape() {
        let completion = HabitCompletion::new(3, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(), 2.0);
        let json = serde_json::to_value(&completion).unwrap();
        assert_eq!(json["completion_date"], "2026-10-16");
        assert_eq!(json["habit_id"], 3);
    }
}
