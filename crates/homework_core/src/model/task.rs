use crate::error::AppError;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Task priority, ordered lowest to highest. The ordinal (0-3) is the
/// on-disk representation; anything outside that range is rejected at the
/// conversion boundary instead of being coerced to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::VeryHigh,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::VeryHigh => "Very High",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = AppError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        match ordinal {
            0 => Ok(Priority::Low),
            1 => Ok(Priority::Medium),
            2 => Ok(Priority::High),
            3 => Ok(Priority::VeryHigh),
            other => Err(AppError::invalid_argument(format!(
                "priority ordinal {other} is out of range (0-3)"
            ))),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.ordinal()
    }
}

/// One homework item. Fields are public and setters are plain assignment;
/// required-field validation lives in the editing workflow (`task_api`),
/// not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub due_date: OffsetDateTime,
    pub class_name: String,
    #[serde(default)]
    pub completed: bool,
    pub priority: Priority,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        due_date: OffsetDateTime,
        class_name: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            title: title.into(),
            due_date,
            class_name: class_name.into(),
            completed: false,
            priority,
        }
    }

    pub fn mark_complete(&mut self) {
        self.completed = true;
    }

    pub fn mark_incomplete(&mut self) {
        self.completed = false;
    }

    /// Strict comparison: a task due exactly `now` is not overdue.
    pub fn is_overdue(&self, now: OffsetDateTime) -> bool {
        now > self.due_date
    }
}
