use clap::{Parser, Subcommand};
use homework_core::calendar::CalendarCursor;
use homework_core::error::AppError;
use homework_core::model::Priority;
use homework_core::sort::SortKey;
use std::path::PathBuf;
use time::OffsetDateTime;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task file to operate on (overrides config and environment)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: homework add "Essay draft" --due 2025-03-15 --class English --priority high
    Add {
        title: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        due: String,
        #[arg(long = "class", value_name = "NAME")]
        class_name: String,
        #[arg(long, value_name = "LEVEL")]
        priority: String,
    },
    /// Edit a task; fields left out keep their current values
    ///
    /// Example: homework edit 0 --title "Final essay" --priority very-high
    Edit {
        index: usize,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        due: Option<String>,
        #[arg(long = "class", value_name = "NAME")]
        class_name: Option<String>,
        #[arg(long, value_name = "LEVEL")]
        priority: Option<String>,
    },
    /// Delete a task by its list position
    ///
    /// Example: homework delete 2
    Delete {
        index: usize,
    },
    /// Mark a task as complete
    ///
    /// Example: homework done 0
    Done {
        index: usize,
    },
    /// Mark a task as not complete
    ///
    /// Example: homework undone 0
    Undone {
        index: usize,
    },
    /// List all tasks
    ///
    /// Example: homework list
    List,
    /// Sort tasks by a key; with no key, advance to the next key in the
    /// name, class, due-date, priority cycle
    ///
    /// Example: homework sort due
    /// Example: homework sort
    Sort {
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
}

/// Accepts the four level names in any case/separator spelling, or a raw
/// ordinal 0-3.
pub fn parse_priority(raw: &str) -> Result<Priority, AppError> {
    if let Ok(ordinal) = raw.trim().parse::<u8>() {
        return Priority::try_from(ordinal);
    }

    match canonical_token(raw).as_deref() {
        Some("low") => Ok(Priority::Low),
        Some("medium") => Ok(Priority::Medium),
        Some("high") => Ok(Priority::High),
        Some("very_high") => Ok(Priority::VeryHigh),
        _ => Err(AppError::invalid_argument(format!(
            "unknown priority '{}' (expected low, medium, high or very-high)",
            raw.trim()
        ))),
    }
}

pub fn parse_sort_key(raw: &str) -> Result<SortKey, AppError> {
    match canonical_token(raw).as_deref() {
        Some("name") | Some("title") => Ok(SortKey::Name),
        Some("class") => Ok(SortKey::Class),
        Some("due_date") | Some("due") | Some("date") => Ok(SortKey::DueDate),
        Some("priority") => Ok(SortKey::Priority),
        _ => Err(AppError::invalid_argument(format!(
            "unknown sort key '{}' (expected name, class, due or priority)",
            raw.trim()
        ))),
    }
}

/// Parse a YYYY-MM-DD due date. The parts are routed through the calendar
/// cursor, so a day past the end of the month clamps instead of failing,
/// exactly as the date picker behaves.
pub fn parse_due_date(raw: &str) -> Result<OffsetDateTime, AppError> {
    let mut parts = raw.trim().splitn(3, '-');
    let year = next_number::<i32>(&mut parts, raw)?;
    let month = next_number::<u8>(&mut parts, raw)?;
    let day = next_number::<u8>(&mut parts, raw)?;

    CalendarCursor::new(year, month, day)?.to_midnight_utc()
}

fn next_number<T: std::str::FromStr>(
    parts: &mut std::str::SplitN<'_, char>,
    raw: &str,
) -> Result<T, AppError> {
    parts
        .next()
        .and_then(|part| part.trim().parse::<T>().ok())
        .ok_or_else(|| {
            AppError::invalid_argument(format!("due date '{}' must be YYYY-MM-DD", raw.trim()))
        })
}

fn canonical_token(raw: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_due_date, parse_priority, parse_sort_key};
    use homework_core::model::Priority;
    use homework_core::sort::SortKey;
    use time::macros::datetime;

    #[test]
    fn parse_priority_accepts_names_and_variants() {
        assert_eq!(parse_priority("low").unwrap(), Priority::Low);
        assert_eq!(parse_priority("Medium").unwrap(), Priority::Medium);
        assert_eq!(parse_priority(" HIGH ").unwrap(), Priority::High);
        assert_eq!(parse_priority("very-high").unwrap(), Priority::VeryHigh);
        assert_eq!(parse_priority("Very High").unwrap(), Priority::VeryHigh);
        assert_eq!(parse_priority("very_high").unwrap(), Priority::VeryHigh);
    }

    #[test]
    fn parse_priority_accepts_ordinals() {
        assert_eq!(parse_priority("0").unwrap(), Priority::Low);
        assert_eq!(parse_priority("3").unwrap(), Priority::VeryHigh);
    }

    #[test]
    fn parse_priority_rejects_unknown_values() {
        assert_eq!(parse_priority("urgent").unwrap_err().code(), "invalid_argument");
        assert_eq!(parse_priority("4").unwrap_err().code(), "invalid_argument");
        assert_eq!(parse_priority("").unwrap_err().code(), "invalid_argument");
    }

    #[test]
    fn parse_sort_key_accepts_aliases() {
        assert_eq!(parse_sort_key("name").unwrap(), SortKey::Name);
        assert_eq!(parse_sort_key("title").unwrap(), SortKey::Name);
        assert_eq!(parse_sort_key("class").unwrap(), SortKey::Class);
        assert_eq!(parse_sort_key("due").unwrap(), SortKey::DueDate);
        assert_eq!(parse_sort_key("due-date").unwrap(), SortKey::DueDate);
        assert_eq!(parse_sort_key("Priority").unwrap(), SortKey::Priority);
    }

    #[test]
    fn parse_sort_key_rejects_unknown_values() {
        assert_eq!(parse_sort_key("size").unwrap_err().code(), "invalid_argument");
    }

    #[test]
    fn parse_due_date_reads_iso_dates() {
        assert_eq!(
            parse_due_date("2025-03-15").unwrap(),
            datetime!(2025-03-15 0:00 UTC)
        );
    }

    #[test]
    fn parse_due_date_clamps_day_overflow() {
        assert_eq!(
            parse_due_date("2023-02-31").unwrap(),
            datetime!(2023-02-28 0:00 UTC)
        );
        assert_eq!(
            parse_due_date("2024-02-31").unwrap(),
            datetime!(2024-02-29 0:00 UTC)
        );
    }

    #[test]
    fn parse_due_date_rejects_malformed_input() {
        for raw in ["tomorrow", "2025-03", "2025-13-01", "2025-00-10", "2025-02-00"] {
            assert_eq!(
                parse_due_date(raw).unwrap_err().code(),
                "invalid_argument",
                "input {raw:?}"
            );
        }
    }
}
