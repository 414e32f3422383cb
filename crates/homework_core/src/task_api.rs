//! The editing workflow: the one choke point collaborators go through to
//! create, update, or remove tasks. `Task` itself performs no string
//! checks, so every required-field and range check lives here, and every
//! check runs before the first mutation so a failed call leaves the
//! collection untouched.
//!
//! Tasks are addressed by position. An index held by a caller is
//! invalidated by any insertion or deletion before it; it is re-validated
//! against the current bounds on every call rather than trusted.

use crate::error::AppError;
use crate::model::{Priority, Task};
use time::OffsetDateTime;

pub fn create_task(
    tasks: &mut Vec<Task>,
    title: &str,
    due_date: OffsetDateTime,
    class_name: &str,
    priority: Option<Priority>,
) -> Result<Task, AppError> {
    let title = required_text(title, "title")?;
    let class_name = required_text(class_name, "class name")?;
    let priority = required_priority(priority)?;

    let task = Task::new(title, due_date, class_name, priority);
    tasks.push(task.clone());
    Ok(task)
}

pub fn update_task(
    tasks: &mut [Task],
    index: usize,
    title: &str,
    due_date: OffsetDateTime,
    class_name: &str,
    priority: Option<Priority>,
) -> Result<Task, AppError> {
    check_index(tasks, index)?;
    let title = required_text(title, "title")?;
    let class_name = required_text(class_name, "class name")?;
    let priority = required_priority(priority)?;

    let task = &mut tasks[index];
    task.title = title;
    task.due_date = due_date;
    task.class_name = class_name;
    task.priority = priority;
    Ok(task.clone())
}

pub fn delete_task(tasks: &mut Vec<Task>, index: usize) -> Result<Task, AppError> {
    check_index(tasks, index)?;
    Ok(tasks.remove(index))
}

pub fn set_completed(
    tasks: &mut [Task],
    index: usize,
    completed: bool,
) -> Result<Task, AppError> {
    check_index(tasks, index)?;
    let task = &mut tasks[index];
    if completed {
        task.mark_complete();
    } else {
        task.mark_incomplete();
    }
    Ok(task.clone())
}

fn check_index(tasks: &[Task], index: usize) -> Result<(), AppError> {
    if index >= tasks.len() {
        return Err(AppError::invalid_argument(format!(
            "task index {index} is out of range ({} tasks)",
            tasks.len()
        )));
    }
    Ok(())
}

fn required_text(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_argument(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

// The "Set Priority" placeholder of the editing form maps to `None`.
fn required_priority(priority: Option<Priority>) -> Result<Priority, AppError> {
    priority.ok_or_else(|| AppError::invalid_argument("a priority must be selected"))
}
