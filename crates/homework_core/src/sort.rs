use crate::model::Task;
use serde::{Deserialize, Serialize};

/// The key the task list is currently ordered by. Persisted with the list
/// so the ordering survives a save/load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Class,
    DueDate,
    Priority,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::Class,
        SortKey::DueDate,
        SortKey::Priority,
    ];

    /// Cyclic successor: name, class, due date, priority, name, ...
    pub fn next(self) -> SortKey {
        match self {
            SortKey::Name => SortKey::Class,
            SortKey::Class => SortKey::DueDate,
            SortKey::DueDate => SortKey::Priority,
            SortKey::Priority => SortKey::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Class => "class",
            SortKey::DueDate => "due date",
            SortKey::Priority => "priority",
        }
    }
}

/// Reorder the list in place by the selected key.
///
/// Selection sort: each pass scans left to right for the strict minimum of
/// the unsorted suffix and swaps it into place. Quadratic, which is fine at
/// the tens-to-hundreds of tasks this list holds, and it keeps the
/// equal-key ordering the rest of the application was written against, so
/// a stable library sort is not a drop-in substitute.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    for sorted_end in 0..tasks.len() {
        let mut min_index = sorted_end;
        for candidate in sorted_end + 1..tasks.len() {
            if precedes(&tasks[candidate], &tasks[min_index], key) {
                min_index = candidate;
            }
        }
        if min_index != sorted_end {
            tasks.swap(sorted_end, min_index);
        }
    }
}

fn precedes(a: &Task, b: &Task, key: SortKey) -> bool {
    match key {
        SortKey::Name => a.title < b.title,
        SortKey::Class => a.class_name < b.class_name,
        SortKey::DueDate => a.due_date < b.due_date,
        SortKey::Priority => a.priority < b.priority,
    }
}
