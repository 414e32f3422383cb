use crate::error::AppError;
use crate::model::Task;
use crate::sort::SortKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "tasks.tsk";

/// On-disk envelope. The schema version makes the format a stable
/// contract; `sort_key` records the last ordering applied to the list.
#[derive(Debug, Serialize, Deserialize)]
struct StoredTasks {
    schema_version: u32,
    #[serde(default)]
    sort_key: Option<SortKey>,
    tasks: Vec<Task>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskFileState {
    pub tasks: Vec<Task>,
    pub sort_key: Option<SortKey>,
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("HOMEWORK_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| AppError::invalid_argument("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("homework")
            .join(STORE_FILE_NAME))
    } else {
        let home =
            std::env::var("HOME").map_err(|_| AppError::invalid_argument("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("homework")
            .join(STORE_FILE_NAME))
    }
}

pub fn encode(state: &TaskFileState) -> Result<String, AppError> {
    let stored = StoredTasks {
        schema_version: SCHEMA_VERSION,
        sort_key: state.sort_key,
        tasks: state.tasks.to_vec(),
    };
    serde_json::to_string_pretty(&stored).map_err(|err| AppError::encoding(err.to_string()))
}

/// Decode a whole task file. Any structural problem, a missing required
/// field, an out-of-range priority ordinal, or an invalid due date fails
/// the entire decode; a partially populated list is never returned.
pub fn decode(content: &str) -> Result<TaskFileState, AppError> {
    let stored: StoredTasks =
        serde_json::from_str(content).map_err(|err| AppError::decoding(err.to_string()))?;

    if !(1..=SCHEMA_VERSION).contains(&stored.schema_version) {
        return Err(AppError::decoding(format!(
            "unsupported schema_version {}",
            stored.schema_version
        )));
    }

    Ok(TaskFileState {
        tasks: stored.tasks,
        sort_key: stored.sort_key,
    })
}

pub fn load_tasks(path: &Path) -> Result<Vec<Task>, AppError> {
    Ok(load_state(path)?.tasks)
}

pub fn load_state(path: &Path) -> Result<TaskFileState, AppError> {
    if !path.exists() {
        return Err(AppError::file_not_found(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::file_unreadable(format!("{}: {}", path.display(), err)))?;
    let state = decode(&content)?;
    log::debug!("loaded {} tasks from {}", state.tasks.len(), path.display());
    Ok(state)
}

/// Save the list, keeping whatever sort key the file already recorded.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    let sort_key = if path.exists() {
        load_state(path)?.sort_key
    } else {
        None
    };
    let state = TaskFileState {
        tasks: tasks.to_vec(),
        sort_key,
    };
    save_state(path, &state)
}

pub fn save_state(path: &Path, state: &TaskFileState) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| AppError::file_unwritable(format!("{}: {}", parent.display(), err)))?;
    }

    let content = encode(state)?;
    std::fs::write(path, content)
        .map_err(|err| AppError::file_unwritable(format!("{}: {}", path.display(), err)))?;
    log::debug!("saved {} tasks to {}", state.tasks.len(), path.display());
    Ok(())
}
