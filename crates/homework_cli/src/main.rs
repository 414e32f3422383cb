use clap::{CommandFactory, Parser};
use homework_cli::cli::{Cli, Command, parse_due_date, parse_priority, parse_sort_key};
use homework_core::config::{self, Config, Palette};
use homework_core::error::AppError;
use homework_core::model::Task;
use homework_core::sort::{SortKey, sort_tasks};
use homework_core::storage::task_file::{self, TaskFileState};
use homework_core::task_api;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn format_due(due: OffsetDateTime) -> String {
    let format = format_description!("[year]-[month]-[day]");
    due.format(&format).unwrap_or_else(|_| due.to_string())
}

fn status_label(task: &Task, now: OffsetDateTime, palette: &Palette) -> String {
    if task.completed {
        palette.mutedize("done")
    } else if task.is_overdue(now) {
        palette.accentize("open (overdue)")
    } else {
        "open".to_string()
    }
}

fn print_tasks_plain(tasks: &[Task], now: OffsetDateTime, palette: &Palette) {
    let rows: Vec<TaskRow> = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| TaskRow {
            index,
            title: task.title.clone(),
            due: format_due(task.due_date),
            class: task.class_name.clone(),
            priority: task.priority.label().to_string(),
            status: status_label(task, now, palette),
        })
        .collect();
    println!("{}", Table::new(rows));
}

fn task_json(task: &Task, index: usize, now: OffsetDateTime) -> Result<serde_json::Value, AppError> {
    let due_date = task
        .due_date
        .format(&Rfc3339)
        .map_err(|err| AppError::encoding(err.to_string()))?;
    Ok(serde_json::json!({
        "index": index,
        "title": task.title,
        "due_date": due_date,
        "class_name": task.class_name,
        "priority": task.priority.label(),
        "priority_ordinal": task.priority.ordinal(),
        "completed": task.completed,
        "overdue": task.is_overdue(now),
    }))
}

fn print_tasks_json(tasks: &[Task], now: OffsetDateTime) -> Result<(), AppError> {
    let mut payload = Vec::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        payload.push(task_json(task, index, now)?);
    }
    println!("{}", serde_json::Value::Array(payload));
    Ok(())
}

fn print_task_json(task: &Task, index: usize, now: OffsetDateTime) -> Result<(), AppError> {
    println!("{}", task_json(task, index, now)?);
    Ok(())
}

fn resolve_store_path(file: Option<PathBuf>, config: &Config) -> Result<PathBuf, AppError> {
    if let Some(path) = file {
        return Ok(path);
    }

    if let Ok(path) = std::env::var("HOMEWORK_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = config.default_file.as_deref() {
        return Ok(PathBuf::from(path));
    }

    task_file::store_path()
}

// Mutating commands treat a missing file as an empty list so the first
// `add` can bootstrap the store. `list` keeps the file_not_found report,
// matching the original's behaviour when opening a missing file.
fn load_or_empty(path: &Path) -> Result<TaskFileState, AppError> {
    match task_file::load_state(path) {
        Ok(state) => Ok(state),
        Err(AppError::FileNotFound(_)) => Ok(TaskFileState::default()),
        Err(err) => Err(err),
    }
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let config_load = config::load_config_with_fallback();
    if let Some(err) = config_load.error.as_ref() {
        log::warn!("ignoring config: {err}");
    }
    let config = config_load.config;
    let palette = config::palette_for_theme(config.theme.as_deref());
    let path = resolve_store_path(cli.file, &config)?;
    let now = OffsetDateTime::now_utc();

    match cli.command {
        Command::Add {
            title,
            due,
            class_name,
            priority,
        } => {
            let due_date = parse_due_date(&due)?;
            let priority = parse_priority(&priority)?;

            let mut state = load_or_empty(&path)?;
            let task = task_api::create_task(
                &mut state.tasks,
                &title,
                due_date,
                &class_name,
                Some(priority),
            )?;
            task_file::save_state(&path, &state)?;

            if cli.json {
                print_task_json(&task, state.tasks.len() - 1, now)?;
            } else {
                println!("Added task: {} (due {})", task.title, format_due(task.due_date));
            }
        }
        Command::Edit {
            index,
            title,
            due,
            class_name,
            priority,
        } => {
            let mut state = load_or_empty(&path)?;
            let current = state.tasks.get(index).cloned().ok_or_else(|| {
                AppError::invalid_argument(format!(
                    "task index {index} is out of range ({} tasks)",
                    state.tasks.len()
                ))
            })?;

            let title = title.unwrap_or(current.title);
            let due_date = match due {
                Some(raw) => parse_due_date(&raw)?,
                None => current.due_date,
            };
            let class_name = class_name.unwrap_or(current.class_name);
            let priority = match priority {
                Some(raw) => parse_priority(&raw)?,
                None => current.priority,
            };

            let task = task_api::update_task(
                &mut state.tasks,
                index,
                &title,
                due_date,
                &class_name,
                Some(priority),
            )?;
            task_file::save_state(&path, &state)?;

            if cli.json {
                print_task_json(&task, index, now)?;
            } else {
                println!("Updated task: {}", task.title);
            }
        }
        Command::Delete { index } => {
            let mut state = load_or_empty(&path)?;
            let task = task_api::delete_task(&mut state.tasks, index)?;
            task_file::save_state(&path, &state)?;

            if cli.json {
                print_task_json(&task, index, now)?;
            } else {
                println!("Deleted task: {}", task.title);
            }
        }
        Command::Done { index } => {
            let mut state = load_or_empty(&path)?;
            let task = task_api::set_completed(&mut state.tasks, index, true)?;
            task_file::save_state(&path, &state)?;

            if cli.json {
                print_task_json(&task, index, now)?;
            } else {
                println!("Completed task: {}", task.title);
            }
        }
        Command::Undone { index } => {
            let mut state = load_or_empty(&path)?;
            let task = task_api::set_completed(&mut state.tasks, index, false)?;
            task_file::save_state(&path, &state)?;

            if cli.json {
                print_task_json(&task, index, now)?;
            } else {
                println!("Reopened task: {}", task.title);
            }
        }
        Command::List => {
            let state = task_file::load_state(&path)?;
            if cli.json {
                print_tasks_json(&state.tasks, now)?;
            } else {
                print_tasks_plain(&state.tasks, now, &palette);
            }
        }
        Command::Sort { key } => {
            let mut state = load_or_empty(&path)?;
            let key = match key {
                Some(raw) => parse_sort_key(&raw)?,
                None => state.sort_key.map(SortKey::next).unwrap_or(SortKey::Name),
            };

            sort_tasks(&mut state.tasks, key);
            state.sort_key = Some(key);
            task_file::save_state(&path, &state)?;

            if cli.json {
                print_tasks_json(&state.tasks, now)?;
            } else {
                println!("Sorted tasks by {}", key.label());
                print_tasks_plain(&state.tasks, now, &palette);
            }
        }
    }

    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_argument(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ch if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_argument("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive() -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::file_unreadable(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("homework".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
