pub mod allocate;
pub mod config;
pub mod estimate;
pub mod init;
pub mod tasks;

use anyhow::Context;
use std::path::Path;
use workplan_core::{normalize, store, task::Task};

/// Tasks from `file` when given (any recognized payload shape), otherwise
/// the imported list.
pub(crate) fn load_tasks(root: &Path, file: Option<&Path>) -> anyhow::Result<Vec<Task>> {
    match file {
        Some(path) => read_task_file(path),
        None => store::load_tasks(root).context("failed to read imported tasks"),
    }
}

pub(crate) fn read_task_file(path: &Path) -> anyhow::Result<Vec<Task>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    normalize::normalize_str(&data)
        .with_context(|| format!("failed to load tasks from {}", path.display()))
}
