use crate::output::{fmt_hours, print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::path::{Path, PathBuf};
use workplan_core::config::Config;
use workplan_core::estimate::estimate_with;
use workplan_core::store;
use workplan_core::task::{unit_count, TaskId};

#[derive(Subcommand)]
pub enum TasksSubcommand {
    /// Normalize a task payload (goals, issues, ...) and make it the current list
    Import { file: PathBuf },
    /// List the imported tasks and sub-tasks
    List,
}

pub fn run(root: &Path, subcmd: TasksSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TasksSubcommand::Import { file } => import(root, &file, json),
        TasksSubcommand::List => list(root, json),
    }
}

fn import(root: &Path, file: &Path, json: bool) -> anyhow::Result<()> {
    let tasks = super::read_task_file(file)?;
    store::save_tasks(root, &tasks).context("failed to save tasks")?;
    tracing::info!(tasks = tasks.len(), "imported task list");

    if json {
        print_json(&serde_json::json!({
            "tasks": tasks.len(),
            "units": unit_count(&tasks),
        }))?;
    } else {
        println!(
            "Imported {} tasks ({} including sub-tasks)",
            tasks.len(),
            unit_count(&tasks)
        );
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let tasks = store::load_tasks(root).context("failed to read imported tasks")?;

    if json {
        print_json(&tasks)?;
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks imported. Run 'workplan tasks import <file>'.");
        return Ok(());
    }

    let config = Config::load_or_default(root).context("failed to load config")?;
    let mut rows = Vec::with_capacity(unit_count(&tasks));
    for task in &tasks {
        rows.push(vec![
            task.id.to_string(),
            task.title.clone(),
            fmt_hours(estimate_with(&config.estimator, task, false)),
        ]);
        for sub in &task.sub_tasks {
            rows.push(vec![
                TaskId::sub_task(&task.id, &sub.id).to_string(),
                format!("  {}", sub.title),
                fmt_hours(estimate_with(&config.estimator, sub, true)),
            ]);
        }
    }
    print_table(&["ID", "TITLE", "ESTIMATE"], rows);
    Ok(())
}
