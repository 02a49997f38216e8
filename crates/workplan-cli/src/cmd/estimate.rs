use crate::output::{fmt_hours, print_json, print_table};
use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use workplan_core::config::Config;
use workplan_core::estimate::estimate_with;
use workplan_core::task::{Task, TaskId};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UnitEstimate {
    task_id: TaskId,
    title: String,
    estimated_hours: f64,
    is_subtask: bool,
    explicit: bool,
}

pub fn run(root: &Path, file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let tasks = super::load_tasks(root, file)?;
    let config = Config::load_or_default(root).context("failed to load config")?;

    let mut units = Vec::new();
    for task in &tasks {
        units.push(unit(&config, task, &task.id, task.title.clone(), false));
        for sub in &task.sub_tasks {
            let id = TaskId::sub_task(&task.id, &sub.id);
            let title = format!("{} > {}", task.title, sub.title);
            units.push(unit(&config, sub, &id, title, true));
        }
    }
    let total: f64 = units.iter().map(|u| u.estimated_hours).sum();

    if json {
        print_json(&serde_json::json!({ "units": units, "totalHours": total }))?;
        return Ok(());
    }

    if units.is_empty() {
        println!("No tasks to estimate.");
        return Ok(());
    }

    let rows = units
        .iter()
        .map(|u| {
            vec![
                u.task_id.to_string(),
                u.title.clone(),
                fmt_hours(u.estimated_hours),
                if u.explicit { "given" } else { "heuristic" }.to_string(),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "HOURS", "SOURCE"], rows);
    println!();
    println!("Total: {} across {} units", fmt_hours(total), units.len());
    Ok(())
}

fn unit(config: &Config, task: &Task, id: &TaskId, title: String, is_subtask: bool) -> UnitEstimate {
    UnitEstimate {
        task_id: id.clone(),
        title,
        estimated_hours: estimate_with(&config.estimator, task, is_subtask),
        is_subtask,
        explicit: task.explicit_hours().is_some(),
    }
}
