use crate::output::{fmt_date, fmt_hours, print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use std::path::Path;
use workplan_core::allocate::{schedule_with, Allocation};
use workplan_core::calendar::{epoch_for, today_epoch};
use workplan_core::config::Config;
use workplan_core::developer::roster_from_specs;
use workplan_core::gantt::GanttChart;

const CHART_WIDTH: usize = 60;

pub fn run(
    root: &Path,
    developers: &[String],
    tasks_file: Option<&Path>,
    start: Option<&str>,
    chart: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    let tasks = super::load_tasks(root, tasks_file)?;

    if tasks.is_empty() {
        if json {
            print_json(&serde_json::json!({ "assignments": [] }))?;
        } else {
            println!("No tasks available to allocate");
        }
        return Ok(());
    }

    let roster = roster_from_specs(developers, config.schedule.default_hours_per_week)
        .context("invalid developer list")?;

    let hour = config.schedule.day_start_hour;
    let epoch = match start {
        Some(s) => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid start date '{s}', expected YYYY-MM-DD"))?;
            epoch_for(date, hour)
        }
        None => today_epoch(hour),
    };

    let allocation = schedule_with(&config.estimator, &tasks, &roster, epoch)
        .context("failed to allocate tasks")?;
    allocation
        .save(root)
        .context("failed to save allocation")?;

    print_allocation(&allocation, chart, json)
}

pub fn show(root: &Path, chart: bool, json: bool) -> anyhow::Result<()> {
    match Allocation::load(root).context("failed to read allocation")? {
        Some(allocation) => print_allocation(&allocation, chart, json),
        None if json => print_json(&serde_json::Value::Null),
        None => {
            println!("No allocation yet. Run 'workplan allocate'.");
            Ok(())
        }
    }
}

pub fn clear(root: &Path, json: bool) -> anyhow::Result<()> {
    let removed = Allocation::clear(root).context("failed to remove allocation")?;
    if json {
        print_json(&serde_json::json!({ "cleared": removed }))?;
    } else if removed {
        println!("Cleared the last allocation.");
    } else {
        println!("Nothing to clear.");
    }
    Ok(())
}

fn print_allocation(allocation: &Allocation, chart: bool, json: bool) -> anyhow::Result<()> {
    if json {
        let mut value = serde_json::json!({
            "epoch": allocation.epoch,
            "assignments": allocation.assignments,
            "developers": allocation.loads(),
        });
        if chart {
            value["chart"] = serde_json::to_value(GanttChart::from_assignments(
                &allocation.assignments,
            ))?;
        }
        return print_json(&value);
    }

    let rows = allocation
        .assignments
        .iter()
        .map(|a| {
            vec![
                a.task_id.to_string(),
                a.task_title.clone(),
                a.developer_name.clone(),
                fmt_hours(a.estimated_hours),
                fmt_date(a.start_date),
                fmt_date(a.end_date),
            ]
        })
        .collect();
    print_table(&["TASK", "TITLE", "DEVELOPER", "HOURS", "START", "END"], rows);

    println!();
    let rows = allocation
        .loads()
        .into_iter()
        .map(|l| {
            vec![
                l.name,
                l.task_count.to_string(),
                fmt_hours(l.assigned_hours),
                fmt_hours(l.available_hours),
                l.finish.map(fmt_date).unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&["DEVELOPER", "TASKS", "ASSIGNED", "REMAINING", "FINISH"], rows);

    if chart {
        println!();
        print!(
            "{}",
            GanttChart::from_assignments(&allocation.assignments).render_text(CHART_WIDTH)
        );
    }
    Ok(())
}
