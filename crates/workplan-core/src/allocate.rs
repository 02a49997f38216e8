//! Greedy workload allocation.
//!
//! Tasks and their sub-tasks are flattened into units, ordered
//! longest-first within their bucket, and handed one at a time to whichever
//! developer frees up earliest. Dates advance in working days only.

use crate::calendar::{self, WORKING_DAYS_PER_WEEK};
use crate::config::EstimatorConfig;
use crate::developer::{normalize_hours, Developer, DEFAULT_HOURS_PER_WEEK};
use crate::error::{Result, WorkplanError};
use crate::estimate::estimate_with;
use crate::task::{Task, TaskId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub task_id: TaskId,
    /// Sub-tasks read `"<parent title> > <sub-task title>"`.
    pub task_title: String,
    pub developer_id: u32,
    pub developer_name: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub estimated_hours: f64,
    pub is_subtask: bool,
    pub parent_id: Option<TaskId>,
}

/// Result of one allocation run. A new run replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub epoch: NaiveDateTime,
    /// Roster as it stood after the run, with `available_hours` drawn down.
    pub developers: Vec<Developer>,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperLoad {
    pub developer_id: u32,
    pub name: String,
    pub hours_per_week: f64,
    pub assigned_hours: f64,
    pub available_hours: f64,
    pub task_count: usize,
    pub finish: Option<NaiveDateTime>,
}

impl Allocation {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn assignments_for(&self, developer_id: u32) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |a| a.developer_id == developer_id)
    }

    /// Per-developer totals, in roster order.
    pub fn loads(&self) -> Vec<DeveloperLoad> {
        self.developers
            .iter()
            .map(|dev| {
                let mine: Vec<&Assignment> = self.assignments_for(dev.id).collect();
                DeveloperLoad {
                    developer_id: dev.id,
                    name: dev.name.clone(),
                    hours_per_week: dev.hours_per_week,
                    assigned_hours: mine.iter().map(|a| a.estimated_hours).sum(),
                    available_hours: dev.available_hours,
                    task_count: mine.len(),
                    finish: mine.iter().map(|a| a.end_date).max(),
                }
            })
            .collect()
    }

    /// End of the last assignment across all developers.
    pub fn finish(&self) -> Option<NaiveDateTime> {
        self.assignments.iter().map(|a| a.end_date).max()
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Allocate starting today at 09:00 local, with the default estimator.
pub fn allocate(tasks: &[Task], developers: &[Developer]) -> Result<Vec<Assignment>> {
    let epoch = calendar::today_epoch(9);
    Ok(schedule(tasks, developers, epoch)?.assignments)
}

pub fn schedule(tasks: &[Task], developers: &[Developer], epoch: NaiveDateTime) -> Result<Allocation> {
    schedule_with(&EstimatorConfig::default(), tasks, developers, epoch)
}

/// Allocate every task and sub-task, starting all developers at `epoch`.
///
/// An empty task list is not an error and yields an empty allocation.
pub fn schedule_with(
    estimator: &EstimatorConfig,
    tasks: &[Task],
    developers: &[Developer],
    epoch: NaiveDateTime,
) -> Result<Allocation> {
    let mut roster = prepare_roster(developers);
    if tasks.is_empty() {
        return Ok(Allocation {
            epoch,
            developers: roster,
            assignments: Vec::new(),
        });
    }
    if roster.is_empty() {
        return Err(WorkplanError::NoDevelopers);
    }
    check_developer_ids(&roster)?;

    let mut units = flatten(estimator, tasks)?;
    units.sort_by(unit_order);

    let mut next_available = vec![epoch; roster.len()];
    let mut assignments = Vec::with_capacity(units.len());

    for unit in units {
        let selected = earliest(&next_available);
        let dev = &mut roster[selected];

        let start_date = next_available[selected];
        let days = duration_days(unit.hours, dev.hours_per_week);
        let end_date = calendar::add_working_days(start_date, days);

        tracing::debug!(
            task = %unit.id,
            developer = %dev.name,
            hours = unit.hours,
            days,
            "assigned"
        );

        assignments.push(Assignment {
            task_id: unit.id,
            task_title: unit.title,
            developer_id: dev.id,
            developer_name: dev.name.clone(),
            start_date,
            end_date,
            estimated_hours: unit.hours,
            is_subtask: unit.parent_id.is_some(),
            parent_id: unit.parent_id,
        });

        dev.consume(unit.hours);
        next_available[selected] = end_date;
    }

    tracing::info!(
        units = assignments.len(),
        developers = roster.len(),
        "allocation complete"
    );

    Ok(Allocation {
        epoch,
        developers: roster,
        assignments,
    })
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Unit {
    id: TaskId,
    title: String,
    hours: f64,
    parent_id: Option<TaskId>,
}

impl Unit {
    fn is_subtask(&self) -> bool {
        self.parent_id.is_some()
    }
}

fn prepare_roster(developers: &[Developer]) -> Vec<Developer> {
    developers
        .iter()
        .map(|d| {
            let hours = normalize_hours(d.hours_per_week, DEFAULT_HOURS_PER_WEEK);
            let available = if d.available_hours.is_finite() {
                d.available_hours.max(0.0)
            } else {
                hours
            };
            Developer {
                hours_per_week: hours,
                available_hours: available,
                ..d.clone()
            }
        })
        .collect()
}

fn check_developer_ids(roster: &[Developer]) -> Result<()> {
    let mut seen = HashSet::new();
    for dev in roster {
        if !seen.insert(dev.id) {
            return Err(WorkplanError::InvalidDeveloper {
                spec: dev.name.clone(),
                reason: format!("developer id {} is used more than once", dev.id),
            });
        }
    }
    Ok(())
}

fn flatten(estimator: &EstimatorConfig, tasks: &[Task]) -> Result<Vec<Unit>> {
    let mut units = Vec::new();
    let mut seen: HashSet<TaskId> = HashSet::new();

    let mut push = |unit: Unit, units: &mut Vec<Unit>| -> Result<()> {
        if !seen.insert(unit.id.clone()) {
            return Err(WorkplanError::DuplicateTaskId(unit.id.to_string()));
        }
        units.push(unit);
        Ok(())
    };

    for task in tasks {
        if task.id.is_empty() {
            return Err(WorkplanError::InvalidTask(format!(
                "task '{}' has an empty id",
                task.title
            )));
        }
        push(
            Unit {
                id: task.id.clone(),
                title: task.title.clone(),
                hours: estimate_with(estimator, task, false),
                parent_id: None,
            },
            &mut units,
        )?;

        for sub in &task.sub_tasks {
            if sub.id.is_empty() {
                return Err(WorkplanError::InvalidTask(format!(
                    "sub-task '{}' of task {} has an empty id",
                    sub.title, task.id
                )));
            }
            if sub.has_sub_tasks() {
                tracing::warn!(
                    task = %task.id,
                    sub_task = %sub.id,
                    "ignoring sub-tasks nested below the first level"
                );
            }
            push(
                Unit {
                    id: TaskId::sub_task(&task.id, &sub.id),
                    title: format!("{} > {}", task.title, sub.title),
                    hours: estimate_with(estimator, sub, true),
                    parent_id: Some(task.id.clone()),
                },
                &mut units,
            )?;
        }
    }

    Ok(units)
}

/// Parents first, sub-tasks grouped by parent id, then longest first.
fn unit_order(a: &Unit, b: &Unit) -> Ordering {
    match (a.is_subtask(), b.is_subtask()) {
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        _ => {}
    }
    if a.parent_id != b.parent_id {
        return a.parent_id.cmp(&b.parent_id);
    }
    b.hours.total_cmp(&a.hours)
}

/// Index of the earliest slot; the first one wins ties.
fn earliest(next_available: &[NaiveDateTime]) -> usize {
    let mut best = 0;
    for (i, at) in next_available.iter().enumerate().skip(1) {
        if *at < next_available[best] {
            best = i;
        }
    }
    best
}

fn duration_days(hours: f64, hours_per_week: f64) -> u32 {
    // hours / hours_per_week weeks, at a fixed five working days per week
    (hours * WORKING_DAYS_PER_WEEK / hours_per_week).ceil().max(0.0) as u32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
