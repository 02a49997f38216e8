//! Hour estimates for tasks.
//!
//! An explicit estimate always wins (clamped into range). Without one, a
//! keyword-weighted heuristic over the title and description is used.

use crate::config::EstimatorConfig;
use crate::task::Task;
use std::sync::OnceLock;

pub const MIN_HOURS: f64 = 1.0;
pub const MAX_HOURS: f64 = 40.0;

/// Flat estimate for tasks with too little text to analyse.
pub const FALLBACK_HOURS: f64 = 4.0;

const COMPLEXITY_STEP: f64 = 0.15;
const SIMPLICITY_STEP: f64 = 0.10;
const MIN_MULTIPLIER: f64 = 0.5;
const MAX_MULTIPLIER: f64 = 2.5;
const SUBTASK_FACTOR: f64 = 0.6;
const PARENT_FLOOR_HOURS: f64 = 2.0;

static DEFAULT_CONFIG: OnceLock<EstimatorConfig> = OnceLock::new();

/// Estimate with the default keyword lists.
pub fn estimate(task: &Task, is_subtask: bool) -> f64 {
    estimate_with(DEFAULT_CONFIG.get_or_init(EstimatorConfig::default), task, is_subtask)
}

pub fn estimate_with(config: &EstimatorConfig, task: &Task, is_subtask: bool) -> f64 {
    if let Some(hours) = task.explicit_hours() {
        return hours.clamp(MIN_HOURS, MAX_HOURS);
    }
    if is_degenerate(task) {
        return FALLBACK_HOURS;
    }

    let text = format!("{} {}", task.title, task.description_str());
    let length_factor = ((text_length(&text) + 1) as f64).ln() / 4.0;
    let multiplier = keyword_multiplier(config, &text.to_lowercase());

    let mut hours = config.base_hours * (1.0 + length_factor) * multiplier;
    if is_subtask {
        hours *= SUBTASK_FACTOR;
    }
    if task.has_sub_tasks() {
        // children are allocated on their own; the parent keeps a coordination floor
        hours = hours.max(PARENT_FLOOR_HOURS);
    }

    round_half(hours).clamp(MIN_HOURS, MAX_HOURS)
}

fn is_degenerate(task: &Task) -> bool {
    text_length(task.title.trim()) < 3 && text_length(task.description_str().trim()) < 10
}

/// Length in UTF-16 code units, the unit browser-side task text was measured in.
fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

fn keyword_multiplier(config: &EstimatorConfig, lowered: &str) -> f64 {
    let hits = |keywords: &[String]| {
        keywords
            .iter()
            .filter(|k| !k.is_empty() && lowered.contains(k.to_lowercase().as_str()))
            .count() as f64
    };
    let multiplier = 1.0 + COMPLEXITY_STEP * hits(&config.complexity_keywords)
        - SIMPLICITY_STEP * hits(&config.simplicity_keywords);
    multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
}

fn round_half(hours: f64) -> f64 {
    (hours * 2.0).round() / 2.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
