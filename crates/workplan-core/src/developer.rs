use crate::error::{Result, WorkplanError};
use crate::task::lenient_hours;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_HOURS_PER_WEEK: f64 = 40.0;
pub const MIN_HOURS_PER_WEEK: f64 = 1.0;
pub const MAX_HOURS_PER_WEEK: f64 = 80.0;

/// A developer taking part in one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_hours_per_week", deserialize_with = "weekly_hours")]
    pub hours_per_week: f64,
    /// Remaining capacity. Decremented as work is assigned, never below zero,
    /// and never consulted when choosing who gets the next task. NaN until a
    /// roster is prepared for allocation when read without a value.
    #[serde(default = "unset_hours", deserialize_with = "remaining_hours")]
    pub available_hours: f64,
}

fn default_hours_per_week() -> f64 {
    DEFAULT_HOURS_PER_WEEK
}

fn unset_hours() -> f64 {
    f64::NAN
}

fn weekly_hours<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    let hours = lenient_hours(deserializer)?.unwrap_or(DEFAULT_HOURS_PER_WEEK);
    Ok(normalize_hours(hours, DEFAULT_HOURS_PER_WEEK))
}

fn remaining_hours<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    Ok(lenient_hours(deserializer)?.unwrap_or(f64::NAN))
}

impl Developer {
    pub fn new(id: u32, name: impl Into<String>, hours_per_week: f64) -> Self {
        let hours = normalize_hours(hours_per_week, DEFAULT_HOURS_PER_WEEK);
        Self {
            id,
            name: name.into(),
            hours_per_week: hours,
            available_hours: hours,
        }
    }

    /// Record `hours` of assigned work against the remaining capacity.
    pub fn consume(&mut self, hours: f64) {
        self.available_hours = (self.available_hours - hours).max(0.0);
    }
}

/// Non-finite values fall back to `default`; the rest is clamped into the
/// range the roster form accepts.
pub fn normalize_hours(hours: f64, default: f64) -> f64 {
    let hours = if hours.is_finite() { hours } else { default };
    hours.clamp(MIN_HOURS_PER_WEEK, MAX_HOURS_PER_WEEK)
}

/// Build a roster from `name[:hours]` specs, assigning ids 1..=n in order.
///
/// An empty name becomes `"Developer <id>"`; a missing or unparsable hours
/// part becomes `default_hours`.
pub fn roster_from_specs<S: AsRef<str>>(specs: &[S], default_hours: f64) -> Result<Vec<Developer>> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| parse_spec(spec.as_ref(), (i + 1) as u32, default_hours))
        .collect()
}

fn parse_spec(spec: &str, id: u32, default_hours: f64) -> Result<Developer> {
    let (name, hours) = match spec.rsplit_once(':') {
        Some((name, hours)) => (name.trim(), hours.trim().parse::<f64>().ok()),
        None => (spec.trim(), None),
    };
    if name.contains(':') {
        return Err(WorkplanError::InvalidDeveloper {
            spec: spec.to_string(),
            reason: "expected 'name' or 'name:hours'".to_string(),
        });
    }
    let name = if name.is_empty() {
        format!("Developer {id}")
    } else {
        name.to_string()
    };
    let hours = normalize_hours(hours.unwrap_or(default_hours), DEFAULT_HOURS_PER_WEEK);
    Ok(Developer::new(id, name, hours))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_default_and_clamp() {
        assert_eq!(Developer::new(1, "a", f64::NAN).hours_per_week, 40.0);
        assert_eq!(Developer::new(1, "a", -5.0).hours_per_week, 1.0);
        assert_eq!(Developer::new(1, "a", 200.0).hours_per_week, 80.0);
        assert_eq!(Developer::new(1, "a", 32.0).available_hours, 32.0);
    }

    #[test]
    fn consume_floors_at_zero() {
        let mut dev = Developer::new(1, "a", 10.0);
        dev.consume(4.0);
        assert_eq!(dev.available_hours, 6.0);
        dev.consume(20.0);
        assert_eq!(dev.available_hours, 0.0);
    }

    #[test]
    fn roster_from_specs_assigns_ids_and_defaults() {
        let roster = roster_from_specs(&["Alice:30", "Bob", ":20", "Eve:lots"], 40.0).unwrap();
        assert_eq!(roster.len(), 4);
        assert_eq!((roster[0].id, roster[0].name.as_str()), (1, "Alice"));
        assert_eq!(roster[0].hours_per_week, 30.0);
        assert_eq!(roster[1].hours_per_week, 40.0);
        assert_eq!(roster[2].name, "Developer 3");
        assert_eq!(roster[2].hours_per_week, 20.0);
        assert_eq!(roster[3].hours_per_week, 40.0);
    }

    #[test]
    fn json_roster_entry_without_hours_gets_defaults() {
        let dev: Developer = serde_json::from_str(r#"{"id":1,"name":"A"}"#).unwrap();
        assert_eq!(dev.hours_per_week, 40.0);
        assert!(dev.available_hours.is_nan());

        let dev: Developer =
            serde_json::from_str(r#"{"id":2,"name":"B","hoursPerWeek":null,"availableHours":"n/a"}"#)
                .unwrap();
        assert_eq!(dev.hours_per_week, 40.0);
        assert!(dev.available_hours.is_nan());
    }

    #[test]
    fn json_roster_hours_are_clamped() {
        let dev: Developer =
            serde_json::from_str(r#"{"id":1,"name":"A","hoursPerWeek":"120","availableHours":12}"#)
                .unwrap();
        assert_eq!(dev.hours_per_week, 80.0);
        assert_eq!(dev.available_hours, 12.0);
    }

    #[test]
    fn roster_rejects_extra_separators() {
        assert!(roster_from_specs(&["a:b:10"], 40.0).is_err());
    }
}
