use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// TaskId
// ---------------------------------------------------------------------------

/// Opaque task identifier.
///
/// The backend hands out numeric ids for goals and issues, while sub-task
/// keys are composite strings (`"3-1"`). Both are kept as text; ordering is
/// numeric when both sides are plain unsigned integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Composite key for a sub-task: `"<parent>-<child>"`.
    pub fn sub_task(parent: &TaskId, child: &TaskId) -> Self {
        Self(format!("{}-{}", parent.0, child.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! task_id_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for TaskId {
            fn from(n: $t) -> Self {
                Self(n.to_string())
            }
        })*
    };
}

task_id_from_int!(i32, u32, u64);

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Ord for TaskId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for TaskId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_number() {
            Some(n) if n.to_string() == self.0 => serializer.serialize_u64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTaskId {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTaskId::deserialize(deserializer)?;
        Ok(match raw {
            RawTaskId::Unsigned(n) => Self(n.to_string()),
            RawTaskId::Signed(n) => Self(n.to_string()),
            RawTaskId::Float(n) => Self(n.to_string()),
            RawTaskId::Text(s) => Self(s),
        })
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// Canonical task record consumed by the estimator and the allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explicit estimate. Anything that is not a finite number reads as `None`.
    #[serde(
        default,
        alias = "estimated_hours",
        deserialize_with = "lenient_hours",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_hours: Option<f64>,
    #[serde(default, alias = "sub_tasks", skip_serializing_if = "Vec::is_empty")]
    pub sub_tasks: Vec<Task>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            estimated_hours: None,
            sub_tasks: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_estimate(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_sub_task(mut self, sub_task: Task) -> Self {
        self.sub_tasks.push(sub_task);
        self
    }

    pub fn has_sub_tasks(&self) -> bool {
        !self.sub_tasks.is_empty()
    }

    pub fn description_str(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Explicit estimate when it is a usable number.
    pub fn explicit_hours(&self) -> Option<f64> {
        self.estimated_hours.filter(|h| h.is_finite())
    }
}

/// Number of allocatable units: every task plus every direct sub-task.
pub fn unit_count(tasks: &[Task]) -> usize {
    tasks.iter().map(|t| 1 + t.sub_tasks.len()).sum()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

pub(crate) fn lenient_hours<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = match LenientNumber::deserialize(deserializer)? {
        LenientNumber::Number(n) => Some(n),
        LenientNumber::Text(s) => s.trim().parse::<f64>().ok(),
        LenientNumber::Other(_) => None,
    };
    Ok(value.filter(|h| h.is_finite()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_order_numerically() {
        let mut ids: Vec<TaskId> = ["10", "2", "1", "abc"].into_iter().map(TaskId::from).collect();
        ids.sort();
        let order: Vec<&str> = ids.iter().map(|i| i.as_str()).collect();
        assert_eq!(order, ["1", "2", "10", "abc"]);
    }

    #[test]
    fn sub_task_key_is_composite() {
        let key = TaskId::sub_task(&TaskId::from(3), &TaskId::from(1));
        assert_eq!(key.as_str(), "3-1");
    }

    #[test]
    fn id_accepts_number_or_string() {
        let a: Task = serde_json::from_str(r#"{"id": 7, "title": "A"}"#).unwrap();
        let b: Task = serde_json::from_str(r#"{"id": "7-2", "title": "B"}"#).unwrap();
        assert_eq!(a.id.as_str(), "7");
        assert_eq!(b.id.as_str(), "7-2");
    }

    #[test]
    fn numeric_id_serializes_as_number() {
        let json = serde_json::to_value(TaskId::from(7)).unwrap();
        assert_eq!(json, serde_json::json!(7));
        let json = serde_json::to_value(TaskId::from("7-2")).unwrap();
        assert_eq!(json, serde_json::json!("7-2"));
    }

    #[test]
    fn unusable_estimates_read_as_absent() {
        for raw in [r#""soon""#, "null", "[]", r#""""#] {
            let src = format!(r#"{{"id": 1, "title": "T", "estimatedHours": {raw}}}"#);
            let task: Task = serde_json::from_str(&src).unwrap();
            assert_eq!(task.estimated_hours, None, "input {raw}");
        }
        let task: Task =
            serde_json::from_str(r#"{"id": 1, "title": "T", "estimated_hours": "6.5"}"#).unwrap();
        assert_eq!(task.estimated_hours, Some(6.5));
    }

    #[test]
    fn snake_case_sub_tasks_alias() {
        let task: Task = serde_json::from_str(
            r#"{"id": 1, "title": "P", "sub_tasks": [{"id": 1, "title": "C"}]}"#,
        )
        .unwrap();
        assert_eq!(task.sub_tasks.len(), 1);
        assert_eq!(unit_count(&[task]), 2);
    }

    #[test]
    fn missing_id_is_rejected() {
        let err = serde_json::from_str::<Task>(r#"{"title": "no id"}"#);
        assert!(err.is_err());
    }
}
