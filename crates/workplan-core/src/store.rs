use crate::allocate::Allocation;
use crate::error::Result;
use crate::io;
use crate::paths;
use crate::task::Task;
use std::path::Path;

// ---------------------------------------------------------------------------
// Task cache
// ---------------------------------------------------------------------------

/// Cached task list; empty when nothing has been imported yet.
pub fn load_tasks(root: &Path) -> Result<Vec<Task>> {
    let path = paths::tasks_path(root);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_tasks(root: &Path, tasks: &[Task]) -> Result<()> {
    let data = serde_json::to_string_pretty(tasks)?;
    io::atomic_write(&paths::tasks_path(root), data.as_bytes())
}

// ---------------------------------------------------------------------------
// Last allocation
// ---------------------------------------------------------------------------

impl Allocation {
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = paths::allocation_path(root);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    /// Replace whatever allocation was stored before.
    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        io::atomic_write(&paths::allocation_path(root), data.as_bytes())
    }

    /// Returns true if a stored allocation was removed.
    pub fn clear(root: &Path) -> Result<bool> {
        io::remove_if_exists(&paths::allocation_path(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocate::schedule;
    use crate::calendar::epoch_for;
    use crate::developer::Developer;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn tasks_cache_roundtrip() {
        let dir = TempDir::new().unwrap();
        assert!(load_tasks(dir.path()).unwrap().is_empty());

        let tasks = vec![Task::new(1, "Parent")
            .with_description("has children")
            .with_sub_task(Task::new(1, "Child").with_estimate(3.0))];
        save_tasks(dir.path(), &tasks).unwrap();
        assert_eq!(load_tasks(dir.path()).unwrap(), tasks);
    }

    #[test]
    fn allocation_save_load_clear() {
        let dir = TempDir::new().unwrap();
        assert!(Allocation::load(dir.path()).unwrap().is_none());
        assert!(!Allocation::clear(dir.path()).unwrap());

        let epoch = epoch_for(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(), 9);
        let out = schedule(
            &[Task::new(1, "A").with_estimate(6.0), Task::new("x", "B")],
            &[Developer::new(1, "Ann", 40.0)],
            epoch,
        )
        .unwrap();
        out.save(dir.path()).unwrap();
        assert_eq!(Allocation::load(dir.path()).unwrap(), Some(out));

        assert!(Allocation::clear(dir.path()).unwrap());
        assert!(Allocation::load(dir.path()).unwrap().is_none());
    }
}
