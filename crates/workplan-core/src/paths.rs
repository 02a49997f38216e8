use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const WORKPLAN_DIR: &str = ".workplan";

pub const CONFIG_FILE: &str = ".workplan/config.yaml";
pub const TASKS_FILE: &str = ".workplan/tasks.json";
pub const ALLOCATION_FILE: &str = ".workplan/allocation.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn workplan_dir(root: &Path) -> PathBuf {
    root.join(WORKPLAN_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn tasks_path(root: &Path) -> PathBuf {
    root.join(TASKS_FILE)
}

pub fn allocation_path(root: &Path) -> PathBuf {
    root.join(ALLOCATION_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.workplan/config.yaml")
        );
        assert_eq!(
            allocation_path(root),
            PathBuf::from("/tmp/proj/.workplan/allocation.json")
        );
        assert_eq!(tasks_path(root), workplan_dir(root).join("tasks.json"));
    }
}
