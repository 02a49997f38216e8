use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkplanError {
    #[error("not initialized: run 'workplan init'")]
    NotInitialized,

    #[error("no developers: at least one developer is required to allocate work")]
    NoDevelopers,

    #[error("invalid task: {0}")]
    InvalidTask(String),

    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),

    #[error("task without an id at {0}")]
    MissingTaskId(String),

    #[error("unrecognized task list shape: {0}")]
    UnrecognizedTaskShape(String),

    #[error("invalid developer '{spec}': {reason}")]
    InvalidDeveloper { spec: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WorkplanError>;
