pub mod allocate;
pub mod calendar;
pub mod config;
pub mod developer;
pub mod error;
pub mod estimate;
pub mod gantt;
pub mod io;
pub mod normalize;
pub mod paths;
pub mod store;
pub mod task;

pub use error::{Result, WorkplanError};
