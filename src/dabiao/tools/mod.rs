pub mod config;
pub mod error;
pub mod io;
pub mod jobs;
pub mod merge;
pub mod model;
pub mod transform;

pub use error::{Result, ToolError};
