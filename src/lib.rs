//! Core library for the dabiao command line application.
//!
//! The library turns order sheets (one row per customer, one column per item)
//! into billing sheets that list what each customer owes and what they
//! ordered. Spreadsheet adapters live under [`dabiao::tools::io`], the data
//! representations inside [`dabiao::tools::model`], the per-sheet
//! transformation steps in [`dabiao::tools::transform`], cross-file grouping
//! in [`dabiao::tools::merge`] and the job entry points used by the binary
//! under [`dabiao::tools::jobs`].

pub mod dabiao;

pub use dabiao::tools::{Result, ToolError, config, error, io, jobs, merge, model, transform};
