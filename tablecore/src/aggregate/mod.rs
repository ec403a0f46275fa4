//! Grouping rows and reducing columns into summary tables.
//!
//! A [`Summarizer`] resolves which aggregate functions apply to which
//! columns, a [`TableSliceGroup`] partitions the rows, and each surviving
//! (column, function) pair becomes one `f64` column of the summary, named
//! `"{function} [{column}]"`.
pub mod function;
pub mod group;
pub mod summarizer;

pub use function::{Aggregate, AggregateFunction};
pub use group::{aggregate_column_name, TableSlice, TableSliceGroup};
pub use summarizer::{ResolutionPolicy, Summarizer};
