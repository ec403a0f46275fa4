//! Query execution for in-memory columnar tables.
//!
//! * [`temporal`] packs a local date-time into one `i64` and answers calendar
//!   questions with shifts and masks.
//! * [`selection`] holds the row indices a query matched.
//! * [`filter`] composes per-column predicates with NOT / AND / OR and
//!   evaluates them into selections.
//! * [`aggregate`] groups rows and reduces columns into summary tables.
//!
//! ```
//! use tablecore::{Aggregate, Column, Filter, Summarizer, Table};
//!
//! let table = Table::create("readings")
//!     .with_columns([
//!         Column::strings("site", ["a", "a", "b"]),
//!         Column::doubles("value", vec![1.0, 2.0, 10.0]),
//!     ])?;
//!
//! let positive = table.filter(&Filter::number("value").is_positive())?;
//! assert_eq!(positive.row_count(), 3);
//!
//! let totals = Summarizer::new(&table, &["value"], &[&Aggregate::Sum])?.by(&["site"])?;
//! assert_eq!(totals.column("Sum [value]")?.get_double(1), 10.0);
//! # Ok::<(), tablecore::TableError>(())
//! ```
pub mod aggregate;
pub mod column;
pub mod config;
pub mod error;
pub mod filter;
pub mod selection;
pub mod table;
pub mod temporal;
pub mod types;

// --- Main Library Exports ---
pub use crate::{
    aggregate::{Aggregate, AggregateFunction, ResolutionPolicy, Summarizer, TableSliceGroup},
    column::{Column, ColumnData},
    config::Config,
    error::{Result, TableError},
    filter::{ColumnOperand, Filter},
    selection::Selection,
    table::Table,
    temporal::PackedDateTime,
    types::{ColumnType, Value},
};
