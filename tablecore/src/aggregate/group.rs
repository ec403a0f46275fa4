//! Partitioning a table's rows into labeled groups.
use crate::{
    aggregate::function::AggregateFunction,
    column::{Column, KeyPart},
    config::Config,
    error::{Result, TableError},
    selection::Selection,
    table::Table,
    types::{ColumnType, Value},
};
use std::collections::HashMap;
use tracing::debug;

/// One group: its label, the key values shared by its rows (empty for step
/// groups) and the rows themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSlice {
    pub label: String,
    pub key: Vec<Option<Value>>,
    pub selection: Selection,
}

#[derive(Clone, Debug, PartialEq)]
enum GroupKind {
    /// Keyed by the values of these columns, with their types.
    Columns(Vec<(String, ColumnType)>),
    Steps,
}

/// An ordered, disjoint set of row groups over one table.
#[derive(Clone, Debug)]
pub struct TableSliceGroup<'a> {
    table: &'a Table,
    kind: GroupKind,
    slices: Vec<TableSlice>,
}

impl<'a> TableSliceGroup<'a> {
    /// Groups rows by equality of their values in `columns`. Groups appear in
    /// the order their first row appears; missing cells form their own key.
    pub fn by_columns(table: &'a Table, columns: &[&str]) -> Result<Self> {
        if columns.is_empty() {
            return Err(TableError::InvalidArgument(
                "at least one grouping column is required".to_string(),
            ));
        }
        let key_columns = columns
            .iter()
            .map(|name| table.column(name))
            .collect::<Result<Vec<&Column>>>()?;

        let mut index: HashMap<Vec<KeyPart>, usize> = HashMap::new();
        let mut rows: Vec<Vec<u32>> = Vec::new();
        let mut slices: Vec<TableSlice> = Vec::new();
        for row in 0..table.row_count() {
            let key: Vec<KeyPart> = key_columns.iter().map(|c| c.key_at(row)).collect();
            let slot = *index.entry(key).or_insert_with(|| {
                let values: Vec<Option<Value>> = key_columns.iter().map(|c| c.value(row)).collect();
                slices.push(TableSlice {
                    label: key_label(&values),
                    key: values,
                    selection: Selection::new(),
                });
                rows.push(Vec::new());
                slices.len() - 1
            });
            rows[slot].push(row as u32);
        }
        for (slice, rows) in slices.iter_mut().zip(rows) {
            slice.selection = rows.into_iter().collect();
        }

        debug!(table = %table.name(), ?columns, groups = slices.len(), "Grouped rows by key columns");
        Ok(Self {
            table,
            kind: GroupKind::Columns(
                key_columns
                    .iter()
                    .map(|c| (c.name().to_string(), c.column_type()))
                    .collect(),
            ),
            slices,
        })
    }

    /// Splits the table into consecutive runs of `step` rows, the last run
    /// holding whatever remains. Runs are labeled `"{template}: {n}"`
    /// counting from 1.
    pub fn by_step(table: &'a Table, template: &str, step: usize) -> Result<Self> {
        if step == 0 {
            return Err(TableError::InvalidArgument(
                "step size must be at least 1".to_string(),
            ));
        }
        let row_count = table.row_count();
        let slices: Vec<TableSlice> = (0..row_count)
            .step_by(step)
            .enumerate()
            .map(|(n, start)| TableSlice {
                label: format!("{}: {}", template, n + 1),
                key: Vec::new(),
                selection: Selection::with_range(start as u32, (start + step).min(row_count) as u32),
            })
            .collect();
        debug!(table = %table.name(), step, groups = slices.len(), "Grouped rows by step");
        Ok(Self {
            table,
            kind: GroupKind::Steps,
            slices,
        })
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn slices(&self) -> &[TableSlice] {
        &self.slices
    }

    /// Names of the key or label columns leading every table that
    /// [`TableSliceGroup::aggregate`] builds.
    pub fn key_column_names(&self, config: &Config) -> Vec<String> {
        match &self.kind {
            GroupKind::Columns(keys) => keys.iter().map(|(name, _)| name.clone()).collect(),
            GroupKind::Steps => vec![config.group_column_name.clone()],
        }
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Materializes each group as its own table, named by the group label.
    pub fn as_tables(&self) -> Vec<Table> {
        self.slices
            .iter()
            .map(|slice| {
                let mut table = self.table.where_rows(&slice.selection);
                table.set_name(slice.label.clone());
                table
            })
            .collect()
    }

    /// Applies every function to `column` within each group.
    ///
    /// The result has one row per group: the key columns (or the step label
    /// column) followed by one `f64` column per function, named
    /// `"{function} [{column}]"`.
    pub fn aggregate(
        &self,
        column: &str,
        functions: &[&dyn AggregateFunction],
        config: &Config,
    ) -> Result<Table> {
        let source = self.table.column(column)?;
        let mut result = Table::create(config.summary_table_name(self.table.name()));

        match &self.kind {
            GroupKind::Columns(keys) => {
                for (i, (name, column_type)) in keys.iter().enumerate() {
                    let values = self.slices.iter().map(|s| s.key.get(i).cloned().flatten());
                    result.add_column(Column::from_values(name.clone(), *column_type, values)?)?;
                }
            }
            GroupKind::Steps => {
                let labels = self.slices.iter().map(|s| s.label.clone());
                result.add_column(Column::strings(config.group_column_name.clone(), labels))?;
            }
        }

        let parts: Vec<Column> = self
            .slices
            .iter()
            .map(|s| source.where_rows(&s.selection))
            .collect();
        for function in functions {
            let values: Vec<f64> = parts.iter().map(|part| function.summarize(part)).collect();
            let name = aggregate_column_name(column, function.function_name());
            result.add_column(Column::doubles(name, values))?;
        }
        Ok(result)
    }
}

/// Output column name for `function` applied to `column`.
pub fn aggregate_column_name(column: &str, function: &str) -> String {
    format!("{} [{}]", function, column)
}

fn key_label(values: &[Option<Value>]) -> String {
    values
        .iter()
        .map(|v| v.as_ref().map(Value::to_string).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" | ")
}
