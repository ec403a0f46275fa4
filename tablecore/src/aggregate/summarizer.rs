//! Summarizing columns of a table with aggregate functions.
use crate::{
    aggregate::{
        function::AggregateFunction,
        group::{aggregate_column_name, TableSliceGroup},
    },
    column::Column,
    config::Config,
    error::{Result, TableError},
    table::Table,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// How a summarizer pairs its columns with its functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Every function against every column; incompatible pairs are dropped,
    /// as are columns left with no function.
    #[default]
    Cartesian,
    /// The Nth function against the Nth column. Counts must match and every
    /// pair must be compatible.
    Positional,
}

/// Binds a table, the columns to summarize and the functions to apply.
///
/// Pairs are resolved once, at construction, so argument-shape and
/// compatibility errors surface before any reduction runs.
#[derive(Debug)]
pub struct Summarizer<'a> {
    table: &'a Table,
    resolved: Vec<(String, Vec<&'a dyn AggregateFunction>)>,
    config: Config,
}

impl<'a> Summarizer<'a> {
    /// A summarizer using the Cartesian policy and default settings.
    pub fn new(
        table: &'a Table,
        columns: &[&str],
        functions: &[&'a dyn AggregateFunction],
    ) -> Result<Self> {
        Self::with_config(table, columns, functions, Config::default())
    }

    /// A summarizer using the positional policy and default settings.
    pub fn positional(
        table: &'a Table,
        columns: &[&str],
        functions: &[&'a dyn AggregateFunction],
    ) -> Result<Self> {
        let config = Config {
            policy: ResolutionPolicy::Positional,
            ..Config::default()
        };
        Self::with_config(table, columns, functions, config)
    }

    /// A summarizer resolving pairs with `config.policy`.
    pub fn with_config(
        table: &'a Table,
        columns: &[&str],
        functions: &[&'a dyn AggregateFunction],
        config: Config,
    ) -> Result<Self> {
        let resolved = match config.policy {
            ResolutionPolicy::Cartesian => resolve_cartesian(table, columns, functions, &config)?,
            ResolutionPolicy::Positional => resolve_positional(table, columns, functions)?,
        };
        debug!(
            table = %table.name(),
            policy = ?config.policy,
            pairs = resolved.iter().map(|(_, f)| f.len()).sum::<usize>(),
            columns = resolved.len(),
            "Resolved summarizer"
        );
        Ok(Self {
            table,
            resolved,
            config,
        })
    }

    /// The surviving columns with the names of the functions applied to each.
    pub fn resolved(&self) -> Vec<(&str, Vec<&str>)> {
        self.resolved
            .iter()
            .map(|(column, functions)| {
                (
                    column.as_str(),
                    functions.iter().map(|f| f.function_name()).collect(),
                )
            })
            .collect()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Summarizes the whole table into a single row.
    pub fn apply(&self) -> Result<Table> {
        let mut results = Vec::with_capacity(self.resolved.len());
        for (name, functions) in &self.resolved {
            let column = self.table.column(name)?;
            let mut table = Table::create(self.config.summary_table_name(self.table.name()));
            for function in functions {
                let value = function.summarize(column);
                trace!(column = %name, function = function.function_name(), value, "Summarized column");
                table.add_column(Column::doubles(
                    aggregate_column_name(name, function.function_name()),
                    vec![value],
                ))?;
            }
            results.push(table);
        }
        self.combine_tables(results, &[])
    }

    /// Summarizes each group of rows sharing the same values in `columns`.
    pub fn by(&self, columns: &[&str]) -> Result<Table> {
        let group = TableSliceGroup::by_columns(self.table, columns)?;
        self.apply_by_group(&group)
    }

    /// Summarizes consecutive runs of `step` rows, labeled
    /// `"{template}: {n}"`.
    pub fn by_step(&self, template: &str, step: usize) -> Result<Table> {
        let group = TableSliceGroup::by_step(self.table, template, step)?;
        self.apply_by_group(&group)
    }

    /// Summarizes each group of `group`, one row per group.
    pub fn apply_by_group(&self, group: &TableSliceGroup<'_>) -> Result<Table> {
        let mut results = Vec::with_capacity(self.resolved.len());
        for (name, functions) in &self.resolved {
            results.push(group.aggregate(name, functions, &self.config)?);
        }
        self.combine_tables(results, &group.key_column_names(&self.config))
    }

    /// Merges per-column result tables side by side. `keys` name the group
    /// columns every table repeats; they are kept once from the first table.
    fn combine_tables(&self, tables: Vec<Table>, keys: &[String]) -> Result<Table> {
        let mut tables = tables.into_iter();
        let Some(first) = tables.next() else {
            report_drop(&self.config, self.table.name(), "no column survived resolution");
            return Ok(Table::create(self.config.summary_table_name(self.table.name())));
        };
        let (result, collisions) = merge_tables(first, tables, keys)?;
        for name in &collisions {
            report_drop(&self.config, name, "name already present in summary");
        }
        Ok(result)
    }
}

/// Appends the columns of `rest` to `first`. A name already present is
/// skipped, so the first table to produce it wins. Returns the skipped names
/// other than `keys`.
fn merge_tables(
    mut first: Table,
    rest: impl IntoIterator<Item = Table>,
    keys: &[String],
) -> Result<(Table, Vec<String>)> {
    let mut collisions = Vec::new();
    for table in rest {
        for column in table.columns() {
            if !first.contains_column(column.name()) {
                first.add_column(column.clone())?;
            } else if !keys.iter().any(|key| key == column.name()) {
                collisions.push(column.name().to_string());
            }
        }
    }
    Ok((first, collisions))
}

fn resolve_cartesian<'a>(
    table: &Table,
    columns: &[&str],
    functions: &[&'a dyn AggregateFunction],
    config: &Config,
) -> Result<Vec<(String, Vec<&'a dyn AggregateFunction>)>> {
    let mut resolved: Vec<(String, Vec<&'a dyn AggregateFunction>)> = Vec::new();
    for name in columns {
        if resolved.iter().any(|(existing, _)| existing == name) {
            continue;
        }
        let column_type = table.column(name)?.column_type();
        let mut kept: Vec<&'a dyn AggregateFunction> = Vec::new();
        for function in functions {
            if !function.is_compatible_with(column_type) {
                trace!(column = %name, function = function.function_name(), %column_type, "Skipping incompatible pair");
                continue;
            }
            if kept.iter().all(|f| f.function_name() != function.function_name()) {
                kept.push(*function);
            }
        }
        if kept.is_empty() {
            report_drop(config, name, "no compatible aggregate function");
        } else {
            resolved.push((name.to_string(), kept));
        }
    }
    Ok(resolved)
}

fn resolve_positional<'a>(
    table: &Table,
    columns: &[&str],
    functions: &[&'a dyn AggregateFunction],
) -> Result<Vec<(String, Vec<&'a dyn AggregateFunction>)>> {
    if columns.len() != functions.len() {
        return Err(TableError::ArgumentCount {
            columns: columns.len(),
            functions: functions.len(),
        });
    }
    let mut resolved: Vec<(String, Vec<&'a dyn AggregateFunction>)> = Vec::new();
    for (name, function) in columns.iter().zip(functions) {
        let column_type = table.column(name)?.column_type();
        if !function.is_compatible_with(column_type) {
            return Err(TableError::IncompatibleFunction {
                function: function.function_name().to_string(),
                column: name.to_string(),
                column_type,
            });
        }
        match resolved.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, kept)) => {
                if kept.iter().all(|f| f.function_name() != function.function_name()) {
                    kept.push(*function);
                }
            }
            None => resolved.push((name.to_string(), vec![*function])),
        }
    }
    Ok(resolved)
}

fn report_drop(config: &Config, column: &str, reason: &str) {
    if config.warn_on_dropped_columns {
        warn!(%column, reason, "Dropped column from summary");
    } else {
        debug!(%column, reason, "Dropped column from summary");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregate;
    use crate::types::ColumnType;

    fn sample() -> Table {
        Table::create("stock")
            .with_columns([
                Column::strings("item", ["a", "a", "b"]),
                Column::doubles("qty", vec![1.0, 2.0, 10.0]),
                Column::integers("bins", vec![4, 5, 6]),
                Column::booleans("ok", vec![Some(true), Some(false), Some(true)]),
            ])
            .unwrap()
    }

    #[test]
    fn cartesian_keeps_compatible_pairs() {
        let table = sample();
        let summarizer = Summarizer::new(
            &table,
            &["qty", "item", "ok"],
            &[&Aggregate::Sum, &Aggregate::CountTrue],
        )
        .unwrap();
        // "item" has no compatible function and is dropped.
        assert_eq!(
            summarizer.resolved(),
            vec![("qty", vec!["Sum"]), ("ok", vec!["Number True"])]
        );
        let result = summarizer.apply().unwrap();
        assert_eq!(result.name(), "stock summary");
        assert_eq!(result.row_count(), 1);
        assert_eq!(result.column_names(), vec!["Sum [qty]", "Number True [ok]"]);
        assert_eq!(result.column("Sum [qty]").unwrap().get_double(0), 13.0);
        assert_eq!(result.column("Number True [ok]").unwrap().get_double(0), 2.0);
    }

    #[test]
    fn positional_checks_shape_and_types() {
        let table = sample();
        let err = Summarizer::positional(
            &table,
            &["qty", "bins", "ok"],
            &[&Aggregate::Sum, &Aggregate::Mean],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::ArgumentCount {
                columns: 3,
                functions: 2
            }
        ));

        let err = Summarizer::positional(&table, &["item"], &[&Aggregate::Mean]).unwrap_err();
        assert!(matches!(
            err,
            TableError::IncompatibleFunction {
                column_type: ColumnType::String,
                ref function,
                ..
            } if function == "Mean"
        ));

        let summarizer =
            Summarizer::positional(&table, &["qty", "bins"], &[&Aggregate::Max, &Aggregate::Mean])
                .unwrap();
        let result = summarizer.apply().unwrap();
        assert_eq!(result.column("Max [qty]").unwrap().get_double(0), 10.0);
        assert_eq!(result.column("Mean [bins]").unwrap().get_double(0), 5.0);
        assert!(!result.contains_column("Mean [qty]"));
    }

    #[test]
    fn grouped_summary() {
        let table = sample();
        let result = Summarizer::new(&table, &["qty", "bins"], &[&Aggregate::Sum])
            .unwrap()
            .by(&["item"])
            .unwrap();
        assert_eq!(result.column_names(), vec!["item", "Sum [qty]", "Sum [bins]"]);
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.column("item").unwrap().get_string(1), Some("b"));
        let sums: Vec<f64> = result.column("Sum [qty]").unwrap().double_values().collect();
        assert_eq!(sums, vec![3.0, 10.0]);
    }

    #[test]
    fn repeated_group_columns_are_not_collisions() -> Result<()> {
        let table = sample();
        let summarizer = Summarizer::new(&table, &["qty", "bins"], &[&Aggregate::Sum])?;

        let group = TableSliceGroup::by_columns(&table, &["item"])?;
        let keys = group.key_column_names(summarizer.config());
        assert_eq!(keys, vec!["item"]);
        let tables = vec![
            group.aggregate("qty", &[&Aggregate::Sum], summarizer.config())?,
            group.aggregate("bins", &[&Aggregate::Sum], summarizer.config())?,
        ];
        let (merged, collisions) = merge_tables(tables[0].clone(), tables[1..].to_vec(), &keys)?;
        assert!(collisions.is_empty());
        assert_eq!(merged.column_names(), vec!["item", "Sum [qty]", "Sum [bins]"]);

        let steps = TableSliceGroup::by_step(&table, "Rows", 2)?;
        assert_eq!(steps.key_column_names(summarizer.config()), vec!["Group"]);

        // Without the key names the repeated key column counts as a collision.
        let (_, collisions) = merge_tables(tables[0].clone(), tables[1..].to_vec(), &[])?;
        assert_eq!(collisions, vec!["item"]);
        Ok(())
    }

    #[test]
    fn positional_count_checked_before_columns() {
        let table = sample();
        let err = Summarizer::positional(
            &table,
            &["qty", "nope", "ok"],
            &[&Aggregate::Sum, &Aggregate::Mean],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::ArgumentCount {
                columns: 3,
                functions: 2
            }
        ));
    }

    #[test]
    fn step_summary() {
        let table = sample();
        let result = Summarizer::new(&table, &["qty"], &[&Aggregate::Max])
            .unwrap()
            .by_step("Rows", 2)
            .unwrap();
        assert_eq!(result.column_names(), vec!["Group", "Max [qty]"]);
        assert_eq!(result.column("Group").unwrap().get_string(1), Some("Rows: 2"));
        let maxes: Vec<f64> = result.column("Max [qty]").unwrap().double_values().collect();
        assert_eq!(maxes, vec![2.0, 10.0]);
    }

    #[test]
    fn nothing_survives() {
        let table = sample();
        let summarizer = Summarizer::new(&table, &["item"], &[&Aggregate::Mean]).unwrap();
        let result = summarizer.apply().unwrap();
        assert_eq!(result.name(), "stock summary");
        assert_eq!(result.column_count(), 0);
    }

    #[test]
    fn duplicate_functions_collapse() {
        let table = sample();
        let summarizer = Summarizer::new(
            &table,
            &["qty", "qty"],
            &[&Aggregate::Sum, &Aggregate::Sum, &Aggregate::Count],
        )
        .unwrap();
        assert_eq!(summarizer.resolved(), vec![("qty", vec!["Sum", "Count"])]);
    }

    #[test]
    fn unknown_column() {
        let table = sample();
        assert!(matches!(
            Summarizer::new(&table, &["nope"], &[&Aggregate::Sum]),
            Err(TableError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn custom_function() {
        #[derive(Debug)]
        struct Spread;

        impl AggregateFunction for Spread {
            fn function_name(&self) -> &str {
                "Spread"
            }

            fn is_compatible_with(&self, column_type: ColumnType) -> bool {
                column_type == ColumnType::Double
            }

            fn summarize(&self, column: &Column) -> f64 {
                Aggregate::Range.summarize(column) / 2.0
            }
        }

        let table = sample();
        let result = Summarizer::new(&table, &["qty", "bins"], &[&Spread])
            .unwrap()
            .apply()
            .unwrap();
        assert_eq!(result.column_names(), vec!["Spread [qty]"]);
        assert_eq!(result.column("Spread [qty]").unwrap().get_double(0), 4.5);
    }
}
