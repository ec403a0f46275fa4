//! An ordered collection of named columns of equal length.
use crate::{
    column::Column,
    error::{Result, TableError},
    filter::Filter,
    selection::Selection,
};
use tracing::trace;

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    pub fn create(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Appends a column. The first column fixes the row count; later columns
    /// must match it and carry a name not already present.
    pub fn add_column(&mut self, column: Column) -> Result<&mut Self> {
        if self.contains_column(column.name()) {
            return Err(TableError::DuplicateColumn(column.name().to_string()));
        }
        if let Some(first) = self.columns.first() {
            if first.size() != column.size() {
                return Err(TableError::ColumnLengthMismatch {
                    column: column.name().to_string(),
                    expected: first.size(),
                    actual: column.size(),
                });
            }
        }
        self.columns.push(column);
        Ok(self)
    }

    pub fn add_columns(&mut self, columns: impl IntoIterator<Item = Column>) -> Result<&mut Self> {
        for column in columns {
            self.add_column(column)?;
        }
        Ok(self)
    }

    /// Builder form of [`Table::add_columns`].
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Result<Self> {
        self.add_columns(columns)?;
        Ok(self)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::size)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    /// Selection of every row.
    pub fn all_rows(&self) -> Selection {
        Selection::with_range(0, self.row_count() as u32)
    }

    /// A table with the same name and columns restricted to the selected rows.
    pub fn where_rows(&self, selection: &Selection) -> Table {
        Table {
            name: self.name.clone(),
            columns: self.columns.iter().map(|c| c.where_rows(selection)).collect(),
        }
    }

    /// Evaluates `filter` and returns the matching rows as a new table.
    pub fn filter(&self, filter: &Filter) -> Result<Table> {
        let selection = filter.apply_table(self)?;
        trace!(table = %self.name, rows = self.row_count(), matched = selection.size(), "Filtered table");
        Ok(self.where_rows(&selection))
    }
}
