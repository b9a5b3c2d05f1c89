use std::error::Error;

use serde::Serialize;

use super::TablesCmd;
use crate::commands::Execute;
use crate::db::{Cell, ColumnRef, ConnectionBoundary, QueryModel};

/// Result of the tables command execution
#[derive(Debug, Default, Serialize)]
pub struct TablesResult {
    pub pattern: Option<String>,
    pub tables: Vec<String>,
}

impl TablesCmd {
    /// Catalog query listing user tables, internal `sqlite_` tables excluded.
    fn model(&self) -> Result<QueryModel, Box<dyn Error>> {
        let mut expression = "sqlite_master.type = ? AND sqlite_master.name NOT LIKE ?".to_string();
        let mut params = vec![Cell::from("table"), Cell::from("sqlite_%")];
        if let Some(pattern) = &self.like {
            expression.push_str(" AND sqlite_master.name LIKE ?");
            params.push(Cell::from(pattern.as_str()));
        }

        let model = QueryModel::builder("sqlite_master")
            .column(ColumnRef::aliased("sqlite_master.name", "name"))
            .filter(expression, params)
            .order_by("sqlite_master.name")
            .build()?;
        Ok(model)
    }
}

impl Execute for TablesCmd {
    type Output = TablesResult;

    fn execute(self, db: &mut ConnectionBoundary) -> Result<Self::Output, Box<dyn Error>> {
        let rows = db.execute_query(&self.model()?)?;
        let tables = rows
            .iter()
            .map(|row| row.get_text("name").map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TablesResult {
            pattern: self.like,
            tables,
        })
    }
}
