use std::error::Error;

use serde::Serialize;

use super::QueryCmd;
use crate::commands::{load_query_model, Execute};
use crate::db::{Cell, ConnectionBoundary, ResultRow};

/// Result of the query command execution
#[derive(Debug, Serialize)]
pub struct QueryResult {
    pub sql: String,
    pub params: Vec<Cell>,
    pub rows: Vec<ResultRow>,
}

impl Execute for QueryCmd {
    type Output = QueryResult;

    fn execute(self, db: &mut ConnectionBoundary) -> Result<Self::Output, Box<dyn Error>> {
        let model = load_query_model(&self.file)?;
        let statement = model.compile();
        let rows = db.execute_compiled(&statement)?;

        Ok(QueryResult {
            sql: statement.sql,
            params: statement.params,
            rows,
        })
    }
}
