use std::error::Error;

use serde::Serialize;

use super::CompileCmd;
use crate::commands::{load_query_model, Execute};
use crate::db::{Cell, ConnectionBoundary};

/// Result of the compile command execution
#[derive(Debug, Serialize)]
pub struct CompileResult {
    pub sql: String,
    pub params: Vec<Cell>,
}

impl Execute for CompileCmd {
    type Output = CompileResult;

    /// Never touches the connection.
    fn execute(self, _db: &mut ConnectionBoundary) -> Result<Self::Output, Box<dyn Error>> {
        let statement = load_query_model(&self.file)?.compile();
        Ok(CompileResult {
            sql: statement.sql,
            params: statement.params,
        })
    }
}
