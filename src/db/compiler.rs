//! Statement compiler: `QueryModel` to SQL text plus positional parameters.
//!
//! Clause order is fixed: SELECT, FROM / LEFT JOIN, WHERE, GROUP BY, ORDER BY, LIMIT.
//! Output is deterministic, so the same model always yields byte-identical text.
//!
//! Unaliased columns are aliased to their own qualified text (`routes.id AS 'routes.id'`)
//! so a result row can always be read back with the exact string used to request it.

use std::fmt;

use super::escape::quote_single;
use super::query::{QueryModel, SortDirection};
use super::value::Cell;

/// SQL text paired with the values for its `?` placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStatement {
    pub sql: String,
    pub params: Vec<Cell>,
}

impl fmt::Display for CompiledStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

pub fn compile(query: &QueryModel) -> CompiledStatement {
    let mut clauses = Vec::with_capacity(6);
    let mut params = Vec::new();

    let projection: Vec<String> = query
        .columns()
        .iter()
        .map(|column| match column.alias() {
            Some(_) => column.text().to_string(),
            None => format!("{} AS {}", column.text(), quote_single(column.text())),
        })
        .collect();
    clauses.push(format!("SELECT {}", projection.join(", ")));

    // tables[0] is the base, tables[i + 1] joins on join_conditions[i]
    if let Some((base, joined)) = query.tables().split_first() {
        let mut from = format!("FROM {}", quote_single(base));
        for (table, condition) in joined.iter().zip(query.join_conditions()) {
            from.push_str(&format!(" LEFT JOIN {} ON {}", quote_single(table), condition));
        }
        clauses.push(from);
    }

    if let Some(filter) = query.filter() {
        clauses.push(format!("WHERE {}", filter.expression()));
        params.extend(filter.params().iter().cloned());
    }

    if !query.group_by().is_empty() {
        clauses.push(format!("GROUP BY {}", query.group_by().join(", ")));
    }

    if !query.order_by().is_empty() {
        let terms: Vec<String> = query
            .order_by()
            .iter()
            .map(|term| match term.direction {
                SortDirection::Asc => term.column.clone(),
                SortDirection::Desc => format!("{} DESC", term.column),
            })
            .collect();
        clauses.push(format!("ORDER BY {}", terms.join(", ")));
    }

    if let Some(limit) = query.limit() {
        clauses.push("LIMIT ?".to_string());
        params.push(Cell::from(limit));
    }

    CompiledStatement {
        sql: clauses.join(" "),
        params,
    }
}
