//! Structural description of a SELECT-shaped request.
//!
//! A `QueryModel` is built once per call site and never mutated. Construction validates the
//! shape (non-empty tables and columns, one join condition per joined table, placeholder
//! count matching the bound parameters, unique result keys) so the compiler can stay a
//! total function.
//!
//! Table and column names are trusted identifiers: they end up in the SQL text as given.
//! Only pass known schema names here, never end-user input. Values belong in the filter's
//! parameter list.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::compiler::{self, CompiledStatement};
use super::escape::{count_placeholders, quote_single, unquote};
use super::value::Cell;

static ALIAS_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)^(?P<expr>.+?)\s+AS\s+(?P<alias>'(?:[^']|'')*'|"(?:[^"]|"")*"|`[^`]*`|\[[^\]]*\]|[A-Za-z_][A-Za-z0-9_$]*)\s*$"#,
    )
    .expect("alias marker pattern is valid")
});

static SORT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(?P<column>.+?)\s+(?P<direction>ASC|DESC)\s*$")
        .expect("sort suffix pattern is valid")
});

/// Query model construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Query must project at least one column")]
    NoColumns,

    #[error("Query must name at least one table")]
    NoTables,

    #[error("Table name at position {index} is empty")]
    EmptyTableName { index: usize },

    #[error("Expected {expected} join condition(s) for {tables} table(s), got {actual}")]
    JoinConditionCount {
        tables: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Join condition for '{table}' contains a parameter placeholder; bind values in the filter")]
    PlaceholderInJoin { table: String },

    #[error("Filter uses named parameter '{name}'; only positional '?' placeholders are supported")]
    NamedParameter { name: String },

    #[error("Filter has {placeholders} placeholder(s) but {params} bound parameter(s)")]
    ParameterCountMismatch { placeholders: usize, params: usize },

    #[error("Projected columns collide on result key '{key}'")]
    DuplicateColumnKey { key: String },
}

/// A projected column: qualified text plus an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct ColumnRef {
    text: String,
    alias: Option<String>,
}

impl ColumnRef {
    /// Parse column text, recognizing a trailing `AS alias` marker.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into().trim().to_string();
        let alias = ALIAS_MARKER
            .captures(&text)
            .and_then(|caps| caps.name("alias"))
            .map(|m| unquote(m.as_str()));
        Self { text, alias }
    }

    /// Project `expr` under an explicit alias.
    pub fn aliased(expr: &str, alias: &str) -> Self {
        Self {
            text: format!("{} AS {}", expr.trim(), quote_single(alias)),
            alias: Some(alias.to_string()),
        }
    }

    /// The column text exactly as the caller supplied it.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The key this column is stored under in a result row.
    pub fn result_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.text)
    }
}

impl From<&str> for ColumnRef {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ColumnRef {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct OrderTerm {
    pub column: String,
    pub direction: SortDirection,
}

impl OrderTerm {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `column [ASC|DESC]`.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match SORT_SUFFIX.captures(text) {
            Some(caps) => {
                let column = caps["column"].to_string();
                if caps["direction"].eq_ignore_ascii_case("desc") {
                    Self::desc(column)
                } else {
                    Self::asc(column)
                }
            }
            None => Self::asc(text),
        }
    }
}

impl From<&str> for OrderTerm {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for OrderTerm {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

/// A WHERE expression with its positional parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Filter {
    expression: String,
    #[serde(default)]
    params: Vec<Cell>,
}

impl Filter {
    pub fn new(expression: impl Into<String>, params: Vec<Cell>) -> Self {
        Self {
            expression: expression.into(),
            params,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn params(&self) -> &[Cell] {
        &self.params
    }
}

/// A validated, immutable SELECT description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "QueryDocument")]
pub struct QueryModel {
    columns: Vec<ColumnRef>,
    tables: Vec<String>,
    join_conditions: Vec<String>,
    filter: Option<Filter>,
    group_by: Vec<String>,
    order_by: Vec<OrderTerm>,
    limit: Option<u32>,
}

impl QueryModel {
    /// Build a model from its parts, rejecting malformed shapes.
    pub fn new(
        columns: Vec<ColumnRef>,
        tables: Vec<String>,
        join_conditions: Vec<String>,
        filter: Option<Filter>,
        group_by: Vec<String>,
        order_by: Vec<OrderTerm>,
    ) -> Result<Self, ModelError> {
        Self {
            columns,
            tables,
            join_conditions,
            filter,
            group_by,
            order_by,
            limit: None,
        }
        .validated()
    }

    /// Start a builder selecting from `base_table`.
    pub fn builder(base_table: impl Into<String>) -> QueryModelBuilder {
        QueryModelBuilder::new(base_table)
    }

    pub fn columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn join_conditions(&self) -> &[String] {
        &self.join_conditions
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    pub fn order_by(&self) -> &[OrderTerm] {
        &self.order_by
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Render to SQL text and positional parameters.
    pub fn compile(&self) -> CompiledStatement {
        compiler::compile(self)
    }

    fn validated(self) -> Result<Self, ModelError> {
        if self.tables.is_empty() {
            return Err(ModelError::NoTables);
        }
        if self.columns.is_empty() {
            return Err(ModelError::NoColumns);
        }
        if let Some(index) = self.tables.iter().position(|t| t.trim().is_empty()) {
            return Err(ModelError::EmptyTableName { index });
        }

        let expected = self.tables.len() - 1;
        if self.join_conditions.len() != expected {
            return Err(ModelError::JoinConditionCount {
                tables: self.tables.len(),
                expected,
                actual: self.join_conditions.len(),
            });
        }
        for (table, condition) in self.tables[1..].iter().zip(&self.join_conditions) {
            if count_placeholders(condition) != Ok(0) {
                return Err(ModelError::PlaceholderInJoin {
                    table: table.clone(),
                });
            }
        }

        if let Some(filter) = &self.filter {
            let placeholders = count_placeholders(&filter.expression)
                .map_err(|name| ModelError::NamedParameter { name })?;
            if placeholders != filter.params.len() {
                return Err(ModelError::ParameterCountMismatch {
                    placeholders,
                    params: filter.params.len(),
                });
            }
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.result_key()) {
                return Err(ModelError::DuplicateColumnKey {
                    key: column.result_key().to_string(),
                });
            }
        }

        Ok(self)
    }
}

/// Fluent construction of a `QueryModel`.
///
/// # Examples
///
/// ```ignore
/// let model = QueryModel::builder("routes")
///     .column("routes.id")
///     .column(ColumnRef::aliased("summits.name", "summit"))
///     .left_join("summits", "summits.id = routes.summit_id")
///     .filter("routes.grade >= ?", vec![Cell::from(5)])
///     .order_by("routes.route_name")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct QueryModelBuilder {
    columns: Vec<ColumnRef>,
    tables: Vec<String>,
    join_conditions: Vec<String>,
    filter: Option<Filter>,
    group_by: Vec<String>,
    order_by: Vec<OrderTerm>,
    limit: Option<u32>,
}

impl QueryModelBuilder {
    pub fn new(base_table: impl Into<String>) -> Self {
        Self {
            columns: Vec::new(),
            tables: vec![base_table.into()],
            join_conditions: Vec::new(),
            filter: None,
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    pub fn column(mut self, column: impl Into<ColumnRef>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnRef>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn left_join(mut self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.tables.push(table.into());
        self.join_conditions.push(on.into());
        self
    }

    /// Set the WHERE expression. A later call replaces an earlier one.
    pub fn filter<I>(mut self, expression: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        let params = params.into_iter().map(Into::into).collect();
        self.filter = Some(Filter::new(expression, params));
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by.push(column.into());
        self
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by.push(OrderTerm::asc(column));
        self
    }

    pub fn order_by_desc(mut self, column: impl Into<String>) -> Self {
        self.order_by.push(OrderTerm::desc(column));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<QueryModel, ModelError> {
        QueryModel {
            columns: self.columns,
            tables: self.tables,
            join_conditions: self.join_conditions,
            filter: self.filter,
            group_by: self.group_by,
            order_by: self.order_by,
            limit: self.limit,
        }
        .validated()
    }
}

/// Serialized form of a query model, as read from JSON query documents.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QueryDocument {
    columns: Vec<ColumnRef>,
    tables: Vec<String>,
    #[serde(default)]
    join_conditions: Vec<String>,
    #[serde(default)]
    filter: Option<Filter>,
    #[serde(default)]
    group_by: Vec<String>,
    #[serde(default)]
    order_by: Vec<OrderTerm>,
    #[serde(default)]
    limit: Option<u32>,
}

impl TryFrom<QueryDocument> for QueryModel {
    type Error = ModelError;

    fn try_from(doc: QueryDocument) -> Result<Self, Self::Error> {
        QueryModel {
            columns: doc.columns,
            tables: doc.tables,
            join_conditions: doc.join_conditions,
            filter: doc.filter,
            group_by: doc.group_by,
            order_by: doc.order_by,
            limit: doc.limit,
        }
        .validated()
    }
}
