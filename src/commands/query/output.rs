//! Output formatting for query command results.

use super::execute::QueryResult;
use crate::output::{render_rows, Outputable};

impl Outputable for QueryResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Query: {}", self.sql)];
        if !self.params.is_empty() {
            let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
            lines.push(format!("Params: {}", params.join(", ")));
        }
        lines.push(String::new());

        if self.rows.is_empty() {
            lines.push("No rows.".to_string());
        } else {
            lines.extend(render_rows(&self.rows));
            lines.push(String::new());
            lines.push(format!("{} row(s)", self.rows.len()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Cell, ResultRow};
    use rstest::{fixture, rstest};

    #[fixture]
    fn empty_result() -> QueryResult {
        QueryResult {
            sql: "SELECT routes.id AS 'routes.id' FROM 'routes' WHERE routes.grade > ?".to_string(),
            params: vec![Cell::from(9)],
            rows: vec![],
        }
    }

    #[fixture]
    fn single_result() -> QueryResult {
        let row = vec![
            ("routes.route_name", Cell::from("North Face")),
            ("summit", Cell::from("Eiger")),
            ("bolted", Cell::from(false)),
        ];
        QueryResult {
            sql: "SELECT routes.route_name AS 'routes.route_name' FROM 'routes'".to_string(),
            params: vec![],
            rows: vec![ResultRow::new(row.into_iter().collect())],
        }
    }

    crate::output_table_contains_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: QueryResult,
        contains: ["Query: SELECT routes.id", "Params: 9", "No rows."],
    }

    crate::output_table_contains_test! {
        test_name: test_to_table_single,
        fixture: single_result,
        fixture_type: QueryResult,
        contains: ["routes.route_name  summit  bolted", "North Face", "false", "1 row(s)"],
    }

    #[rstest]
    fn test_to_table_omits_params_line_without_params(single_result: QueryResult) {
        assert!(!single_result.to_table().contains("Params:"));
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: single_result,
        fixture_type: QueryResult,
        assertions: |parsed| {
            let row = &parsed["rows"][0];
            assert_eq!(row["routes.route_name"], "North Face");
            assert_eq!(row["summit"], "Eiger");
            assert_eq!(row["bolted"], false);
            assert!(parsed["params"].as_array().unwrap().is_empty());
        },
    }

    crate::output_json_test! {
        test_name: test_format_json_params,
        fixture: empty_result,
        fixture_type: QueryResult,
        assertions: |parsed| {
            assert_eq!(parsed["params"][0], 9);
            assert!(parsed["rows"].as_array().unwrap().is_empty());
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: single_result,
        fixture_type: QueryResult,
        contains: ["North Face", "Eiger"],
    }
}
