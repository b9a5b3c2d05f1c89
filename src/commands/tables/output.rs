//! Output formatting for tables command results.

use super::execute::TablesResult;
use crate::output::Outputable;

impl Outputable for TablesResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();
        match &self.pattern {
            Some(pattern) => lines.push(format!("Tables like: {}", pattern)),
            None => lines.push("Tables".to_string()),
        }
        lines.push(String::new());

        if self.tables.is_empty() {
            lines.push("No tables found.".to_string());
        } else {
            lines.push(format!("Found {} table(s):", self.tables.len()));
            for table in &self.tables {
                lines.push(format!("  {}", table));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn empty_result() -> TablesResult {
        TablesResult {
            pattern: Some("huts%".to_string()),
            tables: vec![],
        }
    }

    #[fixture]
    fn populated_result() -> TablesResult {
        TablesResult {
            pattern: None,
            tables: vec!["routes".to_string(), "summits".to_string()],
        }
    }

    crate::output_table_contains_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: TablesResult,
        contains: ["Tables like: huts%", "No tables found."],
    }

    #[rstest]
    fn test_to_table_populated(populated_result: TablesResult) {
        assert_eq!(
            populated_result.to_table(),
            "Tables\n\nFound 2 table(s):\n  routes\n  summits"
        );
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: populated_result,
        fixture_type: TablesResult,
        assertions: |parsed| {
            assert_eq!(parsed["tables"][0], "routes");
            assert!(parsed["pattern"].is_null());
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: populated_result,
        fixture_type: TablesResult,
        contains: ["routes", "summits"],
    }
}
