//! Execute tests for query command.

#[cfg(test)]
mod tests {
    use super::super::QueryCmd;
    use crate::db::Cell;
    use crate::test_utils::write_query_file;
    use rstest::rstest;

    crate::execute_test! {
        test_name: test_query_single_table_with_filter,
        cmd: |dir| QueryCmd {
            file: write_query_file(dir, "routes.json", r#"{
                "columns": ["routes.id", "routes.route_name"],
                "tables": ["routes"],
                "filter": { "expression": "routes.summit_id = ?", "params": [7] }
            }"#),
        },
        assertions: |result| {
            assert_eq!(
                result.sql,
                "SELECT routes.id AS 'routes.id', routes.route_name AS 'routes.route_name' \
                 FROM 'routes' WHERE routes.summit_id = ?"
            );
            assert_eq!(result.params, vec![Cell::Integer(7)]);
            assert_eq!(result.rows.len(), 2);
            let names: Vec<&str> = result
                .rows
                .iter()
                .map(|r| r.get_text("routes.route_name").unwrap())
                .collect();
            assert!(names.contains(&"Hörnli Ridge"));
            assert!(names.contains(&"Zmutt Ridge"));
        },
    }

    // Route 5 has no summit, so the LEFT JOIN yields nulls for the summit columns
    crate::execute_test! {
        test_name: test_query_left_join_produces_nulls,
        cmd: |dir| QueryCmd {
            file: write_query_file(dir, "join.json", r#"{
                "columns": ["routes.route_name", "summits.name AS summit", "summits.height"],
                "tables": ["routes", "summits"],
                "join_conditions": ["routes.summit_id = summits.id"],
                "order_by": ["routes.id"]
            }"#),
        },
        assertions: |result| {
            assert_eq!(result.rows.len(), 5);
            let first = &result.rows[0];
            assert_eq!(first.get_text("summit").unwrap(), "Matterhorn");
            assert_eq!(first.get_real("summits.height").unwrap(), 4478.0);

            let last = &result.rows[4];
            assert_eq!(last.get_text("routes.route_name").unwrap(), "Boulder Traverse");
            assert_eq!(last.get_optional_text("summit").unwrap(), None);
            assert_eq!(last.get_optional_real("summits.height").unwrap(), None);
        },
    }

    crate::execute_test! {
        test_name: test_query_boolean_column,
        cmd: |dir| QueryCmd {
            file: write_query_file(dir, "bolted.json", r#"{
                "columns": ["routes.route_name", "routes.bolted"],
                "tables": ["routes"],
                "filter": { "expression": "routes.bolted = ?", "params": [true] }
            }"#),
        },
        assertions: |result| {
            assert_eq!(result.rows.len(), 1);
            let row = &result.rows[0];
            assert_eq!(row.get_text("routes.route_name").unwrap(), "Mittellegi Ridge");
            assert!(row.get_bool("routes.bolted").unwrap());
        },
    }

    crate::execute_test! {
        test_name: test_query_group_order_limit,
        cmd: |dir| QueryCmd {
            file: write_query_file(dir, "grouped.json", r#"{
                "columns": ["routes.summit_id", "COUNT(routes.id) AS total"],
                "tables": ["routes"],
                "filter": { "expression": "routes.summit_id IS NOT NULL" },
                "group_by": ["routes.summit_id"],
                "order_by": ["routes.summit_id DESC"],
                "limit": 1
            }"#),
        },
        assertions: |result| {
            assert!(result.sql.ends_with("LIMIT ?"));
            assert_eq!(result.rows.len(), 1);
            assert_eq!(result.rows[0].get_int("routes.summit_id").unwrap(), 8);
            assert_eq!(result.rows[0].get_int("total").unwrap(), 2);
        },
    }

    crate::execute_test! {
        test_name: test_query_no_matching_rows,
        cmd: |dir| QueryCmd {
            file: write_query_file(dir, "none.json", r#"{
                "columns": ["routes.id"],
                "tables": ["routes"],
                "filter": { "expression": "routes.grade > ?", "params": [9] }
            }"#),
        },
        assertions: |result| {
            assert!(result.rows.is_empty());
        },
    }

    crate::execute_not_connected_test! {
        cmd: |dir| QueryCmd {
            file: write_query_file(dir, "routes.json", r#"{
                "columns": ["routes.id"],
                "tables": ["routes"]
            }"#),
        },
    }

    #[rstest]
    fn test_query_missing_file() {
        use crate::commands::Execute;
        let (tmp, mut db) = crate::test_utils::climbing_db();
        let cmd = QueryCmd {
            file: tmp.path().join("absent.json"),
        };
        let err = cmd.execute(&mut db).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[rstest]
    fn test_query_unknown_table_fails() {
        use crate::commands::Execute;
        let (tmp, mut db) = crate::test_utils::climbing_db();
        let cmd = QueryCmd {
            file: write_query_file(tmp.path(), "bad.json", r#"{
                "columns": ["huts.id"],
                "tables": ["huts"]
            }"#),
        };
        let err = cmd.execute(&mut db).unwrap_err();
        assert!(err.to_string().contains("Query failed"));
        assert!(db.is_connected());
    }
}
