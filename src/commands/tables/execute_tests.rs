//! Execute tests for tables command.

#[cfg(test)]
mod tests {
    use super::super::TablesCmd;
    use rstest::rstest;

    crate::execute_test! {
        test_name: test_tables_lists_user_tables,
        cmd: |_dir| TablesCmd { like: None },
        assertions: |result| {
            assert_eq!(result.tables, vec!["routes".to_string(), "summits".to_string()]);
            assert_eq!(result.pattern, None);
        },
    }

    crate::execute_test! {
        test_name: test_tables_like_pattern,
        cmd: |_dir| TablesCmd { like: Some("sum%".to_string()) },
        assertions: |result| {
            assert_eq!(result.tables, vec!["summits".to_string()]);
            assert_eq!(result.pattern.as_deref(), Some("sum%"));
        },
    }

    crate::execute_test! {
        test_name: test_tables_like_no_match,
        cmd: |_dir| TablesCmd { like: Some("huts%".to_string()) },
        assertions: |result| {
            assert!(result.tables.is_empty());
        },
    }

    crate::execute_not_connected_test! {
        cmd: |_dir| TablesCmd { like: None },
    }

    #[rstest]
    fn test_tables_empty_database() {
        use crate::commands::Execute;
        let mut db = crate::db::ConnectionBoundary::sqlite();
        db.connect(":memory:", false).unwrap();
        let result = TablesCmd { like: None }.execute(&mut db).unwrap();
        assert!(result.tables.is_empty());
    }
}
