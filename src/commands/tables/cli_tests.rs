//! CLI parsing tests for tables command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;

    #[rstest]
    fn test_defaults() {
        let args = Args::try_parse_from(["query_layer", "tables"]).unwrap();
        match args.command {
            crate::commands::Command::Tables(cmd) => assert_eq!(cmd.like, None),
            _ => panic!("Expected Tables command"),
        }
    }

    crate::cli_option_test! {
        command: "tables",
        variant: Tables,
        test_name: test_with_like,
        args: ["--like", "route%"],
        field: like,
        expected: Some("route%".to_string()),
    }

    crate::cli_error_test! {
        command: "tables",
        test_name: test_like_requires_value,
        args: ["--like"],
    }
}
