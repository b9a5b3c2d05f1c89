//! Output formatting for compile command results.

use super::execute::CompileResult;
use crate::output::Outputable;

impl Outputable for CompileResult {
    fn to_table(&self) -> String {
        let mut lines = vec![self.sql.clone()];
        if !self.params.is_empty() {
            lines.push(String::new());
            lines.push("Params:".to_string());
            for (i, param) in self.params.iter().enumerate() {
                lines.push(format!("  {}: {} ({})", i + 1, param, param.cell_type()));
            }
        }
        lines.join("\n")
    }
}
