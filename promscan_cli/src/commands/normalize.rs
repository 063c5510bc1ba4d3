use anyhow::Result;
use colored::Colorize;
use promscan_core::variables::VariableTable;
use promscan_core::{extract_selectors, normalize};
use promscan_sources::{parse_document_from_file, DocumentKind, SourceDocument};
use std::path::PathBuf;

use crate::ui;

pub async fn execute(expression: String, dashboard: Option<PathBuf>) -> Result<()> {
    let mut variables = VariableTable::new();
    if let Some(path) = dashboard {
        if let SourceDocument::Dashboard(dashboard) =
            parse_document_from_file(&path, DocumentKind::Dashboard).await?
        {
            variables = dashboard.variables();
        }
    }

    ui::print_header("Normalize Expression");
    println!("Variables:  {}", variables.len());
    println!("Original:   {}", expression);

    let normalized = normalize(&expression, &variables);
    println!("Normalized: {}", normalized.green());

    match extract_selectors(&normalized) {
        Ok(groups) => {
            println!("\nSelector groups: {}", groups.len());
            for group in &groups {
                let name = match group.metric_name() {
                    "" => "(no metric name)".to_string(),
                    name => name.to_string(),
                };
                let labels = group.label_names().join(" ");
                println!("  {} {}", name.cyan(), labels);
            }
            Ok(())
        }
        Err(e) => {
            ui::print_error("Normalized expression does not parse");
            println!("\nError: {}", e);
            Err(e.into())
        }
    }
}
