use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use promscan_sources::{parse_document_from_file, DocumentKind, ScanSettings, SourceDocument};
use std::path::PathBuf;

use crate::ui;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Dashboard,
    Monitor,
    Slo,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Dashboard => DocumentKind::Dashboard,
            KindArg::Monitor => DocumentKind::Monitor,
            KindArg::Slo => DocumentKind::Slo,
        }
    }
}

pub async fn execute(file: PathBuf, kind: DocumentKind) -> Result<()> {
    println!("{}", "=== Validating Document ===".bold().cyan());
    println!("File: {}", file.display());

    match parse_document_from_file(&file, kind).await {
        Ok(document) => {
            println!("\n{}", "✓ Document decoded".green().bold());
            println!("  Location: {}", document.location());
            describe(&document);
            Ok(())
        }
        Err(e) => {
            ui::print_error("Document failed to decode");
            println!("\nError: {}", e);
            Err(e)
        }
    }
}

fn describe(document: &SourceDocument) {
    let settings = ScanSettings::default();

    match document {
        SourceDocument::Dashboard(dashboard) => {
            let variables = dashboard.variables();
            println!("  Variables: {}", variables.len());
            for variable in variables.iter() {
                println!("    {} = {}", variable.name, variable.value);
            }

            let targets = dashboard.targets();
            println!("  Targets: {}", targets.len());
            for target in &targets {
                let verdict = if target.is_ignored(&settings) {
                    "skipped".yellow()
                } else {
                    "query".green()
                };
                println!("    [{}] {}: {}", verdict, target.source, target.expr);
            }
        }
        SourceDocument::Monitor(monitor) => {
            println!("  Expression: {}", monitor.expression);
        }
        SourceDocument::Slo(slo) => {
            println!("  Literal metrics: {}", slo.sli_metrics.len());
            for metric in &slo.sli_metrics {
                let labels: Vec<&str> =
                    metric.filters.iter().map(|f| f.key.as_str()).collect();
                println!("    {} [{}]", metric.metric_name, labels.join(", "));
            }
        }
    }
}
