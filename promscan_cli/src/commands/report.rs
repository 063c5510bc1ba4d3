use anyhow::Result;
use promscan_metrics::exporters::{JsonExporter, MarkdownExporter, PrometheusExporter, TextExporter};
use promscan_metrics::ScanReport;
use std::path::PathBuf;

use crate::ui;

pub async fn execute(report_file: PathBuf, format: String, output: Option<PathBuf>) -> Result<()> {
    let contents = tokio::fs::read_to_string(&report_file).await?;
    let report: ScanReport = serde_json::from_str(&contents)?;

    match format.as_str() {
        "cli" => {
            ui::print_header("Metric Usage Inventory");
            println!("Generated: {}", report.generated_at.to_rfc3339());
            println!("Metrics: {}\n", report.registry.metric_count());
            print!("{}", TextExporter::format(&report, false));
            ui::print_tally(&report.tally);
        }
        "json" => {
            let json = JsonExporter::to_string(&report)?;
            write_or_print(output, json).await?;
        }
        "markdown" => {
            let markdown = MarkdownExporter::format(&report);
            write_or_print(output, markdown).await?;
        }
        "prometheus" => {
            let text = PrometheusExporter::format(&report);
            write_or_print(output, text).await?;
        }
        _ => {
            anyhow::bail!("Unknown format: {}", format);
        }
    }

    Ok(())
}

async fn write_or_print(output: Option<PathBuf>, contents: String) -> Result<()> {
    match output {
        Some(path) => tokio::fs::write(path, contents).await?,
        None => println!("{}", contents),
    }
    Ok(())
}
