use crate::report::ScanReport;
use promscan_core::Result;
use std::path::Path;

pub struct MarkdownExporter;

impl MarkdownExporter {
    pub async fn export(report: &ScanReport, path: impl AsRef<Path>) -> Result<()> {
        let markdown = Self::format(report);
        tokio::fs::write(path, markdown).await?;
        Ok(())
    }

    pub fn format(report: &ScanReport) -> String {
        let metrics = report
            .registry
            .entries()
            .map(|(metric, labels)| {
                let labels = labels
                    .iter()
                    .map(|l| format!("`{l}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("| `{metric}` | {labels} |")
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"# Metric Usage Inventory

Generated: {}

## Outcomes

| Outcome | Count |
|---------|-------|
| Skipped | {} |
| Succeeded | {} |
| Failed | {} |

## Metrics ({})

| Metric | Labels |
|--------|--------|
{}
"#,
            report.generated_at.to_rfc3339(),
            report.tally.skipped,
            report.tally.succeeded,
            report.tally.failed,
            report.registry.metric_count(),
            metrics,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MetricRegistry;
    use crate::tally::Tally;

    #[test]
    fn test_format_renders_metric_table() {
        let mut registry = MetricRegistry::new();
        registry.add("dashboard/demo", "up", ["ns", "job"]);
        let report = ScanReport::new(
            registry,
            Tally {
                skipped: 0,
                succeeded: 1,
                failed: 0,
            },
        );

        let markdown = MarkdownExporter::format(&report);
        assert!(markdown.contains("| `up` | `job`, `ns` |"));
        assert!(markdown.contains("| Succeeded | 1 |"));
    }
}
