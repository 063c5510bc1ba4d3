use crate::config::{QueryTarget, ScanSettings, SloFile, SourceDocument};
use promscan_core::variables::VariableTable;
use promscan_core::{extract_selectors, normalize};
use promscan_metrics::{MetricRegistry, Tally};
use std::fmt;
use tracing::{debug, warn};

/// Where a failed target came from and what the parser said about it. Both
/// the original and the normalized expression are kept so a reader can tell
/// whether the fault lies in normalization or in the query itself.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub source: String,
    pub message: String,
    pub original: String,
    pub normalized: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.source)?;
        writeln!(f, "{}", self.message)?;
        writeln!(f, "Original:\t{}", self.original)?;
        writeln!(f, "Normalized:\t{}", self.normalized)
    }
}

/// Outcome of processing one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentResult {
    pub tally: Tally,
    pub diagnostics: Vec<Diagnostic>,
}

/// Drives every query target of a document through the skip / normalize /
/// extract state machine and folds the results into the registry.
pub struct DocumentRunner {
    settings: ScanSettings,
}

impl DocumentRunner {
    pub fn new(settings: ScanSettings) -> Self {
        Self { settings }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScanSettings::default())
    }

    /// Process one decoded document into the registry. A parse failure on
    /// one target never aborts the rest.
    pub fn run(&self, document: &SourceDocument, registry: &mut MetricRegistry) -> DocumentResult {
        match document {
            SourceDocument::Dashboard(dashboard) => {
                self.run_targets(dashboard.targets(), &dashboard.variables(), registry)
            }
            SourceDocument::Monitor(monitor) => {
                // only global variables apply to monitors
                self.run_targets(vec![monitor.target()], &VariableTable::new(), registry)
            }
            SourceDocument::Slo(slo) => Self::run_literals(slo, registry),
        }
    }

    fn run_targets(
        &self,
        targets: Vec<QueryTarget>,
        variables: &VariableTable,
        registry: &mut MetricRegistry,
    ) -> DocumentResult {
        let mut result = DocumentResult::default();

        for target in targets {
            if target.is_ignored(&self.settings) {
                debug!("skipping {}", target.source);
                result.tally.skipped += 1;
                continue;
            }

            let normalized = normalize(&target.expr, variables);
            match extract_selectors(&normalized) {
                Ok(groups) => {
                    registry.add_groups(&target.source, &groups);
                    result.tally.succeeded += 1;
                }
                Err(err) => {
                    warn!("extraction failed for {}: {}", target.source, err);
                    result.tally.failed += 1;
                    result.diagnostics.push(Diagnostic {
                        source: target.source.clone(),
                        message: err.to_string(),
                        original: target.expr.clone(),
                        normalized,
                    });
                }
            }
        }

        result
    }

    /// SLO documents assert their metrics and label names directly; no
    /// normalization or extraction is involved.
    fn run_literals(slo: &SloFile, registry: &mut MetricRegistry) -> DocumentResult {
        let mut result = DocumentResult::default();
        let location = slo.location();

        for metric in &slo.sli_metrics {
            let labels: Vec<String> = metric.filters.iter().map(|f| f.key.clone()).collect();
            registry.add(&location, &metric.metric_name, labels);
            result.tally.succeeded += 1;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document_from_str;
    use crate::DocumentKind;

    fn run(document: &SourceDocument) -> (MetricRegistry, DocumentResult) {
        let runner = DocumentRunner::with_defaults();
        let mut registry = MetricRegistry::new();
        let result = runner.run(document, &mut registry);
        (registry, result)
    }

    #[test]
    fn test_dashboard_targets_normalize_with_the_first_current_value() {
        let document = parse_document_from_str(
            r#"{
                "dashboard": {
                    "uid": "demo",
                    "templating": {
                        "list": [{"name": "ns", "current": {"value": ["a", "b"]}, "query": "", "allValue": ""}]
                    },
                    "panels": [
                        {"id": 1, "type": "timeseries", "targets": [{"expr": "up{ns=\"$ns\"}"}]}
                    ]
                }
            }"#,
            DocumentKind::Dashboard,
            "json",
        )
        .unwrap();

        let (registry, result) = run(&document);

        assert_eq!(result.tally.succeeded, 1);
        assert!(registry.labels("up").unwrap().contains("ns"));
        let usage = &registry.usages()[0];
        assert_eq!(usage.source, "dashboard/demo panel 1");
    }

    #[test]
    fn test_denylisted_and_empty_targets_are_skipped() {
        let document = parse_document_from_str(
            r#"{
                "dashboard": {
                    "uid": "demo",
                    "panels": [
                        {"id": 1, "type": "text", "targets": [{"expr": "up"}]},
                        {"id": 2, "type": "timeseries", "targets": [{"expr": "  "}]},
                        {"id": 3, "type": "timeseries", "targets": [{"expr": "up"}]}
                    ]
                }
            }"#,
            DocumentKind::Dashboard,
            "json",
        )
        .unwrap();

        let (registry, result) = run(&document);

        assert_eq!(result.tally.skipped, 2);
        assert_eq!(result.tally.succeeded, 1);
        assert_eq!(registry.metric_count(), 1);
    }

    #[test]
    fn test_failed_extraction_is_isolated_and_diagnosed() {
        let document = parse_document_from_str(
            r#"{
                "dashboard": {
                    "uid": "demo",
                    "panels": [
                        {"id": 1, "type": "timeseries", "targets": [{"expr": "sum(rate("}]},
                        {"id": 2, "type": "timeseries", "targets": [{"expr": "up"}]}
                    ]
                }
            }"#,
            DocumentKind::Dashboard,
            "json",
        )
        .unwrap();

        let (registry, result) = run(&document);

        assert_eq!(result.tally.failed, 1);
        assert_eq!(result.tally.succeeded, 1);
        assert_eq!(result.diagnostics.len(), 1);

        let diagnostic = &result.diagnostics[0];
        assert_eq!(diagnostic.source, "dashboard/demo panel 1");
        assert_eq!(diagnostic.original, "sum(rate(");
        assert_eq!(diagnostic.normalized, "sum(rate(");
        assert!(!diagnostic.message.is_empty());

        // the failed target contributed nothing
        assert!(registry.labels("up").is_some());
        assert_eq!(registry.metric_count(), 1);
    }

    #[test]
    fn test_monitors_use_only_global_variables() {
        let document = parse_document_from_str(
            r#"{"id": "42", "expression": "sum(rate(http_requests_total{job=\"api\"}[$__rate_interval]))"}"#,
            DocumentKind::Monitor,
            "json",
        )
        .unwrap();

        let (registry, result) = run(&document);

        assert_eq!(result.tally.succeeded, 1);
        assert!(registry.labels("http_requests_total").unwrap().contains("job"));
        assert_eq!(registry.usages()[0].source, "monitor/42");
    }

    #[test]
    fn test_empty_monitor_expression_is_skipped() {
        let document =
            parse_document_from_str(r#"{"id": "42", "expression": ""}"#, DocumentKind::Monitor, "json")
                .unwrap();

        let (registry, result) = run(&document);

        assert_eq!(result.tally.skipped, 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_slo_metrics_are_recorded_literally() {
        let document = parse_document_from_str(
            r#"{
                "id": "checkout",
                "sliMetrics": [
                    {"metricName": "checkout_latency_seconds", "filters": [{"key": "region"}, {"key": "tier"}]},
                    {"metricName": "checkout_errors_total", "filters": []}
                ]
            }"#,
            DocumentKind::Slo,
            "json",
        )
        .unwrap();

        let (registry, result) = run(&document);

        assert_eq!(result.tally.succeeded, 2);
        assert!(registry.labels("checkout_latency_seconds").unwrap().contains("tier"));
        assert!(registry.labels("checkout_errors_total").unwrap().is_empty());
        assert_eq!(registry.usages()[0].source, "slo/checkout");
    }

    #[test]
    fn test_tallies_merge_across_documents() {
        let runner = DocumentRunner::with_defaults();
        let mut registry = MetricRegistry::new();
        let mut tally = Tally::new();

        let monitor = parse_document_from_str(
            r#"{"id": "1", "expression": "up"}"#,
            DocumentKind::Monitor,
            "json",
        )
        .unwrap();
        let empty = parse_document_from_str(
            r#"{"id": "2", "expression": ""}"#,
            DocumentKind::Monitor,
            "json",
        )
        .unwrap();

        tally.add(runner.run(&monitor, &mut registry).tally);
        tally.add(runner.run(&empty, &mut registry).tally);

        assert_eq!(tally.succeeded, 1);
        assert_eq!(tally.skipped, 1);
        assert_eq!(tally.total(), 2);
    }
}
