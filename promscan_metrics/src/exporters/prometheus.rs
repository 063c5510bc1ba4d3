use crate::report::ScanReport;

pub struct PrometheusExporter;

impl PrometheusExporter {
    /// Render the run counters in Prometheus exposition format, so a CI job
    /// can push them to a gateway.
    pub fn format(report: &ScanReport) -> String {
        format!(
            r#"# HELP promscan_targets_skipped_total Query targets skipped as ineligible
# TYPE promscan_targets_skipped_total counter
promscan_targets_skipped_total {}

# HELP promscan_targets_succeeded_total Query targets extracted successfully
# TYPE promscan_targets_succeeded_total counter
promscan_targets_succeeded_total {}

# HELP promscan_targets_failed_total Query targets that failed extraction
# TYPE promscan_targets_failed_total counter
promscan_targets_failed_total {}

# HELP promscan_metrics_discovered Distinct metric names in the inventory
# TYPE promscan_metrics_discovered gauge
promscan_metrics_discovered {}
"#,
            report.tally.skipped,
            report.tally.succeeded,
            report.tally.failed,
            report.registry.metric_count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MetricRegistry;
    use crate::tally::Tally;

    #[test]
    fn test_format_exposes_all_counters() {
        let mut registry = MetricRegistry::new();
        registry.add("slo/checkout", "checkout_latency_seconds", ["region"]);
        let report = ScanReport::new(
            registry,
            Tally {
                skipped: 2,
                succeeded: 3,
                failed: 1,
            },
        );

        let text = PrometheusExporter::format(&report);
        assert!(text.contains("promscan_targets_skipped_total 2"));
        assert!(text.contains("promscan_targets_succeeded_total 3"));
        assert!(text.contains("promscan_targets_failed_total 1"));
        assert!(text.contains("promscan_metrics_discovered 1"));
    }
}
