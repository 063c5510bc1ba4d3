use crate::report::ScanReport;

pub struct TextExporter;

impl TextExporter {
    /// One line per distinct metric: the metric name followed by its label
    /// names, space separated. With provenance, one line per recorded
    /// occurrence: source, metric, labels.
    pub fn format(report: &ScanReport, provenance: bool) -> String {
        let mut out = String::new();

        if provenance {
            for usage in report.registry.usages() {
                out.push_str(&usage.source);
                out.push(' ');
                out.push_str(&usage.metric);
                for label in &usage.labels {
                    out.push(' ');
                    out.push_str(label);
                }
                out.push('\n');
            }
        } else {
            for (metric, labels) in report.registry.entries() {
                out.push_str(metric);
                for label in labels {
                    out.push(' ');
                    out.push_str(label);
                }
                out.push('\n');
            }
        }

        out
    }
}
