use crate::registry::MetricRegistry;
use crate::tally::Tally;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one scan produced, in exportable form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub registry: MetricRegistry,
    pub tally: Tally,
}

impl ScanReport {
    pub fn new(registry: MetricRegistry, tally: Tally) -> Self {
        Self {
            generated_at: Utc::now(),
            registry,
            tally,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_round_trips_through_json() {
        let mut registry = MetricRegistry::new();
        registry.add("dashboard/demo", "up", ["ns"]);
        let tally = Tally {
            skipped: 1,
            succeeded: 1,
            failed: 0,
        };

        let report = ScanReport::new(registry, tally);
        let json = serde_json::to_string(&report).unwrap();
        let decoded: ScanReport = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.tally, report.tally);
        assert!(decoded.registry.labels("up").unwrap().contains("ns"));
        assert_eq!(decoded.registry.usages().len(), 1);
    }
}
