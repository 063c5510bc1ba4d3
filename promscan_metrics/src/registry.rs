use promscan_core::extractor::SelectorGroup;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One discovered metric occurrence, attributed to the resource it was
/// found in. Kept in call order for provenance reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricUsage {
    pub source: String,
    pub metric: String,
    pub labels: Vec<String>,
}

/// The accumulated metric name to label-name inventory of a whole run.
/// Label sets are unions with exact-string dedup; iteration order is
/// deterministic within a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricRegistry {
    entries: BTreeMap<String, BTreeSet<String>>,
    usages: Vec<MetricUsage>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one metric occurrence. Re-adding an already-known
    /// (metric, label) pair leaves the label set unchanged.
    pub fn add<I, S>(&mut self, source: &str, metric: &str, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        self.entries
            .entry(metric.to_string())
            .or_default()
            .extend(labels.iter().cloned());
        self.usages.push(MetricUsage {
            source: source.to_string(),
            metric: metric.to_string(),
            labels,
        });
    }

    /// Derive a (metric, labels) pair from every selector group via the
    /// `__name__` convention and record each.
    pub fn add_groups(&mut self, source: &str, groups: &[SelectorGroup]) {
        for group in groups {
            self.add(source, group.metric_name(), group.label_names());
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(name, labels)| (name.as_str(), labels))
    }

    pub fn labels(&self, metric: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(metric)
    }

    pub fn usages(&self) -> &[MetricUsage] {
        &self.usages
    }

    pub fn metric_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
