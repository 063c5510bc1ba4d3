use promscan_core::variables::{Variable, VariableTable};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Panel types whose targets never carry queries.
pub const DEFAULT_IGNORED_PANEL_TYPES: &[&str] =
    &["text", "logs", "news", "canvas", "dashlist", "table"];

/// Scan settings, optionally loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    #[serde(default = "default_ignored_panel_types")]
    pub ignored_panel_types: Vec<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            ignored_panel_types: default_ignored_panel_types(),
        }
    }
}

fn default_ignored_panel_types() -> Vec<String> {
    DEFAULT_IGNORED_PANEL_TYPES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ScanSettings {
    pub async fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn is_ignored_category(&self, category: &str) -> bool {
        self.ignored_panel_types.iter().any(|t| t == category)
    }
}

/// The document kinds a backup can contain, dispatched once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Dashboard,
    Monitor,
    Slo,
}

/// A decoded source document.
#[derive(Debug, Clone)]
pub enum SourceDocument {
    Dashboard(DashboardFile),
    Monitor(MonitorFile),
    Slo(SloFile),
}

impl SourceDocument {
    pub fn kind(&self) -> DocumentKind {
        match self {
            SourceDocument::Dashboard(_) => DocumentKind::Dashboard,
            SourceDocument::Monitor(_) => DocumentKind::Monitor,
            SourceDocument::Slo(_) => DocumentKind::Slo,
        }
    }

    /// Stable identifier used for provenance and diagnostics.
    pub fn location(&self) -> String {
        match self {
            SourceDocument::Dashboard(dashboard) => dashboard.location(),
            SourceDocument::Monitor(monitor) => monitor.location(),
            SourceDocument::Slo(slo) => slo.location(),
        }
    }
}

/// One raw query expression plus the category tag used for eligibility.
/// Monitors carry no category and are always eligible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTarget {
    pub source: String,
    pub category: Option<String>,
    pub expr: String,
}

impl QueryTarget {
    /// Targets with a denylisted category or an empty expression are
    /// skipped without ever reaching the normalizer.
    pub fn is_ignored(&self, settings: &ScanSettings) -> bool {
        if self.expr.trim().is_empty() {
            return true;
        }
        match &self.category {
            Some(category) => settings.is_ignored_category(category),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardFile {
    #[serde(default)]
    pub dashboard: Dashboard,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub templating: Templating,
    #[serde(default)]
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Templating {
    #[serde(default)]
    pub list: Vec<Template>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub current: TemplateCurrent,
    #[serde(default)]
    pub query: String,
    #[serde(default, rename = "allValue")]
    pub all_value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateCurrent {
    #[serde(default)]
    pub value: TemplateValues,
}

/// `current.value` appears in the wild as either a single scalar or a list
/// of values; a scalar is treated as a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateValues(pub Vec<String>);

impl<'de> Deserialize<'de> for TemplateValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ScalarOrList {
            Scalar(String),
            List(Vec<String>),
        }

        match ScalarOrList::deserialize(deserializer)? {
            ScalarOrList::Scalar(value) => Ok(Self(vec![value])),
            ScalarOrList::List(values) => Ok(Self(values)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Panel {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, rename = "type")]
    pub panel_type: String,
    #[serde(default)]
    pub targets: Vec<PanelTarget>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelTarget {
    #[serde(default)]
    pub expr: String,
}

impl DashboardFile {
    pub fn location(&self) -> String {
        format!("dashboard/{}", self.dashboard.uid)
    }

    /// Build the document's variable table in declaration order.
    pub fn variables(&self) -> VariableTable {
        self.dashboard
            .templating
            .list
            .iter()
            .map(|template| {
                Variable::resolve(
                    &template.name,
                    &template.current.value.0,
                    &template.query,
                    &template.all_value,
                )
            })
            .collect()
    }

    /// Flatten panels into query targets tagged with their panel type.
    pub fn targets(&self) -> Vec<QueryTarget> {
        let location = self.location();
        self.dashboard
            .panels
            .iter()
            .flat_map(|panel| {
                let source = format!("{} panel {}", location, panel.id.unwrap_or_default());
                panel.targets.iter().map(move |target| QueryTarget {
                    source: source.clone(),
                    category: Some(panel.panel_type.clone()),
                    expr: target.expr.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorFile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub expression: String,
}

impl MonitorFile {
    pub fn location(&self) -> String {
        format!("monitor/{}", self.id)
    }

    pub fn target(&self) -> QueryTarget {
        QueryTarget {
            source: self.location(),
            category: None,
            expr: self.expression.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SloFile {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "sliMetrics")]
    pub sli_metrics: Vec<SliMetric>,
}

impl SloFile {
    pub fn location(&self) -> String {
        format!("slo/{}", self.id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SliMetric {
    #[serde(default, rename = "metricName")]
    pub metric_name: String,
    #[serde(default)]
    pub filters: Vec<SliFilter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SliFilter {
    pub key: String,
}
