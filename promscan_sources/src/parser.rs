use crate::config::{DocumentKind, SourceDocument};
use anyhow::Result;
use std::path::Path;

pub async fn parse_document_from_file(
    path: impl AsRef<Path>,
    kind: DocumentKind,
) -> Result<SourceDocument> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;

    let extension = path.extension().and_then(|s| s.to_str());

    match extension {
        Some("json") => parse_json(&contents, kind),
        Some("yaml") | Some("yml") => parse_yaml(&contents, kind),
        _ => Err(anyhow::anyhow!(
            "Unsupported file format. Use .json, .yaml, or .yml"
        )),
    }
}

pub fn parse_document_from_str(
    content: &str,
    kind: DocumentKind,
    format: &str,
) -> Result<SourceDocument> {
    match format.to_lowercase().as_str() {
        "json" => parse_json(content, kind),
        "yaml" | "yml" => parse_yaml(content, kind),
        _ => Err(anyhow::anyhow!("Unsupported format: {}", format)),
    }
}

fn parse_json(content: &str, kind: DocumentKind) -> Result<SourceDocument> {
    let document = match kind {
        DocumentKind::Dashboard => SourceDocument::Dashboard(serde_json::from_str(content)?),
        DocumentKind::Monitor => SourceDocument::Monitor(serde_json::from_str(content)?),
        DocumentKind::Slo => SourceDocument::Slo(serde_json::from_str(content)?),
    };
    Ok(document)
}

fn parse_yaml(content: &str, kind: DocumentKind) -> Result<SourceDocument> {
    let document = match kind {
        DocumentKind::Dashboard => SourceDocument::Dashboard(serde_yaml::from_str(content)?),
        DocumentKind::Monitor => SourceDocument::Monitor(serde_yaml::from_str(content)?),
        DocumentKind::Slo => SourceDocument::Slo(serde_yaml::from_str(content)?),
    };
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dashboard_json() {
        let json = r#"
{
  "dashboard": {
    "uid": "demo",
    "templating": {"list": [{"name": "ns", "current": {"value": ["a"]}, "query": "", "allValue": ""}]},
    "panels": [{"id": 1, "type": "timeseries", "targets": [{"expr": "up"}]}]
  }
}
"#;

        let document = parse_document_from_str(json, DocumentKind::Dashboard, "json").unwrap();
        assert_eq!(document.location(), "dashboard/demo");
        match document {
            SourceDocument::Dashboard(dashboard) => {
                assert_eq!(dashboard.variables().len(), 1);
                assert_eq!(dashboard.targets().len(), 1);
            }
            _ => panic!("expected a dashboard"),
        }
    }

    #[test]
    fn test_parse_monitor_yaml() {
        let yaml = r#"
id: "42"
expression: "up == 0"
"#;

        let document = parse_document_from_str(yaml, DocumentKind::Monitor, "yaml").unwrap();
        assert_eq!(document.location(), "monitor/42");
    }

    #[test]
    fn test_parse_slo_json() {
        let json = r#"
{
  "id": "checkout",
  "sliMetrics": [
    {"metricName": "checkout_latency_seconds", "filters": [{"key": "region"}]}
  ]
}
"#;

        let document = parse_document_from_str(json, DocumentKind::Slo, "json").unwrap();
        match document {
            SourceDocument::Slo(slo) => {
                assert_eq!(slo.sli_metrics.len(), 1);
                assert_eq!(slo.sli_metrics[0].filters[0].key, "region");
            }
            _ => panic!("expected an SLO"),
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = parse_document_from_str("{}", DocumentKind::Monitor, "toml").unwrap_err();
        assert!(err.to_string().contains("Unsupported format"));
    }
}
