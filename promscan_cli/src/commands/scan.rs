use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use promscan_metrics::exporters::{JsonExporter, MarkdownExporter, TextExporter};
use promscan_metrics::{MetricRegistry, ScanReport, Tally};
use promscan_sources::{parse_document_from_file, DocumentKind, DocumentRunner, ScanSettings};
use std::path::PathBuf;
use tracing::info;

use crate::ui;

pub async fn execute(
    backup_dir: PathBuf,
    provenance: bool,
    output_json: Option<PathBuf>,
    output_markdown: Option<PathBuf>,
    settings: Option<PathBuf>,
) -> Result<()> {
    let settings = match settings {
        Some(path) => ScanSettings::from_file(&path)
            .await
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => ScanSettings::default(),
    };

    let batches = [
        (
            DocumentKind::Dashboard,
            list_files(backup_dir.join("dashboards")).await?,
        ),
        (
            DocumentKind::Monitor,
            list_files(backup_dir.join("monitors")).await?,
        ),
        (DocumentKind::Slo, list_files(backup_dir.join("slos")).await?),
    ];

    let total: u64 = batches.iter().map(|(_, files)| files.len() as u64).sum();
    if total == 0 {
        ui::print_warning("No source documents found");
        return Ok(());
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({msg})")
            .unwrap()
            .progress_chars("=>-"),
    );

    let runner = DocumentRunner::new(settings);
    let mut registry = MetricRegistry::new();
    let mut tally = Tally::new();
    let mut diagnostics = Vec::new();

    for (kind, files) in batches {
        for file in files {
            if let Some(name) = file.file_name().and_then(|n| n.to_str()) {
                pb.set_message(name.to_string());
            }

            let document = parse_document_from_file(&file, kind)
                .await
                .with_context(|| format!("failed to load {}", file.display()))?;

            let result = runner.run(&document, &mut registry);
            tally.add(result.tally);
            diagnostics.extend(result.diagnostics);
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }

    let report = ScanReport::new(registry, tally);

    print!("{}", TextExporter::format(&report, provenance));
    ui::print_tally(&report.tally);

    if let Some(json_path) = output_json {
        info!("writing JSON report to {}", json_path.display());
        JsonExporter::export(&report, &json_path).await?;
    }

    if let Some(md_path) = output_markdown {
        info!("writing Markdown report to {}", md_path.display());
        MarkdownExporter::export(&report, &md_path).await?;
    }

    Ok(())
}

async fn list_files(directory: PathBuf) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(&directory)
        .await
        .with_context(|| format!("failed to read {}", directory.display()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }
    // deterministic processing order
    files.sort();
    Ok(files)
}
