//! Run orchestration — the high-level entry point used by the CLI.
//!
//! One linear pass per invocation: load artifacts, build the executive
//! summary, render both outputs, publish. All state flows forward by
//! value; nothing persists across runs. Only output-write failures (or an
//! internal rendering failure) propagate as errors — artifact problems
//! were already absorbed by the loader.

use anyhow::Result;
use tracing::info;

use crate::config::ReportConfig;
use crate::loader::load_artifacts;
use crate::publish::{publish, PublishedPaths};
use crate::report::{build_export, export_json, render_document, ExportSummary};
use crate::summary::{build_summary, ExecutiveSummary, RunContext};

/// Everything a caller needs to summarize a completed run.
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub summary: ExecutiveSummary,
    pub export: ExportSummary,
    pub paths: PublishedPaths,
}

/// Execute the full report pipeline for one run.
pub fn run_report(config: &ReportConfig) -> Result<ReportRun> {
    info!("starting report generation");
    let ctx = RunContext::now(config);

    let artifacts = load_artifacts(&config.data_dir);
    let summary = build_summary(&artifacts, &ctx);

    let document = render_document(&artifacts, &summary);
    let export = build_export(&artifacts, &summary);
    let json = export_json(&export)?;

    let paths = publish(&config.output_dir, &document, &json, &ctx.file_stamp())?;
    info!(
        "report published: {} and {}",
        paths.document.display(),
        paths.export.display()
    );

    Ok(ReportRun {
        summary,
        export,
        paths,
    })
}
