//! folio-report-core — aggregation and rendering of offline analysis results.
//!
//! The pipeline merges up to four independently-produced analysis
//! artifacts (ARIMA/LSTM forecast accuracy, portfolio optimization,
//! risk management) into one executive summary, then renders that
//! summary into two coupled outputs: a self-contained HTML document and
//! a machine-readable JSON export. Any subset of artifacts may be
//! absent; a run with none still publishes a metadata-only report.
//!
//! Data flows strictly loader → summary builder → renderers → publisher.

pub mod artifact;
pub mod config;
pub mod loader;
pub mod pipeline;
pub mod publish;
pub mod report;
pub mod summary;

pub use artifact::{
    AlertStatus, ArtifactSet, ForecastAccuracy, ForecastArtifact, ForecastModel,
    PortfolioArtifact, RegimeAnalysis, RiskArtifact, RiskMetrics, ValidationError,
};
pub use config::{ConfigError, ReportConfig};
pub use loader::{load_artifacts, probe_slot, ArtifactKind, SlotStatus};
pub use pipeline::{run_report, ReportRun};
pub use publish::{publish, PublishedPaths};
pub use report::{build_export, export_json, render_document, ExportSummary};
pub use summary::{build_summary, ExecutiveSummary, RunContext};
