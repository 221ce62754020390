//! Export renderer — the machine-readable summary record.
//!
//! Mirrors the document's conditional inclusion rules as nested JSON
//! groups. Numeric values stay in their native scale: return, volatility,
//! and VaR are fractional here, pre-multiplied nowhere. `metadata` is
//! always present, `model_performance` carries one entry per present
//! forecast artifact, and the portfolio/risk groups are omitted (not
//! emitted empty) when their source artifact is absent.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::artifact::{AlertStatus, ArtifactSet, ForecastAccuracy, ForecastModel};
use crate::summary::ExecutiveSummary;

/// Run metadata group, sourced from the executive summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub generation_date: String,
    pub analysis_period: String,
    pub assets_analyzed: Vec<String>,
}

/// Portfolio group: weights plus raw fractional headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub weights: BTreeMap<String, f64>,
    pub expected_return: f64,
    pub expected_volatility: f64,
    pub sharpe_ratio: f64,
}

/// Risk group: current metrics with the alert status merged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetricsExport {
    pub var_95: f64,
    pub var_99: f64,
    pub portfolio_volatility: f64,
    pub alert_status: AlertStatus,
}

/// The complete machine-readable record for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub metadata: ExportMetadata,

    /// One entry per present forecast artifact, keyed by model name.
    /// Always serialized, possibly empty.
    pub model_performance: BTreeMap<String, ForecastAccuracy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_metrics: Option<PortfolioMetrics>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_metrics: Option<RiskMetricsExport>,
}

/// Assemble the export record from the artifact set and summary.
pub fn build_export(artifacts: &ArtifactSet, summary: &ExecutiveSummary) -> ExportSummary {
    let mut model_performance = BTreeMap::new();
    for model in [ForecastModel::Arima, ForecastModel::Lstm] {
        if let Some(forecast) = artifacts.forecast(model) {
            model_performance.insert(
                model.export_key().to_string(),
                forecast.forecast_accuracy.clone(),
            );
        }
    }

    let portfolio_metrics = artifacts.portfolio.as_ref().map(|p| PortfolioMetrics {
        weights: p.weights.clone(),
        expected_return: p.expected_return,
        expected_volatility: p.expected_volatility,
        sharpe_ratio: p.sharpe_ratio,
    });

    let risk_metrics = artifacts.risk.as_ref().map(|r| RiskMetricsExport {
        var_95: r.current_risk_metrics.var_95,
        var_99: r.current_risk_metrics.var_99,
        portfolio_volatility: r.current_risk_metrics.portfolio_volatility,
        alert_status: r.alert_status,
    });

    ExportSummary {
        metadata: ExportMetadata {
            generation_date: summary.generation_date.clone(),
            analysis_period: summary.analysis_period.clone(),
            assets_analyzed: summary.assets_analyzed.clone(),
        },
        model_performance,
        portfolio_metrics,
        risk_metrics,
    }
}

/// Serialize the export record to pretty JSON.
pub fn export_json(export: &ExportSummary) -> Result<String> {
    serde_json::to_string_pretty(export).context("failed to serialize export summary to JSON")
}
