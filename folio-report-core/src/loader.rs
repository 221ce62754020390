//! Artifact slot loading.
//!
//! Each of the four analysis slots loads independently. A slot that is
//! missing, unreadable, malformed, or schema-invalid degrades to absent
//! with one log line; it never aborts the run. Missing is the expected
//! steady state before an upstream analysis has run, so it is logged
//! distinctly from corrupt data.

use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

use crate::artifact::{
    ArtifactSet, ForecastArtifact, PortfolioArtifact, RiskArtifact, Validate, ValidationError,
};

/// The four fixed artifact slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    ForecastArima,
    ForecastLstm,
    Portfolio,
    Risk,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::ForecastArima,
        ArtifactKind::ForecastLstm,
        ArtifactKind::Portfolio,
        ArtifactKind::Risk,
    ];

    /// Fixed file name for this slot under the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::ForecastArima => "arima_results.json",
            ArtifactKind::ForecastLstm => "lstm_results.json",
            ArtifactKind::Portfolio => "portfolio_recommendation.json",
            ArtifactKind::Risk => "risk_management_summary.json",
        }
    }

    /// Human-readable slot name for logs and the status table.
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::ForecastArima => "ARIMA forecast",
            ArtifactKind::ForecastLstm => "LSTM forecast",
            ArtifactKind::Portfolio => "portfolio optimization",
            ArtifactKind::Risk => "risk management",
        }
    }
}

/// Why a slot failed to load. Fully absorbed inside the loader; callers
/// only ever observe present-or-absent.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("not found")]
    Missing,

    #[error("unreadable: {0}")]
    Unreadable(io::Error),

    #[error("malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid: {0}")]
    Invalid(#[from] ValidationError),
}

/// Observable state of one slot, used by the CLI status command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    Present,
    Missing,
    /// Present on disk but unreadable, malformed, or schema-invalid.
    Unusable(String),
}

fn read_slot<T>(data_dir: &Path, kind: ArtifactKind) -> Result<T, SlotError>
where
    T: DeserializeOwned + Validate,
{
    let path = data_dir.join(kind.file_name());
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(SlotError::Missing),
        Err(e) => return Err(SlotError::Unreadable(e)),
    };
    let artifact: T = serde_json::from_str(&content)?;
    artifact.validate()?;
    Ok(artifact)
}

fn load_slot<T>(data_dir: &Path, kind: ArtifactKind) -> Option<T>
where
    T: DeserializeOwned + Validate,
{
    match read_slot(data_dir, kind) {
        Ok(artifact) => {
            info!("{} results loaded", kind.label());
            Some(artifact)
        }
        Err(SlotError::Missing) => {
            warn!("{} results not found", kind.label());
            None
        }
        Err(e) => {
            warn!("{} results unusable ({e}); continuing without them", kind.label());
            None
        }
    }
}

/// Load all four artifact slots from `data_dir`.
///
/// Always succeeds: every failure mode degrades that slot to absent.
pub fn load_artifacts(data_dir: &Path) -> ArtifactSet {
    ArtifactSet {
        arima: load_slot::<ForecastArtifact>(data_dir, ArtifactKind::ForecastArima),
        lstm: load_slot::<ForecastArtifact>(data_dir, ArtifactKind::ForecastLstm),
        portfolio: load_slot::<PortfolioArtifact>(data_dir, ArtifactKind::Portfolio),
        risk: load_slot::<RiskArtifact>(data_dir, ArtifactKind::Risk),
    }
}

/// Probe one slot without loading it into a run.
pub fn probe_slot(data_dir: &Path, kind: ArtifactKind) -> SlotStatus {
    let result = match kind {
        ArtifactKind::ForecastArima | ArtifactKind::ForecastLstm => {
            read_slot::<ForecastArtifact>(data_dir, kind).map(|_| ())
        }
        ArtifactKind::Portfolio => read_slot::<PortfolioArtifact>(data_dir, kind).map(|_| ()),
        ArtifactKind::Risk => read_slot::<RiskArtifact>(data_dir, kind).map(|_| ()),
    };
    match result {
        Ok(()) => SlotStatus::Present,
        Err(SlotError::Missing) => SlotStatus::Missing,
        Err(e) => SlotStatus::Unusable(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_slot(dir: &Path, kind: ArtifactKind, content: &str) {
        std::fs::write(dir.join(kind.file_name()), content).unwrap();
    }

    const ARIMA_JSON: &str = r#"{
        "forecast_accuracy": { "rmse": 0.05, "mae": 0.04, "directional_accuracy": 55.0 }
    }"#;

    const PORTFOLIO_JSON: &str = r#"{
        "weights": { "TSLA": 0.3, "BND": 0.5, "SPY": 0.2 },
        "expected_return": 0.10,
        "expected_volatility": 0.15,
        "sharpe_ratio": 1.2
    }"#;

    const RISK_JSON: &str = r#"{
        "current_risk_metrics": { "var_95": -0.02, "var_99": -0.03, "portfolio_volatility": 0.18 },
        "regime_analysis": { "current_regime": "Low Volatility" },
        "alert_status": "Normal",
        "recommendations": ["Maintain current allocation"]
    }"#;

    #[test]
    fn empty_directory_loads_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = load_artifacts(dir.path());
        assert!(set.is_empty());
    }

    #[test]
    fn loads_present_slots_only() {
        let dir = tempfile::tempdir().unwrap();
        write_slot(dir.path(), ArtifactKind::ForecastArima, ARIMA_JSON);
        write_slot(dir.path(), ArtifactKind::Portfolio, PORTFOLIO_JSON);

        let set = load_artifacts(dir.path());
        assert!(set.arima.is_some());
        assert!(set.lstm.is_none());
        assert!(set.portfolio.is_some());
        assert!(set.risk.is_none());

        let p = set.portfolio.unwrap();
        assert_eq!(p.weights.len(), 3);
        assert!((p.expected_return - 0.10).abs() < 1e-12);
    }

    #[test]
    fn malformed_slot_degrades_to_absent() {
        let dir = tempfile::tempdir().unwrap();
        write_slot(dir.path(), ArtifactKind::Risk, "{ not json at all");
        write_slot(dir.path(), ArtifactKind::ForecastArima, ARIMA_JSON);

        let set = load_artifacts(dir.path());
        assert!(set.risk.is_none());
        assert!(set.arima.is_some());
    }

    #[test]
    fn schema_invalid_slot_degrades_to_absent() {
        let dir = tempfile::tempdir().unwrap();
        // var_99 less extreme than var_95
        let bad = r#"{
            "current_risk_metrics": { "var_95": -0.05, "var_99": -0.02, "portfolio_volatility": 0.18 },
            "regime_analysis": { "current_regime": "High Volatility" },
            "alert_status": "Warning",
            "recommendations": []
        }"#;
        write_slot(dir.path(), ArtifactKind::Risk, bad);

        let set = load_artifacts(dir.path());
        assert!(set.risk.is_none());
    }

    #[test]
    fn risk_slot_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        write_slot(dir.path(), ArtifactKind::Risk, RISK_JSON);

        let set = load_artifacts(dir.path());
        let risk = set.risk.unwrap();
        assert_eq!(risk.alert_status, crate::artifact::AlertStatus::Normal);
        assert_eq!(risk.regime_analysis.current_regime, "Low Volatility");
        assert_eq!(risk.recommendations.len(), 1);
    }

    #[test]
    fn probe_distinguishes_missing_from_unusable() {
        let dir = tempfile::tempdir().unwrap();
        write_slot(dir.path(), ArtifactKind::ForecastLstm, "not json");

        assert_eq!(
            probe_slot(dir.path(), ArtifactKind::ForecastArima),
            SlotStatus::Missing
        );
        assert!(matches!(
            probe_slot(dir.path(), ArtifactKind::ForecastLstm),
            SlotStatus::Unusable(_)
        ));

        write_slot(dir.path(), ArtifactKind::ForecastArima, ARIMA_JSON);
        assert_eq!(
            probe_slot(dir.path(), ArtifactKind::ForecastArima),
            SlotStatus::Present
        );
    }
}
