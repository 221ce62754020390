//! Typed records for the four externally-produced analysis artifacts.
//!
//! Each upstream subsystem (ARIMA forecaster, LSTM forecaster, portfolio
//! optimizer, risk manager) deposits one serialized record in a fixed slot.
//! The records are read-only inputs; absence of a slot is a legitimate
//! state, not an error. Validation happens once at load time so downstream
//! consumers only ever see "present with valid schema" or "absent".

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance for portfolio weights summing to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-4;

/// Schema or invariant violations detected at load time.
///
/// A failed validation degrades the slot to absent; it never aborts a run.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("field '{field}' is not finite")]
    NotFinite { field: &'static str },

    #[error("field '{field}' is negative ({value})")]
    Negative { field: &'static str, value: f64 },

    #[error("directional_accuracy {value} outside [0, 100]")]
    AccuracyOutOfRange { value: f64 },

    #[error("weight for '{asset}' is negative ({value})")]
    NegativeWeight { asset: String, value: f64 },

    #[error("weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f64 },

    #[error("var_99 magnitude {var_99} below var_95 magnitude {var_95}")]
    VarOrdering { var_95: f64, var_99: f64 },
}

/// Load-time validation hook implemented by every artifact record.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

// ─── Forecast artifacts ─────────────────────────────────────────────

/// The two forecasting subsystems feeding the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ForecastModel {
    Arima,
    Lstm,
}

impl ForecastModel {
    /// Key used for this model in the machine-readable export.
    pub fn export_key(self) -> &'static str {
        match self {
            ForecastModel::Arima => "arima",
            ForecastModel::Lstm => "lstm",
        }
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastModel::Arima => write!(f, "ARIMA"),
            ForecastModel::Lstm => write!(f, "LSTM"),
        }
    }
}

/// Out-of-sample accuracy metrics for one forecasting model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastAccuracy {
    pub rmse: f64,
    pub mae: f64,
    /// Percent of test-set moves whose direction was predicted, in [0, 100].
    pub directional_accuracy: f64,
}

/// Forecast result slot as deposited by a forecasting subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastArtifact {
    pub forecast_accuracy: ForecastAccuracy,
}

impl Validate for ForecastArtifact {
    fn validate(&self) -> Result<(), ValidationError> {
        let acc = &self.forecast_accuracy;
        require_non_negative("rmse", acc.rmse)?;
        require_non_negative("mae", acc.mae)?;
        require_finite("directional_accuracy", acc.directional_accuracy)?;
        if !(0.0..=100.0).contains(&acc.directional_accuracy) {
            return Err(ValidationError::AccuracyOutOfRange {
                value: acc.directional_accuracy,
            });
        }
        Ok(())
    }
}

// ─── Portfolio artifact ─────────────────────────────────────────────

/// Optimizer output: target allocation plus headline portfolio metrics.
///
/// `expected_return` and `expected_volatility` are fractional (0.10 = 10%);
/// percentage scaling happens once, in the summary builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioArtifact {
    /// Target weight per asset symbol. BTreeMap keeps table rows in a
    /// deterministic order across runs.
    pub weights: BTreeMap<String, f64>,
    pub expected_return: f64,
    pub expected_volatility: f64,
    pub sharpe_ratio: f64,
}

impl Validate for PortfolioArtifact {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut sum = 0.0;
        for (asset, &weight) in &self.weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ValidationError::NegativeWeight {
                    asset: asset.clone(),
                    value: weight,
                });
            }
            sum += weight;
        }
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::WeightSum { sum });
        }
        require_finite("expected_return", self.expected_return)?;
        require_finite("expected_volatility", self.expected_volatility)?;
        require_finite("sharpe_ratio", self.sharpe_ratio)?;
        Ok(())
    }
}

// ─── Risk artifact ──────────────────────────────────────────────────

/// Three-way risk severity classification from the risk manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertStatus {
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertStatus::Normal => write!(f, "Normal"),
            AlertStatus::Warning => write!(f, "Warning"),
            AlertStatus::Critical => write!(f, "Critical"),
        }
    }
}

/// Point-in-time risk measurements, all fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub var_95: f64,
    pub var_99: f64,
    pub portfolio_volatility: f64,
}

/// Market regime classification from the risk manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeAnalysis {
    pub current_regime: String,
}

/// Risk management slot: current metrics, regime, alert level, and
/// free-text recommendations in priority order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskArtifact {
    pub current_risk_metrics: RiskMetrics,
    pub regime_analysis: RegimeAnalysis,
    pub alert_status: AlertStatus,
    pub recommendations: Vec<String>,
}

impl Validate for RiskArtifact {
    fn validate(&self) -> Result<(), ValidationError> {
        let m = &self.current_risk_metrics;
        require_finite("var_95", m.var_95)?;
        require_finite("var_99", m.var_99)?;
        require_finite("portfolio_volatility", m.portfolio_volatility)?;
        // 99% VaR must be at least as extreme as 95% VaR.
        if m.var_99.abs() < m.var_95.abs() {
            return Err(ValidationError::VarOrdering {
                var_95: m.var_95,
                var_99: m.var_99,
            });
        }
        Ok(())
    }
}

// ─── Artifact set ───────────────────────────────────────────────────

/// The loaded artifact slots for one run. Every slot is independently
/// present or absent; the presence predicates here are the single source
/// of truth for section gating in both renderers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactSet {
    pub arima: Option<ForecastArtifact>,
    pub lstm: Option<ForecastArtifact>,
    pub portfolio: Option<PortfolioArtifact>,
    pub risk: Option<RiskArtifact>,
}

impl ArtifactSet {
    pub fn forecast(&self, model: ForecastModel) -> Option<&ForecastArtifact> {
        match model {
            ForecastModel::Arima => self.arima.as_ref(),
            ForecastModel::Lstm => self.lstm.as_ref(),
        }
    }

    /// Model comparison requires both forecast slots.
    pub fn has_model_comparison(&self) -> bool {
        self.arima.is_some() && self.lstm.is_some()
    }

    pub fn has_portfolio(&self) -> bool {
        self.portfolio.is_some()
    }

    pub fn has_risk(&self) -> bool {
        self.risk.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.arima.is_none()
            && self.lstm.is_none()
            && self.portfolio.is_none()
            && self.risk.is_none()
    }
}
