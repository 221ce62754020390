//! Executive summary derivation.
//!
//! `build_summary` is a pure function of the loaded artifact set and the
//! run context. Metadata fields are always populated; each metric group is
//! populated if and only if its prerequisite artifacts are present. No
//! numeric defaults are ever fabricated for a missing group — the whole
//! pipeline degrades to a metadata-only summary when zero artifacts exist.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::artifact::{AlertStatus, ArtifactSet, ForecastModel};
use crate::config::ReportConfig;

/// Display format for the generation timestamp.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Run-scoped metadata, sampled once per invocation.
///
/// Both output files and both timestamp-qualified file names derive from
/// the single `generated_at` instant captured here.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub generated_at: DateTime<Local>,
    pub analysis_period: String,
    pub assets: Vec<String>,
}

impl RunContext {
    /// Capture the wall clock now, taking the fixed window and asset
    /// universe from the config.
    pub fn now(config: &ReportConfig) -> Self {
        Self::at(Local::now(), config)
    }

    /// Build a context at an explicit instant (tests, replays).
    pub fn at(generated_at: DateTime<Local>, config: &ReportConfig) -> Self {
        Self {
            generated_at,
            analysis_period: config.analysis_period.clone(),
            assets: config.assets.clone(),
        }
    }

    /// Timestamp fragment used to qualify output file names.
    pub fn file_stamp(&self) -> String {
        self.generated_at.format("%Y%m%d_%H%M%S").to_string()
    }
}

/// Flat, run-scoped aggregate consumed by both renderers.
///
/// Every optional field is set exactly when its source artifact was
/// present. Percentage-scaled fields (`*_pct`) are multiplied by 100 here
/// and nowhere else, so the document and the export cannot diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub generation_date: String,
    pub analysis_period: String,
    pub assets_analyzed: Vec<String>,

    pub best_model: Option<ForecastModel>,
    pub best_model_rmse: Option<f64>,

    pub recommended_allocation: Option<BTreeMap<String, f64>>,
    pub expected_return_pct: Option<f64>,
    pub expected_volatility_pct: Option<f64>,
    pub sharpe_ratio: Option<f64>,

    pub current_var_95_pct: Option<f64>,
    pub risk_status: Option<AlertStatus>,
}

/// Derive the executive summary from the artifact set.
pub fn build_summary(artifacts: &ArtifactSet, ctx: &RunContext) -> ExecutiveSummary {
    let mut summary = ExecutiveSummary {
        generation_date: ctx.generated_at.format(TIMESTAMP_FORMAT).to_string(),
        analysis_period: ctx.analysis_period.clone(),
        assets_analyzed: ctx.assets.clone(),
        best_model: None,
        best_model_rmse: None,
        recommended_allocation: None,
        expected_return_pct: None,
        expected_volatility_pct: None,
        sharpe_ratio: None,
        current_var_95_pct: None,
        risk_status: None,
    };

    if let (Some(arima), Some(lstm)) = (&artifacts.arima, &artifacts.lstm) {
        let arima_rmse = arima.forecast_accuracy.rmse;
        let lstm_rmse = lstm.forecast_accuracy.rmse;
        // Strict less-than: an exact RMSE tie selects ARIMA.
        summary.best_model = Some(if lstm_rmse < arima_rmse {
            ForecastModel::Lstm
        } else {
            ForecastModel::Arima
        });
        summary.best_model_rmse = Some(arima_rmse.min(lstm_rmse));
    }

    if let Some(portfolio) = &artifacts.portfolio {
        summary.recommended_allocation = Some(portfolio.weights.clone());
        summary.expected_return_pct = Some(portfolio.expected_return * 100.0);
        summary.expected_volatility_pct = Some(portfolio.expected_volatility * 100.0);
        summary.sharpe_ratio = Some(portfolio.sharpe_ratio);
    }

    if let Some(risk) = &artifacts.risk {
        summary.current_var_95_pct = Some(risk.current_risk_metrics.var_95 * 100.0);
        summary.risk_status = Some(risk.alert_status);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{
        ForecastAccuracy, ForecastArtifact, PortfolioArtifact, RegimeAnalysis, RiskArtifact,
        RiskMetrics,
    };
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn ctx() -> RunContext {
        let instant = Local.with_ymd_and_hms(2025, 8, 1, 9, 30, 0).unwrap();
        RunContext::at(instant, &ReportConfig::default())
    }

    fn forecast(rmse: f64) -> ForecastArtifact {
        ForecastArtifact {
            forecast_accuracy: ForecastAccuracy {
                rmse,
                mae: rmse * 0.8,
                directional_accuracy: 55.0,
            },
        }
    }

    fn portfolio() -> PortfolioArtifact {
        PortfolioArtifact {
            weights: [
                ("TSLA".to_string(), 0.3),
                ("BND".to_string(), 0.5),
                ("SPY".to_string(), 0.2),
            ]
            .into_iter()
            .collect(),
            expected_return: 0.10,
            expected_volatility: 0.15,
            sharpe_ratio: 1.2,
        }
    }

    fn risk() -> RiskArtifact {
        RiskArtifact {
            current_risk_metrics: RiskMetrics {
                var_95: -0.02,
                var_99: -0.03,
                portfolio_volatility: 0.18,
            },
            regime_analysis: RegimeAnalysis {
                current_regime: "Low Volatility".into(),
            },
            alert_status: AlertStatus::Normal,
            recommendations: vec!["Maintain current allocation".into()],
        }
    }

    #[test]
    fn empty_set_yields_metadata_only() {
        let summary = build_summary(&ArtifactSet::default(), &ctx());

        assert_eq!(summary.generation_date, "2025-08-01 09:30:00");
        assert_eq!(summary.analysis_period, "2015-07-01 to 2025-07-31");
        assert_eq!(summary.assets_analyzed, vec!["TSLA", "BND", "SPY"]);
        assert!(summary.best_model.is_none());
        assert!(summary.best_model_rmse.is_none());
        assert!(summary.recommended_allocation.is_none());
        assert!(summary.expected_return_pct.is_none());
        assert!(summary.expected_volatility_pct.is_none());
        assert!(summary.sharpe_ratio.is_none());
        assert!(summary.current_var_95_pct.is_none());
        assert!(summary.risk_status.is_none());
    }

    #[test]
    fn lower_rmse_wins_model_selection() {
        let set = ArtifactSet {
            arima: Some(forecast(0.05)),
            lstm: Some(forecast(0.03)),
            ..Default::default()
        };
        let summary = build_summary(&set, &ctx());
        assert_eq!(summary.best_model, Some(ForecastModel::Lstm));
        assert_eq!(summary.best_model_rmse, Some(0.03));
    }

    #[test]
    fn equal_rmse_selects_arima() {
        let set = ArtifactSet {
            arima: Some(forecast(0.04)),
            lstm: Some(forecast(0.04)),
            ..Default::default()
        };
        let summary = build_summary(&set, &ctx());
        assert_eq!(summary.best_model, Some(ForecastModel::Arima));
    }

    #[test]
    fn single_forecast_yields_no_best_model() {
        let set = ArtifactSet {
            lstm: Some(forecast(0.03)),
            ..Default::default()
        };
        let summary = build_summary(&set, &ctx());
        assert!(summary.best_model.is_none());
        assert!(summary.best_model_rmse.is_none());
    }

    #[test]
    fn portfolio_metrics_scaled_once() {
        let set = ArtifactSet {
            portfolio: Some(portfolio()),
            ..Default::default()
        };
        let summary = build_summary(&set, &ctx());
        assert_eq!(summary.expected_return_pct, Some(10.0));
        assert_eq!(summary.expected_volatility_pct, Some(15.0));
        assert_eq!(summary.sharpe_ratio, Some(1.2));
        assert_eq!(summary.recommended_allocation.unwrap().len(), 3);
    }

    #[test]
    fn risk_metrics_scaled_once() {
        let set = ArtifactSet {
            risk: Some(risk()),
            ..Default::default()
        };
        let summary = build_summary(&set, &ctx());
        assert_eq!(summary.current_var_95_pct, Some(-2.0));
        assert_eq!(summary.risk_status, Some(AlertStatus::Normal));
    }

    proptest! {
        // Percentage fields are exactly source * 100 for any finite inputs.
        #[test]
        fn scaling_is_exactly_times_100(ret in -0.5f64..0.5, vol in 0.0f64..0.5) {
            let mut p = portfolio();
            p.expected_return = ret;
            p.expected_volatility = vol;
            let set = ArtifactSet { portfolio: Some(p), ..Default::default() };
            let summary = build_summary(&set, &ctx());
            prop_assert_eq!(summary.expected_return_pct, Some(ret * 100.0));
            prop_assert_eq!(summary.expected_volatility_pct, Some(vol * 100.0));
        }

        // Every subset of present artifacts populates exactly its gated fields.
        #[test]
        fn gating_matches_presence(
            has_arima in any::<bool>(),
            has_lstm in any::<bool>(),
            has_portfolio in any::<bool>(),
            has_risk in any::<bool>(),
        ) {
            let set = ArtifactSet {
                arima: has_arima.then(|| forecast(0.05)),
                lstm: has_lstm.then(|| forecast(0.03)),
                portfolio: has_portfolio.then(portfolio),
                risk: has_risk.then(risk),
            };
            let summary = build_summary(&set, &ctx());

            prop_assert_eq!(summary.best_model.is_some(), has_arima && has_lstm);
            prop_assert_eq!(summary.best_model_rmse.is_some(), has_arima && has_lstm);
            prop_assert_eq!(summary.recommended_allocation.is_some(), has_portfolio);
            prop_assert_eq!(summary.expected_return_pct.is_some(), has_portfolio);
            prop_assert_eq!(summary.expected_volatility_pct.is_some(), has_portfolio);
            prop_assert_eq!(summary.sharpe_ratio.is_some(), has_portfolio);
            prop_assert_eq!(summary.current_var_95_pct.is_some(), has_risk);
            prop_assert_eq!(summary.risk_status.is_some(), has_risk);
        }
    }
}
