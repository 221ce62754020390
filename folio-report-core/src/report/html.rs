//! Document renderer — a single self-contained HTML report.
//!
//! Sections render in a fixed order; each conditional section is omitted
//! entirely when its backing data is absent, never rendered empty. The
//! numeric formats here are fixed per field (RMSE/MAE six decimals,
//! percentages one or two decimals, Sharpe three) and are covered by
//! golden assertions in the integration suite.

use crate::artifact::{AlertStatus, ArtifactSet, ForecastModel};
use crate::summary::ExecutiveSummary;

/// Embedded stylesheet; the document references no external assets.
const STYLESHEET: &str = "\
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    line-height: 1.6;
    margin: 0;
    padding: 20px;
    background-color: #f5f5f5;
}
.container {
    max-width: 1200px;
    margin: 0 auto;
    background-color: white;
    padding: 30px;
    border-radius: 10px;
    box-shadow: 0 0 20px rgba(0,0,0,0.1);
}
.header {
    text-align: center;
    border-bottom: 3px solid #2c3e50;
    padding-bottom: 20px;
    margin-bottom: 30px;
}
.header h1 { color: #2c3e50; margin-bottom: 10px; }
.section {
    margin: 30px 0;
    padding: 20px;
    border-left: 4px solid #3498db;
    background-color: #f8f9fa;
}
.section h2 { color: #2c3e50; margin-top: 0; }
.metrics-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
    gap: 20px;
    margin: 20px 0;
}
.metric-card {
    background: white;
    padding: 20px;
    border-radius: 8px;
    box-shadow: 0 2px 10px rgba(0,0,0,0.1);
    text-align: center;
}
.metric-value { font-size: 2em; font-weight: bold; color: #3498db; }
.metric-label { color: #7f8c8d; margin-top: 5px; }
.allocation-table {
    width: 100%;
    border-collapse: collapse;
    margin: 20px 0;
}
.allocation-table th,
.allocation-table td {
    border: 1px solid #ddd;
    padding: 12px;
    text-align: left;
}
.allocation-table th { background-color: #3498db; color: white; }
.status-good { color: #27ae60; }
.status-warning { color: #f39c12; }
.status-critical { color: #e74c3c; }
.footer {
    margin-top: 40px;
    padding-top: 20px;
    border-top: 1px solid #ddd;
    text-align: center;
    color: #7f8c8d;
}
";

/// CSS class for the three-way alert severity mapping.
fn status_class(status: AlertStatus) -> &'static str {
    match status {
        AlertStatus::Normal => "status-good",
        AlertStatus::Warning => "status-warning",
        AlertStatus::Critical => "status-critical",
    }
}

/// Static descriptive caption for known asset symbols. Unknown symbols
/// get an empty caption cell, not an error.
fn asset_caption(symbol: &str) -> Option<&'static str> {
    match symbol {
        "TSLA" => Some("Tesla Inc. - Growth equity component"),
        "BND" => Some("Vanguard Total Bond Market ETF - Fixed income component"),
        "SPY" => Some("SPDR S&amp;P 500 ETF - Broad market exposure"),
        _ => None,
    }
}

/// Escape free-text artifact fields before embedding in markup.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn push_metric_card(doc: &mut String, value: &str, label: &str) {
    doc.push_str(&format!(
        "<div class=\"metric-card\">\n\
         <div class=\"metric-value\">{value}</div>\n\
         <div class=\"metric-label\">{label}</div>\n\
         </div>\n"
    ));
}

fn push_head(doc: &mut String) {
    doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    doc.push_str("<title>Portfolio Optimization Analysis Report</title>\n");
    doc.push_str("<meta charset=\"UTF-8\">\n");
    doc.push_str("<style>\n");
    doc.push_str(STYLESHEET);
    doc.push_str("</style>\n</head>\n");
}

fn push_header(doc: &mut String, summary: &ExecutiveSummary) {
    doc.push_str("<div class=\"header\">\n");
    doc.push_str("<h1>Portfolio Optimization Analysis Report</h1>\n");
    doc.push_str("<p>Time Series Forecasting &amp; Modern Portfolio Theory</p>\n");
    doc.push_str(&format!(
        "<p><strong>Generated:</strong> {}</p>\n",
        summary.generation_date
    ));
    doc.push_str(&format!(
        "<p><strong>Analysis Period:</strong> {}</p>\n",
        escape_html(&summary.analysis_period)
    ));
    doc.push_str("</div>\n");
}

fn push_executive_summary(doc: &mut String, summary: &ExecutiveSummary) {
    doc.push_str("<div class=\"section\">\n<h2>Executive Summary</h2>\n");
    doc.push_str(
        "<p>This report presents a comprehensive analysis of portfolio optimization \
         using advanced time series forecasting models and Modern Portfolio Theory. \
         The analysis covers three key assets: Tesla (TSLA), Vanguard Total Bond \
         Market ETF (BND), and S&amp;P 500 ETF (SPY).</p>\n",
    );
    doc.push_str("<div class=\"metrics-grid\">\n");

    // Each card is independently gated on its own summary field.
    if let Some(best) = summary.best_model {
        push_metric_card(doc, &best.to_string(), "Best Forecasting Model");
    }
    if let Some(ret) = summary.expected_return_pct {
        push_metric_card(doc, &format!("{ret:.1}%"), "Expected Annual Return");
    }
    if let Some(sharpe) = summary.sharpe_ratio {
        push_metric_card(doc, &format!("{sharpe:.3}"), "Sharpe Ratio");
    }
    if let Some(var) = summary.current_var_95_pct {
        push_metric_card(doc, &format!("{var:.2}%"), "Daily VaR (95%)");
    }

    doc.push_str("</div>\n</div>\n");
}

fn push_allocation(doc: &mut String, summary: &ExecutiveSummary) {
    let Some(allocation) = &summary.recommended_allocation else {
        return;
    };

    doc.push_str("<div class=\"section\">\n<h2>Recommended Portfolio Allocation</h2>\n");
    doc.push_str("<table class=\"allocation-table\">\n<thead>\n<tr>\n");
    doc.push_str("<th>Asset</th>\n<th>Allocation</th>\n<th>Description</th>\n");
    doc.push_str("</tr>\n</thead>\n<tbody>\n");
    for (asset, weight) in allocation {
        doc.push_str(&format!(
            "<tr>\n<td><strong>{}</strong></td>\n<td>{:.1}%</td>\n<td>{}</td>\n</tr>\n",
            escape_html(asset),
            weight * 100.0,
            asset_caption(asset).unwrap_or(""),
        ));
    }
    doc.push_str("</tbody>\n</table>\n</div>\n");
}

fn push_model_performance(doc: &mut String, artifacts: &ArtifactSet, summary: &ExecutiveSummary) {
    if !artifacts.has_model_comparison() {
        return;
    }

    doc.push_str("<div class=\"section\">\n<h2>Model Performance Summary</h2>\n");
    doc.push_str("<table class=\"allocation-table\">\n<thead>\n<tr>\n");
    doc.push_str(
        "<th>Model</th>\n<th>RMSE</th>\n<th>MAE</th>\n\
         <th>Directional Accuracy</th>\n<th>Status</th>\n",
    );
    doc.push_str("</tr>\n</thead>\n<tbody>\n");

    for model in [ForecastModel::Arima, ForecastModel::Lstm] {
        let Some(forecast) = artifacts.forecast(model) else {
            continue;
        };
        let acc = &forecast.forecast_accuracy;
        // "Best" marking follows the builder's selection, never a local
        // recomputation, so table and summary card cannot disagree.
        let (status_css, status_text) = if summary.best_model == Some(model) {
            ("status-good", "Best")
        } else {
            ("status-warning", "Good")
        };
        doc.push_str(&format!(
            "<tr>\n<td>{model}</td>\n<td>{:.6}</td>\n<td>{:.6}</td>\n\
             <td>{:.1}%</td>\n<td><span class=\"{status_css}\">{status_text}</span></td>\n</tr>\n",
            acc.rmse, acc.mae, acc.directional_accuracy,
        ));
    }

    doc.push_str("</tbody>\n</table>\n</div>\n");
}

fn push_risk(doc: &mut String, artifacts: &ArtifactSet) {
    let Some(risk) = &artifacts.risk else {
        return;
    };

    doc.push_str("<div class=\"section\">\n<h2>Risk Management Status</h2>\n");
    doc.push_str(&format!(
        "<p><strong>Current Risk Level:</strong> <span class=\"{}\">{}</span></p>\n",
        status_class(risk.alert_status),
        risk.alert_status,
    ));

    let m = &risk.current_risk_metrics;
    doc.push_str("<div class=\"metrics-grid\">\n");
    push_metric_card(doc, &format!("{:.2}%", m.var_95 * 100.0), "Daily VaR (95%)");
    push_metric_card(doc, &format!("{:.2}%", m.var_99 * 100.0), "Daily VaR (99%)");
    push_metric_card(
        doc,
        &format!("{:.2}%", m.portfolio_volatility * 100.0),
        "Annual Volatility",
    );
    push_metric_card(
        doc,
        &escape_html(&risk.regime_analysis.current_regime),
        "Market Regime",
    );
    doc.push_str("</div>\n");

    doc.push_str("<h3>Risk Management Recommendations</h3>\n<ul>\n");
    for recommendation in &risk.recommendations {
        doc.push_str(&format!("<li>{}</li>\n", escape_html(recommendation)));
    }
    doc.push_str("</ul>\n</div>\n");
}

fn push_guidance(doc: &mut String, summary: &ExecutiveSummary) {
    doc.push_str("<div class=\"section\">\n<h2>Key Findings &amp; Recommendations</h2>\n");

    doc.push_str("<h3>Model Selection</h3>\n<ul>\n");
    match summary.best_model {
        Some(best) => doc.push_str(&format!(
            "<li>{best} model selected based on superior forecasting accuracy</li>\n"
        )),
        None => doc.push_str("<li>Model comparison data not available</li>\n"),
    }
    doc.push_str("<li>Regular model retraining recommended to maintain performance</li>\n");
    doc.push_str("<li>Ensemble methods may provide additional robustness</li>\n</ul>\n");

    doc.push_str("<h3>Portfolio Construction</h3>\n<ul>\n");
    doc.push_str("<li>Optimal allocation balances growth potential with risk management</li>\n");
    doc.push_str("<li>Diversification across asset classes reduces portfolio volatility</li>\n");
    doc.push_str("<li>Monthly rebalancing recommended to maintain target allocation</li>\n</ul>\n");

    doc.push_str("<h3>Risk Management</h3>\n<ul>\n");
    doc.push_str("<li>Implement dynamic position sizing based on market volatility</li>\n");
    doc.push_str("<li>Regular stress testing to assess portfolio resilience</li>\n");
    doc.push_str("<li>Monitor regime changes for tactical allocation adjustments</li>\n</ul>\n");
    doc.push_str("</div>\n");

    doc.push_str("<div class=\"section\">\n<h2>Implementation Guidelines</h2>\n");

    doc.push_str("<h3>Immediate Actions</h3>\n<ul>\n");
    doc.push_str("<li>Implement recommended portfolio allocation</li>\n");
    doc.push_str("<li>Set up automated rebalancing system</li>\n");
    doc.push_str("<li>Establish risk monitoring dashboard</li>\n</ul>\n");

    doc.push_str("<h3>Ongoing Monitoring</h3>\n<ul>\n");
    doc.push_str("<li>Daily: Risk metrics and portfolio performance</li>\n");
    doc.push_str("<li>Weekly: Model performance and market regime analysis</li>\n");
    doc.push_str("<li>Monthly: Portfolio rebalancing and stress testing</li>\n");
    doc.push_str("<li>Quarterly: Model retraining and strategy review</li>\n</ul>\n");

    doc.push_str("<h3>Risk Controls</h3>\n<ul>\n");
    doc.push_str("<li>Maximum daily loss limit: 3% of portfolio value</li>\n");
    doc.push_str("<li>Position size limits: No single asset &gt; 50% allocation</li>\n");
    doc.push_str("<li>Volatility threshold: Reduce positions if portfolio vol &gt; 25%</li>\n</ul>\n");
    doc.push_str("</div>\n");
}

fn push_footer(doc: &mut String) {
    doc.push_str("<div class=\"footer\">\n");
    doc.push_str(
        "<p><strong>Disclaimer:</strong> This analysis is for educational and research \
         purposes only. Past performance does not guarantee future results. Please \
         consult with qualified financial professionals before making investment \
         decisions.</p>\n",
    );
    doc.push_str("<p>Report generated by Portfolio Optimization System v1.0</p>\n");
    doc.push_str("</div>\n");
}

/// Render the complete document for one run.
pub fn render_document(artifacts: &ArtifactSet, summary: &ExecutiveSummary) -> String {
    let mut doc = String::with_capacity(16 * 1024);

    push_head(&mut doc);
    doc.push_str("<body>\n<div class=\"container\">\n");
    push_header(&mut doc, summary);
    push_executive_summary(&mut doc, summary);
    push_allocation(&mut doc, summary);
    push_model_performance(&mut doc, artifacts, summary);
    push_risk(&mut doc, artifacts);
    push_guidance(&mut doc, summary);
    push_footer(&mut doc);
    doc.push_str("</div>\n</body>\n</html>\n");

    doc
}
