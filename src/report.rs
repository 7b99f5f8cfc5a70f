//! Presentation of an analysis report.
//!
//! Renders an [`AnalysisReport`] as aligned plain text for the terminal or
//! as JSON for programmatic use. This is the only place where numbers are
//! rounded and where absent values are turned into human-readable reasons;
//! the core just reports absence.

use std::fmt::Write as _;

use crate::types::AnalysisReport;
use crate::valuation::ValueDriver;

// ============================================================================
// Report Format
// ============================================================================

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Aligned plain text (human-readable)
    Text,
    /// JSON (machine-readable)
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a report in the requested format.
pub fn render(report: &AnalysisReport, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => to_text(report),
        ReportFormat::Json => to_json(report),
    }
}

fn to_json(report: &AnalysisReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

fn to_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let facts = &report.facts;

    match &facts.company_name {
        Some(name) => {
            let _ = writeln!(out, "{} ({})", name, facts.symbol);
        }
        None => {
            let _ = writeln!(out, "{}", facts.symbol);
        }
    }

    let _ = writeln!(out, "Current Price:  {}", fmt_value(facts.current_price));
    let _ = writeln!(out, "Stock P/E:      {}", fmt_value(facts.current_multiple));
    let _ = writeln!(out, "Latest EPS:     {}", fmt_value(facts.latest_eps));
    let _ = writeln!(out, "Model:          {}", driver_label(&report.assumptions.driver));
    out.push('\n');

    match report.valuation.intrinsic_multiple {
        Some(intrinsic) => {
            let _ = writeln!(out, "Intrinsic P/E:  {:.2}", intrinsic);
            match report.valuation.deviation_percent {
                Some(deviation) => {
                    let verdict = if deviation >= 0.0 {
                        "overvalued"
                    } else {
                        "undervalued"
                    };
                    let _ = writeln!(out, "Deviation:      {:+.2}% ({})", deviation, verdict);
                }
                None => {
                    let _ = writeln!(
                        out,
                        "Deviation:      unavailable ({})",
                        deviation_absence_reason(report)
                    );
                }
            }
        }
        None => {
            let _ = writeln!(
                out,
                "Intrinsic P/E:  unavailable ({})",
                intrinsic_absence_reason(report)
            );
        }
    }

    for series in [&report.sales_growth, &report.profit_growth] {
        out.push('\n');
        let _ = writeln!(out, "Compounded {}", series.metric);
        if series.is_empty() {
            let _ = writeln!(out, "  no data found");
            continue;
        }
        let width = series
            .points
            .iter()
            .map(|p| p.period.len())
            .max()
            .unwrap_or(0);
        for point in &series.points {
            let _ = writeln!(out, "  {:<width$}  {}%", point.period, point.value);
        }
    }

    out
}

fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "unavailable".to_string(),
    }
}

fn driver_label(driver: &ValueDriver) -> String {
    match driver {
        ValueDriver::Payout { payout_ratio } => {
            format!("dividend payout ({:.0}%)", payout_ratio * 100.0)
        }
        ValueDriver::ReturnOnCapital { roce } => {
            format!("return on capital ({:.0}% RoCE)", roce * 100.0)
        }
    }
}

/// Why the intrinsic multiple is absent, in the order the engine checks.
fn intrinsic_absence_reason(report: &AnalysisReport) -> &'static str {
    let assumptions = &report.assumptions;
    match report.facts.latest_eps {
        None => "EPS could not be determined from the quarterly results",
        Some(eps) if eps == 0.0 => "reported EPS is zero",
        Some(_) if assumptions.high_growth_years < 1 => {
            "high-growth period must be at least one year"
        }
        Some(_) if assumptions.cost_of_capital <= assumptions.terminal_growth_rate => {
            "cost of capital must exceed the terminal growth rate"
        }
        Some(_) => "assumptions do not define a finite valuation",
    }
}

fn deviation_absence_reason(report: &AnalysisReport) -> &'static str {
    if report.facts.current_multiple.is_none() {
        "market P/E unavailable"
    } else {
        "intrinsic multiple is zero"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FinancialFacts, GrowthPoint, GrowthSeries, ValuationResult};
    use crate::valuation::ValuationAssumptions;

    fn sample_report() -> AnalysisReport {
        let mut sales = GrowthSeries::new("Sales Growth");
        sales.points.push(GrowthPoint {
            period: "TTM".into(),
            value: 12.0,
        });
        sales.points.push(GrowthPoint {
            period: "3 Years".into(),
            value: 15.0,
        });

        AnalysisReport {
            facts: FinancialFacts {
                symbol: "NESTLEIND".into(),
                company_name: Some("Nestle India Ltd".into()),
                current_price: Some(24535.0),
                current_multiple: Some(75.2),
                latest_eps: Some(13.9),
            },
            sales_growth: sales,
            profit_growth: GrowthSeries::new("Profit Growth"),
            valuation: ValuationResult {
                intrinsic_multiple: Some(16.8155),
                deviation_percent: Some(347.2),
            },
            assumptions: ValuationAssumptions {
                driver: ValueDriver::ReturnOnCapital { roce: 0.20 },
                cost_of_capital: 0.12,
                growth_rate: 0.10,
                terminal_growth_rate: 0.02,
                high_growth_years: 5,
                fade_years: 5,
            },
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("text".parse::<ReportFormat>(), Ok(ReportFormat::Text));
        assert_eq!("JSON".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert!("yaml".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_text_report_rounds_at_presentation() {
        let text = render(&sample_report(), ReportFormat::Text);
        assert!(text.contains("Nestle India Ltd (NESTLEIND)"));
        assert!(text.contains("Intrinsic P/E:  16.82"));
        assert!(text.contains("+347.20% (overvalued)"));
        assert!(text.contains("TTM"));
        assert!(text.contains("12%"));
    }

    #[test]
    fn test_text_report_empty_series() {
        let text = render(&sample_report(), ReportFormat::Text);
        assert!(text.contains("Compounded Profit Growth"));
        assert!(text.contains("no data found"));
    }

    #[test]
    fn test_missing_eps_reason() {
        let mut report = sample_report();
        report.facts.latest_eps = None;
        report.valuation.intrinsic_multiple = None;
        report.valuation.deviation_percent = None;

        let text = render(&report, ReportFormat::Text);
        assert!(text.contains("EPS could not be determined"));
    }

    #[test]
    fn test_bad_assumptions_reason() {
        let mut report = sample_report();
        report.assumptions.terminal_growth_rate = 0.15;
        report.valuation.intrinsic_multiple = None;
        report.valuation.deviation_percent = None;

        let text = render(&report, ReportFormat::Text);
        assert!(text.contains("cost of capital must exceed the terminal growth rate"));
    }

    #[test]
    fn test_undervalued_verdict() {
        let mut report = sample_report();
        report.valuation.deviation_percent = Some(-35.4);

        let text = render(&report, ReportFormat::Text);
        assert!(text.contains("-35.40% (undervalued)"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let json = render(&sample_report(), ReportFormat::Json);
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.facts.symbol, "NESTLEIND");
        assert_eq!(parsed.valuation.intrinsic_multiple, Some(16.8155));
    }
}
