//! Data records exchanged between extraction, valuation, and presentation.
//!
//! Every extraction target is optional: the page layout may differ from the
//! expected one, or a located value may be malformed. Absence is a normal
//! outcome here, not an error. All records are request-scoped - built fresh
//! from one fetched page and one set of assumptions, never cached.

use serde::{Deserialize, Serialize};

use crate::valuation::ValuationAssumptions;

// ============================================================================
// Extracted Facts
// ============================================================================

/// Fundamentals extracted from a company page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialFacts {
    /// Symbol the page was fetched for (display only, never parsed)
    pub symbol: String,
    /// Company name from the page heading
    pub company_name: Option<String>,
    /// Current market price
    pub current_price: Option<f64>,
    /// Market-quoted P/E ratio
    pub current_multiple: Option<f64>,
    /// Latest reported quarterly EPS
    pub latest_eps: Option<f64>,
}

/// One row of a compounded-growth table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    /// Lookback period label as printed on the page (e.g. "TTM", "5 Years")
    pub period: String,
    /// Growth value in percent, exactly as authored in the document
    pub value: f64,
}

/// Ordered growth series for one metric, preserving document row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthSeries {
    /// Metric label the series was matched on (e.g. "Sales Growth")
    pub metric: String,
    /// Rows in document order, typically ascending lookback length
    pub points: Vec<GrowthPoint>,
}

impl GrowthSeries {
    /// Create an empty series for a metric.
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            points: Vec::new(),
        }
    }

    /// Look up a value by its period label.
    pub fn get(&self, period: &str) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.period == period)
            .map(|p| p.value)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

// ============================================================================
// Valuation Output
// ============================================================================

/// Outcome of the DCF valuation and the market comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationResult {
    /// P/E implied by the DCF; absent when EPS is missing/zero or the
    /// assumptions violate an engine precondition
    pub intrinsic_multiple: Option<f64>,
    /// (market multiple / intrinsic multiple - 1) * 100; absent when either
    /// side is absent or the intrinsic multiple is zero
    pub deviation_percent: Option<f64>,
}

/// Everything the presentation layer needs for one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub facts: FinancialFacts,
    pub sales_growth: GrowthSeries,
    pub profit_growth: GrowthSeries,
    pub valuation: ValuationResult,
    /// Assumptions the valuation was computed under (all rates as fractions)
    pub assumptions: ValuationAssumptions,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_series_lookup() {
        let mut series = GrowthSeries::new("Sales Growth");
        series.points.push(GrowthPoint {
            period: "TTM".into(),
            value: 12.0,
        });
        series.points.push(GrowthPoint {
            period: "3 Years".into(),
            value: 15.0,
        });

        assert_eq!(series.get("TTM"), Some(12.0));
        assert_eq!(series.get("3 Years"), Some(15.0));
        assert_eq!(series.get("10 Years"), None);
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
    }

    #[test]
    fn test_empty_series() {
        let series = GrowthSeries::new("Profit Growth");
        assert!(series.is_empty());
        assert_eq!(series.get("TTM"), None);
    }
}
