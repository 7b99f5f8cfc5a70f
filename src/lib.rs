//! Intrinsic P/E analyzer.
//!
//! Fetches a Screener.in company page, extracts fundamentals (price,
//! market P/E, latest EPS, compounded growth tables), runs a three-phase
//! DCF (high growth, linear fade, Gordon terminal value) to get the P/E
//! the assumptions justify, and reports how far the market multiple
//! deviates from it.
//!
//! # Data flow
//!
//! ```text
//! page HTML -> Document -> extract::* -> FinancialFacts + GrowthSeries
//!                                             |
//!                         assumptions -> valuation::intrinsic_multiple
//!                                             |
//!                              valuation::deviation_percent -> report
//! ```
//!
//! Extraction and valuation failures never cross module boundaries as
//! errors: a fact that cannot be located or a valuation whose
//! preconditions fail is simply absent, and the report layer phrases the
//! reason. Only the fetch layer returns `Result`.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod document;
pub mod extract;
pub mod fetch;
pub mod report;
pub mod types;
pub mod valuation;

pub use document::Document;
pub use fetch::{FetchError, ScreenerClient};
pub use types::{AnalysisReport, FinancialFacts, GrowthPoint, GrowthSeries, ValuationResult};
pub use valuation::{ValuationAssumptions, ValueDriver};

/// Run one full analysis over an already-fetched document.
///
/// One extraction pass, one valuation, one comparison - a pure function of
/// the document and the assumptions, with no state carried between calls.
pub fn analyze_document(
    document: &Document,
    symbol: &str,
    assumptions: &ValuationAssumptions,
) -> AnalysisReport {
    let (current_price, current_multiple) = extract::extract_price_and_multiple(document);
    let facts = FinancialFacts {
        symbol: symbol.to_string(),
        company_name: extract::extract_company_name(document),
        current_price,
        current_multiple,
        latest_eps: extract::extract_latest_eps(document),
    };

    let intrinsic = facts
        .latest_eps
        .and_then(|eps| valuation::intrinsic_multiple(eps, assumptions));
    let valuation = ValuationResult {
        intrinsic_multiple: intrinsic,
        deviation_percent: valuation::deviation_percent(facts.current_multiple, intrinsic),
    };

    AnalysisReport {
        sales_growth: extract::extract_growth_series(document, extract::SALES_GROWTH_LABEL),
        profit_growth: extract::extract_growth_series(document, extract::PROFIT_GROWTH_LABEL),
        facts,
        valuation,
        assumptions: assumptions.clone(),
    }
}
