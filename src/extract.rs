//! Fact extraction from a Screener.in-style company page.
//!
//! Pulls five classes of facts out of the parsed document: company name,
//! current price, market P/E, latest quarterly EPS, and the compounded
//! growth tables. Matching rules (section ids, CSS selectors, label
//! substrings) live in the constants below so the layout coupling is in
//! one place.
//!
//! Every function here degrades to `None`/empty on a missing node or a
//! malformed value. Nothing throws past this module; the caller treats a
//! missing core fact as a distinct, user-visible outcome.

use scraper::ElementRef;
use tracing::debug;

use crate::document::{self, Document};
use crate::types::{GrowthPoint, GrowthSeries};

// ============================================================================
// Page Layout Constants
// ============================================================================

/// Primary heading carrying the company name
const COMPANY_NAME_SELECTOR: &str = "h1";

/// Entries of the top ratios list (label + value pairs)
const RATIO_ITEM_SELECTOR: &str = "li.flex.flex-space-between";

/// Numeric value inside a ratios-list entry
const RATIO_VALUE_SELECTOR: &str = "span.number";

/// Label substring identifying the current-price entry
const PRICE_LABEL: &str = "Current Price";

/// Label substring identifying the market P/E entry
const MULTIPLE_LABEL: &str = "Stock P/E";

/// Section holding the quarterly results table
const QUARTERS_SECTION_ID: &str = "quarters";

/// Row-label substring identifying the EPS row ("EPS in Rs" on the page)
const EPS_ROW_LABEL: &str = "EPS";

/// Section holding the compounded growth tables
const PROFIT_LOSS_SECTION_ID: &str = "profit-loss";

/// The growth tables inside the profit-loss section
const RANGES_TABLE_SELECTOR: &str = "table.ranges-table";

/// Caption substring of the compounded sales growth table
pub const SALES_GROWTH_LABEL: &str = "Sales Growth";

/// Caption substring of the compounded profit growth table
pub const PROFIT_GROWTH_LABEL: &str = "Profit Growth";

const ROW_SELECTOR: &str = "tr";
const CELL_SELECTOR: &str = "td";

// ============================================================================
// Extraction
// ============================================================================

/// Company name from the primary page heading.
pub fn extract_company_name(doc: &Document) -> Option<String> {
    let heading = doc.select_all(COMPANY_NAME_SELECTOR).into_iter().next()?;
    let name = document::text_of(heading);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Current price and market P/E from the top ratios list.
///
/// Entries are matched by label substring; a non-numeric value blanks only
/// its own field and never aborts extraction of the other one.
pub fn extract_price_and_multiple(doc: &Document) -> (Option<f64>, Option<f64>) {
    let mut price = None;
    let mut multiple = None;

    for item in doc.select_all(RATIO_ITEM_SELECTOR) {
        let label = document::text_of(item);
        let value = document::select_in(item, RATIO_VALUE_SELECTOR)
            .into_iter()
            .next()
            .and_then(|node| parse_number(&document::text_of(node)));

        if label.contains(MULTIPLE_LABEL) {
            multiple = value;
        } else if label.contains(PRICE_LABEL) {
            price = value;
        }
    }

    (price, multiple)
}

/// Latest reported EPS from the quarterly results table.
///
/// Finds the row labeled with [`EPS_ROW_LABEL`] and reads the cell picked
/// by [`latest_cell`]. A missing section, missing row, or non-numeric cell
/// yields `None`.
pub fn extract_latest_eps(doc: &Document) -> Option<f64> {
    let section = doc.find_section(QUARTERS_SECTION_ID)?;

    for row in document::select_in(section, ROW_SELECTOR) {
        if !document::text_of(row).contains(EPS_ROW_LABEL) {
            continue;
        }
        let cells = document::select_in(row, CELL_SELECTOR);
        let cell = latest_cell(&cells)?;
        return parse_number(&document::text_of(*cell));
    }

    debug!(section = QUARTERS_SECTION_ID, "EPS row not found");
    None
}

/// Positional rule for the latest reported period.
///
/// The quarterly table lists completed quarters only, so the rightmost
/// value column is the most recent complete period.
fn latest_cell<'a, 'b>(cells: &'b [ElementRef<'a>]) -> Option<&'b ElementRef<'a>> {
    cells.last()
}

/// Compounded growth series for one metric from the profit-loss section.
///
/// Finds the ranges table whose text contains `metric_label`, skips its
/// header row, and reads period label (column 0) and percent value
/// (column 1) in document order. A missing section or table yields an
/// empty series.
pub fn extract_growth_series(doc: &Document, metric_label: &str) -> GrowthSeries {
    let mut series = GrowthSeries::new(metric_label);

    let Some(section) = doc.find_section(PROFIT_LOSS_SECTION_ID) else {
        debug!(section = PROFIT_LOSS_SECTION_ID, "Growth section not found");
        return series;
    };

    for table in document::select_in(section, RANGES_TABLE_SELECTOR) {
        if !document::text_of(table).contains(metric_label) {
            continue;
        }
        for row in document::select_in(table, ROW_SELECTOR).into_iter().skip(1) {
            let cells = document::select_in(row, CELL_SELECTOR);
            if cells.len() < 2 {
                continue;
            }
            let period = document::text_of(cells[0]);
            match parse_number(&document::text_of(cells[1])) {
                Some(value) => series.points.push(GrowthPoint { period, value }),
                None => debug!(metric = metric_label, period = %period, "Skipping non-numeric growth value"),
            }
        }
    }

    series
}

// ============================================================================
// Number Parsing
// ============================================================================

/// Parse a page-formatted number: surrounding whitespace, a trailing "%",
/// and thousands separators are stripped first.
fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_end_matches('%').replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

// ============================================================================
// Tests
// ============================================================================
