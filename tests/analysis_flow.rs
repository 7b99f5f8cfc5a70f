//! End-to-end analysis flow over fixture pages.
//!
//! Exercises the full pipeline the CLI drives: parse page, extract facts
//! and growth tables, run the valuation, compare with the market multiple,
//! and render the report.

use intrinsic_pe::report::{self, ReportFormat};
use intrinsic_pe::{analyze_document, Document, ValuationAssumptions, ValueDriver};

const COMPANY_PAGE: &str = r#"
<html><body>
  <h1 class="h2">Nestle India Ltd</h1>
  <ul id="top-ratios">
    <li class="flex flex-space-between">
      <span class="name">Current Price</span>
      <span class="number">2,453</span>
    </li>
    <li class="flex flex-space-between">
      <span class="name">Stock P/E</span>
      <span class="number">75.2</span>
    </li>
  </ul>
  <section id="quarters">
    <table>
      <tr><th></th><th>Sep 2023</th><th>Dec 2023</th><th>Mar 2024</th></tr>
      <tr><td>EPS in Rs</td><td>23.5</td><td>24.1</td><td>25.0</td></tr>
    </table>
  </section>
  <section id="profit-loss">
    <table class="ranges-table">
      <tr><th>Compounded Sales Growth</th><th></th></tr>
      <tr><td>10 Years</td><td>9%</td></tr>
      <tr><td>5 Years</td><td>10%</td></tr>
      <tr><td>TTM</td><td>12%</td></tr>
    </table>
    <table class="ranges-table">
      <tr><th>Compounded Profit Growth</th><th></th></tr>
      <tr><td>10 Years</td><td>11%</td></tr>
      <tr><td>TTM</td><td>18%</td></tr>
    </table>
  </section>
</body></html>
"#;

fn default_assumptions() -> ValuationAssumptions {
    ValuationAssumptions {
        driver: ValueDriver::ReturnOnCapital { roce: 0.20 },
        cost_of_capital: 0.12,
        growth_rate: 0.10,
        terminal_growth_rate: 0.02,
        high_growth_years: 1,
        fade_years: 0,
    }
}

#[test]
fn full_analysis_of_complete_page() {
    let document = Document::parse(COMPANY_PAGE);
    let analysis = analyze_document(&document, "NESTLEIND", &default_assumptions());

    assert_eq!(analysis.facts.symbol, "NESTLEIND");
    assert_eq!(
        analysis.facts.company_name.as_deref(),
        Some("Nestle India Ltd")
    );
    assert_eq!(analysis.facts.current_price, Some(2453.0));
    assert_eq!(analysis.facts.current_multiple, Some(75.2));
    assert_eq!(analysis.facts.latest_eps, Some(25.0));

    // H=1, F=0, roce model: the multiple is EPS-scale invariant, so this is
    // the reference value 16.8155 regardless of the EPS on the page.
    let intrinsic = analysis.valuation.intrinsic_multiple.unwrap();
    assert!((intrinsic - 16.8155).abs() < 0.001, "intrinsic: {}", intrinsic);

    let deviation = analysis.valuation.deviation_percent.unwrap();
    let expected = (75.2 / intrinsic - 1.0) * 100.0;
    assert!((deviation - expected).abs() < 1e-9);
    assert!(deviation > 0.0, "this page is overvalued");

    let sales: Vec<&str> = analysis
        .sales_growth
        .points
        .iter()
        .map(|p| p.period.as_str())
        .collect();
    assert_eq!(sales, vec!["10 Years", "5 Years", "TTM"]);
    assert_eq!(analysis.profit_growth.get("TTM"), Some(18.0));
}

#[test]
fn report_renders_both_formats() {
    let document = Document::parse(COMPANY_PAGE);
    let analysis = analyze_document(&document, "NESTLEIND", &default_assumptions());

    let text = report::render(&analysis, ReportFormat::Text);
    assert!(text.contains("Nestle India Ltd (NESTLEIND)"));
    assert!(text.contains("Intrinsic P/E:  16.82"));
    assert!(text.contains("overvalued"));

    let json = report::render(&analysis, ReportFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["facts"]["symbol"], "NESTLEIND");
    assert_eq!(value["sales_growth"]["points"][2]["period"], "TTM");
}

#[test]
fn page_without_quarterly_results_degrades_to_absent() {
    let page = r#"
        <html><body>
          <h1>Shell Co</h1>
          <ul>
            <li class="flex flex-space-between">
              <span class="name">Stock P/E</span><span class="number">12.0</span>
            </li>
          </ul>
        </body></html>
    "#;
    let document = Document::parse(page);
    let analysis = analyze_document(&document, "SHELL", &default_assumptions());

    assert_eq!(analysis.facts.latest_eps, None);
    assert_eq!(analysis.facts.current_multiple, Some(12.0));
    assert_eq!(analysis.valuation.intrinsic_multiple, None);
    assert_eq!(analysis.valuation.deviation_percent, None);
    assert!(analysis.sales_growth.is_empty());

    let text = report::render(&analysis, ReportFormat::Text);
    assert!(text.contains("EPS could not be determined"));
}

#[test]
fn empty_document_produces_all_absent_report() {
    let document = Document::parse("<html><body></body></html>");
    let analysis = analyze_document(&document, "NOSUCH", &default_assumptions());

    assert!(analysis.facts.company_name.is_none());
    assert!(analysis.facts.current_price.is_none());
    assert!(analysis.facts.current_multiple.is_none());
    assert!(analysis.facts.latest_eps.is_none());
    assert!(analysis.valuation.intrinsic_multiple.is_none());
    assert!(analysis.valuation.deviation_percent.is_none());
    assert!(analysis.sales_growth.is_empty());
    assert!(analysis.profit_growth.is_empty());
}

#[test]
fn invalid_assumptions_surface_as_absent_with_reason() {
    let document = Document::parse(COMPANY_PAGE);
    let assumptions = ValuationAssumptions {
        terminal_growth_rate: 0.20,
        ..default_assumptions()
    };
    let analysis = analyze_document(&document, "NESTLEIND", &assumptions);

    assert_eq!(analysis.facts.latest_eps, Some(25.0));
    assert_eq!(analysis.valuation.intrinsic_multiple, None);

    let text = report::render(&analysis, ReportFormat::Text);
    assert!(text.contains("cost of capital must exceed the terminal growth rate"));
}
