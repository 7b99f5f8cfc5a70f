//! Three-phase DCF valuation engine and market comparator.
//!
//! The engine turns the latest EPS plus user assumptions into an intrinsic
//! P/E: a high-growth phase at a constant elevated rate, a fade phase where
//! growth declines linearly to the terminal rate, and a Gordon-growth
//! terminal value. All phases are discounted at the cost of capital and
//! summed; dividing by EPS gives the multiple.
//!
//! Pure functions over `f64`, no I/O. Violated preconditions (zero EPS,
//! cost of capital not above terminal growth) produce `None`, never a
//! panic or a garbage value.

use serde::{Deserialize, Serialize};

// ============================================================================
// Assumptions
// ============================================================================

/// Which value-driver model converts projected earnings into value.
///
/// The two models are interchangeable in shape but not equivalent in
/// meaning, so the choice is explicit rather than inferred from which
/// field happens to be set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ValueDriver {
    /// Dividend-discount view: each year's value is `earnings * payout_ratio`.
    Payout { payout_ratio: f64 },
    /// Reinvestment view: each year's value is
    /// `earnings * (roce / cost_of_capital)`.
    ReturnOnCapital { roce: f64 },
}

impl ValueDriver {
    /// Multiple applied to projected earnings to get that year's value
    /// contribution. `None` when the RoCE model is used with a zero cost
    /// of capital.
    fn earnings_multiple(&self, cost_of_capital: f64) -> Option<f64> {
        match *self {
            Self::Payout { payout_ratio } => Some(payout_ratio),
            Self::ReturnOnCapital { roce } => {
                if cost_of_capital == 0.0 {
                    None
                } else {
                    Some(roce / cost_of_capital)
                }
            }
        }
    }
}

/// User-chosen inputs to the DCF.
///
/// All rate fields are fractions (0.12, not 12). Conversion from the
/// percent values a user types happens at the CLI boundary, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationAssumptions {
    /// Value-driver model for the growth and terminal phases
    pub driver: ValueDriver,
    /// Discount rate applied to every phase
    pub cost_of_capital: f64,
    /// Growth rate during the high-growth phase
    pub growth_rate: f64,
    /// Long-run growth rate for the terminal perpetuity
    pub terminal_growth_rate: f64,
    /// High-growth phase length in years (at least 1)
    pub high_growth_years: u32,
    /// Fade phase length in years (0 disables the fade phase)
    pub fade_years: u32,
}

// ============================================================================
// Valuation Engine
// ============================================================================

/// Intrinsic P/E implied by the three-phase DCF.
///
/// Returns `None` when the result is undefined: EPS zero or non-finite,
/// no high-growth year, cost of capital not strictly above the terminal
/// growth rate, or a zero cost of capital under the RoCE model.
pub fn intrinsic_multiple(eps: f64, assumptions: &ValuationAssumptions) -> Option<f64> {
    if !eps.is_finite() || eps == 0.0 {
        return None;
    }
    if assumptions.high_growth_years < 1 {
        return None;
    }
    // The Gordon terminal value is only finite and positive above this line.
    if assumptions.cost_of_capital <= assumptions.terminal_growth_rate {
        return None;
    }
    let driver = assumptions
        .driver
        .earnings_multiple(assumptions.cost_of_capital)?;

    let high_years = assumptions.high_growth_years;
    let fade_years = assumptions.fade_years;
    let discount = 1.0 + assumptions.cost_of_capital;

    let mut total_value = 0.0;

    // Phase 1: constant elevated growth, years 1..=H.
    for year in 1..=high_years {
        let projected = eps * (1.0 + assumptions.growth_rate).powi(year as i32);
        total_value += projected * driver / discount.powi(year as i32);
    }

    // Phase 2: growth fades linearly to the terminal rate, years H+1..=H+F.
    // Earnings compound from year zero at the faded rate, so the cumulative
    // exponent H+y applies.
    for year in 1..=fade_years {
        let faded_growth = assumptions.growth_rate
            - (year as f64 / fade_years as f64)
                * (assumptions.growth_rate - assumptions.terminal_growth_rate);
        let exponent = (high_years + year) as i32;
        let projected = eps * (1.0 + faded_growth).powi(exponent);
        total_value += projected * driver / discount.powi(exponent);
    }

    // Phase 3: Gordon-growth perpetuity at the horizon.
    let horizon = (high_years + fade_years) as i32;
    let terminal_earnings = eps * (1.0 + assumptions.terminal_growth_rate).powi(horizon);
    let terminal_value = terminal_earnings * driver
        / (assumptions.cost_of_capital - assumptions.terminal_growth_rate);
    total_value += terminal_value / discount.powi(horizon);

    Some(total_value / eps)
}

// ============================================================================
// Comparator
// ============================================================================

/// Percentage by which the market multiple deviates from the intrinsic one.
///
/// Positive means overvalued relative to the DCF, negative undervalued.
/// `None` when either multiple is absent or the intrinsic multiple is zero.
pub fn deviation_percent(
    current_multiple: Option<f64>,
    intrinsic_multiple: Option<f64>,
) -> Option<f64> {
    let current = current_multiple?;
    let intrinsic = intrinsic_multiple?;
    if intrinsic == 0.0 {
        return None;
    }
    Some((current / intrinsic - 1.0) * 100.0)
}

// ============================================================================
// Tests
// ============================================================================
