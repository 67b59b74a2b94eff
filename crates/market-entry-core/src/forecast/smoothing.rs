//! Additive-trend exponential smoothing (Holt's linear method).
//!
//! One-step-ahead prediction and state updates:
//!
//! ```text
//! y_hat[t] = l[t-1] + b[t-1]
//! l[t]     = alpha * y[t] + (1 - alpha) * (l[t-1] + b[t-1])
//! b[t]     = beta * (l[t] - l[t-1]) + (1 - beta) * b[t-1]
//! ```
//!
//! The state starts at `l[0] = y[0]`, `b[0] = y[1] - y[0]`, and an `h`-step
//! forecast is `l[n] + h * b[n]`. The choice of `alpha` and `beta` is
//! delegated to a [`SmoothingFitter`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::{validate_coefficient, FitMethod};
use crate::error::MarketEntryError;
use crate::MarketEntryResult;

/// Grid resolution for the coarse search (0.00, 0.05, ..., 1.00).
const GRID_STEPS: u32 = 20;
const REFINE_INITIAL_STEP: Decimal = dec!(0.025);
const REFINE_MIN_STEP: Decimal = dec!(0.000001);
const MAX_REFINE_EVALUATIONS: u32 = 10_000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingParams {
    /// Level smoothing coefficient in [0, 1]
    pub alpha: Decimal,
    /// Trend smoothing coefficient in [0, 1]
    pub beta: Decimal,
}

/// Fitted model: chosen coefficients plus the final level/trend state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoltFit {
    pub params: SmoothingParams,
    /// Level after the last observation
    pub level: Decimal,
    /// Trend after the last observation
    pub trend: Decimal,
    /// In-sample sum of squared one-step-ahead errors
    pub sse: Decimal,
    /// Name of the fitter that chose the coefficients
    pub method: String,
}

impl HoltFit {
    /// Value `steps` periods past the last observation. `None` on overflow.
    pub fn forecast_at(&self, steps: u32) -> Option<Decimal> {
        Decimal::from(steps)
            .checked_mul(self.trend)?
            .checked_add(self.level)
    }

    /// Successive forecasts for periods 1..=steps. `None` on overflow.
    pub fn forecast(&self, steps: u32) -> Option<Vec<Decimal>> {
        (1..=steps).map(|h| self.forecast_at(h)).collect()
    }
}

/// Strategy for choosing the smoothing coefficients of a series.
pub trait SmoothingFitter {
    fn name(&self) -> &'static str;

    fn select(&self, series: &[Decimal]) -> MarketEntryResult<SmoothingParams>;
}

/// Minimises in-sample SSE: coarse grid over [0, 1]^2, then pattern search
/// with halving steps around the best grid point.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridSearchFitter;

/// Uses caller-supplied coefficients.
#[derive(Debug, Clone, Copy)]
pub struct FixedParameters(pub SmoothingParams);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the fitter named by the configuration.
pub fn fitter_for(method: &FitMethod) -> Box<dyn SmoothingFitter> {
    match method {
        FitMethod::GridSearch => Box::new(GridSearchFitter),
        FitMethod::Fixed { alpha, beta } => Box::new(FixedParameters(SmoothingParams {
            alpha: *alpha,
            beta: *beta,
        })),
    }
}

/// Fit a Holt model to `series` (earliest first).
///
/// `label` names the series in error messages. Fails when the series has
/// fewer than two observations or any step of the recursion overflows.
pub fn fit_holt(
    label: &str,
    series: &[Decimal],
    fitter: &dyn SmoothingFitter,
) -> MarketEntryResult<HoltFit> {
    if series.len() < 2 {
        return Err(MarketEntryError::FitFailure {
            metric: label.into(),
            reason: format!(
                "Trend smoothing requires at least 2 observations, got {}",
                series.len()
            ),
        });
    }

    let params = fitter.select(series).map_err(|e| match e {
        MarketEntryError::FitFailure { reason, .. } => MarketEntryError::FitFailure {
            metric: label.into(),
            reason,
        },
        other => other,
    })?;
    let state = run(series, params).ok_or_else(|| MarketEntryError::FitFailure {
        metric: label.into(),
        reason: "Series magnitude overflows the smoothing recursion".into(),
    })?;

    tracing::debug!(
        series = label,
        method = fitter.name(),
        alpha = %params.alpha,
        beta = %params.beta,
        sse = %state.sse,
        "holt model fitted"
    );

    Ok(HoltFit {
        params,
        level: state.level,
        trend: state.trend,
        sse: state.sse,
        method: fitter.name().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Fitters
// ---------------------------------------------------------------------------

impl SmoothingFitter for GridSearchFitter {
    fn name(&self) -> &'static str {
        "grid_search"
    }

    fn select(&self, series: &[Decimal]) -> MarketEntryResult<SmoothingParams> {
        let overflow = || MarketEntryError::FitFailure {
            metric: "series".into(),
            reason: "Series magnitude overflows the smoothing recursion".into(),
        };
        let evaluate = |alpha: Decimal, beta: Decimal| {
            run(series, SmoothingParams { alpha, beta }).map(|s| s.sse)
        };

        // Coarse grid; the first strictly better point wins ties.
        let grid_step = Decimal::ONE / Decimal::from(GRID_STEPS);
        let mut best = SmoothingParams {
            alpha: Decimal::ZERO,
            beta: Decimal::ZERO,
        };
        let mut best_sse = evaluate(best.alpha, best.beta).ok_or_else(overflow)?;
        for i in 0..=GRID_STEPS {
            for j in 0..=GRID_STEPS {
                let alpha = grid_step * Decimal::from(i);
                let beta = grid_step * Decimal::from(j);
                let sse = evaluate(alpha, beta).ok_or_else(overflow)?;
                if sse < best_sse {
                    best = SmoothingParams { alpha, beta };
                    best_sse = sse;
                }
            }
        }

        // Pattern search refinement.
        let mut step = REFINE_INITIAL_STEP;
        let mut evaluations = 0u32;
        while step >= REFINE_MIN_STEP && evaluations < MAX_REFINE_EVALUATIONS {
            let mut improved = true;
            while improved && evaluations < MAX_REFINE_EVALUATIONS {
                improved = false;
                let moves = [
                    (step, Decimal::ZERO),
                    (-step, Decimal::ZERO),
                    (Decimal::ZERO, step),
                    (Decimal::ZERO, -step),
                ];
                for (da, db) in moves {
                    let alpha = clamp_unit(best.alpha + da);
                    let beta = clamp_unit(best.beta + db);
                    if alpha == best.alpha && beta == best.beta {
                        continue;
                    }
                    evaluations += 1;
                    let sse = evaluate(alpha, beta).ok_or_else(overflow)?;
                    if sse < best_sse {
                        best = SmoothingParams { alpha, beta };
                        best_sse = sse;
                        improved = true;
                    }
                }
            }
            step /= dec!(2);
        }

        Ok(best)
    }
}

impl SmoothingFitter for FixedParameters {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn select(&self, _series: &[Decimal]) -> MarketEntryResult<SmoothingParams> {
        validate_coefficient("alpha", self.0.alpha)?;
        validate_coefficient("beta", self.0.beta)?;
        Ok(self.0)
    }
}

// ---------------------------------------------------------------------------
// Recursion
// ---------------------------------------------------------------------------

struct HoltState {
    level: Decimal,
    trend: Decimal,
    sse: Decimal,
}

/// Run the level/trend recursion over the whole series. `None` on overflow.
fn run(series: &[Decimal], params: SmoothingParams) -> Option<HoltState> {
    let SmoothingParams { alpha, beta } = params;
    let mut level = series[0];
    let mut trend = series[1].checked_sub(series[0])?;
    let mut sse = Decimal::ZERO;

    for &y in &series[1..] {
        let predicted = level.checked_add(trend)?;
        let error = y.checked_sub(predicted)?;
        sse = sse.checked_add(error.checked_mul(error)?)?;

        let new_level = alpha
            .checked_mul(y)?
            .checked_add((Decimal::ONE - alpha).checked_mul(predicted)?)?;
        trend = beta
            .checked_mul(new_level.checked_sub(level)?)?
            .checked_add((Decimal::ONE - beta).checked_mul(trend)?)?;
        level = new_level;
    }

    Some(HoltState { level, trend, sse })
}

fn clamp_unit(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        Decimal::ZERO
    } else if value > Decimal::ONE {
        Decimal::ONE
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
