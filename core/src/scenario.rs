//! Conversion uplift scenario — a linear what-if over the KPI snapshot.
//!
//! Model: if `rate`% of pure grocery transactions converted to mixed at the
//! current average-ticket uplift, the incremental revenue is
//! `(avg_mixed − avg_pure) × round(pure_txns × rate / 100)`.
//! A negative uplift is a valid, reportable outcome and is not clamped.

use crate::dataset::MetricSet;
use crate::error::{CoreError, CoreResult};
use crate::types::{Dollars, TxnCount};
use serde::Serialize;

/// The board slider runs 0–20%, but the engine accepts the full sanity bound.
pub const MAX_CONVERSION_RATE_PCT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub txns_converted: TxnCount,
    pub incremental_sales: Dollars,
}

/// Simulate converting `conversion_rate_pct`% of pure transactions to mixed.
///
/// Pure and stateless: identical inputs always yield identical output.
/// Rates outside [0, 100] (or non-finite) are rejected — the linear
/// extrapolation is only meaningful inside that bound.
pub fn simulate(kpi: &MetricSet, conversion_rate_pct: f64) -> CoreResult<ScenarioOutcome> {
    if !conversion_rate_pct.is_finite()
        || !(0.0..=MAX_CONVERSION_RATE_PCT).contains(&conversion_rate_pct)
    {
        return Err(CoreError::InvalidParameter(format!(
            "conversion rate {conversion_rate_pct} outside [0, {MAX_CONVERSION_RATE_PCT}]"
        )));
    }

    let delta_avg_ticket = kpi.avg_mixed - kpi.avg_pure;
    let txns_converted = (kpi.pure_txns as f64 * conversion_rate_pct / 100.0).round() as TxnCount;

    Ok(ScenarioOutcome {
        txns_converted,
        incremental_sales: delta_avg_ticket * txns_converted as f64,
    })
}
