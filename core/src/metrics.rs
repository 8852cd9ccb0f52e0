//! Metric derivation — percentages, incidence ratios, and the drill-down view.
//!
//! Everything in this module is a pure function over the dataset. No state,
//! deterministic for identical input, safe to call from any number of
//! concurrent requests.

use crate::dataset::{CategoryMix, Hierarchy, MetricSet};
use crate::types::{Dollars, Fraction, TxnCount};
use serde::Serialize;

/// One category with its derived incidence within mixed baskets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIncidence {
    pub name: String,
    pub mix_txns: TxnCount,
    pub mix_sales: Dollars,
    pub avg_ticket: Dollars,
    /// mix_txns / mixed_txns × 100, full precision.
    pub incidence_pct: f64,
    /// Incidence rounded to one decimal, as shown on the board.
    pub display_incidence: f64,
}

/// The derived view the board, the scenario engine, and the prompt builder
/// all read from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    /// avg_mixed − avg_pure. May be negative; reported as-is.
    pub uplift: Dollars,
    pub pct_mixed: Fraction,
    pub pct_pure: Fraction,
    pub categories: Vec<CategoryIncidence>,
}

/// Derive percentages and incidence ratios from a KPI snapshot.
///
/// A zero `mixed_txns` denominator yields 0% incidence for every category
/// rather than an error; the extract can legitimately describe a window with
/// no mixed baskets.
pub fn derive(kpi: &MetricSet, cats: &[CategoryMix]) -> DerivedView {
    let categories = cats
        .iter()
        .map(|c| {
            let incidence_pct = incidence(c.mix_txns, kpi.mixed_txns);
            CategoryIncidence {
                name: c.name.clone(),
                mix_txns: c.mix_txns,
                mix_sales: c.mix_sales,
                avg_ticket: c.avg_ticket,
                incidence_pct,
                display_incidence: (incidence_pct * 10.0).round() / 10.0,
            }
        })
        .collect();

    DerivedView {
        uplift: kpi.avg_mixed - kpi.avg_pure,
        pct_mixed: kpi.pct_mixed,
        pct_pure: kpi.pct_pure,
        categories,
    }
}

/// Incidence of a category within mixed transactions, as a percentage.
pub fn incidence(mix_txns: TxnCount, mixed_txns: TxnCount) -> f64 {
    if mixed_txns == 0 {
        return 0.0;
    }
    mix_txns as f64 / mixed_txns as f64 * 100.0
}

/// One row of the drill-down table: a hierarchy node with its share of the
/// tree total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillRow {
    pub name: &'static str,
    /// Indentation level: 0 = total, 3 = deepest pure/mixed split.
    pub level: u8,
    pub txn_count: TxnCount,
    pub sales: Dollars,
    /// Share of total transactions, in percent.
    pub pct_txns: f64,
    /// Share of total revenue, in percent.
    pub pct_revenue: f64,
    pub avg_ticket: Dollars,
}

/// Flatten the hierarchy into the seven drill-down rows, each carrying its
/// percentage of the tree total. Zero denominators produce 0.0, never a panic.
pub fn drill_down(h: &Hierarchy) -> Vec<DrillRow> {
    let total_txns = h.total.txn_count;
    let total_sales = h.total.sales;

    let row = |name: &'static str, level: u8, txns: TxnCount, sales: Dollars| DrillRow {
        name,
        level,
        txn_count: txns,
        sales,
        pct_txns: pct_of(txns as f64, total_txns as f64),
        pct_revenue: pct_of(sales, total_sales),
        avg_ticket: ratio(sales, txns as f64),
    };

    vec![
        row("Total", 0, h.total.txn_count, h.total.sales),
        row("Grocery (Food & Non-Food)", 1, h.grocery.txn_count, h.grocery.sales),
        row("Grocery Food", 2, h.grocery_food.txn_count, h.grocery_food.sales),
        row(
            "Grocery Food (Pure)",
            3,
            h.grocery_food.pure.txn_count,
            h.grocery_food.pure.sales,
        ),
        row(
            "Grocery Food (Mixed)",
            3,
            h.grocery_food.mixed.txn_count,
            h.grocery_food.mixed.sales,
        ),
        row("Grocery (Pure)", 2, h.grocery.pure.txn_count, h.grocery.pure.sales),
        row("Grocery (Mixed)", 2, h.grocery.mixed.txn_count, h.grocery.mixed.sales),
    ]
}

fn pct_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}
