//! System-prompt construction for the Q&A proxy.
//!
//! The prompt text is a versioned artifact: the downstream model is sensitive
//! to exact phrasing, so field order, whitespace, and number formatting are
//! part of the contract. Change nothing here without re-validating answers.
//!
//! Callers may send a partial or malformed KPI payload. Every missing field
//! is substituted from the reference snapshot via an explicit merge step
//! ([`merge_with_reference`]), so the prompt is always numerically sane.

use crate::dataset::{CategoryMix, Dataset, MetricSet};
use crate::metrics::incidence;
use crate::types::{Dollars, Fraction, TxnCount};
use serde::Deserialize;

/// A caller-supplied KPI payload. Any subset of fields may be present;
/// the rest fall back to the reference snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialMetricSet {
    pub total_grocery_txns: Option<TxnCount>,
    pub total_grocery_sales: Option<Dollars>,
    pub pure_txns: Option<TxnCount>,
    pub pure_sales: Option<Dollars>,
    pub mixed_txns: Option<TxnCount>,
    pub mixed_sales: Option<Dollars>,
    pub pct_mixed: Option<Fraction>,
    pub pct_pure: Option<Fraction>,
    pub avg_all: Option<Dollars>,
    pub avg_pure: Option<Dollars>,
    pub avg_mixed: Option<Dollars>,
}

/// Merge a partial payload over the reference snapshot, field by field.
///
/// The reference dataset is the documented default table: any field the
/// caller omits (or nulls) takes its reference value.
pub fn merge_with_reference(partial: Option<&PartialMetricSet>) -> MetricSet {
    let mut kpi = Dataset::reference().kpi;
    let Some(p) = partial else {
        return kpi;
    };

    if let Some(v) = p.total_grocery_txns {
        kpi.total_grocery_txns = v;
    }
    if let Some(v) = p.total_grocery_sales {
        kpi.total_grocery_sales = v;
    }
    if let Some(v) = p.pure_txns {
        kpi.pure_txns = v;
    }
    if let Some(v) = p.pure_sales {
        kpi.pure_sales = v;
    }
    if let Some(v) = p.mixed_txns {
        kpi.mixed_txns = v;
    }
    if let Some(v) = p.mixed_sales {
        kpi.mixed_sales = v;
    }
    if let Some(v) = p.pct_mixed {
        kpi.pct_mixed = v;
    }
    if let Some(v) = p.pct_pure {
        kpi.pct_pure = v;
    }
    if let Some(v) = p.avg_all {
        kpi.avg_all = v;
    }
    if let Some(v) = p.avg_pure {
        kpi.avg_pure = v;
    }
    if let Some(v) = p.avg_mixed {
        kpi.avg_mixed = v;
    }
    kpi
}

/// Render the grounded system prompt for the analytics Q&A model.
///
/// Deterministic: two calls with identical input produce byte-identical text.
/// An empty `cats` slice emits an empty category section, not an error.
/// Never includes credentials or process configuration.
pub fn build_system_prompt(kpi: Option<&PartialMetricSet>, cats: &[CategoryMix]) -> String {
    let k = merge_with_reference(kpi);
    let uplift = k.avg_mixed - k.avg_pure;

    let category_section = cats
        .iter()
        .map(|c| {
            format!(
                "- {}: {} transactions ({:.1}% of mixed), ${} sales, avg ticket ${:.2}",
                c.name,
                group_thousands(c.mix_txns),
                incidence(c.mix_txns, k.mixed_txns),
                group_dollars(c.mix_sales),
                c.avg_ticket
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a retail analytics expert analyzing grocery basket data. You have access to the following key metrics:

Key Performance Indicators:
- Total grocery transactions: {total_txns}
- Total grocery sales: ${total_sales}
- Mixed grocery transactions: {mixed_txns} ({pct_mixed:.1}% of total)
- Mixed grocery sales: ${mixed_sales}
- Pure grocery transactions: {pure_txns} ({pct_pure:.1}% of total)
- Pure grocery sales: ${pure_sales}

Average Ticket Analysis:
- Overall average ticket: ${avg_all:.2}
- Mixed basket average ticket: ${avg_mixed:.2}
- Pure grocery average ticket: ${avg_pure:.2}
- Mixed basket uplift: ${uplift:.2}

Category Mix Analysis (Non-exclusive incidence):
{category_section}

Provide strategic insights and analysis based on this data. Focus on business opportunities, conversion strategies, and actionable recommendations.",
        total_txns = group_thousands(k.total_grocery_txns),
        total_sales = group_dollars(k.total_grocery_sales),
        mixed_txns = group_thousands(k.mixed_txns),
        pct_mixed = k.pct_mixed * 100.0,
        mixed_sales = group_dollars(k.mixed_sales),
        pure_txns = group_thousands(k.pure_txns),
        pct_pure = k.pct_pure * 100.0,
        pure_sales = group_dollars(k.pure_sales),
        avg_all = k.avg_all,
        avg_mixed = k.avg_mixed,
        avg_pure = k.avg_pure,
        uplift = uplift,
    )
}

/// Format a count with thousands separators: 24745410 → "24,745,410".
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a dollar amount as a grouped whole number. Sales figures in the
/// prompt are rounded to the dollar; tickets keep their cents elsewhere.
fn group_dollars(v: f64) -> String {
    if v < 0.0 {
        format!("-{}", group_thousands((-v).round() as u64))
    } else {
        group_thousands(v.round() as u64)
    }
}
