//! Scenario engine tests — the linear conversion-uplift model.

use basketbridge_core::dataset::Dataset;
use basketbridge_core::error::CoreError;
use basketbridge_core::scenario::simulate;

/// Reference scenario: converting 5% of pure grocery moves 580,382 txns and
/// adds ≈ $462.6k at the current uplift.
#[test]
fn five_percent_conversion_matches_reference() {
    let d = Dataset::reference();
    let out = simulate(&d.kpi, 5.0).unwrap();

    assert_eq!(out.txns_converted, 580_382);
    assert!(
        (out.incremental_sales - 462_628.0).abs() < 5.0,
        "incremental sales {}",
        out.incremental_sales
    );
}

/// A zero rate converts nothing and adds nothing.
#[test]
fn zero_rate_is_all_zero() {
    let d = Dataset::reference();
    let out = simulate(&d.kpi, 0.0).unwrap();
    assert_eq!(out.txns_converted, 0);
    assert_eq!(out.incremental_sales, 0.0);
}

/// The model is linear in the rate: doubling the rate doubles the sales
/// (up to txn rounding).
#[test]
fn incremental_sales_scale_linearly() {
    let d = Dataset::reference();
    for rate in [1.0, 2.5, 7.0, 15.0, 40.0] {
        let once = simulate(&d.kpi, rate).unwrap();
        let twice = simulate(&d.kpi, rate * 2.0).unwrap();
        let ratio = twice.incremental_sales / once.incremental_sales;
        assert!(
            (ratio - 2.0).abs() < 1e-4,
            "rate {rate}: ratio {ratio}"
        );
    }
}

/// Identical inputs yield identical output: the engine holds no state.
#[test]
fn simulate_is_idempotent() {
    let d = Dataset::reference();
    let a = simulate(&d.kpi, 12.5).unwrap();
    let b = simulate(&d.kpi, 12.5).unwrap();
    assert_eq!(a, b);
}

/// Rates outside [0, 100] are rejected as invalid parameters.
#[test]
fn out_of_range_rates_are_rejected() {
    let d = Dataset::reference();
    for rate in [-0.1, 100.1, 1e9, f64::NAN, f64::INFINITY] {
        let err = simulate(&d.kpi, rate).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidParameter(_)),
            "rate {rate}: unexpected {err}"
        );
    }
}

/// The full sanity bound is accepted even though the board slider stops at 20.
#[test]
fn boundary_rates_are_accepted() {
    let d = Dataset::reference();
    assert!(simulate(&d.kpi, 100.0).is_ok());
    let all = simulate(&d.kpi, 100.0).unwrap();
    assert_eq!(all.txns_converted, d.kpi.pure_txns);
}

/// A dataset where pure baskets out-ticket mixed ones reports a negative,
/// unclamped uplift.
#[test]
fn negative_uplift_is_reported_not_clamped() {
    let mut d = Dataset::reference();
    std::mem::swap(&mut d.kpi.avg_mixed, &mut d.kpi.avg_pure);
    let out = simulate(&d.kpi, 10.0).unwrap();
    assert!(out.incremental_sales < 0.0, "sales {}", out.incremental_sales);
}
