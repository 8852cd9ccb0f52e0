//! Dataset invariant tests.

use basketbridge_core::dataset::Dataset;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The embedded reference snapshot must satisfy every invariant it is the
/// fallback table for.
#[test]
fn reference_dataset_is_valid() {
    Dataset::reference().validate().expect("reference dataset should validate");
}

/// Loading from disk runs the same validation as parsing from a string.
#[test]
fn load_reads_and_validates_a_file() {
    init_logging();
    let path = std::env::temp_dir().join("basketbridge_dataset_load.json");
    let json = serde_json::to_string(&Dataset::reference()).unwrap();
    std::fs::write(&path, json).unwrap();
    let d = Dataset::load(path.to_str().unwrap()).expect("file should load and validate");
    assert_eq!(d.mix_cats.len(), Dataset::reference().mix_cats.len());
    std::fs::remove_file(&path).ok();
}

/// A missing file surfaces as a read error naming the path.
#[test]
fn load_missing_file_names_the_path() {
    init_logging();
    let err = Dataset::load("no/such/dataset.json").unwrap_err();
    assert!(
        err.to_string().contains("no/such/dataset.json"),
        "unexpected error: {err}"
    );
}

/// Transaction counts are exact: pure + mixed must equal the total.
#[test]
fn txn_counts_partition_the_total() {
    let d = Dataset::reference();
    assert_eq!(d.kpi.pure_txns + d.kpi.mixed_txns, d.kpi.total_grocery_txns);
}

/// The mixed/pure shares sum to 1 within 1e-9.
#[test]
fn pct_shares_sum_to_one() {
    let d = Dataset::reference();
    let sum = d.kpi.pct_mixed + d.kpi.pct_pure;
    assert!((sum - 1.0).abs() < 1e-9, "pctMixed + pctPure = {sum}");
}

/// A tampered count partition is rejected with the offending field named.
#[test]
fn broken_txn_partition_is_rejected() {
    let mut d = Dataset::reference();
    d.kpi.pure_txns += 1;
    let err = d.validate().unwrap_err();
    assert!(
        err.to_string().contains("totalGroceryTxns"),
        "unexpected error: {err}"
    );
}

/// Counts huge enough to overflow the partition sum are rejected like any
/// other invalid input rather than panicking.
#[test]
fn overflowing_txn_counts_are_rejected() {
    let mut d = Dataset::reference();
    d.kpi.pure_txns = u64::MAX;
    d.kpi.mixed_txns = u64::MAX;
    let err = d.validate().unwrap_err();
    assert!(
        err.to_string().contains("totalGroceryTxns"),
        "unexpected error: {err}"
    );
}

/// A child node reporting more transactions than its parent is rejected.
#[test]
fn hierarchy_child_exceeding_parent_is_rejected() {
    let mut d = Dataset::reference();
    d.hierarchy.grocery.txn_count = d.hierarchy.total.txn_count + 1;
    let err = d.validate().unwrap_err();
    assert!(err.to_string().contains("grocery"), "unexpected error: {err}");
}

/// An out-of-range share fraction is rejected.
#[test]
fn pct_outside_unit_interval_is_rejected() {
    let mut d = Dataset::reference();
    d.kpi.pct_mixed = 1.2;
    assert!(d.validate().is_err());
}

/// A category with an empty name is rejected.
#[test]
fn empty_category_name_is_rejected() {
    let mut d = Dataset::reference();
    d.mix_cats[0].name.clear();
    assert!(d.validate().is_err());
}

/// Non-exclusive incidence is a documented property: the category txn sum
/// exceeding mixedTxns must NOT be treated as a validation failure.
#[test]
fn overlapping_category_incidence_is_allowed() {
    let d = Dataset::reference();
    let cat_sum: u64 = d.mix_cats.iter().map(|c| c.mix_txns).sum();
    assert!(
        cat_sum > d.kpi.mixed_txns,
        "reference extract should overlap (sum {cat_sum} vs {})",
        d.kpi.mixed_txns
    );
    d.validate().expect("overlap must still validate");
}

/// The dataset round-trips through its JSON wire form, camelCase keys intact.
#[test]
fn json_round_trip_preserves_validity() {
    let d = Dataset::reference();
    let json = serde_json::to_string(&d).unwrap();
    assert!(json.contains("\"totalGroceryTxns\""), "expected camelCase keys");
    assert!(json.contains("\"mixCats\""));
    let parsed = Dataset::from_json(&json).expect("round-trip should validate");
    assert_eq!(parsed.kpi.total_grocery_txns, d.kpi.total_grocery_txns);
    assert_eq!(parsed.mix_cats.len(), d.mix_cats.len());
}

/// from_json rejects a payload that parses but violates an invariant.
#[test]
fn from_json_rejects_invalid_payload() {
    let mut d = Dataset::reference();
    d.kpi.mixed_txns -= 10;
    let json = serde_json::to_string(&d).unwrap();
    assert!(Dataset::from_json(&json).is_err());
}
