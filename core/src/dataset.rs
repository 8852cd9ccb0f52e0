//! The board dataset: KPI snapshot, category mix, and transaction hierarchy.
//!
//! Everything here is constructed once at process start (from a JSON file or
//! the embedded reference snapshot) and read-only afterwards. Field names on
//! the wire are camelCase to match the dashboard payload contract.

use crate::error::{CoreError, CoreResult};
use crate::types::{Dollars, Fraction, TxnCount, UnitCount};
use serde::{Deserialize, Serialize};

/// Tolerance for dollar-sum invariants (pure + mixed == total).
const SALES_EPSILON: f64 = 0.01;

/// Tolerance for fraction-sum invariants (pctMixed + pctPure == 1).
const FRACTION_EPSILON: f64 = 1e-9;

/// Tolerance when checking that stored averages match sales / txns.
const AVG_EPSILON: f64 = 1e-6;

/// The top-level KPI snapshot for the grocery segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    pub total_grocery_txns: TxnCount,
    pub total_grocery_sales: Dollars,
    pub pure_txns: TxnCount,
    pub pure_sales: Dollars,
    pub mixed_txns: TxnCount,
    pub mixed_sales: Dollars,
    pub pct_mixed: Fraction,
    pub pct_pure: Fraction,
    pub avg_all: Dollars,
    pub avg_pure: Dollars,
    pub avg_mixed: Dollars,
}

/// One category's incidence within mixed baskets.
///
/// Incidence is non-exclusive: a transaction can include several categories,
/// so the sum of `mix_txns` across entries may exceed `MetricSet::mixed_txns`.
/// That is a property of the extract, not a defect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMix {
    pub name: String,
    pub mix_txns: TxnCount,
    pub mix_sales: Dollars,
    pub avg_ticket: Dollars,
}

/// Raw totals at one node of the transaction hierarchy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTotals {
    pub txn_count: TxnCount,
    pub sales: Dollars,
    pub units: UnitCount,
}

/// Sales and units attached to a mixed basket from outside the segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedTotals {
    pub sales: Dollars,
    pub units: UnitCount,
}

/// The mixed half of a segment, with its attachment block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedNode {
    pub txn_count: TxnCount,
    pub sales: Dollars,
    pub units: UnitCount,
    pub other_categories: AttachedTotals,
}

/// A grocery-level segment split into pure and mixed halves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentNode {
    pub txn_count: TxnCount,
    pub sales: Dollars,
    pub units: UnitCount,
    pub pure: NodeTotals,
    pub mixed: MixedNode,
}

/// The four-level transaction hierarchy:
/// total → grocery → grocery food, with pure/mixed splits per segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hierarchy {
    pub total: NodeTotals,
    pub grocery: SegmentNode,
    pub grocery_food: SegmentNode,
}

/// The complete immutable dataset the engine runs on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub kpi: MetricSet,
    pub mix_cats: Vec<CategoryMix>,
    pub hierarchy: Hierarchy,
}

impl Dataset {
    /// Load and validate a dataset from a JSON file.
    pub fn load(path: &str) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::DatasetRead {
            path: path.to_string(),
            source: e,
        })?;
        let dataset = Self::from_json(&content)?;
        log::debug!(
            "Loaded dataset from {path}: {} mix categories",
            dataset.mix_cats.len()
        );
        Ok(dataset)
    }

    /// Parse and validate a dataset from a JSON string.
    pub fn from_json(content: &str) -> CoreResult<Self> {
        let dataset: Dataset = serde_json::from_str(content)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check every structural invariant. Returns the first violation found,
    /// naming the offending field.
    pub fn validate(&self) -> CoreResult<()> {
        let k = &self.kpi;

        // checked_add: an overflowing partition sum is just another invalid
        // input, not a panic.
        if k.pure_txns.checked_add(k.mixed_txns) != Some(k.total_grocery_txns) {
            return Err(invalid(format!(
                "pureTxns = {} + mixedTxns = {} does not equal totalGroceryTxns = {}",
                k.pure_txns, k.mixed_txns, k.total_grocery_txns
            )));
        }

        let sales_sum = k.pure_sales + k.mixed_sales;
        if (sales_sum - k.total_grocery_sales).abs() > SALES_EPSILON {
            return Err(invalid(format!(
                "pureSales + mixedSales = {sales_sum} does not equal totalGrocerySales = {}",
                k.total_grocery_sales
            )));
        }

        for (label, v) in [("pctMixed", k.pct_mixed), ("pctPure", k.pct_pure)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(invalid(format!("{label} = {v} outside [0, 1]")));
            }
        }
        if (k.pct_mixed + k.pct_pure - 1.0).abs() > FRACTION_EPSILON {
            return Err(invalid(format!(
                "pctMixed + pctPure = {} does not sum to 1",
                k.pct_mixed + k.pct_pure
            )));
        }

        for (label, sales, txns, avg) in [
            ("avgAll", k.total_grocery_sales, k.total_grocery_txns, k.avg_all),
            ("avgPure", k.pure_sales, k.pure_txns, k.avg_pure),
            ("avgMixed", k.mixed_sales, k.mixed_txns, k.avg_mixed),
        ] {
            if txns > 0 && (avg - sales / txns as f64).abs() > AVG_EPSILON {
                return Err(invalid(format!(
                    "{label} = {avg} does not equal sales / txns = {}",
                    sales / txns as f64
                )));
            }
        }

        for cat in &self.mix_cats {
            if cat.name.is_empty() {
                return Err(invalid("category with empty name".to_string()));
            }
            if cat.mix_sales < 0.0 || cat.avg_ticket < 0.0 {
                return Err(invalid(format!("category '{}' has negative dollars", cat.name)));
            }
        }

        self.validate_hierarchy()
    }

    fn validate_hierarchy(&self) -> CoreResult<()> {
        let h = &self.hierarchy;

        check_child("grocery", h.grocery.txn_count, h.grocery.sales, &h.total)?;
        let grocery_totals = NodeTotals {
            txn_count: h.grocery.txn_count,
            sales: h.grocery.sales,
            units: h.grocery.units,
        };
        check_child(
            "groceryFood",
            h.grocery_food.txn_count,
            h.grocery_food.sales,
            &grocery_totals,
        )?;

        for (label, seg) in [("grocery", &h.grocery), ("groceryFood", &h.grocery_food)] {
            let parent = NodeTotals {
                txn_count: seg.txn_count,
                sales: seg.sales,
                units: seg.units,
            };
            check_child(&format!("{label}.pure"), seg.pure.txn_count, seg.pure.sales, &parent)?;
            check_child(&format!("{label}.mixed"), seg.mixed.txn_count, seg.mixed.sales, &parent)?;
        }
        Ok(())
    }

    /// The embedded reference snapshot (cleaned extract from the board CSV).
    ///
    /// This is the fallback table the prompt builder merges partial payloads
    /// over, and the fixture every test runs against.
    pub fn reference() -> Self {
        Dataset {
            kpi: MetricSet {
                total_grocery_txns: 24_745_410,
                total_grocery_sales: 508_220_881.0,
                pure_txns: 11_607_631,
                pure_sales: 233_485_016.0,
                mixed_txns: 13_137_779,
                mixed_sales: 274_735_865.0,
                pct_mixed: 0.530_917_814_657_344_6,
                pct_pure: 0.469_082_185_342_655_44,
                avg_all: 20.537_985_872_935_63,
                avg_pure: 20.114_786_212_621_68,
                avg_mixed: 20.911_895_762_594_27,
            },
            mix_cats: vec![
                CategoryMix {
                    name: "Home & Garden".into(),
                    mix_txns: 6_322_479,
                    mix_sales: 189_188_916.0,
                    avg_ticket: 29.923_217_775_812_304,
                },
                CategoryMix {
                    name: "Apparel, Footwear & Acc".into(),
                    mix_txns: 5_651_598,
                    mix_sales: 181_052_443.0,
                    avg_ticket: 32.035_619_483_197_49,
                },
                CategoryMix {
                    name: "Leisure, Tech & Play".into(),
                    mix_txns: 4_580_373,
                    mix_sales: 134_103_224.0,
                    avg_ticket: 29.277_795_498_314_22,
                },
                CategoryMix {
                    name: "Work, Study & Create".into(),
                    mix_txns: 881_694,
                    mix_sales: 12_393_643.0,
                    avg_ticket: 14.056_626_221_795_77,
                },
                CategoryMix {
                    name: "Grocery & Celebrations (outside)".into(),
                    mix_txns: 1_120_853,
                    mix_sales: 12_601_983.0,
                    avg_ticket: 11.243_207_628_475_812,
                },
            ],
            hierarchy: Hierarchy {
                total: NodeTotals {
                    txn_count: 42_300_301,
                    sales: 1_796_953_852.0,
                    units: 196_328_020,
                },
                grocery: SegmentNode {
                    txn_count: 24_745_410,
                    sales: 508_220_881.0,
                    units: 97_386_655,
                    pure: NodeTotals {
                        txn_count: 11_607_631,
                        sales: 233_485_016.0,
                        units: 44_660_976,
                    },
                    mixed: MixedNode {
                        txn_count: 13_137_779,
                        sales: 274_735_865.0,
                        units: 52_725_679,
                        other_categories: AttachedTotals {
                            sales: 529_328_107.0,
                            units: 48_211_097,
                        },
                    },
                },
                grocery_food: SegmentNode {
                    txn_count: 19_178_280,
                    sales: 279_842_307.0,
                    units: 67_548_565,
                    pure: NodeTotals {
                        txn_count: 6_687_892,
                        sales: 87_856_720.0,
                        units: 21_018_278,
                    },
                    mixed: MixedNode {
                        txn_count: 12_490_388,
                        sales: 191_985_587.0,
                        units: 46_530_287,
                        other_categories: AttachedTotals {
                            sales: 529_081_628.0,
                            units: 54_524_667,
                        },
                    },
                },
            },
        }
    }
}

fn invalid(msg: String) -> CoreError {
    CoreError::InvalidDataset(msg)
}

fn check_child(label: &str, txns: TxnCount, sales: Dollars, parent: &NodeTotals) -> CoreResult<()> {
    if txns > parent.txn_count {
        return Err(invalid(format!(
            "{label}.txnCount = {txns} exceeds parent's {}",
            parent.txn_count
        )));
    }
    if sales > parent.sales + SALES_EPSILON {
        return Err(invalid(format!(
            "{label}.sales = {sales} exceeds parent's {}",
            parent.sales
        )));
    }
    Ok(())
}
