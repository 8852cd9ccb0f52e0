//! Shared primitive types used across the entire engine.

/// A transaction count. Counts are exact and never fractional.
pub type TxnCount = u64;

/// A unit (item) count.
pub type UnitCount = u64;

/// A dollar amount.
pub type Dollars = f64;

/// A fraction in [0, 1], e.g. the mixed share of grocery transactions.
pub type Fraction = f64;
